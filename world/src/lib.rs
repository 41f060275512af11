#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Word Defence.
//!
//! The world owns every mutable piece of a session: the entity pool, the
//! typing lock, wave bookkeeping, and the HUD scalars. All mutation flows
//! through [`apply`], which executes one [`Command`] and broadcasts the
//! resulting [`Event`] values for systems to react to deterministically.

use std::time::Duration;

use word_defence_core::{
    Command, EnemyId, Event, FieldPoint, Phase, SessionReport, SessionRules, Word, WELCOME_BANNER,
};

mod combat;
mod entities;
mod typing;

use entities::{Enemy, Particle, Projectile};
use typing::{KeyOutcome, TypingLock};

/// Fixed seed for the cosmetic particle scatter; replays stay bit-identical.
const SCATTER_SEED: u64 = 0x7a3d_91c4_55e0_2b17;

/// Represents the authoritative Word Defence session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    rules: SessionRules,
    phase: Phase,
    countdown_remaining: Duration,
    game_time: Duration,
    score: u32,
    lives: u32,
    combo: u32,
    max_combo: u32,
    bombs: u32,
    typed_total: u32,
    typed_correct: u32,
    wave_number: u32,
    wave_spawned: u32,
    wave_destroyed: u32,
    words_destroyed_total: u32,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    particles: Vec<Particle>,
    lock: TypingLock,
    next_enemy_id: u32,
    scatter_state: u64,
}

impl World {
    /// Creates a new world with default rules, idling in the menu.
    #[must_use]
    pub fn new() -> Self {
        let mut world = Self {
            banner: WELCOME_BANNER,
            rules: SessionRules::default(),
            phase: Phase::Menu,
            countdown_remaining: Duration::ZERO,
            game_time: Duration::ZERO,
            score: 0,
            lives: 0,
            combo: 0,
            max_combo: 0,
            bombs: 0,
            typed_total: 0,
            typed_correct: 0,
            wave_number: 1,
            wave_spawned: 0,
            wave_destroyed: 0,
            words_destroyed_total: 0,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            lock: TypingLock::default(),
            next_enemy_id: 0,
            scatter_state: SCATTER_SEED,
        };
        world.reset_session();
        world
    }

    fn reset_session(&mut self) {
        self.countdown_remaining = Duration::ZERO;
        self.game_time = Duration::ZERO;
        self.score = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.typed_total = 0;
        self.typed_correct = 0;
        self.lives = self.rules.loadout().lives();
        self.bombs = self.rules.loadout().bombs();
        self.wave_number = 1;
        self.wave_spawned = 0;
        self.wave_destroyed = 0;
        self.words_destroyed_total = 0;
        self.enemies.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.lock.release();
        self.next_enemy_id = 0;
        self.scatter_state = SCATTER_SEED;
    }

    fn set_phase(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn report(&self) -> SessionReport {
        SessionReport {
            score: self.score,
            wave_reached: self.wave_number,
            words_destroyed: self.words_destroyed_total,
            max_combo: self.max_combo,
            accuracy: combat::accuracy_percent(self.typed_correct, self.typed_total),
        }
    }

    fn start_session(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Menu {
            return;
        }

        self.reset_session();
        if self.rules.countdown().is_zero() {
            self.set_phase(Phase::Playing, out_events);
        } else {
            self.countdown_remaining = self.rules.countdown();
            self.set_phase(Phase::Countdown, out_events);
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        match self.phase {
            Phase::Countdown => {
                if dt >= self.countdown_remaining {
                    self.countdown_remaining = Duration::ZERO;
                    self.set_phase(Phase::Playing, out_events);
                } else {
                    self.countdown_remaining -= dt;
                }
            }
            Phase::Playing => self.tick_playing(dt, out_events),
            Phase::Menu | Phase::Paused | Phase::GameOver => {}
        }
    }

    fn tick_playing(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.game_time = self.game_time.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        for enemy in &mut self.enemies {
            enemy.fall(dt);
        }

        let field = self.rules.field();
        let breached: Vec<EnemyId> = self
            .enemies
            .iter()
            .filter(|enemy| enemy.has_breached(field))
            .map(|enemy| enemy.id)
            .collect();
        for enemy in breached {
            self.resolve_breach(enemy, out_events);
        }

        for projectile in &mut self.projectiles {
            projectile.advance(dt);
        }
        self.projectiles.retain(|projectile| projectile.in_bounds(field));

        for particle in &mut self.particles {
            particle.advance(dt);
        }
        self.particles.retain(Particle::is_alive);

        if self.lives == 0 && self.phase == Phase::Playing {
            self.set_phase(Phase::GameOver, out_events);
            out_events.push(Event::SessionEnded {
                report: self.report(),
            });
        }
    }

    fn resolve_breach(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let Some(index) = self.enemies.iter().position(|candidate| candidate.id == enemy) else {
            return;
        };
        let victim = self.enemies.remove(index);

        self.lives = self.lives.saturating_sub(1);
        self.combo = 0;
        if self.lock.target() == Some(enemy) {
            self.lock.release();
        }
        combat::spawn_burst(
            &mut self.particles,
            &mut self.scatter_state,
            victim.position(),
            combat::IMPACT_COLOR,
            combat::IMPACT_BURST,
        );
        out_events.push(Event::EnemyBreached {
            enemy,
            lives_remaining: self.lives,
        });
    }

    fn press_key(&mut self, raw: char, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Playing || !raw.is_ascii_alphabetic() {
            return;
        }
        let key = raw.to_ascii_uppercase();
        self.typed_total = self.typed_total.saturating_add(1);

        match self.lock.resolve(key, &mut self.enemies) {
            KeyOutcome::Hit { enemy, prefix } => {
                self.typed_correct = self.typed_correct.saturating_add(1);
                self.fire_projectile_at(enemy);
                out_events.push(Event::KeyHit { enemy, prefix });
            }
            KeyOutcome::Completed { enemy } => {
                self.typed_correct = self.typed_correct.saturating_add(1);
                self.fire_projectile_at(enemy);
                self.destroy_completed(enemy, out_events);
            }
            KeyOutcome::Miss => {
                self.combo = 0;
                out_events.push(Event::KeyMissed { key });
            }
        }
    }

    fn destroy_completed(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let Some(index) = self.enemies.iter().position(|candidate| candidate.id == enemy) else {
            return;
        };
        let victim = self.enemies.remove(index);
        let word_length = victim.word.len();
        let position = victim.position();

        let award = combat::word_award(word_length, self.combo, self.rules.scoring());
        self.score = self.score.saturating_add(award);
        self.combo = self.combo.saturating_add(1);
        self.max_combo = self.max_combo.max(self.combo);
        self.wave_destroyed = self.wave_destroyed.saturating_add(1);
        self.words_destroyed_total = self.words_destroyed_total.saturating_add(1);

        combat::spawn_burst(
            &mut self.particles,
            &mut self.scatter_state,
            position,
            combat::DESTRUCTION_COLOR,
            combat::DESTRUCTION_BURST,
        );

        out_events.push(Event::KeyHit {
            enemy,
            prefix: word_length,
        });
        out_events.push(Event::WordCompleted {
            enemy,
            word_length,
            position,
            award,
        });
    }

    fn fire_projectile_at(&mut self, enemy: EnemyId) {
        let Some(target) = self
            .enemies
            .iter()
            .find(|candidate| candidate.id == enemy)
            .map(Enemy::position)
        else {
            return;
        };
        let field = self.rules.field();
        let origin = FieldPoint::new(field.width() / 2.0, field.height());
        self.projectiles.push(Projectile::aimed_at(origin, target));
    }

    fn detonate_bomb(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Playing || self.bombs == 0 {
            return;
        }

        self.bombs -= 1;
        let removed = std::mem::take(&mut self.enemies);
        let destroyed = removed.len() as u32;
        let mut total_award = 0u32;

        for victim in removed {
            let award = combat::word_award(victim.word.len(), self.combo, self.rules.scoring());
            total_award = total_award.saturating_add(award);
            self.score = self.score.saturating_add(award);
            self.wave_destroyed = self.wave_destroyed.saturating_add(1);
            self.words_destroyed_total = self.words_destroyed_total.saturating_add(1);
            combat::spawn_burst(
                &mut self.particles,
                &mut self.scatter_state,
                victim.position(),
                combat::BOMB_COLOR,
                combat::BOMB_BURST,
            );
        }

        self.lock.release();
        out_events.push(Event::BombDetonated {
            destroyed,
            award: total_award,
        });
    }

    fn spawn_enemy(&mut self, word: Word, x: f32, speed: f32, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Playing {
            return;
        }
        // Quota pacing belongs to the spawn scheduler; the world only
        // enforces the hard pool bound.
        let live = self.enemies.len() as u32;
        if live >= self.rules.spawn().max_live() {
            return;
        }

        let x = x.clamp(0.0, self.rules.field().width());
        let speed = speed.max(1.0);
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.saturating_add(1);
        self.enemies.push(Enemy::new(id, word, x, speed));
        self.wave_spawned = self.wave_spawned.saturating_add(1);
        out_events.push(Event::EnemySpawned { enemy: id, x });
    }

    fn advance_wave(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Playing {
            return;
        }
        let quota = self.rules.waves().quota(self.wave_number);
        if self.wave_destroyed < quota || !self.enemies.is_empty() {
            return;
        }

        let completed = self.wave_number;
        self.wave_number = self.wave_number.saturating_add(1);
        self.wave_spawned = 0;
        self.wave_destroyed = 0;
        let bonus_bomb = completed % self.rules.waves().bomb_award_period() == 0;
        if bonus_bomb {
            self.bombs = self.bombs.saturating_add(1);
        }
        out_events.push(Event::WaveCleared {
            completed,
            next: self.wave_number,
            bonus_bomb,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureSession { rules } => {
            world.rules = rules;
            world.reset_session();
            world.set_phase(Phase::Menu, out_events);
        }
        Command::StartSession => world.start_session(out_events),
        Command::PauseSession => {
            if world.phase == Phase::Playing {
                world.set_phase(Phase::Paused, out_events);
            }
        }
        Command::ResumeSession => {
            if world.phase == Phase::Paused {
                world.set_phase(Phase::Playing, out_events);
            }
        }
        Command::AcknowledgeGameOver => {
            if world.phase == Phase::GameOver {
                world.reset_session();
                world.set_phase(Phase::Menu, out_events);
            }
        }
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::PressKey { key } => world.press_key(key, out_events),
        Command::TriggerBomb => world.detonate_bomb(out_events),
        Command::SpawnEnemy { word, x, speed } => world.spawn_enemy(word, x, speed, out_events),
        Command::AdvanceWave => world.advance_wave(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use word_defence_core::{
        EnemySnapshot, EnemyView, FieldSize, HudSnapshot, ParticleSnapshot, Phase,
        ProjectileSnapshot, SessionRules, TypingTargetSnapshot, WaveSnapshot,
    };

    use super::combat;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Phase the session currently occupies.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Rule aggregate the session is running under.
    #[must_use]
    pub fn rules(world: &World) -> SessionRules {
        world.rules
    }

    /// Play field dimensions.
    #[must_use]
    pub fn field(world: &World) -> FieldSize {
        world.rules.field()
    }

    /// Accumulated simulated play time; pauses and countdowns are excluded.
    #[must_use]
    pub fn game_time(world: &World) -> Duration {
        world.game_time
    }

    /// Scalars presented on the heads-up display.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        HudSnapshot {
            score: world.score,
            wave: world.wave_number,
            lives: world.lives,
            bombs: world.bombs,
            combo: world.combo,
            accuracy: combat::accuracy_percent(world.typed_correct, world.typed_total),
        }
    }

    /// Wave bookkeeping consumed by the spawn scheduler and wave controller.
    #[must_use]
    pub fn wave_view(world: &World) -> WaveSnapshot {
        let waves = world.rules.waves();
        WaveSnapshot {
            number: world.wave_number,
            spawned: world.wave_spawned,
            destroyed: world.wave_destroyed,
            quota: waves.quota(world.wave_number),
            spawn_interval: waves.spawn_interval(world.wave_number),
        }
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                word: enemy.word.clone(),
                typed: enemy.typed,
                position: enemy.position(),
                speed: enemy.speed,
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures the live projectiles in pool order.
    #[must_use]
    pub fn projectile_view(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                position: projectile.position(),
                trail: projectile.trail().collect(),
            })
            .collect()
    }

    /// Captures the live particles in pool order.
    #[must_use]
    pub fn particle_view(world: &World) -> Vec<ParticleSnapshot> {
        world
            .particles
            .iter()
            .map(|particle| ParticleSnapshot {
                position: particle.position(),
                color: particle.color,
                life: particle.life.max(0.0),
            })
            .collect()
    }

    /// Currently locked typing target, if any.
    #[must_use]
    pub fn typing_target(world: &World) -> Option<TypingTargetSnapshot> {
        let enemy = world.lock.target()?;
        let prefix = world
            .enemies
            .iter()
            .find(|candidate| candidate.id == enemy)
            .map(|candidate| candidate.typed)?;
        Some(TypingTargetSnapshot { enemy, prefix })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use word_defence_core::{
        FieldSize, ScoringRules, SessionRules, SpawnTuning, SpeedCurve, StartingLoadout, WaveRules,
    };

    fn word(text: &str) -> Word {
        Word::sanitize(text).expect("test word")
    }

    fn playing_world() -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::StartSession, &mut events);
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(3),
            },
            &mut events,
        );
        assert_eq!(query::phase(&world), Phase::Playing);
        world
    }

    fn configured_playing_world(rules: SessionRules) -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::ConfigureSession { rules }, &mut events);
        apply(&mut world, Command::StartSession, &mut events);
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(10),
            },
            &mut events,
        );
        assert_eq!(query::phase(&world), Phase::Playing);
        world
    }

    fn rules_with(loadout: StartingLoadout, waves: WaveRules, spawn: SpawnTuning) -> SessionRules {
        SessionRules::new(
            FieldSize::default(),
            ScoringRules::default(),
            waves,
            spawn,
            SpeedCurve::default(),
            loadout,
            Duration::from_secs(1),
        )
    }

    fn spawn(world: &mut World, text: &str, x: f32, speed: f32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnEnemy {
                word: word(text),
                x,
                speed,
            },
            &mut events,
        );
        events
    }

    fn press(world: &mut World, key: char) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::PressKey { key }, &mut events);
        events
    }

    fn type_word(world: &mut World, text: &str) -> Vec<Event> {
        let mut events = Vec::new();
        for key in text.chars() {
            events.extend(press(world, key));
        }
        events
    }

    #[test]
    fn new_world_idles_in_menu() {
        let world = World::new();
        assert_eq!(query::phase(&world), Phase::Menu);
        let hud = query::hud(&world);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.lives, 3);
        assert_eq!(hud.bombs, 2);
        assert_eq!(hud.wave, 1);
        assert_eq!(hud.accuracy, 100);
    }

    #[test]
    fn start_session_counts_down_into_playing() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::StartSession, &mut events);
        assert_eq!(query::phase(&world), Phase::Countdown);
        assert_eq!(
            events,
            vec![Event::PhaseChanged {
                phase: Phase::Countdown,
            }],
        );

        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
            &mut events,
        );
        assert_eq!(query::phase(&world), Phase::Countdown);
        assert!(events.is_empty(), "countdown ticks emit nothing until zero");

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(2),
            },
            &mut events,
        );
        assert_eq!(query::phase(&world), Phase::Playing);
        assert_eq!(
            events,
            vec![Event::PhaseChanged {
                phase: Phase::Playing,
            }],
        );
    }

    #[test]
    fn input_outside_playing_is_ignored() {
        let mut world = World::new();
        assert!(press(&mut world, 'C').is_empty());
        assert_eq!(query::hud(&world).accuracy, 100);

        let mut events = Vec::new();
        apply(&mut world, Command::StartSession, &mut events);
        assert!(press(&mut world, 'C').is_empty(), "countdown ignores input");
        assert!(spawn(&mut world, "CAT", 100.0, 30.0).is_empty());
        assert!(query::enemy_view(&world).is_empty());
    }

    #[test]
    fn non_alphabetic_input_never_counts() {
        let mut world = playing_world();
        let _ = spawn(&mut world, "CAT", 100.0, 30.0);
        assert!(press(&mut world, '3').is_empty());
        assert!(press(&mut world, ' ').is_empty());
        assert_eq!(query::hud(&world).accuracy, 100);
    }

    #[test]
    fn typing_a_word_awards_score_and_removes_the_enemy() {
        let mut world = playing_world();
        let _ = spawn(&mut world, "CAT", 100.0, 30.0);

        let events = type_word(&mut world, "cat");
        let hud = query::hud(&world);
        assert_eq!(hud.score, 30);
        assert_eq!(hud.combo, 1);
        assert!(query::enemy_view(&world).is_empty());
        assert_eq!(query::projectile_view(&world).len(), 3);
        assert_eq!(query::wave_view(&world).destroyed, 1);
        assert!(events.iter().any(|event| matches!(
            event,
            Event::WordCompleted {
                word_length: 3,
                award: 30,
                ..
            }
        )));
    }

    #[test]
    fn first_letter_locks_exactly_one_of_two_candidates() {
        let mut world = playing_world();
        let _ = spawn(&mut world, "SUN", 100.0, 30.0);
        let _ = spawn(&mut world, "SKY", 300.0, 30.0);

        let _ = press(&mut world, 'S');

        let target = query::typing_target(&world).expect("a target is locked");
        assert_eq!(target.enemy, EnemyId::new(0), "lowest id wins the tie");
        assert_eq!(target.prefix, 1);
        let prefixed = query::enemy_view(&world)
            .iter()
            .filter(|enemy| enemy.typed > 0)
            .count();
        assert_eq!(prefixed, 1);
    }

    #[test]
    fn wrong_key_resets_combo_but_keeps_the_target() {
        let mut world = playing_world();
        let _ = spawn(&mut world, "CAT", 100.0, 30.0);
        let _ = type_word(&mut world, "CAT");
        assert_eq!(query::hud(&world).combo, 1);

        let _ = spawn(&mut world, "DOG", 200.0, 30.0);
        let _ = press(&mut world, 'D');
        let miss = press(&mut world, 'X');
        assert_eq!(miss, vec![Event::KeyMissed { key: 'X' }]);
        assert_eq!(query::hud(&world).combo, 0);

        let target = query::typing_target(&world).expect("target survives the miss");
        assert_eq!(target.prefix, 1);

        let _ = press(&mut world, 'O');
        let target = query::typing_target(&world).expect("target still locked");
        assert_eq!(target.prefix, 2);
        // 5 correct keystrokes out of 6.
        assert_eq!(query::hud(&world).accuracy, 83);
    }

    #[test]
    fn breach_costs_a_life_and_clears_the_lock() {
        let mut world = playing_world();
        let _ = spawn(&mut world, "ZEBRA", 100.0, 600.0);
        let _ = press(&mut world, 'Z');
        assert!(query::typing_target(&world).is_some());

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(1100),
            },
            &mut events,
        );

        assert!(events.iter().any(|event| matches!(
            event,
            Event::EnemyBreached {
                lives_remaining: 2,
                ..
            }
        )));
        let hud = query::hud(&world);
        assert_eq!(hud.lives, 2);
        assert_eq!(hud.combo, 0);
        assert!(query::enemy_view(&world).is_empty());
        assert_eq!(query::typing_target(&world), None);

        // The escaped word is gone; its letters now miss.
        let miss = press(&mut world, 'Z');
        assert_eq!(miss, vec![Event::KeyMissed { key: 'Z' }]);
    }

    #[test]
    fn losing_the_last_life_ends_the_session_with_a_report() {
        let rules = rules_with(
            StartingLoadout::new(1, 0),
            WaveRules::default(),
            SpawnTuning::default(),
        );
        let mut world = configured_playing_world(rules);
        let _ = spawn(&mut world, "CAT", 100.0, 30.0);
        let _ = type_word(&mut world, "CAT");
        let _ = spawn(&mut world, "DOG", 200.0, 600.0);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(1100),
            },
            &mut events,
        );

        assert_eq!(query::phase(&world), Phase::GameOver);
        let report = events
            .iter()
            .find_map(|event| match event {
                Event::SessionEnded { report } => Some(*report),
                _ => None,
            })
            .expect("session report emitted");
        assert_eq!(report.score, 30);
        assert_eq!(report.wave_reached, 1);
        assert_eq!(report.words_destroyed, 1);
        assert_eq!(report.max_combo, 1);
        assert_eq!(report.accuracy, 100);

        // Terminal: further ticks and input are inert.
        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert!(press(&mut world, 'A').is_empty());
    }

    #[test]
    fn acknowledging_game_over_resets_for_a_fresh_session() {
        let rules = rules_with(
            StartingLoadout::new(1, 2),
            WaveRules::default(),
            SpawnTuning::default(),
        );
        let mut world = configured_playing_world(rules);
        let _ = spawn(&mut world, "DOG", 200.0, 600.0);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(1100),
            },
            &mut events,
        );
        assert_eq!(query::phase(&world), Phase::GameOver);

        events.clear();
        apply(&mut world, Command::AcknowledgeGameOver, &mut events);
        assert_eq!(query::phase(&world), Phase::Menu);

        apply(&mut world, Command::StartSession, &mut events);
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(2),
            },
            &mut events,
        );
        assert_eq!(query::phase(&world), Phase::Playing);
        let hud = query::hud(&world);
        assert_eq!(hud.wave, 1);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.combo, 0);
        assert_eq!(hud.lives, 1);
        assert_eq!(hud.bombs, 2);
        assert!(query::enemy_view(&world).is_empty());
    }

    #[test]
    fn bomb_without_charges_is_a_silent_noop() {
        let rules = rules_with(
            StartingLoadout::new(3, 0),
            WaveRules::default(),
            SpawnTuning::default(),
        );
        let mut world = configured_playing_world(rules);
        let _ = spawn(&mut world, "CAT", 100.0, 30.0);

        let mut events = Vec::new();
        apply(&mut world, Command::TriggerBomb, &mut events);

        assert!(events.is_empty());
        assert_eq!(query::enemy_view(&world).len(), 1);
        let hud = query::hud(&world);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.bombs, 0);
        assert_eq!(hud.combo, 0);
    }

    #[test]
    fn bomb_clears_the_field_and_scores_every_word() {
        let mut world = playing_world();
        let _ = spawn(&mut world, "CAT", 100.0, 30.0);
        let _ = spawn(&mut world, "SUN", 300.0, 30.0);
        let _ = press(&mut world, 'C');

        let mut events = Vec::new();
        apply(&mut world, Command::TriggerBomb, &mut events);

        assert_eq!(
            events,
            vec![Event::BombDetonated {
                destroyed: 2,
                award: 60,
            }],
        );
        assert!(query::enemy_view(&world).is_empty());
        assert_eq!(query::typing_target(&world), None);
        let hud = query::hud(&world);
        assert_eq!(hud.score, 60);
        assert_eq!(hud.bombs, 1);
        assert_eq!(query::wave_view(&world).destroyed, 2);
        assert!(!query::particle_view(&world).is_empty());
    }

    #[test]
    fn spawns_respect_the_live_concurrency_cap() {
        let rules = rules_with(
            StartingLoadout::default(),
            WaveRules::new(
                50,
                0,
                Duration::from_millis(2000),
                Duration::from_millis(100),
                Duration::from_millis(500),
                3,
            ),
            SpawnTuning::new(3, 0.0, 4, 0.0),
        );
        let mut world = configured_playing_world(rules);
        for index in 0..5 {
            let _ = spawn(&mut world, "CAT", 50.0 + index as f32 * 60.0, 30.0);
        }
        assert_eq!(query::enemy_view(&world).len(), 3);
    }

    #[test]
    fn spawn_clamps_position_and_speed() {
        let mut world = playing_world();
        let _ = spawn(&mut world, "CAT", -50.0, -10.0);
        let _ = spawn(&mut world, "DOG", 10_000.0, 30.0);

        let snapshots = query::enemy_view(&world).into_vec();
        assert_eq!(snapshots[0].position.x(), 0.0);
        assert!(snapshots[0].speed >= 1.0);
        assert_eq!(snapshots[1].position.x(), query::field(&world).width());
    }

    #[test]
    fn wave_advances_only_when_quota_met_and_field_clear() {
        let rules = rules_with(
            StartingLoadout::default(),
            WaveRules::new(
                2,
                0,
                Duration::from_millis(2000),
                Duration::from_millis(100),
                Duration::from_millis(500),
                3,
            ),
            SpawnTuning::default(),
        );
        let mut world = configured_playing_world(rules);
        let _ = spawn(&mut world, "CAT", 100.0, 30.0);
        let _ = spawn(&mut world, "DOG", 300.0, 30.0);
        let _ = type_word(&mut world, "CAT");
        let _ = type_word(&mut world, "DOG");
        assert_eq!(query::wave_view(&world).destroyed, 2);

        // Quota met but an extra enemy still on screen: no advance. The
        // spawned counter reset means the next wave re-spawns from zero.
        let mut world_with_straggler = configured_playing_world(rules);
        let _ = spawn(&mut world_with_straggler, "CAT", 100.0, 30.0);
        let _ = spawn(&mut world_with_straggler, "DOG", 300.0, 30.0);
        let _ = type_word(&mut world_with_straggler, "CAT");
        let _ = type_word(&mut world_with_straggler, "DOG");
        // Wave 1 quota is 2; both destroyed, now raise a straggler by
        // advancing and spawning before the controller reacts.
        let mut events = Vec::new();
        apply(&mut world_with_straggler, Command::AdvanceWave, &mut events);
        assert_eq!(query::wave_view(&world_with_straggler).number, 2);

        let _ = spawn(&mut world_with_straggler, "OWL", 200.0, 30.0);
        events.clear();
        apply(&mut world_with_straggler, Command::AdvanceWave, &mut events);
        assert!(events.is_empty(), "live enemy blocks wave advance");
        assert_eq!(query::wave_view(&world_with_straggler).number, 2);

        // The clear-field world advances normally.
        events.clear();
        apply(&mut world, Command::AdvanceWave, &mut events);
        assert_eq!(
            events,
            vec![Event::WaveCleared {
                completed: 1,
                next: 2,
                bonus_bomb: false,
            }],
        );
        let wave = query::wave_view(&world);
        assert_eq!(wave.number, 2);
        assert_eq!(wave.spawned, 0);
        assert_eq!(wave.destroyed, 0);
    }

    #[test]
    fn every_third_wave_grants_a_bonus_bomb() {
        let rules = rules_with(
            StartingLoadout::new(3, 0),
            WaveRules::new(
                1,
                0,
                Duration::from_millis(2000),
                Duration::from_millis(100),
                Duration::from_millis(500),
                3,
            ),
            SpawnTuning::default(),
        );
        let mut world = configured_playing_world(rules);

        for wave in 1..=3u32 {
            let _ = spawn(&mut world, "CAT", 100.0, 30.0);
            let _ = type_word(&mut world, "CAT");
            let mut events = Vec::new();
            apply(&mut world, Command::AdvanceWave, &mut events);
            let expected_bonus = wave % 3 == 0;
            assert_eq!(
                events,
                vec![Event::WaveCleared {
                    completed: wave,
                    next: wave + 1,
                    bonus_bomb: expected_bonus,
                }],
            );
        }
        assert_eq!(query::hud(&world).bombs, 1);
    }

    #[test]
    fn spawn_interval_shrinks_as_waves_advance() {
        let world = playing_world();
        let rules = query::rules(&world);
        let early = rules.waves().spawn_interval(1);
        let late = rules.waves().spawn_interval(10);
        assert!(late < early);
        assert!(late >= Duration::from_millis(600));
    }

    #[test]
    fn paused_time_never_reaches_the_game_clock() {
        let mut world = playing_world();
        let _ = spawn(&mut world, "CAT", 100.0, 30.0);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
            &mut events,
        );
        assert_eq!(query::game_time(&world), Duration::from_secs(1));
        let descent = query::enemy_view(&world).into_vec()[0].position.y();

        apply(&mut world, Command::PauseSession, &mut events);
        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(5),
            },
            &mut events,
        );
        assert!(events.is_empty(), "paused ticks advance nothing");
        assert_eq!(query::game_time(&world), Duration::from_secs(1));
        assert_eq!(
            query::enemy_view(&world).into_vec()[0].position.y(),
            descent
        );
        assert!(press(&mut world, 'C').is_empty());

        apply(&mut world, Command::ResumeSession, &mut events);
        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
            &mut events,
        );
        assert_eq!(query::game_time(&world), Duration::from_secs(2));
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. })));
    }

    #[test]
    fn misses_drive_accuracy_to_zero() {
        let mut world = playing_world();
        for _ in 0..4 {
            let _ = press(&mut world, 'Q');
        }
        assert_eq!(query::hud(&world).accuracy, 0);
    }

    #[test]
    fn prefix_never_exceeds_word_length() {
        let mut world = playing_world();
        let _ = spawn(&mut world, "OX", 100.0, 30.0);
        let _ = type_word(&mut world, "OXOX");
        for enemy in query::enemy_view(&world).iter() {
            assert!(enemy.typed <= enemy.word.len());
        }
        assert!(query::enemy_view(&world).is_empty(), "OX was destroyed");
    }
}
