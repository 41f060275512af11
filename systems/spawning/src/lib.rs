#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawn scheduler responsible for emitting enemy spawn commands.
//!
//! The scheduler accumulates `TimeAdvanced` deltas and converts them into
//! `SpawnEnemy` commands at the wave's spawn cadence, respecting both the
//! live-enemy cap and the wave quota. Every random decision flows through a
//! SplitMix64 stream reseeded per wave from a sha2-derived label, so a fixed
//! global seed replays the exact same session.

use std::time::Duration;

use sha2::{Digest, Sha256};
use word_defence_core::{
    Command, DifficultyTier, EnemyView, Event, Phase, SessionRules, WaveSnapshot, Word, WordSource,
};

mod words;

pub use words::WordBank;

const RNG_STREAM_SPAWN: &str = "spawn";

/// Configuration parameters required to construct the spawn scheduler.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    global_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided global seed.
    #[must_use]
    pub const fn new(global_seed: u64) -> Self {
        Self { global_seed }
    }
}

/// Pure system that deterministically emits spawn commands while playing.
#[derive(Debug)]
pub struct Spawning {
    global_seed: u64,
    accumulator: Duration,
    rng: SplitMix64,
    seeded_wave: u32,
}

impl Spawning {
    /// Creates a new spawn scheduler using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            global_seed: config.global_seed,
            accumulator: Duration::ZERO,
            rng: SplitMix64::new(derive_wave_seed(config.global_seed, 1)),
            seeded_wave: 1,
        }
    }

    /// Consumes events and immutable views to emit spawn commands.
    ///
    /// Leaving `Playing` resets the accumulator so paused or menu wall time
    /// never converts into spawns. Not spawning is a normal outcome: a full
    /// field or an exhausted quota simply leaves the cadence banked.
    #[allow(clippy::too_many_arguments)] // Spawning inputs intentionally enumerate every view explicitly.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: Phase,
        rules: SessionRules,
        wave: WaveSnapshot,
        enemies: &EnemyView,
        words: &mut dyn WordSource,
        out: &mut Vec<Command>,
    ) {
        if phase != Phase::Playing {
            self.accumulator = Duration::ZERO;
            // A return to the menu starts a fresh session; the wave-1
            // stream must restart from its derived seed rather than
            // continue mid-state.
            let returned_to_menu = events
                .iter()
                .any(|event| matches!(event, Event::PhaseChanged { phase: Phase::Menu }));
            if returned_to_menu {
                self.rng = SplitMix64::new(derive_wave_seed(self.global_seed, 1));
                self.seeded_wave = 1;
            }
            return;
        }

        if wave.number != self.seeded_wave {
            self.rng = SplitMix64::new(derive_wave_seed(self.global_seed, wave.number));
            self.seeded_wave = wave.number;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }
        if accumulated.is_zero() {
            return;
        }
        self.accumulator = self.accumulator.saturating_add(accumulated);

        let tuning = rules.spawn();
        let live = enemies.len() as u32;
        // Escapes never count toward the quota, so the budget tracks the
        // kills still needed rather than the raw spawn count; escaped
        // enemies are replaced until quota-many words have been typed.
        let quota_budget = wave
            .quota
            .saturating_sub(wave.destroyed.saturating_add(live));
        let live_budget = tuning.max_live().saturating_sub(live);
        let mut budget = quota_budget.min(live_budget);

        let interval = wave.spawn_interval;
        let mut placed: Vec<f32> = enemies
            .iter()
            .map(|enemy| enemy.position.x())
            .collect();

        while self.accumulator >= interval && budget > 0 {
            self.accumulator -= interval;
            budget -= 1;

            let word = self.draw_word(wave.number, words);
            let x = self.place(&placed, rules, tuning.min_separation());
            placed.push(x);
            let speed = self.roll_speed(wave.number, rules);

            out.push(Command::SpawnEnemy { word, x, speed });
        }

        // A starved scheduler banks at most one interval so a freed field
        // does not trigger a burst of catch-up spawns.
        if budget == 0 {
            self.accumulator = self.accumulator.min(interval);
        }
    }

    fn draw_word(&mut self, wave: u32, words: &mut dyn WordSource) -> Word {
        let unlocked = DifficultyTier::unlocked_for_wave(wave);
        let index = (self.rng.next_u64() % unlocked.len() as u64) as usize;
        words.next_word(unlocked[index])
    }

    fn place(&mut self, placed: &[f32], rules: SessionRules, min_separation: f32) -> f32 {
        let field = rules.field();
        let margin = rules.spawn().horizontal_margin();
        let span = (field.width() - 2.0 * margin).max(0.0);

        // The last candidate is accepted when every attempt lands crowded;
        // a packed field must still produce a position.
        let mut candidate = margin;
        for _ in 0..rules.spawn().placement_attempts() {
            candidate = margin + self.rng.next_unit() as f32 * span;
            let crowded = placed
                .iter()
                .any(|existing| (existing - candidate).abs() < min_separation);
            if !crowded {
                break;
            }
        }
        candidate
    }

    fn roll_speed(&mut self, wave: u32, rules: SessionRules) -> f32 {
        let curve = rules.speed();
        let jitter = self.rng.next_unit() as f32 * curve.jitter();
        curve.base() + wave as f32 * curve.per_wave() + jitter
    }
}

fn derive_wave_seed(global_seed: u64, wave: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(global_seed.to_le_bytes());
    hasher.update(wave.to_le_bytes());
    hasher.update(RNG_STREAM_SPAWN.as_bytes());
    finalize_seed(hasher)
}

fn finalize_seed(hasher: Sha256) -> u64 {
    let digest = hasher.finalize();
    let bytes: [u8; 8] = digest[0..8].try_into().expect("sha256 digest slice length");
    u64::from_le_bytes(bytes)
}

#[derive(Debug)]
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        let seed = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    fn next_unit(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / ((1u64 << 53) as f64);
        let value = self.next_u64() >> 11;
        (value as f64) * SCALE
    }
}
