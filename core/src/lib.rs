#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Word Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Word Defence.";

/// Top-level phases that gate which subsystems may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Idle menu state with no simulation running.
    Menu,
    /// Fixed-duration countdown before the simulation starts.
    Countdown,
    /// Full simulation: physics, spawning, and input processing.
    Playing,
    /// Simulation frozen; resumable back into `Playing`.
    Paused,
    /// Terminal state reached when the defender runs out of lives.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the session rules and resets the world back to the menu.
    ConfigureSession {
        /// Clamped rule aggregate the world should adopt.
        rules: SessionRules,
    },
    /// Starts a new session, moving from the menu into the countdown.
    StartSession,
    /// Freezes a running simulation.
    PauseSession,
    /// Resumes a paused simulation.
    ResumeSession,
    /// Acknowledges a finished session, returning to the menu fully reset.
    AcknowledgeGameOver,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Feeds one keystroke into the typing match engine.
    PressKey {
        /// Raw character reported by the host; normalised internally.
        key: char,
    },
    /// Detonates one bomb charge, clearing every live enemy.
    TriggerBomb,
    /// Requests that a new enemy enter the field at the top edge.
    SpawnEnemy {
        /// Word the enemy carries; must be typed in full to destroy it.
        word: Word,
        /// Horizontal position of the enemy centre in field units.
        x: f32,
        /// Descent speed in field units per second.
        speed: f32,
    },
    /// Requests that the completed wave give way to the next one.
    AdvanceWave,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that simulated play time advanced. Emitted only while
    /// `Phase::Playing`, so accumulating these deltas yields game time that
    /// excludes menus, countdowns, and pauses.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active after processing the command.
        phase: Phase,
    },
    /// Confirms that an enemy entered the field.
    EnemySpawned {
        /// Identifier assigned to the enemy by the world.
        enemy: EnemyId,
        /// Horizontal position where the enemy appeared.
        x: f32,
    },
    /// Confirms that a keystroke matched the next letter of a word.
    KeyHit {
        /// Enemy receiving the keystroke.
        enemy: EnemyId,
        /// Prefix length after the keystroke was applied.
        prefix: u32,
    },
    /// Reports a keystroke that matched no enemy or the wrong next letter.
    KeyMissed {
        /// Normalised key that missed.
        key: char,
    },
    /// Confirms that an enemy's word was typed in full.
    WordCompleted {
        /// Enemy that was destroyed.
        enemy: EnemyId,
        /// Length of the completed word.
        word_length: u32,
        /// Last known position of the enemy, used for burst effects.
        position: FieldPoint,
        /// Score awarded for the completion, combo bonus included.
        award: u32,
    },
    /// Reports that an enemy crossed the floor boundary unresolved.
    EnemyBreached {
        /// Enemy that escaped.
        enemy: EnemyId,
        /// Lives remaining after the breach.
        lives_remaining: u32,
    },
    /// Announces that a wave completed and the next one became active.
    WaveCleared {
        /// Wave number that finished.
        completed: u32,
        /// Wave number that is now active.
        next: u32,
        /// Whether the completion granted a bonus bomb charge.
        bonus_bomb: bool,
    },
    /// Confirms that a bomb charge detonated.
    BombDetonated {
        /// Number of enemies removed by the detonation.
        destroyed: u32,
        /// Total score awarded across the removed enemies.
        award: u32,
    },
    /// Reports the final statistics of a finished session.
    SessionEnded {
        /// Aggregate report for the host persistence layer.
        report: SessionReport,
    },
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position within the play field expressed in floating-point field units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPoint {
    x: f32,
    y: f32,
}

impl FieldPoint {
    /// Creates a new field point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate, increasing rightward from the left edge.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate, increasing downward from the top edge.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Dimensions of the rectangular play field in field units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSize {
    width: f32,
    height: f32,
}

impl FieldSize {
    /// Smallest width the engine accepts before clamping.
    pub const MIN_WIDTH: f32 = 160.0;
    /// Smallest height the engine accepts before clamping.
    pub const MIN_HEIGHT: f32 = 120.0;

    /// Creates a new field size, clamping degenerate dimensions upward.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(Self::MIN_WIDTH),
            height: height.max(Self::MIN_HEIGHT),
        }
    }

    /// Width of the field in field units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the field in field units; the floor sits at this y.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }
}

impl Default for FieldSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// RGB colour applied to a burst particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SparkColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl SparkColor {
    /// Creates a new spark colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Uppercase alphabetic word carried by an enemy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Word(String);

impl Word {
    /// Builds a word from raw host input, keeping only ASCII letters and
    /// normalising them to uppercase. Returns `None` when nothing survives.
    #[must_use]
    pub fn sanitize(raw: &str) -> Option<Self> {
        let cleaned: String = raw
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|letter| letter.to_ascii_uppercase())
            .collect();
        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned))
        }
    }

    /// The word as an uppercase string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters in the word.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.0.len() as u32
    }

    /// Words are never empty; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Letter at the provided zero-based index, if within bounds.
    #[must_use]
    pub fn letter(&self, index: u32) -> Option<char> {
        self.0.as_bytes().get(index as usize).map(|byte| *byte as char)
    }

    /// First letter of the word.
    #[must_use]
    pub fn first_letter(&self) -> char {
        self.0.as_bytes()[0] as char
    }
}

/// Vocabulary difficulty bands unlocked as waves progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DifficultyTier {
    /// Short, common words available from the first wave.
    Foundation,
    /// Mid-length words mixed in once the session warms up.
    Expanding,
    /// Longer words introduced in the middle game.
    Advanced,
    /// The longest words, reserved for late waves.
    Expert,
}

impl DifficultyTier {
    /// All tiers ordered from easiest to hardest.
    pub const ALL: [Self; 4] = [
        Self::Foundation,
        Self::Expanding,
        Self::Advanced,
        Self::Expert,
    ];

    /// First wave on which the tier becomes eligible for selection.
    #[must_use]
    pub const fn unlock_wave(self) -> u32 {
        match self {
            Self::Foundation => 1,
            Self::Expanding => 4,
            Self::Advanced => 8,
            Self::Expert => 12,
        }
    }

    /// Highest tier unlocked on the provided wave.
    #[must_use]
    pub fn band_for_wave(wave: u32) -> Self {
        let mut band = Self::Foundation;
        for tier in Self::ALL {
            if wave >= tier.unlock_wave() {
                band = tier;
            }
        }
        band
    }

    /// Tiers eligible on the provided wave: the active band blends every
    /// tier at or below it rather than hard-cutting to the newest one.
    #[must_use]
    pub fn unlocked_for_wave(wave: u32) -> &'static [Self] {
        let band = Self::band_for_wave(wave);
        let count = Self::ALL
            .iter()
            .position(|tier| *tier == band)
            .map_or(1, |index| index + 1);
        &Self::ALL[..count]
    }
}

/// Supplies vocabulary to the spawn scheduler.
///
/// Implementations must return non-empty alphabetic words; the built-in
/// `WordBank` in the spawning system satisfies this, and host-provided
/// sources are sanitised at the spawn boundary regardless.
pub trait WordSource {
    /// Produces the next word for the requested difficulty tier.
    fn next_word(&mut self, tier: DifficultyTier) -> Word;
}

/// Scoring constants used by combat resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoringRules {
    base_multiplier: u32,
    combo_bonus_period: u32,
    combo_bonus_unit: u32,
}

impl ScoringRules {
    /// Creates scoring rules, clamping degenerate values to sane minimums.
    #[must_use]
    pub fn new(base_multiplier: u32, combo_bonus_period: u32, combo_bonus_unit: u32) -> Self {
        Self {
            base_multiplier: base_multiplier.max(1),
            combo_bonus_period: combo_bonus_period.max(1),
            combo_bonus_unit,
        }
    }

    /// Points granted per letter of a completed word.
    #[must_use]
    pub const fn base_multiplier(&self) -> u32 {
        self.base_multiplier
    }

    /// Number of consecutive hits that raise the combo bonus by one unit.
    #[must_use]
    pub const fn combo_bonus_period(&self) -> u32 {
        self.combo_bonus_period
    }

    /// Points added per earned combo bonus step.
    #[must_use]
    pub const fn combo_bonus_unit(&self) -> u32 {
        self.combo_bonus_unit
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::new(10, 5, 25)
    }
}

/// Wave pacing constants: quotas, spawn cadence, and bomb bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveRules {
    base_quota: u32,
    quota_increment: u32,
    base_interval: Duration,
    interval_step: Duration,
    min_interval: Duration,
    bomb_award_period: u32,
}

impl WaveRules {
    /// Hard floor below which the spawn interval never drops.
    pub const INTERVAL_FLOOR: Duration = Duration::from_millis(50);

    /// Creates wave rules, clamping degenerate values to sane minimums.
    #[must_use]
    pub fn new(
        base_quota: u32,
        quota_increment: u32,
        base_interval: Duration,
        interval_step: Duration,
        min_interval: Duration,
        bomb_award_period: u32,
    ) -> Self {
        let min_interval = min_interval.max(Self::INTERVAL_FLOOR);
        Self {
            base_quota: base_quota.max(1),
            quota_increment,
            base_interval: base_interval.max(min_interval),
            interval_step,
            min_interval,
            bomb_award_period: bomb_award_period.max(1),
        }
    }

    /// Enemy quota that must be destroyed to complete the provided wave.
    #[must_use]
    pub fn quota(&self, wave: u32) -> u32 {
        self.base_quota
            .saturating_add(self.quota_increment.saturating_mul(wave))
    }

    /// Spawn interval active on the provided wave; monotone non-increasing
    /// in the wave number and clamped to the configured floor.
    #[must_use]
    pub fn spawn_interval(&self, wave: u32) -> Duration {
        let reduction = self.interval_step.saturating_mul(wave);
        let reduced = self.base_interval.saturating_sub(reduction);
        reduced.max(self.min_interval)
    }

    /// Number of completed waves between bonus bomb grants.
    #[must_use]
    pub const fn bomb_award_period(&self) -> u32 {
        self.bomb_award_period
    }
}

impl Default for WaveRules {
    fn default() -> Self {
        Self::new(
            3,
            2,
            Duration::from_millis(2200),
            Duration::from_millis(150),
            Duration::from_millis(600),
            3,
        )
    }
}

/// Concurrency and placement limits enforced by the spawn scheduler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnTuning {
    max_live: u32,
    min_separation: f32,
    placement_attempts: u32,
    horizontal_margin: f32,
}

impl SpawnTuning {
    /// Creates spawn tuning, clamping degenerate values to sane minimums.
    #[must_use]
    pub fn new(
        max_live: u32,
        min_separation: f32,
        placement_attempts: u32,
        horizontal_margin: f32,
    ) -> Self {
        Self {
            max_live: max_live.max(1),
            min_separation: min_separation.max(0.0),
            placement_attempts: placement_attempts.max(1),
            horizontal_margin: horizontal_margin.max(0.0),
        }
    }

    /// Maximum number of concurrently live enemies.
    #[must_use]
    pub const fn max_live(&self) -> u32 {
        self.max_live
    }

    /// Minimum horizontal distance between a new enemy and existing ones.
    #[must_use]
    pub const fn min_separation(&self) -> f32 {
        self.min_separation
    }

    /// Placement attempts before a crowded position is accepted anyway.
    #[must_use]
    pub const fn placement_attempts(&self) -> u32 {
        self.placement_attempts
    }

    /// Margin kept clear along the left and right field edges.
    #[must_use]
    pub const fn horizontal_margin(&self) -> f32 {
        self.horizontal_margin
    }
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self::new(8, 90.0, 6, 60.0)
    }
}

/// Descent speed curve applied to newly spawned enemies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedCurve {
    base: f32,
    per_wave: f32,
    jitter: f32,
}

impl SpeedCurve {
    /// Creates a speed curve, clamping degenerate values to sane minimums.
    #[must_use]
    pub fn new(base: f32, per_wave: f32, jitter: f32) -> Self {
        Self {
            base: base.max(1.0),
            per_wave: per_wave.max(0.0),
            jitter: jitter.max(0.0),
        }
    }

    /// Baseline descent speed in field units per second.
    #[must_use]
    pub const fn base(&self) -> f32 {
        self.base
    }

    /// Additional speed added per wave number.
    #[must_use]
    pub const fn per_wave(&self) -> f32 {
        self.per_wave
    }

    /// Upper bound of the random per-enemy speed jitter.
    #[must_use]
    pub const fn jitter(&self) -> f32 {
        self.jitter
    }
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self::new(28.0, 7.0, 10.0)
    }
}

/// Lives and bomb charges a fresh session starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartingLoadout {
    lives: u32,
    bombs: u32,
}

impl StartingLoadout {
    /// Creates a loadout, clamping lives to at least one.
    #[must_use]
    pub fn new(lives: u32, bombs: u32) -> Self {
        Self {
            lives: lives.max(1),
            bombs,
        }
    }

    /// Lives the defender starts with.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Bomb charges the defender starts with.
    #[must_use]
    pub const fn bombs(&self) -> u32 {
        self.bombs
    }
}

impl Default for StartingLoadout {
    fn default() -> Self {
        Self::new(3, 2)
    }
}

/// Complete rule aggregate governing a session.
///
/// Invalid values are clamped by the member constructors rather than
/// rejected; a continuously running simulation must never throw over a bad
/// tuning value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionRules {
    field: FieldSize,
    scoring: ScoringRules,
    waves: WaveRules,
    spawn: SpawnTuning,
    speed: SpeedCurve,
    loadout: StartingLoadout,
    countdown: Duration,
}

impl SessionRules {
    /// Creates a rule aggregate from already-clamped members.
    #[must_use]
    pub const fn new(
        field: FieldSize,
        scoring: ScoringRules,
        waves: WaveRules,
        spawn: SpawnTuning,
        speed: SpeedCurve,
        loadout: StartingLoadout,
        countdown: Duration,
    ) -> Self {
        Self {
            field,
            scoring,
            waves,
            spawn,
            speed,
            loadout,
            countdown,
        }
    }

    /// Play field dimensions.
    #[must_use]
    pub const fn field(&self) -> FieldSize {
        self.field
    }

    /// Scoring constants.
    #[must_use]
    pub const fn scoring(&self) -> ScoringRules {
        self.scoring
    }

    /// Wave pacing constants.
    #[must_use]
    pub const fn waves(&self) -> WaveRules {
        self.waves
    }

    /// Spawn concurrency and placement limits.
    #[must_use]
    pub const fn spawn(&self) -> SpawnTuning {
        self.spawn
    }

    /// Descent speed curve.
    #[must_use]
    pub const fn speed(&self) -> SpeedCurve {
        self.speed
    }

    /// Starting lives and bombs.
    #[must_use]
    pub const fn loadout(&self) -> StartingLoadout {
        self.loadout
    }

    /// Duration of the pre-game countdown.
    #[must_use]
    pub const fn countdown(&self) -> Duration {
        self.countdown
    }
}

impl Default for SessionRules {
    fn default() -> Self {
        Self::new(
            FieldSize::default(),
            ScoringRules::default(),
            WaveRules::default(),
            SpawnTuning::default(),
            SpeedCurve::default(),
            StartingLoadout::default(),
            Duration::from_secs(3),
        )
    }
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Word the enemy carries.
    pub word: Word,
    /// Number of correctly typed leading letters.
    pub typed: u32,
    /// Current position of the enemy centre.
    pub position: FieldPoint,
    /// Descent speed in field units per second.
    pub speed: f32,
}

/// Read-only snapshot describing all live enemies in deterministic order.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of live enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the field is empty of enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Current position of the projectile tip.
    pub position: FieldPoint,
    /// Recent positions, oldest first, bounded for rendering trails.
    pub trail: Vec<FieldPoint>,
}

/// Immutable representation of a single particle used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSnapshot {
    /// Current position of the particle.
    pub position: FieldPoint,
    /// Colour assigned at burst time.
    pub color: SparkColor,
    /// Remaining life in the range `0.0..=1.0`.
    pub life: f32,
}

/// Scalar values presented on the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudSnapshot {
    /// Current score.
    pub score: u32,
    /// Active wave number.
    pub wave: u32,
    /// Remaining lives.
    pub lives: u32,
    /// Remaining bomb charges.
    pub bombs: u32,
    /// Current combo streak.
    pub combo: u32,
    /// Keystroke accuracy percentage in `0..=100`.
    pub accuracy: u32,
}

/// Wave bookkeeping exposed to the spawn scheduler and wave controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveSnapshot {
    /// Active wave number, starting at 1.
    pub number: u32,
    /// Enemies spawned so far this wave.
    pub spawned: u32,
    /// Enemies destroyed so far this wave.
    pub destroyed: u32,
    /// Destruction quota required to complete the wave.
    pub quota: u32,
    /// Spawn interval active for this wave.
    pub spawn_interval: Duration,
}

/// Currently locked typing target, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTargetSnapshot {
    /// Enemy receiving in-progress keystrokes.
    pub enemy: EnemyId,
    /// Length of the correctly typed prefix; always at least one.
    pub prefix: u32,
}

/// Final statistics reported to the host persistence layer on game over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Final score.
    pub score: u32,
    /// Wave number reached when the session ended.
    pub wave_reached: u32,
    /// Total words destroyed across the session.
    pub words_destroyed: u32,
    /// Longest combo streak observed.
    pub max_combo: u32,
    /// Keystroke accuracy percentage in `0..=100`.
    pub accuracy: u32,
}
