//! Scoring math and cosmetic burst effects applied by combat resolution.

use word_defence_core::{FieldPoint, ScoringRules, SparkColor};

use crate::entities::Particle;

/// Particle count for a single destroyed word.
pub(crate) const DESTRUCTION_BURST: u32 = 16;
/// Particle count for an enemy reaching the floor.
pub(crate) const IMPACT_BURST: u32 = 8;
/// Particle count per enemy removed by a bomb.
pub(crate) const BOMB_BURST: u32 = 24;

/// Amber scatter for typed-out words.
pub(crate) const DESTRUCTION_COLOR: SparkColor = SparkColor::from_rgb(0xff, 0xb3, 0x2e);
/// Dark red scatter for floor impacts.
pub(crate) const IMPACT_COLOR: SparkColor = SparkColor::from_rgb(0xd9, 0x3a, 0x2b);
/// Cyan scatter for bomb detonations.
pub(crate) const BOMB_COLOR: SparkColor = SparkColor::from_rgb(0x53, 0xd7, 0xf0);

/// Score awarded for destroying a word of the given length at the given
/// combo: length times the base multiplier, plus the earned combo bonus.
pub(crate) fn word_award(word_length: u32, combo: u32, scoring: ScoringRules) -> u32 {
    let base = word_length.saturating_mul(scoring.base_multiplier());
    base.saturating_add(combo_bonus(combo, scoring))
}

pub(crate) fn combo_bonus(combo: u32, scoring: ScoringRules) -> u32 {
    (combo / scoring.combo_bonus_period()).saturating_mul(scoring.combo_bonus_unit())
}

/// Keystroke accuracy as a whole percentage, clamped to `0..=100` and
/// defaulting to 100 before any keystroke has been recorded.
pub(crate) fn accuracy_percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 100;
    }
    let scaled = u64::from(correct) * 100 + u64::from(total) / 2;
    ((scaled / u64::from(total)) as u32).min(100)
}

/// Scatters a burst of particles around `origin`, advancing the caller's
/// deterministic scatter state. Bursts are cosmetic; gameplay never reads
/// them back.
pub(crate) fn spawn_burst(
    particles: &mut Vec<Particle>,
    scatter_state: &mut u64,
    origin: FieldPoint,
    color: SparkColor,
    count: u32,
) {
    for _ in 0..count {
        let angle_bits = next_random(scatter_state);
        let speed_bits = next_random(scatter_state);
        let decay_bits = next_random(scatter_state);

        let angle = unit(angle_bits) * std::f32::consts::TAU;
        let speed = 40.0 + unit(speed_bits) * 110.0;
        let decay = 0.8 + unit(decay_bits) * 0.9;

        particles.push(Particle {
            x: origin.x(),
            y: origin.y(),
            velocity_x: angle.cos() * speed,
            velocity_y: angle.sin() * speed,
            color,
            life: 1.0,
            decay,
        });
    }
}

fn unit(bits: u64) -> f32 {
    const SCALE: f32 = 1.0 / (1u32 << 24) as f32;
    ((bits >> 40) as u32) as f32 * SCALE
}

fn next_random(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    *state
}
