#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Word Defence adapters.
//!
//! Backends never read world state directly: adapters compose a [`Scene`]
//! from core snapshots each frame and hand it to a [`RenderingBackend`] for
//! presentation.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::time::Duration;
use word_defence_core::{
    EnemySnapshot, FieldSize, HudSnapshot, ParticleSnapshot, Phase, ProjectileSnapshot,
    SparkColor, SpeedCurve, TypingTargetSnapshot,
};

/// Base glyph size in field units for a one-letter word.
const GLYPH_BASE: f32 = 18.0;
/// Glyph growth per additional letter.
const GLYPH_PER_LETTER: f32 = 2.5;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts a world spark color into a presentation color.
    #[must_use]
    pub const fn from_spark(spark: SparkColor) -> Self {
        Self::from_rgb_u8(spark.red(), spark.green(), spark.blue())
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with the provided alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            red: self.red,
            green: self.green,
            blue: self.blue,
            alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Describes the rectangular play field drawn behind the action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPresentation {
    /// Width of the field in field units.
    pub width: f32,
    /// Height of the field in field units; the floor line sits here.
    pub height: f32,
    /// Solid fill drawn behind the field.
    pub background: Color,
    /// Color of the floor line enemies must not cross.
    pub floor_line: Color,
}

impl FieldPresentation {
    /// Creates a field descriptor from the world's field dimensions.
    #[must_use]
    pub fn new(field: FieldSize, background: Color, floor_line: Color) -> Self {
        Self {
            width: field.width(),
            height: field.height(),
            background,
            floor_line,
        }
    }

    /// Position of the cannon the projectiles fire from.
    #[must_use]
    pub fn cannon_position(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height)
    }
}

/// Falling word rendered as a glyph block with a highlighted typed prefix.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyGraphic {
    /// Word text, uppercase.
    pub word: String,
    /// Number of leading letters to render in the typed style.
    pub prefix: u32,
    /// Centre of the glyph block in field units.
    pub position: Vec2,
    /// Glyph size derived from the word length.
    pub glyph_size: f32,
    /// Normalised descent urgency in `0.0..=1.0`, used to tint fast words.
    pub urgency: f32,
    /// Whether this enemy is the locked typing target.
    pub targeted: bool,
}

impl EnemyGraphic {
    /// Builds a graphic from an enemy snapshot.
    ///
    /// Urgency compares the enemy's speed against the fastest speed the
    /// curve can produce for the wave, clamped to the unit range.
    #[must_use]
    pub fn from_snapshot(
        snapshot: &EnemySnapshot,
        target: Option<TypingTargetSnapshot>,
        curve: SpeedCurve,
        wave: u32,
    ) -> Self {
        let ceiling = curve.base() + wave as f32 * curve.per_wave() + curve.jitter();
        let urgency = if ceiling <= f32::EPSILON {
            0.0
        } else {
            (snapshot.speed / ceiling).clamp(0.0, 1.0)
        };
        let targeted = target.is_some_and(|lock| lock.enemy == snapshot.id);

        Self {
            word: snapshot.word.as_str().to_owned(),
            prefix: snapshot.typed,
            position: Vec2::new(snapshot.position.x(), snapshot.position.y()),
            glyph_size: glyph_size(snapshot.word.len()),
            urgency,
            targeted,
        }
    }

    /// Typed portion of the word, rendered highlighted.
    #[must_use]
    pub fn typed_part(&self) -> &str {
        let split = (self.prefix as usize).min(self.word.len());
        &self.word[..split]
    }

    /// Remaining portion of the word still to be typed.
    #[must_use]
    pub fn remaining_part(&self) -> &str {
        let split = (self.prefix as usize).min(self.word.len());
        &self.word[split..]
    }
}

/// Glyph size for a word of the provided letter count.
#[must_use]
pub fn glyph_size(word_length: u32) -> f32 {
    GLYPH_BASE + GLYPH_PER_LETTER * word_length.saturating_sub(1) as f32
}

/// Projectile rendered as a tip with a fading trail.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileGraphic {
    /// Tip of the projectile in field units.
    pub position: Vec2,
    /// Recent tip positions, oldest first.
    pub trail: Vec<Vec2>,
}

impl ProjectileGraphic {
    /// Builds a graphic from a projectile snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &ProjectileSnapshot) -> Self {
        Self {
            position: Vec2::new(snapshot.position.x(), snapshot.position.y()),
            trail: snapshot
                .trail
                .iter()
                .map(|point| Vec2::new(point.x(), point.y()))
                .collect(),
        }
    }
}

/// Burst particle rendered as a fading spark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkGraphic {
    /// Position of the spark in field units.
    pub position: Vec2,
    /// Spark color with the remaining life applied as alpha.
    pub color: Color,
}

impl SparkGraphic {
    /// Builds a graphic from a particle snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &ParticleSnapshot) -> Self {
        let alpha = snapshot.life.clamp(0.0, 1.0);
        Self {
            position: Vec2::new(snapshot.position.x(), snapshot.position.y()),
            color: Color::from_spark(snapshot.color).with_alpha(alpha),
        }
    }
}

/// Scene description combining the field, entities, and HUD scalars.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Play field drawn behind the action.
    pub field: FieldPresentation,
    /// Falling words currently visible.
    pub enemies: Vec<EnemyGraphic>,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectileGraphic>,
    /// Burst sparks.
    pub sparks: Vec<SparkGraphic>,
    /// HUD scalars.
    pub hud: HudSnapshot,
    /// Phase the session occupies, used for overlays.
    pub phase: Phase,
}

impl Scene {
    /// Composes a scene from core snapshots.
    #[must_use]
    #[allow(clippy::too_many_arguments)] // Scene composition intentionally enumerates every channel explicitly.
    pub fn compose(
        field: FieldPresentation,
        phase: Phase,
        hud: HudSnapshot,
        wave: u32,
        curve: SpeedCurve,
        enemies: &[EnemySnapshot],
        target: Option<TypingTargetSnapshot>,
        projectiles: &[ProjectileSnapshot],
        particles: &[ParticleSnapshot],
    ) -> Self {
        Self {
            field,
            enemies: enemies
                .iter()
                .map(|snapshot| EnemyGraphic::from_snapshot(snapshot, target, curve, wave))
                .collect(),
            projectiles: projectiles
                .iter()
                .map(ProjectileGraphic::from_snapshot)
                .collect(),
            sparks: particles.iter().map(SparkGraphic::from_snapshot).collect(),
            hud,
            phase,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Word Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame
    /// delta and may replace the scene before it is rendered, allowing
    /// adapters to animate world snapshots deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static;
}
