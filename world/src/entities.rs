//! Entity definitions and physics advance for the Word Defence world.

use std::collections::VecDeque;
use std::time::Duration;

use word_defence_core::{EnemyId, FieldPoint, FieldSize, SparkColor, Word};

/// Number of recent positions retained for projectile trails.
const TRAIL_CAPACITY: usize = 8;
/// Speed of cosmetic projectiles in field units per second.
const PROJECTILE_SPEED: f32 = 520.0;
/// Fraction of particle velocity shed per second.
const PARTICLE_DRAG: f32 = 1.6;

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) word: Word,
    pub(crate) typed: u32,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) speed: f32,
}

impl Enemy {
    pub(crate) fn new(id: EnemyId, word: Word, x: f32, speed: f32) -> Self {
        Self {
            id,
            word,
            typed: 0,
            x,
            y: 0.0,
            speed,
        }
    }

    pub(crate) fn position(&self) -> FieldPoint {
        FieldPoint::new(self.x, self.y)
    }

    pub(crate) fn fall(&mut self, dt: Duration) {
        self.y += self.speed * dt.as_secs_f32();
    }

    /// An enemy escapes the moment its centre crosses the floor boundary.
    pub(crate) fn has_breached(&self, field: FieldSize) -> bool {
        self.y >= field.height()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    x: f32,
    y: f32,
    velocity_x: f32,
    velocity_y: f32,
    trail: VecDeque<FieldPoint>,
}

impl Projectile {
    /// Creates a projectile at `origin` flying toward `target`. The velocity
    /// is computed once here and never adjusted afterwards; projectiles are
    /// cosmetic feedback, not a hit-test authority.
    pub(crate) fn aimed_at(origin: FieldPoint, target: FieldPoint) -> Self {
        let dx = target.x() - origin.x();
        let dy = target.y() - origin.y();
        let length = (dx * dx + dy * dy).sqrt();
        let (velocity_x, velocity_y) = if length <= f32::EPSILON {
            (0.0, -PROJECTILE_SPEED)
        } else {
            (
                dx / length * PROJECTILE_SPEED,
                dy / length * PROJECTILE_SPEED,
            )
        };

        Self {
            x: origin.x(),
            y: origin.y(),
            velocity_x,
            velocity_y,
            trail: VecDeque::with_capacity(TRAIL_CAPACITY),
        }
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        if self.trail.len() == TRAIL_CAPACITY {
            let _ = self.trail.pop_front();
        }
        self.trail.push_back(FieldPoint::new(self.x, self.y));
        self.x += self.velocity_x * dt.as_secs_f32();
        self.y += self.velocity_y * dt.as_secs_f32();
    }

    pub(crate) fn in_bounds(&self, field: FieldSize) -> bool {
        self.x >= 0.0 && self.x <= field.width() && self.y >= 0.0 && self.y <= field.height()
    }

    pub(crate) fn position(&self) -> FieldPoint {
        FieldPoint::new(self.x, self.y)
    }

    pub(crate) fn trail(&self) -> impl Iterator<Item = FieldPoint> + '_ {
        self.trail.iter().copied()
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Particle {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) velocity_x: f32,
    pub(crate) velocity_y: f32,
    pub(crate) color: SparkColor,
    pub(crate) life: f32,
    pub(crate) decay: f32,
}

impl Particle {
    pub(crate) fn advance(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        let damping = (1.0 - PARTICLE_DRAG * seconds).max(0.0);
        self.velocity_x *= damping;
        self.velocity_y *= damping;
        self.x += self.velocity_x * seconds;
        self.y += self.velocity_y * seconds;
        self.life -= self.decay * seconds;
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    pub(crate) fn position(&self) -> FieldPoint {
        FieldPoint::new(self.x, self.y)
    }
}
