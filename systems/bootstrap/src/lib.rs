#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Word Defence experience.

use word_defence_core::{FieldSize, HudSnapshot, Phase};
use word_defence_world::{query, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self, world: &World) -> &'static str {
        query::welcome_banner(world)
    }

    /// Exposes the play field dimensions required for rendering.
    #[must_use]
    pub fn field(&self, world: &World) -> FieldSize {
        query::field(world)
    }

    /// Exposes the phase the session boots into.
    #[must_use]
    pub fn phase(&self, world: &World) -> Phase {
        query::phase(world)
    }

    /// Exposes the HUD scalars shown on the opening frame.
    #[must_use]
    pub fn hud(&self, world: &World) -> HudSnapshot {
        query::hud(world)
    }
}
