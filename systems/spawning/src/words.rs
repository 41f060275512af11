//! Built-in vocabulary grouped into the four difficulty tiers.

use word_defence_core::{DifficultyTier, Word, WordSource};

const FOUNDATION: [&str; 16] = [
    "CAT", "SUN", "DOG", "SKY", "RUN", "MAP", "KEY", "OWL", "ANT", "BEE", "FOX", "ICE", "JAM",
    "LOG", "NET", "PIG",
];

const EXPANDING: [&str; 12] = [
    "APPLE", "BRAVE", "CLOUD", "DRIFT", "EMBER", "FROST", "GUARD", "HONEY", "MAPLE", "NORTH",
    "OCEAN", "PLANT",
];

const ADVANCED: [&str; 10] = [
    "BALANCE", "CAPTURE", "DOLPHIN", "FORTRESS", "GRAVITY", "HARVEST", "JOURNEY", "LANTERN",
    "MORNING", "PATTERN",
];

const EXPERT: [&str; 10] = [
    "ADVENTURE", "BLUEPRINT", "CHEMISTRY", "DISCOVERY", "EVERGREEN", "FRAMEWORK", "GENERATOR",
    "HURRICANE", "LIGHTHOUSE", "MAGNITUDE",
];

/// Built-in word source cycling through a fixed per-tier vocabulary.
///
/// Selection within a tier is a plain rotation, keeping the scheduler's RNG
/// the only source of randomness in spawn decisions.
#[derive(Clone, Copy, Debug, Default)]
pub struct WordBank {
    cursors: [usize; 4],
}

impl WordBank {
    /// Creates a new word bank with every tier cursor at the start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tier_list(tier: DifficultyTier) -> &'static [&'static str] {
        match tier {
            DifficultyTier::Foundation => &FOUNDATION,
            DifficultyTier::Expanding => &EXPANDING,
            DifficultyTier::Advanced => &ADVANCED,
            DifficultyTier::Expert => &EXPERT,
        }
    }

    fn tier_index(tier: DifficultyTier) -> usize {
        DifficultyTier::ALL
            .iter()
            .position(|candidate| *candidate == tier)
            .expect("tier is a member of ALL")
    }
}

impl WordSource for WordBank {
    fn next_word(&mut self, tier: DifficultyTier) -> Word {
        let list = Self::tier_list(tier);
        let cursor = &mut self.cursors[Self::tier_index(tier)];
        let raw = list[*cursor % list.len()];
        *cursor = (*cursor + 1) % list.len();
        Word::sanitize(raw).expect("word bank entries are alphabetic")
    }
}
