//! Keystroke-to-target resolution: a two-state machine that is either idle
//! or locked onto a single enemy accumulating a typed prefix.
//!
//! The machine never abandons a locked target on a wrong keystroke; the lock
//! is only released by completing the word or by combat handling removing
//! the enemy (breach or bomb). This keeps the forgiving typing-practice feel
//! where only correct next-letters are accepted.

use word_defence_core::EnemyId;

use crate::entities::Enemy;

/// Result of feeding one normalised keystroke into the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyOutcome {
    /// The keystroke extended the locked target's prefix.
    Hit { enemy: EnemyId, prefix: u32 },
    /// The keystroke finished the locked target's word.
    Completed { enemy: EnemyId },
    /// The keystroke matched nothing.
    Miss,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct TypingLock {
    target: Option<EnemyId>,
}

impl TypingLock {
    pub(crate) fn target(&self) -> Option<EnemyId> {
        self.target
    }

    /// Releases the lock without touching enemy state. Called by combat
    /// handling when the locked enemy leaves the pool for any reason.
    pub(crate) fn release(&mut self) {
        self.target = None;
    }

    /// Applies one uppercase alphabetic keystroke against the pool.
    ///
    /// While locked, only the next letter of the target word is accepted;
    /// anything else is a miss that leaves the lock and prefix unchanged.
    /// While idle, the lowest-id enemy whose word starts with the key is
    /// locked, which keeps the tie-break deterministic for a given pool.
    pub(crate) fn resolve(&mut self, key: char, enemies: &mut [Enemy]) -> KeyOutcome {
        if let Some(target) = self.target {
            match enemies.iter_mut().find(|enemy| enemy.id == target) {
                Some(enemy) => {
                    return match enemy.word.letter(enemy.typed) {
                        Some(expected) if expected == key => {
                            enemy.typed += 1;
                            if enemy.typed == enemy.word.len() {
                                self.target = None;
                                KeyOutcome::Completed { enemy: target }
                            } else {
                                KeyOutcome::Hit {
                                    enemy: target,
                                    prefix: enemy.typed,
                                }
                            }
                        }
                        _ => KeyOutcome::Miss,
                    };
                }
                // Stale lock; combat should have released it, but a missing
                // target must never wedge the machine.
                None => self.target = None,
            }
        }

        let candidate = enemies
            .iter_mut()
            .filter(|enemy| enemy.typed == 0 && enemy.word.first_letter() == key)
            .min_by_key(|enemy| enemy.id);

        match candidate {
            Some(enemy) => {
                enemy.typed = 1;
                if enemy.typed == enemy.word.len() {
                    KeyOutcome::Completed { enemy: enemy.id }
                } else {
                    self.target = Some(enemy.id);
                    KeyOutcome::Hit {
                        enemy: enemy.id,
                        prefix: 1,
                    }
                }
            }
            None => KeyOutcome::Miss,
        }
    }
}
