#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that detects completed waves and requests advancement.
//!
//! Completion demands both halves of the gate: the destruction quota must be
//! met AND the field must be clear. Escaped enemies never count toward the
//! quota, so a wave can stall until its stragglers are dealt with. The world
//! re-validates the request, which keeps a stale `AdvanceWave` harmless.

use word_defence_core::{Command, EnemyView, Event, Phase, WaveSnapshot};

/// Wave controller that reacts to combat outcomes with advancement requests.
#[derive(Debug, Default)]
pub struct WaveControl;

impl WaveControl {
    /// Creates a new wave controller.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Consumes events and immutable views to emit `AdvanceWave` commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: Phase,
        wave: WaveSnapshot,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if phase != Phase::Playing {
            return;
        }

        let field_changed = events.iter().any(|event| {
            matches!(
                event,
                Event::WordCompleted { .. }
                    | Event::BombDetonated { .. }
                    | Event::EnemyBreached { .. }
            )
        });
        if !field_changed {
            return;
        }

        if wave.destroyed >= wave.quota && enemies.is_empty() {
            out.push(Command::AdvanceWave);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use word_defence_core::{EnemyId, EnemySnapshot, FieldPoint, Word};

    fn wave(destroyed: u32, quota: u32) -> WaveSnapshot {
        WaveSnapshot {
            number: 1,
            spawned: quota,
            destroyed,
            quota,
            spawn_interval: Duration::from_secs(1),
        }
    }

    fn completion_event() -> Vec<Event> {
        vec![Event::WordCompleted {
            enemy: EnemyId::new(0),
            word_length: 3,
            position: FieldPoint::new(100.0, 200.0),
            award: 30,
        }]
    }

    fn one_enemy() -> EnemyView {
        EnemyView::from_snapshots(vec![EnemySnapshot {
            id: EnemyId::new(1),
            word: Word::sanitize("SUN").expect("word"),
            typed: 0,
            position: FieldPoint::new(300.0, 100.0),
            speed: 30.0,
        }])
    }

    #[test]
    fn advances_when_quota_met_and_field_clear() {
        let mut control = WaveControl::new();
        let mut commands = Vec::new();
        control.handle(
            &completion_event(),
            Phase::Playing,
            wave(5, 5),
            &EnemyView::default(),
            &mut commands,
        );
        assert_eq!(commands, vec![Command::AdvanceWave]);
    }

    #[test]
    fn live_enemy_blocks_advancement() {
        let mut control = WaveControl::new();
        let mut commands = Vec::new();
        control.handle(
            &completion_event(),
            Phase::Playing,
            wave(5, 5),
            &one_enemy(),
            &mut commands,
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn unmet_quota_blocks_advancement() {
        let mut control = WaveControl::new();
        let mut commands = Vec::new();
        control.handle(
            &completion_event(),
            Phase::Playing,
            wave(4, 5),
            &EnemyView::default(),
            &mut commands,
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn quiet_event_batches_emit_nothing() {
        let mut control = WaveControl::new();
        let mut commands = Vec::new();
        control.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_secs(1),
            }],
            Phase::Playing,
            wave(5, 5),
            &EnemyView::default(),
            &mut commands,
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn non_playing_phases_emit_nothing() {
        let mut control = WaveControl::new();
        let mut commands = Vec::new();
        control.handle(
            &completion_event(),
            Phase::Paused,
            wave(5, 5),
            &EnemyView::default(),
            &mut commands,
        );
        assert!(commands.is_empty());
    }
}
