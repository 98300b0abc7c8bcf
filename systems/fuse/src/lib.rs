#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fuse system that requests detonation of bombs whose fuse has burnt down.

use cat_bomber_core::{BombView, Command, Event};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Pure system emitting [`Command::DetonateBomb`] for every due bomb.
///
/// The jitter attached to each command comes from a seeded generator, so two
/// runs with the same seed request identical explosion effects.
#[derive(Debug)]
pub struct Fuse {
    rng: ChaCha8Rng,
}

impl Fuse {
    /// Creates a fuse system whose cosmetic jitter is derived from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Consumes world events and the bomb view to emit detonation commands.
    ///
    /// Bombs are only inspected on batches that advanced time.
    pub fn handle(&mut self, events: &[Event], bombs: &BombView, out: &mut Vec<Command>) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for bomb in bombs.iter().filter(|bomb| bomb.due) {
            let jitter: f32 = self.rng.gen();
            trace!(bomb = ?bomb.entity, position = %bomb.position, "fuse burnt down");
            out.push(Command::DetonateBomb {
                bomb: bomb.entity,
                jitter,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cat_bomber_core::{BombSnapshot, Handle, Position, Timer, Timestamp};
    use std::time::Duration;

    fn view(due: &[bool]) -> BombView {
        let snapshots = due
            .iter()
            .zip(0_u32..)
            .map(|(due, index)| BombSnapshot {
                entity: Handle::new(0, index),
                position: Position::new(index, 0),
                fuse: Timer::new(Timestamp::ZERO, Duration::from_secs(1)),
                due: *due,
            })
            .collect();
        BombView::from_snapshots(snapshots)
    }

    #[test]
    fn ignores_batches_without_time() {
        let mut fuse = Fuse::new(7);
        let mut commands = Vec::new();
        fuse.handle(&[], &view(&[true]), &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn jitter_stays_in_unit_interval() {
        let mut fuse = Fuse::new(11);
        let mut commands = Vec::new();
        let tick = [Event::TimeAdvanced {
            now: Timestamp::from_millis(5),
        }];
        for _ in 0..64 {
            fuse.handle(&tick, &view(&[true]), &mut commands);
        }
        for command in commands {
            let Command::DetonateBomb { jitter, .. } = command else {
                panic!("unexpected command {command:?}");
            };
            assert!((0.0..1.0).contains(&jitter));
        }
    }
}
