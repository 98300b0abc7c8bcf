#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy behaviour that follows distance maps toward the nearest cat.

use cat_bomber_core::{Command, Direction, EnemySnapshot, EnemyView, Event, Position};
use cat_bomber_world::UNREACHED;
use tracing::trace;

/// Pure system that turns distance-map readings into enemy commands.
///
/// Each enemy inspects its four neighbours in [`Direction::ALL`] order and
/// picks the first one with the smallest distance to any tracked cat. A
/// distance of zero means a cat stands next to the enemy, which then attacks
/// instead of moving.
#[derive(Debug, Default)]
pub struct EnemyAi;

impl EnemyAi {
    /// Consumes world events and immutable views to emit enemy commands.
    ///
    /// `distance` reports the smallest distance from a cell to any tracked cat,
    /// [`UNREACHED`] when no map reaches it. Nothing is emitted for batches
    /// that did not advance time.
    pub fn handle<D, P>(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        distance: D,
        is_passable: P,
        out: &mut Vec<Command>,
    ) where
        D: Fn(Position) -> u32,
        P: Fn(Position) -> bool,
    {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for enemy in enemies.iter() {
            if let Some(command) = decide(enemy, &distance, &is_passable) {
                out.push(command);
            }
        }
    }
}

fn decide<D, P>(enemy: &EnemySnapshot, distance: &D, is_passable: &P) -> Option<Command>
where
    D: Fn(Position) -> u32,
    P: Fn(Position) -> bool,
{
    if !enemy.ready_to_move && !enemy.ready_to_hit {
        return None;
    }

    let (direction, cell, nearest) = closest_neighbor(enemy.position, distance)?;
    if nearest == 0 {
        if !enemy.ready_to_hit {
            return None;
        }
        trace!(enemy = ?enemy.entity, target = %cell, "enemy attacks");
        return Some(Command::MeleeAttack {
            enemy: enemy.entity,
            target: cell,
        });
    }

    if nearest == UNREACHED || !enemy.ready_to_move || !is_passable(cell) {
        return None;
    }
    Some(Command::StepEntity {
        entity: enemy.entity,
        direction,
    })
}

fn closest_neighbor<D>(origin: Position, distance: &D) -> Option<(Direction, Position, u32)>
where
    D: Fn(Position) -> u32,
{
    let mut best: Option<(Direction, Position, u32)> = None;
    for direction in Direction::ALL {
        let Some(cell) = origin.step(direction) else {
            continue;
        };
        let value = distance(cell);
        if best.map_or(true, |(_, _, current)| value < current) {
            best = Some((direction, cell, value));
        }
    }
    best
}
