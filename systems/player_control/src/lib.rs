#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system translating per-player intents into cat commands.

use cat_bomber_core::{CatView, Command, Direction, PlayerIndex};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerIntent {
    /// Player the intent belongs to.
    pub player: PlayerIndex,
    /// Direction the player wants the cat to walk in, if any.
    pub movement: Option<Direction>,
    /// Indicates whether the player wants to drop a bomb on this frame.
    pub place_bomb: bool,
}

impl PlayerIntent {
    /// Creates a new intent with explicit field values.
    #[must_use]
    pub const fn new(player: PlayerIndex, movement: Option<Direction>, place_bomb: bool) -> Self {
        Self {
            player,
            movement,
            place_bomb,
        }
    }

    /// Intent that asks for nothing.
    #[must_use]
    pub const fn idle(player: PlayerIndex) -> Self {
        Self::new(player, None, false)
    }
}

/// Pure system that maps intents onto [`Command::PlaceBomb`] and [`Command::StepEntity`].
#[derive(Debug, Default)]
pub struct PlayerControl;

impl PlayerControl {
    /// Emits commands for every intent whose player still has a cat.
    ///
    /// Bombs are requested before steps so a cat that does both leaves the
    /// bomb on the cell it walks away from. Steps are only requested once the
    /// cat's movement cooldown has elapsed and bombs only while the cat has
    /// bombs left.
    pub fn handle(&mut self, intents: &[PlayerIntent], cats: &CatView, out: &mut Vec<Command>) {
        for intent in intents {
            let Some(cat) = cats.for_player(intent.player) else {
                continue;
            };

            if intent.place_bomb && cat.bombs_left > 0 {
                out.push(Command::PlaceBomb { cat: cat.entity });
            }
            if let Some(direction) = intent.movement {
                if cat.ready_to_move {
                    out.push(Command::StepEntity {
                        entity: cat.entity,
                        direction,
                    });
                }
            }
        }
    }
}
