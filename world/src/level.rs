//! Text level loader.
//!
//! A level is a rectangle of characters, one per cell:
//!
//! | char | cell |
//! |---|---|
//! | `#` | indestructible wall |
//! | `+` | destructible wall |
//! | `.` or space | empty floor |
//! | `1`..`4` | player spawn |
//! | `E` | enemy spawn |
//! | `b` `p` `s` `h` | bomb count, bomb power, speed and heal pickups |
//!
//! Parsing validates the whole text before anything is spawned.

use cat_bomber_core::{Modifier, PlayerIndex, Position, MAX_PLAYERS};
use thiserror::Error;

use crate::pool::PoolError;

/// Reasons a level cannot be loaded.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The text holds no cells.
    #[error("level contains no cells")]
    EmptyLevel,
    /// The level does not fit the grid coordinate space.
    #[error("level is too large to address")]
    LevelTooLarge,
    /// A row is shorter or longer than the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: u32,
        /// Width of the first row.
        expected: u32,
        /// Width of the offending row.
        found: u32,
    },
    /// A character does not describe any cell.
    #[error("unrecognised character {character:?} at {position}")]
    UnknownCharacter {
        /// Offending character.
        character: char,
        /// Cell holding the character.
        position: Position,
    },
    /// A player digit names a player slot that does not exist.
    #[error("player spawn {character:?} at {position} is outside 1..={MAX_PLAYERS}")]
    PlayerOutOfRange {
        /// Offending digit.
        character: char,
        /// Cell holding the digit.
        position: Position,
    },
    /// The same player digit appears twice.
    #[error("player {character} spawns twice, at {first} and {second}")]
    DuplicatePlayer {
        /// Repeated digit.
        character: char,
        /// First spawn cell.
        first: Position,
        /// Repeated spawn cell.
        second: Position,
    },
    /// Entity storage could not grow while spawning the level.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Entity requested by a level cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spawn {
    /// Wall without health.
    IndestructibleWall,
    /// Wall that blasts can destroy.
    DestructibleWall,
    /// Cat controlled by the given player.
    Player(PlayerIndex),
    /// Enemy.
    Enemy,
    /// Pickup granting the given modifier.
    Pickup(Modifier),
}

/// Validated level layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    width: u32,
    height: u32,
    spawns: Vec<(Position, Spawn)>,
}

impl Level {
    /// Parses and validates level text.
    pub fn parse(text: &str) -> Result<Self, SetupError> {
        let mut rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            let _ = rows.pop();
        }

        let Some(first) = rows.first() else {
            return Err(SetupError::EmptyLevel);
        };
        let width = u32::try_from(first.chars().count()).map_err(|_| SetupError::LevelTooLarge)?;
        let height = u32::try_from(rows.len()).map_err(|_| SetupError::LevelTooLarge)?;
        if width == 0 {
            return Err(SetupError::EmptyLevel);
        }

        let mut players: [Option<Position>; MAX_PLAYERS] = [None; MAX_PLAYERS];
        let mut spawns = Vec::new();

        for (y, row) in (0..height).zip(rows.iter()) {
            let found = u32::try_from(row.chars().count()).map_err(|_| SetupError::LevelTooLarge)?;
            if found != width {
                return Err(SetupError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, character) in (0..width).zip(row.chars()) {
                let position = Position::new(x, y);
                let spawn = match character {
                    '.' | ' ' => continue,
                    '#' => Spawn::IndestructibleWall,
                    '+' => Spawn::DestructibleWall,
                    'E' => Spawn::Enemy,
                    'b' => Spawn::Pickup(Modifier::BombCount),
                    'p' => Spawn::Pickup(Modifier::BombPower),
                    's' => Spawn::Pickup(Modifier::Speed),
                    'h' => Spawn::Pickup(Modifier::Heal),
                    digit if digit.is_ascii_digit() => {
                        let player = player_for_digit(digit)
                            .ok_or(SetupError::PlayerOutOfRange { character, position })?;
                        if let Some(first) = players[player.get()] {
                            return Err(SetupError::DuplicatePlayer {
                                character,
                                first,
                                second: position,
                            });
                        }
                        players[player.get()] = Some(position);
                        Spawn::Player(player)
                    }
                    _ => return Err(SetupError::UnknownCharacter { character, position }),
                };
                spawns.push((position, spawn));
            }
        }

        Ok(Self {
            width,
            height,
            spawns,
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Requested entities in row-major order.
    #[must_use]
    pub fn spawns(&self) -> &[(Position, Spawn)] {
        &self.spawns
    }
}

fn player_for_digit(digit: char) -> Option<PlayerIndex> {
    let number = digit.to_digit(10)?;
    let index = usize::try_from(number.checked_sub(1)?).ok()?;
    PlayerIndex::new(index)
}
