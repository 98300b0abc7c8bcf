#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Cat Bomber engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing what actually happened. Systems read immutable views of the world
//! and respond exclusively with new command batches.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Maximum number of players that may control a cat in a single round.
pub const MAX_PLAYERS: usize = 4;

/// Opaque reference to a slot inside a generational pool.
///
/// A handle is only meaningful together with the pool that issued it. It
/// confers no ownership: looking up a handle whose slot has since been freed
/// yields "not found" rather than the slot's new occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle {
    generation: u32,
    index: u32,
}

impl Handle {
    /// Reserved sentinel that never refers to a live slot.
    pub const NONE: Self = Self {
        generation: 0,
        index: u32::MAX,
    };

    /// Creates a handle from its raw parts.
    #[must_use]
    pub const fn new(generation: u32, index: u32) -> Self {
        Self { generation, index }
    }

    /// Generation the slot had when the handle was issued.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Slot index inside the issuing pool.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Reports whether the handle is the [`Handle::NONE`] sentinel.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.index == u32::MAX && self.generation == 0
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::NONE
    }
}

/// Location of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Neighbouring position one cell away in `direction`.
    ///
    /// Returns `None` when the step would underflow or overflow the
    /// coordinate space. Grid bounds are not checked here.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Up => self.y.checked_sub(1).map(|y| Position::new(self.x, y)),
            Direction::Left => self.x.checked_sub(1).map(|x| Position::new(x, self.y)),
            Direction::Down => self.y.checked_add(1).map(|y| Position::new(self.x, y)),
            Direction::Right => self.x.checked_add(1).map(|x| Position::new(x, self.y)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in neighbour evaluation order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];
}

/// Hit points of a destructible entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Remaining hit points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Removes up to `damage` hit points, returning how many were removed.
    ///
    /// Health never drops below zero, so the result is `damage` clamped to the
    /// hit points that were left.
    #[must_use]
    pub fn subtract(&mut self, damage: u32) -> u32 {
        let dealt = damage.min(self.0);
        self.0 -= dealt;
        dealt
    }

    /// Restores `amount` hit points without exceeding `max`.
    pub fn heal(&mut self, amount: u32, max: Health) {
        self.0 = self.0.saturating_add(amount).min(max.0.max(self.0));
    }
}

/// Monotonic instant measured from the start of the round.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Timestamp(Duration);

impl Timestamp {
    /// Start of the round.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Creates a timestamp from whole milliseconds since the start of the round.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Time elapsed since the start of the round.
    #[must_use]
    pub const fn since_start(&self) -> Duration {
        self.0
    }

    /// Timestamp shifted forward by `duration`.
    #[must_use]
    pub fn saturating_add(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration))
    }

    /// Time between `earlier` and `self`, zero if `earlier` is later.
    #[must_use]
    pub fn saturating_since(self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

/// Interval between two instants used for cooldowns and fuses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timer {
    start: Timestamp,
    end: Timestamp,
}

impl Timer {
    /// Creates a timer running from `start` for `length`.
    #[must_use]
    pub fn new(start: Timestamp, length: Duration) -> Self {
        Self {
            start,
            end: start.saturating_add(length),
        }
    }

    /// Timer that is finished for every instant after `now`.
    #[must_use]
    pub const fn finished_at(now: Timestamp) -> Self {
        Self {
            start: now,
            end: now,
        }
    }

    /// Instant the timer started.
    #[must_use]
    pub const fn start(&self) -> Timestamp {
        self.start
    }

    /// Instant the timer ends.
    #[must_use]
    pub const fn end(&self) -> Timestamp {
        self.end
    }

    /// Time elapsed since the start, capped at the total length.
    #[must_use]
    pub fn elapsed(&self, now: Timestamp) -> Duration {
        now.saturating_since(self.start).min(self.total())
    }

    /// Total length of the timer.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.end.saturating_since(self.start)
    }

    /// Fraction of the timer that has elapsed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Timestamp) -> f32 {
        let total = self.total();
        if total.is_zero() {
            return 1.0;
        }
        (self.elapsed(now).as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Reports whether the timer ended strictly before `now`.
    #[must_use]
    pub fn is_finished(&self, now: Timestamp) -> bool {
        self.end < now
    }

    /// Moves the end of the timer to `now` if it would otherwise end later.
    pub fn cut_short(&mut self, now: Timestamp) {
        if self.end > now {
            self.end = now.max(self.start);
        }
    }
}

/// Zero-based index of a player slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerIndex(u8);

impl PlayerIndex {
    /// Creates a player index, rejecting values outside `0..MAX_PLAYERS`.
    #[must_use]
    pub fn new(value: usize) -> Option<Self> {
        if value < MAX_PLAYERS {
            u8::try_from(value).ok().map(Self)
        } else {
            None
        }
    }

    /// Numeric slot of the player.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0 as usize
    }
}

/// Effect granted by a modifier pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// Extends explosion reach by one cell.
    BombPower,
    /// Allows one more simultaneous bomb.
    BombCount,
    /// Shortens the movement cooldown.
    Speed,
    /// Restores hit points.
    Heal,
}

/// Variant of an entity without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    /// Player-controlled cat.
    Cat,
    /// Placed bomb.
    Bomb,
    /// Hostile creature hunting cats.
    Enemy,
    /// Static wall, destructible or not.
    Wall,
    /// Collectable modifier.
    ModifierPickup,
}

impl EntityTag {
    /// Reports whether entities of this kind prevent others from entering their tile.
    #[must_use]
    pub const fn blocks_movement(self) -> bool {
        !matches!(self, Self::ModifierPickup)
    }
}

/// Immutable representation of an enemy used by systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySnapshot {
    /// Entity handle of the enemy.
    pub entity: Handle,
    /// Cell currently occupied.
    pub position: Position,
    /// Indicates whether the movement cooldown has elapsed.
    pub ready_to_move: bool,
    /// Indicates whether the hit cooldown has elapsed.
    pub ready_to_hit: bool,
}

/// Read-only snapshot describing all enemies in the world.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.entity.index());
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }
}

/// Immutable representation of a cat used by systems and adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatSnapshot {
    /// Entity handle of the cat.
    pub entity: Handle,
    /// Player steering the cat, if any.
    pub player: Option<PlayerIndex>,
    /// Cell currently occupied.
    pub position: Position,
    /// Remaining hit points.
    pub health: Health,
    /// Number of bombs the cat may still place.
    pub bombs_left: u32,
    /// Reach of the cat's explosions in cells.
    pub bomb_power: u32,
    /// Indicates whether the movement cooldown has elapsed.
    pub ready_to_move: bool,
}

/// Read-only snapshot describing all cats in the world.
#[derive(Clone, Debug, Default)]
pub struct CatView {
    snapshots: Vec<CatSnapshot>,
}

impl CatView {
    /// Creates a new cat view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<CatSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.entity.index());
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &CatSnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot of the cat steered by `player`.
    #[must_use]
    pub fn for_player(&self, player: PlayerIndex) -> Option<&CatSnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.player == Some(player))
    }
}

/// Immutable representation of a placed bomb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BombSnapshot {
    /// Entity handle of the bomb.
    pub entity: Handle,
    /// Cell holding the bomb.
    pub position: Position,
    /// Fuse of the bomb.
    pub fuse: Timer,
    /// Indicates whether the fuse has burnt down.
    pub due: bool,
}

/// Read-only snapshot describing all bombs in the world.
#[derive(Clone, Debug, Default)]
pub struct BombView {
    snapshots: Vec<BombSnapshot>,
}

impl BombView {
    /// Creates a new bomb view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BombSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.entity.index());
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &BombSnapshot> {
        self.snapshots.iter()
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the world clock to `now`.
    Tick {
        /// Current monotonic time.
        now: Timestamp,
    },
    /// Requests that a cat or enemy move one cell.
    StepEntity {
        /// Entity attempting to move.
        entity: Handle,
        /// Direction of travel.
        direction: Direction,
    },
    /// Requests that a cat drop a bomb on its tile.
    PlaceBomb {
        /// Entity handle of the cat placing the bomb.
        cat: Handle,
    },
    /// Requests that a bomb explode.
    DetonateBomb {
        /// Entity handle of the bomb.
        bomb: Handle,
        /// Uniform value in `[0, 1)` scaling the cosmetic explosion lifetime.
        jitter: f32,
    },
    /// Requests that an enemy strike an adjacent cell.
    MeleeAttack {
        /// Entity handle of the attacking enemy.
        enemy: Handle,
        /// Cell receiving the blow.
        target: Position,
    },
}

/// Reasons a step request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepRejection {
    /// The entity no longer exists or cannot move on its own.
    NotMovable,
    /// The entity's movement cooldown has not elapsed.
    CoolingDown,
    /// The destination lies outside the grid or is blocked.
    Blocked,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// New current time.
        now: Timestamp,
    },
    /// Confirms that an entity was created.
    EntitySpawned {
        /// Handle of the new entity.
        entity: Handle,
        /// Kind of entity created.
        tag: EntityTag,
        /// Cell the entity occupies.
        position: Position,
    },
    /// Confirms that an entity moved between two cells.
    EntityMoved {
        /// Entity that moved.
        entity: Handle,
        /// Cell occupied before the move.
        from: Position,
        /// Cell occupied after the move.
        to: Position,
    },
    /// Reports that a step request was rejected.
    StepRejected {
        /// Entity that attempted to move.
        entity: Handle,
        /// Specific reason the step failed.
        reason: StepRejection,
    },
    /// Reports damage absorbed by an entity.
    EntityDamaged {
        /// Entity that took damage.
        entity: Handle,
        /// Hit points actually removed.
        dealt: u32,
        /// Hit points left afterwards.
        remaining: Health,
    },
    /// Confirms that an entity was removed from the world.
    EntityRemoved {
        /// Handle of the removed entity, now stale.
        entity: Handle,
        /// Kind of entity removed.
        tag: EntityTag,
        /// Cell the entity occupied.
        position: Position,
    },
    /// Confirms that a bomb was placed.
    BombPlaced {
        /// Entity handle of the bomb.
        bomb: Handle,
        /// Entity handle of the cat that placed it.
        cat: Handle,
        /// Cell holding the bomb.
        position: Position,
    },
    /// Confirms that a bomb exploded.
    BombExploded {
        /// Entity handle of the bomb, now stale.
        bomb: Handle,
        /// Cells covered by the blast.
        cells: Vec<Position>,
        /// Total damage absorbed by entities in the blast.
        dealt: u32,
    },
    /// Confirms that a cat collected a modifier.
    PickupCollected {
        /// Entity handle of the collecting cat.
        cat: Handle,
        /// Modifier that was applied.
        modifier: Modifier,
    },
    /// Announces that a player lost its cat.
    PlayerEliminated {
        /// Player whose cat was removed.
        player: PlayerIndex,
    },
}

#[cfg(test)]
mod tests {
    use super::{Direction, Handle, Health, PlayerIndex, Position, Timer, Timestamp, MAX_PLAYERS};
    use serde::{de::DeserializeOwned, Serialize};
    use std::time::Duration;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = Position::new(1, 1);
        let destination = Position::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn step_refuses_to_underflow() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::Up), None);
        assert_eq!(corner.step(Direction::Left), None);
        assert_eq!(corner.step(Direction::Down), Some(Position::new(0, 1)));
        assert_eq!(corner.step(Direction::Right), Some(Position::new(1, 0)));
    }

    #[test]
    fn sentinel_handle_is_default() {
        assert!(Handle::default().is_none());
        assert!(!Handle::new(0, 0).is_none());
        assert_eq!(Handle::NONE.index(), u32::MAX);
    }

    #[test]
    fn subtract_reports_damage_actually_removed() {
        let mut health = Health::new(3);
        assert_eq!(health.subtract(2), 2);
        assert_eq!(health.subtract(5), 1);
        assert!(health.is_zero());
        assert_eq!(health.subtract(4), 0);
    }

    #[test]
    fn heal_is_capped_by_maximum() {
        let mut health = Health::new(1);
        health.heal(10, Health::new(3));
        assert_eq!(health, Health::new(3));
    }

    #[test]
    fn timer_finishes_strictly_after_end() {
        let start = Timestamp::from_millis(1_000);
        let timer = Timer::new(start, Duration::from_millis(500));
        assert!(!timer.is_finished(Timestamp::from_millis(1_500)));
        assert!(timer.is_finished(Timestamp::from_millis(1_501)));
        assert_eq!(
            timer.elapsed(Timestamp::from_millis(1_250)),
            Duration::from_millis(250)
        );
        assert!((timer.progress(Timestamp::from_millis(1_250)) - 0.5).abs() < f32::EPSILON);
        assert!((timer.progress(Timestamp::from_millis(9_000)) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn cut_short_never_extends() {
        let mut timer = Timer::new(Timestamp::from_millis(0), Duration::from_millis(100));
        timer.cut_short(Timestamp::from_millis(500));
        assert_eq!(timer.end(), Timestamp::from_millis(100));
        timer.cut_short(Timestamp::from_millis(40));
        assert_eq!(timer.end(), Timestamp::from_millis(40));
    }

    #[test]
    fn player_index_rejects_out_of_range() {
        assert!(PlayerIndex::new(MAX_PLAYERS).is_none());
        assert_eq!(PlayerIndex::new(2).map(|player| player.get()), Some(2));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn handle_round_trips_through_bincode() {
        assert_round_trip(&Handle::new(7, 42));
    }
}
