//! Generic entity records and the specialised records linked to them.
//!
//! Every game object lives twice: once as an [`Entity`] (position, health and
//! a tagged reference) in the entity pool, and once as a specialised record in
//! the pool for its kind. Each specialised record points back at its entity.

use std::time::Duration;

use cat_bomber_core::{EntityTag, Handle, Health, Modifier, PlayerIndex, Position, Timer};

/// Thing with a position and optional health that lives in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entity {
    /// Remaining hit points; `None` means indestructible.
    pub health: Option<Health>,
    /// Cell currently occupied.
    pub position: Position,
    /// Specialised record backing the entity.
    pub kind: EntityKind,
}

impl Entity {
    /// Kind of entity without its payload.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        self.kind.tag()
    }

    /// Reports whether other entities may not enter this entity's tile.
    #[must_use]
    pub const fn blocks_movement(&self) -> bool {
        self.kind.tag().blocks_movement()
    }

    /// Reports whether damage can never remove the entity.
    #[must_use]
    pub const fn is_indestructible(&self) -> bool {
        self.health.is_none()
    }
}

/// Tagged reference from an entity into the pool of its specialised record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Handle into the cat pool.
    Cat(Handle),
    /// Handle into the bomb pool.
    Bomb(Handle),
    /// Handle into the enemy pool.
    Enemy(Handle),
    /// Walls carry no specialised record.
    Wall,
    /// Handle into the pickup pool.
    ModifierPickup(Handle),
}

impl EntityKind {
    /// Variant without its payload.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        match self {
            Self::Cat(_) => EntityTag::Cat,
            Self::Bomb(_) => EntityTag::Bomb,
            Self::Enemy(_) => EntityTag::Enemy,
            Self::Wall => EntityTag::Wall,
            Self::ModifierPickup(_) => EntityTag::ModifierPickup,
        }
    }

    /// Handle of the specialised record, if the kind has one.
    #[must_use]
    pub const fn record(&self) -> Option<Handle> {
        match *self {
            Self::Cat(handle)
            | Self::Bomb(handle)
            | Self::Enemy(handle)
            | Self::ModifierPickup(handle) => Some(handle),
            Self::Wall => None,
        }
    }
}

/// Player-controlled cat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cat {
    /// Owning entity.
    pub entity: Handle,
    /// Player steering the cat, if any.
    pub player: Option<PlayerIndex>,
    /// Distance map tracking this cat, if enemies hunt it.
    pub distance_map: Option<Handle>,
    /// Upper bound for healing.
    pub max_health: Health,
    /// Reach of the cat's explosions in cells.
    pub bomb_power: u32,
    /// Number of bombs the cat may have on the field at once.
    pub max_bombs: u32,
    /// Number of the cat's bombs currently on the field.
    pub bombs_out: u32,
    /// Delay enforced between two steps.
    pub move_cooldown: Duration,
    /// Running movement cooldown.
    pub move_timer: Timer,
}

impl Cat {
    /// Reports whether the cat may place another bomb.
    #[must_use]
    pub const fn has_bombs_left(&self) -> bool {
        self.bombs_out < self.max_bombs
    }
}

/// Bomb waiting for its fuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bomb {
    /// Owning entity.
    pub entity: Handle,
    /// Cat record that placed the bomb.
    pub owner: Handle,
    /// Reach of the explosion in cells.
    pub power: u32,
    /// Damage dealt to every destructible occupant of the blast.
    pub damage: u32,
    /// Fuse; the bomb is due once it has finished.
    pub fuse: Timer,
}

/// Hostile creature hunting cats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    /// Owning entity.
    pub entity: Handle,
    /// Damage dealt per melee hit.
    pub damage: u32,
    /// Delay enforced between two steps.
    pub move_cooldown: Duration,
    /// Delay enforced between two hits.
    pub hit_cooldown: Duration,
    /// Running movement cooldown.
    pub move_timer: Timer,
    /// Running hit cooldown.
    pub hit_timer: Timer,
}

/// Collectable modifier lying on the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModifierPickup {
    /// Owning entity.
    pub entity: Handle,
    /// Effect granted to the collecting cat.
    pub modifier: Modifier,
}

/// Cosmetic trace of a detonation kept for observers.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    /// Cells covered by the blast.
    pub cells: Vec<Position>,
    /// Lifetime of the effect.
    pub timer: Timer,
}
