#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for Cat Bomber.
//!
//! The [`World`] owns every entity pool, the spatial grid and the distance
//! maps. It is the only place allowed to change where things are or whether
//! they exist, and after every public call the entity pool, the specialised
//! pools and the grid agree with each other. Systems never touch it directly:
//! they read through [`query`] and submit [`Command`]s to [`apply`].

pub mod config;
pub mod distance;
pub mod entity;
pub mod grid;
pub mod level;
pub mod pool;
pub mod tile;

use std::{collections::VecDeque, mem, time::Duration};

use cat_bomber_core::{
    Command, Direction, EntityTag, Event, Handle, Health, Modifier, PlayerIndex, Position,
    StepRejection, Timer, Timestamp, MAX_PLAYERS,
};
use tracing::{debug, info, trace, warn};

pub use config::Config;
pub use distance::{DistanceMap, UNREACHED};
pub use entity::{Bomb, Cat, Enemy, Entity, EntityKind, Explosion, ModifierPickup};
pub use grid::{Grid, Tile, TILE_DEPTH};
pub use level::{Level, SetupError, Spawn};
pub use pool::{PoolError, Set};
pub use tile::{FixedArray, TileFull};

/// Represents the authoritative Cat Bomber world state.
#[derive(Debug)]
pub struct World {
    config: Config,
    grid: Grid,
    entities: Set<Entity>,
    cats: Set<Cat>,
    bombs: Set<Bomb>,
    enemies: Set<Enemy>,
    pickups: Set<ModifierPickup>,
    distance_maps: Set<DistanceMap>,
    players: [Option<Handle>; MAX_PLAYERS],
    explosions: Vec<Explosion>,
    bfs_queue: VecDeque<Position>,
    stale_distances: bool,
    now: Timestamp,
    events: Vec<Event>,
}

impl World {
    /// Creates an empty world of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32, config: Config) -> Self {
        Self {
            config,
            grid: Grid::new(width, height),
            entities: Set::new(),
            cats: Set::new(),
            bombs: Set::new(),
            enemies: Set::new(),
            pickups: Set::new(),
            distance_maps: Set::new(),
            players: [None; MAX_PLAYERS],
            explosions: Vec::new(),
            bfs_queue: VecDeque::new(),
            stale_distances: false,
            now: Timestamp::ZERO,
            events: Vec::new(),
        }
    }

    /// Builds a world from level text.
    ///
    /// The whole level is validated before the first entity is created, so a
    /// malformed level never yields a half-populated world.
    pub fn from_level(text: &str, config: Config) -> Result<Self, SetupError> {
        let level = Level::parse(text)?;
        let mut world = Self::new(level.width(), level.height(), config);

        for &(position, spawn) in level.spawns() {
            let _ = match spawn {
                Spawn::IndestructibleWall => world.create_wall(position, None)?,
                Spawn::DestructibleWall => {
                    let health = Health::new(world.config.destructible_wall_health);
                    world.create_wall(position, Some(health))?
                }
                Spawn::Player(player) => world.create_cat(position, Some(player))?,
                Spawn::Enemy => world.create_enemy(position)?,
                Spawn::Pickup(modifier) => world.create_modifier_pickup(position, modifier)?,
            };
        }
        world.rebuild_distance_maps();

        info!(
            width = level.width(),
            height = level.height(),
            entities = world.entities.len(),
            cats = world.cats.len(),
            enemies = world.enemies.len(),
            "level loaded"
        );
        Ok(world)
    }

    /// Spawns a cat, optionally steered by `player`.
    ///
    /// When the configuration tracks cats, a distance map is registered for the
    /// cat and filled from its spawn cell.
    pub fn create_cat(
        &mut self,
        position: Position,
        player: Option<PlayerIndex>,
    ) -> Result<Handle, PoolError> {
        let health = Health::new(self.config.cat_health);
        let record = self.cats.add(Cat {
            entity: Handle::NONE,
            player,
            distance_map: None,
            max_health: health,
            bomb_power: self.config.bomb_power,
            max_bombs: self.config.max_bombs,
            bombs_out: 0,
            move_cooldown: self.config.cat_move_cooldown(),
            move_timer: Timer::finished_at(self.now),
        })?;

        let distance_map = if self.config.track_cat_distances {
            let map = DistanceMap::new(self.grid.width(), self.grid.height());
            match self.distance_maps.add(map) {
                Ok(map) => Some(map),
                Err(error) => {
                    let _ = self.cats.remove(record);
                    return Err(error);
                }
            }
        } else {
            None
        };

        let entity = match self.link_entity(Some(health), position, EntityKind::Cat(record)) {
            Ok(entity) => entity,
            Err(error) => {
                let _ = self.cats.remove(record);
                if let Some(map) = distance_map {
                    let _ = self.distance_maps.remove(map);
                }
                return Err(error);
            }
        };

        if let Some(cat) = self.cats.get_mut(record) {
            cat.entity = entity;
            cat.distance_map = distance_map;
        }
        if let Some(player) = player {
            if let Some(previous) = self.players[player.get()].replace(entity) {
                warn!(?player, ?previous, "player already had a cat; reassigning");
                self.release_player(previous);
            }
        }
        if let Some(map) = distance_map {
            self.recalculate_distances_from(position, map);
        }
        Ok(entity)
    }

    fn release_player(&mut self, entity: Handle) {
        let Some(EntityKind::Cat(record)) = self.entities.get(entity).map(|entity| entity.kind)
        else {
            return;
        };
        if let Some(cat) = self.cats.get_mut(record) {
            cat.player = None;
        }
    }

    /// Spawns a bomb owned by the cat record `owner`.
    pub fn create_bomb(
        &mut self,
        position: Position,
        owner: Handle,
        power: u32,
        damage: u32,
        fuse: Duration,
    ) -> Result<Handle, PoolError> {
        let record = self.bombs.add(Bomb {
            entity: Handle::NONE,
            owner,
            power,
            damage,
            fuse: Timer::new(self.now, fuse),
        })?;
        let entity = match self.link_entity(None, position, EntityKind::Bomb(record)) {
            Ok(entity) => entity,
            Err(error) => {
                let _ = self.bombs.remove(record);
                return Err(error);
            }
        };

        if let Some(bomb) = self.bombs.get_mut(record) {
            bomb.entity = entity;
        }
        if let Some(cat) = self.cats.get_mut(owner) {
            cat.bombs_out = cat.bombs_out.saturating_add(1);
        }
        self.stale_distances = true;
        Ok(entity)
    }

    /// Spawns a wall; `health = None` makes it indestructible.
    pub fn create_wall(
        &mut self,
        position: Position,
        health: Option<Health>,
    ) -> Result<Handle, PoolError> {
        let entity = self.link_entity(health, position, EntityKind::Wall)?;
        self.stale_distances = true;
        Ok(entity)
    }

    /// Spawns an enemy using the configured health, damage and cooldowns.
    pub fn create_enemy(&mut self, position: Position) -> Result<Handle, PoolError> {
        let record = self.enemies.add(Enemy {
            entity: Handle::NONE,
            damage: self.config.enemy_damage,
            move_cooldown: self.config.enemy_move_cooldown(),
            hit_cooldown: self.config.enemy_hit_cooldown(),
            move_timer: Timer::finished_at(self.now),
            hit_timer: Timer::finished_at(self.now),
        })?;
        let health = Health::new(self.config.enemy_health);
        let entity = match self.link_entity(Some(health), position, EntityKind::Enemy(record)) {
            Ok(entity) => entity,
            Err(error) => {
                let _ = self.enemies.remove(record);
                return Err(error);
            }
        };

        if let Some(enemy) = self.enemies.get_mut(record) {
            enemy.entity = entity;
        }
        Ok(entity)
    }

    /// Spawns a pickup granting `modifier` to the cat that walks onto it.
    ///
    /// Pickups have a single hit point, so blasts destroy them.
    pub fn create_modifier_pickup(
        &mut self,
        position: Position,
        modifier: Modifier,
    ) -> Result<Handle, PoolError> {
        let record = self.pickups.add(ModifierPickup {
            entity: Handle::NONE,
            modifier,
        })?;
        let kind = EntityKind::ModifierPickup(record);
        let entity = match self.link_entity(Some(Health::new(1)), position, kind) {
            Ok(entity) => entity,
            Err(error) => {
                let _ = self.pickups.remove(record);
                return Err(error);
            }
        };

        if let Some(pickup) = self.pickups.get_mut(record) {
            pickup.entity = entity;
        }
        Ok(entity)
    }

    fn link_entity(
        &mut self,
        health: Option<Health>,
        position: Position,
        kind: EntityKind,
    ) -> Result<Handle, PoolError> {
        let tag = kind.tag();
        let tile = self.grid.at(position);
        assert!(!tile.is_full(), "tile {position} is full, cannot spawn {tag:?}");

        let entity = self.entities.add(Entity {
            health,
            position,
            kind,
        })?;
        if let Err(full) = self.grid.at_mut(position).try_append(entity) {
            panic!("tile {position} rejected {tag:?}: {full}");
        }
        self.events.push(Event::EntitySpawned {
            entity,
            tag,
            position,
        });
        Ok(entity)
    }

    /// Removes an entity together with its specialised record.
    ///
    /// Returns `false` for stale or unknown handles. Removing a cat drops its
    /// distance map and releases its player; removing a bomb returns it to its
    /// owner's budget.
    pub fn remove_entity(&mut self, entity: Handle) -> bool {
        let Some(removed) = self.entities.get(entity).copied() else {
            return false;
        };
        let position = removed.position;
        let tag = removed.tag();

        let found = self.grid.at_mut(position).swap_remove(&entity);
        assert!(found, "entity {entity:?} missing from tile {position}");
        self.events.push(Event::EntityRemoved {
            entity,
            tag,
            position,
        });

        match removed.kind {
            EntityKind::Cat(record) => self.tear_down_cat(record),
            EntityKind::Bomb(record) => {
                if let Some(bomb) = self.bombs.remove(record) {
                    if let Some(owner) = self.cats.get_mut(bomb.owner) {
                        owner.bombs_out = owner.bombs_out.saturating_sub(1);
                    }
                }
                self.stale_distances = true;
            }
            EntityKind::Enemy(record) => {
                let _ = self.enemies.remove(record);
            }
            EntityKind::ModifierPickup(record) => {
                let _ = self.pickups.remove(record);
            }
            EntityKind::Wall => self.stale_distances = true,
        }

        let _ = self.entities.remove(entity);
        debug!(?entity, ?tag, %position, "entity removed");
        true
    }

    fn tear_down_cat(&mut self, record: Handle) {
        let Some(cat) = self.cats.remove(record) else {
            return;
        };
        if let Some(map) = cat.distance_map {
            let _ = self.distance_maps.remove(map);
        }
        if let Some(player) = cat.player {
            let slot = &mut self.players[player.get()];
            if *slot == Some(cat.entity) {
                *slot = None;
                info!(player = player.get() + 1, "player eliminated");
                self.events.push(Event::PlayerEliminated { player });
            }
        }
    }

    /// Moves an entity to `to`, which the caller has checked to be passable.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale, if the entity is missing from its tile,
    /// or if the destination is out of bounds or full.
    pub fn move_assert_ok(&mut self, entity: Handle, to: Position) {
        let Some(record) = self.entities.get(entity).copied() else {
            panic!("cannot move stale entity {entity:?}");
        };
        let from = record.position;

        let found = self.grid.at_mut(from).swap_remove(&entity);
        assert!(found, "entity {entity:?} missing from tile {from}");
        if let Err(full) = self.grid.at_mut(to).try_append(entity) {
            panic!("cannot move {entity:?} into {to}: {full}");
        }
        if let Some(moved) = self.entities.get_mut(entity) {
            moved.position = to;
        }
        self.events.push(Event::EntityMoved { entity, from, to });

        if let EntityKind::Cat(cat) = record.kind {
            if let Some(map) = self.cats.get(cat).and_then(|cat| cat.distance_map) {
                self.recalculate_distances_from(to, map);
            }
        }
    }

    /// Reports whether nothing on the tile at `position` blocks movement.
    ///
    /// Positions outside the grid are never passable.
    #[must_use]
    pub fn is_passable_at(&self, position: Position) -> bool {
        passable(&self.grid, &self.entities, position)
    }

    /// Reports whether the tile at `position` holds a wall without health.
    #[must_use]
    pub fn is_indestructible_wall_at(&self, position: Position) -> bool {
        self.has_wall_at(position, true)
    }

    fn has_wall_at(&self, position: Position, indestructible: bool) -> bool {
        self.grid.at_or_null(position).is_some_and(|tile| {
            tile.iter().any(|handle| {
                self.entities.get(*handle).is_some_and(|entity| {
                    entity.tag() == EntityTag::Wall && entity.is_indestructible() == indestructible
                })
            })
        })
    }

    /// Damages every destructible occupant of `position` except `skip`.
    ///
    /// Occupants whose health reaches zero are removed before the call
    /// returns. The result is the damage actually absorbed, which can be less
    /// than `damage` times the number of occupants.
    pub fn deal_damage_at(&mut self, position: Position, damage: u32, skip: Handle) -> u32 {
        let Some(occupants) = self.grid.at_or_null(position).copied() else {
            return 0;
        };

        let mut dealt: u32 = 0;
        for occupant in occupants.iter().copied() {
            if occupant == skip {
                continue;
            }
            let Some(health) = self
                .entities
                .get_mut(occupant)
                .and_then(|entity| entity.health.as_mut())
            else {
                continue;
            };

            let absorbed = health.subtract(damage);
            let remaining = *health;
            dealt = dealt.saturating_add(absorbed);
            if absorbed > 0 {
                self.events.push(Event::EntityDamaged {
                    entity: occupant,
                    dealt: absorbed,
                    remaining,
                });
            }
            if remaining.is_zero() {
                let _ = self.remove_entity(occupant);
            }
        }
        dealt
    }

    /// Rebuilds distance map `map` by breadth-first search from `start`.
    ///
    /// Stale map handles are ignored.
    pub fn recalculate_distances_from(&mut self, start: Position, map: Handle) {
        let Self {
            grid,
            entities,
            distance_maps,
            bfs_queue,
            ..
        } = self;
        let Some(distances) = distance_maps.get_mut(map) else {
            return;
        };
        let grid: &Grid = grid;
        let entities: &Set<Entity> = entities;
        distances.rebuild_from(start, bfs_queue, |cell| passable(grid, entities, cell));
        trace!(?map, %start, "distance map rebuilt");
    }

    fn rebuild_distance_maps(&mut self) {
        let tracked: Vec<(Position, Handle)> = self
            .cats
            .iter()
            .filter_map(|(cat, _)| {
                let map = cat.distance_map?;
                let entity = self.entities.get(cat.entity)?;
                Some((entity.position, map))
            })
            .collect();
        for (position, map) in tracked {
            self.recalculate_distances_from(position, map);
        }
        self.stale_distances = false;
    }

    /// Smallest distance from `position` to any tracked cat.
    ///
    /// Returns [`UNREACHED`] when no map reaches the cell.
    #[must_use]
    pub fn nearest_distance(&self, position: Position) -> u32 {
        self.distance_maps
            .iter()
            .filter_map(|(map, _)| map.distance(position))
            .min()
            .unwrap_or(UNREACHED)
    }

    /// Takes the events produced by direct orchestrator calls.
    pub fn drain_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.events)
    }

    fn advance_time(&mut self, now: Timestamp) {
        self.now = self.now.max(now);
        self.events.push(Event::TimeAdvanced { now: self.now });

        let current = self.now;
        self.explosions
            .retain(|explosion| !explosion.timer.is_finished(current));
        if self.stale_distances {
            self.rebuild_distance_maps();
        }
    }

    fn reject_step(&mut self, entity: Handle, reason: StepRejection) {
        debug!(?entity, ?reason, "step rejected");
        self.events.push(Event::StepRejected { entity, reason });
    }

    fn step_entity(&mut self, entity: Handle, direction: Direction) {
        let Some(record) = self.entities.get(entity).copied() else {
            return self.reject_step(entity, StepRejection::NotMovable);
        };
        let now = self.now;
        let ready = match record.kind {
            EntityKind::Cat(cat) => self.cats.get(cat).map(|cat| cat.move_timer.is_finished(now)),
            EntityKind::Enemy(enemy) => self
                .enemies
                .get(enemy)
                .map(|enemy| enemy.move_timer.is_finished(now)),
            _ => None,
        };
        let Some(ready) = ready else {
            return self.reject_step(entity, StepRejection::NotMovable);
        };
        if !ready {
            return self.reject_step(entity, StepRejection::CoolingDown);
        }
        let Some(destination) = record
            .position
            .step(direction)
            .filter(|cell| self.is_passable_at(*cell))
        else {
            return self.reject_step(entity, StepRejection::Blocked);
        };

        match record.kind {
            EntityKind::Cat(cat) => {
                if let Some(cat) = self.cats.get_mut(cat) {
                    cat.move_timer = Timer::new(now, cat.move_cooldown);
                }
            }
            EntityKind::Enemy(enemy) => {
                if let Some(enemy) = self.enemies.get_mut(enemy) {
                    enemy.move_timer = Timer::new(now, enemy.move_cooldown);
                }
            }
            _ => {}
        }
        self.move_assert_ok(entity, destination);

        if let EntityKind::Cat(cat) = record.kind {
            self.collect_pickups(entity, cat, destination);
        }
    }

    fn collect_pickups(&mut self, cat_entity: Handle, cat: Handle, position: Position) {
        let occupants = *self.grid.at(position);
        for occupant in occupants.iter().copied() {
            let Some(EntityKind::ModifierPickup(record)) =
                self.entities.get(occupant).map(|entity| entity.kind)
            else {
                continue;
            };
            let Some(modifier) = self.pickups.get(record).map(|pickup| pickup.modifier) else {
                continue;
            };
            self.apply_modifier(cat_entity, cat, modifier);
            let _ = self.remove_entity(occupant);
        }
    }

    fn apply_modifier(&mut self, cat_entity: Handle, cat: Handle, modifier: Modifier) {
        let Some(state) = self.cats.get_mut(cat) else {
            return;
        };
        match modifier {
            Modifier::BombPower => state.bomb_power = state.bomb_power.saturating_add(1),
            Modifier::BombCount => state.max_bombs = state.max_bombs.saturating_add(1),
            Modifier::Speed => {
                state.move_cooldown = state
                    .move_cooldown
                    .saturating_sub(self.config.speed_bonus())
                    .max(self.config.cat_min_move_cooldown());
            }
            Modifier::Heal => {
                let max = state.max_health;
                if let Some(health) = self
                    .entities
                    .get_mut(cat_entity)
                    .and_then(|entity| entity.health.as_mut())
                {
                    health.heal(self.config.heal_amount, max);
                }
            }
        }
        debug!(cat = ?cat_entity, ?modifier, "modifier collected");
        self.events.push(Event::PickupCollected {
            cat: cat_entity,
            modifier,
        });
    }

    fn place_bomb(&mut self, cat: Handle) {
        let Some(entity) = self.entities.get(cat).copied() else {
            return;
        };
        let EntityKind::Cat(record) = entity.kind else {
            return;
        };
        let Some(owner) = self.cats.get(record).copied() else {
            return;
        };
        if !owner.has_bombs_left() {
            debug!(?cat, "no bombs left");
            return;
        }

        let position = entity.position;
        let tile = self.grid.at(position);
        let occupied = tile.iter().any(|handle| {
            self.entities
                .get(*handle)
                .is_some_and(|occupant| occupant.tag() == EntityTag::Bomb)
        });
        if occupied || tile.is_full() {
            debug!(?cat, %position, "bomb placement refused");
            return;
        }

        let damage = self.config.bomb_damage;
        let fuse = self.config.bomb_fuse();
        match self.create_bomb(position, record, owner.bomb_power, damage, fuse) {
            Ok(bomb) => self.events.push(Event::BombPlaced { bomb, cat, position }),
            Err(error) => warn!(%error, ?cat, "bomb placement skipped"),
        }
    }

    fn blast_cells(&self, origin: Position, power: u32) -> Vec<Position> {
        let mut cells = vec![origin];
        for direction in Direction::ALL {
            let mut cell = origin;
            for _ in 0..power {
                let Some(next) = cell.step(direction).filter(|next| self.grid.contains(*next))
                else {
                    break;
                };
                if self.is_indestructible_wall_at(next) {
                    break;
                }
                cells.push(next);
                if self.has_wall_at(next, false) {
                    break;
                }
                cell = next;
            }
        }
        cells
    }

    fn prime_bombs_at(&mut self, position: Position) {
        let now = self.now;
        let Self {
            grid,
            entities,
            bombs,
            ..
        } = self;
        for occupant in grid.at(position).iter() {
            let kind = entities.get(*occupant).map(|entity| entity.kind);
            if let Some(EntityKind::Bomb(record)) = kind {
                if let Some(bomb) = bombs.get_mut(record) {
                    bomb.fuse.cut_short(now);
                }
            }
        }
    }

    fn detonate(&mut self, bomb: Handle, jitter: f32) {
        let Some(entity) = self.entities.get(bomb).copied() else {
            return;
        };
        let EntityKind::Bomb(record) = entity.kind else {
            return;
        };
        let Some(state) = self.bombs.get(record).copied() else {
            return;
        };

        let cells = self.blast_cells(entity.position, state.power);
        let _ = self.remove_entity(bomb);

        let mut dealt: u32 = 0;
        for cell in &cells {
            dealt = dealt.saturating_add(self.deal_damage_at(*cell, state.damage, bomb));
            self.prime_bombs_at(*cell);
        }

        let jitter = if jitter.is_finite() {
            jitter.clamp(0.0, 1.0)
        } else {
            0.5
        };
        let lifetime = self
            .config
            .explosion_lifetime()
            .mul_f32(0.75 + 0.5 * jitter);
        self.explosions.push(Explosion {
            cells: cells.clone(),
            timer: Timer::new(self.now, lifetime),
        });

        debug!(?bomb, origin = %entity.position, cells = cells.len(), dealt, "bomb exploded");
        self.events.push(Event::BombExploded { bomb, cells, dealt });
    }

    fn melee(&mut self, enemy: Handle, target: Position) {
        let Some(entity) = self.entities.get(enemy).copied() else {
            return;
        };
        let EntityKind::Enemy(record) = entity.kind else {
            return;
        };
        if entity.position.manhattan_distance(target) != 1 {
            debug!(?enemy, %target, "melee target not adjacent");
            return;
        }
        let now = self.now;
        let Some(state) = self.enemies.get_mut(record) else {
            return;
        };
        if !state.hit_timer.is_finished(now) {
            return;
        }
        state.hit_timer = Timer::new(now, state.hit_cooldown);
        let damage = state.damage;

        let dealt = self.deal_damage_at(target, damage, enemy);
        debug!(?enemy, %target, dealt, "melee attack");
    }
}

fn passable(grid: &Grid, entities: &Set<Entity>, position: Position) -> bool {
    grid.at_or_null(position).is_some_and(|tile| {
        tile.iter().all(|handle| {
            entities
                .get(*handle)
                .map_or(true, |entity| !entity.blocks_movement())
        })
    })
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { now } => world.advance_time(now),
        Command::StepEntity { entity, direction } => world.step_entity(entity, direction),
        Command::PlaceBomb { cat } => world.place_bomb(cat),
        Command::DetonateBomb { bomb, jitter } => world.detonate(bomb, jitter),
        Command::MeleeAttack { enemy, target } => world.melee(enemy, target),
    }
    out_events.append(&mut world.events);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use cat_bomber_core::{
        BombSnapshot, BombView, CatSnapshot, CatView, EnemySnapshot, EnemyView, Handle, Health,
        PlayerIndex, Position, Timestamp,
    };

    use super::{
        Bomb, Cat, Config, DistanceMap, Enemy, Entity, Explosion, Grid, ModifierPickup, Set, World,
    };

    /// Provides read-only access to the spatial grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Provides read-only access to the generic entity pool.
    #[must_use]
    pub fn entities(world: &World) -> &Set<Entity> {
        &world.entities
    }

    /// Looks up a single entity.
    #[must_use]
    pub fn entity(world: &World, entity: Handle) -> Option<&Entity> {
        world.entities.get(entity)
    }

    /// Provides read-only access to the cat pool.
    #[must_use]
    pub fn cats(world: &World) -> &Set<Cat> {
        &world.cats
    }

    /// Provides read-only access to the bomb pool.
    #[must_use]
    pub fn bombs(world: &World) -> &Set<Bomb> {
        &world.bombs
    }

    /// Provides read-only access to the enemy pool.
    #[must_use]
    pub fn enemies(world: &World) -> &Set<Enemy> {
        &world.enemies
    }

    /// Provides read-only access to the pickup pool.
    #[must_use]
    pub fn pickups(world: &World) -> &Set<ModifierPickup> {
        &world.pickups
    }

    /// Provides read-only access to the distance maps of tracked cats.
    #[must_use]
    pub fn distance_maps(world: &World) -> &Set<DistanceMap> {
        &world.distance_maps
    }

    /// Explosion effects that have not expired yet.
    #[must_use]
    pub fn explosions(world: &World) -> &[Explosion] {
        &world.explosions
    }

    /// Current world time.
    #[must_use]
    pub fn now(world: &World) -> Timestamp {
        world.now
    }

    /// Tuning the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &Config {
        &world.config
    }

    /// Entity handle of the cat steered by `player`.
    #[must_use]
    pub fn player_cat(world: &World, player: PlayerIndex) -> Option<Handle> {
        world.players[player.get()]
    }

    /// Smallest distance from `position` to any tracked cat.
    #[must_use]
    pub fn nearest_distance(world: &World, position: Position) -> u32 {
        world.nearest_distance(position)
    }

    /// Reports whether `position` can be entered.
    #[must_use]
    pub fn is_passable_at(world: &World, position: Position) -> bool {
        world.is_passable_at(position)
    }

    /// Captures a read-only view of the enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let now = world.now;
        let snapshots = world
            .enemies
            .iter()
            .filter_map(|(enemy, _)| {
                let entity = world.entities.get(enemy.entity)?;
                Some(EnemySnapshot {
                    entity: enemy.entity,
                    position: entity.position,
                    ready_to_move: enemy.move_timer.is_finished(now),
                    ready_to_hit: enemy.hit_timer.is_finished(now),
                })
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the cats.
    #[must_use]
    pub fn cat_view(world: &World) -> CatView {
        let now = world.now;
        let snapshots = world
            .cats
            .iter()
            .filter_map(|(cat, _)| {
                let entity = world.entities.get(cat.entity)?;
                Some(CatSnapshot {
                    entity: cat.entity,
                    player: cat.player,
                    position: entity.position,
                    health: entity.health.unwrap_or(Health::new(0)),
                    bombs_left: cat.max_bombs.saturating_sub(cat.bombs_out),
                    bomb_power: cat.bomb_power,
                    ready_to_move: cat.move_timer.is_finished(now),
                })
            })
            .collect();
        CatView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the placed bombs.
    #[must_use]
    pub fn bomb_view(world: &World) -> BombView {
        let now = world.now;
        let snapshots = world
            .bombs
            .iter()
            .filter_map(|(bomb, _)| {
                let entity = world.entities.get(bomb.entity)?;
                Some(BombSnapshot {
                    entity: bomb.entity,
                    position: entity.position,
                    fuse: bomb.fuse,
                    due: bomb.fuse.is_finished(now),
                })
            })
            .collect();
        BombView::from_snapshots(snapshots)
    }
}
