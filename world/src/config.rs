//! Tuning values applied when the world creates entities.

use std::time::Duration;

use serde::Deserialize;

/// Gameplay tuning for a round.
///
/// Every field has a default, so a configuration file only needs to list the
/// values it overrides. Durations are expressed in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Hit points of a freshly spawned cat.
    pub cat_health: u32,
    /// Hit points of a freshly spawned enemy.
    pub enemy_health: u32,
    /// Hit points of a destructible wall.
    pub destructible_wall_health: u32,
    /// Damage dealt by one enemy melee hit.
    pub enemy_damage: u32,
    /// Delay between two cat steps.
    pub cat_move_cooldown_ms: u64,
    /// Lower bound for the cat step delay after speed pickups.
    pub cat_min_move_cooldown_ms: u64,
    /// Delay removed from the cat step delay by a speed pickup.
    pub speed_bonus_ms: u64,
    /// Delay between two enemy steps.
    pub enemy_move_cooldown_ms: u64,
    /// Delay between two enemy melee hits.
    pub enemy_hit_cooldown_ms: u64,
    /// Time between placing a bomb and its detonation.
    pub bomb_fuse_ms: u64,
    /// Reach of a cat's first bombs in cells.
    pub bomb_power: u32,
    /// Damage dealt by a blast to each destructible occupant.
    pub bomb_damage: u32,
    /// Number of bombs a cat may have on the field at the start.
    pub max_bombs: u32,
    /// Hit points restored by a heal pickup.
    pub heal_amount: u32,
    /// Base lifetime of the cosmetic explosion effect.
    pub explosion_lifetime_ms: u64,
    /// Whether player cats get a distance map for enemies to follow.
    pub track_cat_distances: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cat_health: 3,
            enemy_health: 2,
            destructible_wall_health: 1,
            enemy_damage: 1,
            cat_move_cooldown_ms: 150,
            cat_min_move_cooldown_ms: 60,
            speed_bonus_ms: 30,
            enemy_move_cooldown_ms: 400,
            enemy_hit_cooldown_ms: 800,
            bomb_fuse_ms: 2_000,
            bomb_power: 2,
            bomb_damage: 1,
            max_bombs: 1,
            heal_amount: 1,
            explosion_lifetime_ms: 400,
            track_cat_distances: true,
        }
    }
}

impl Config {
    /// Delay between two cat steps.
    #[must_use]
    pub const fn cat_move_cooldown(&self) -> Duration {
        Duration::from_millis(self.cat_move_cooldown_ms)
    }

    /// Lower bound for the cat step delay.
    #[must_use]
    pub const fn cat_min_move_cooldown(&self) -> Duration {
        Duration::from_millis(self.cat_min_move_cooldown_ms)
    }

    /// Delay removed by a speed pickup.
    #[must_use]
    pub const fn speed_bonus(&self) -> Duration {
        Duration::from_millis(self.speed_bonus_ms)
    }

    /// Delay between two enemy steps.
    #[must_use]
    pub const fn enemy_move_cooldown(&self) -> Duration {
        Duration::from_millis(self.enemy_move_cooldown_ms)
    }

    /// Delay between two enemy hits.
    #[must_use]
    pub const fn enemy_hit_cooldown(&self) -> Duration {
        Duration::from_millis(self.enemy_hit_cooldown_ms)
    }

    /// Bomb fuse length.
    #[must_use]
    pub const fn bomb_fuse(&self) -> Duration {
        Duration::from_millis(self.bomb_fuse_ms)
    }

    /// Base explosion effect lifetime.
    #[must_use]
    pub const fn explosion_lifetime(&self) -> Duration {
        Duration::from_millis(self.explosion_lifetime_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("bomb_power = 4\ncat_health = 9\n").expect("parse");
        assert_eq!(config.bomb_power, 4);
        assert_eq!(config.cat_health, 9);
        assert_eq!(config.enemy_damage, Config::default().enemy_damage);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed: Result<Config, _> = toml::from_str("bomb_powr = 4\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn durations_convert_from_milliseconds() {
        let config = Config {
            bomb_fuse_ms: 1_250,
            ..Config::default()
        };
        assert_eq!(config.bomb_fuse(), Duration::from_millis(1_250));
    }
}
