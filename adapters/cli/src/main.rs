#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Cat Bomber round.

mod ascii;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use cat_bomber_core::{Command, Direction, EntityTag, Event, PlayerIndex, Timestamp, MAX_PLAYERS};
use cat_bomber_system_enemy_ai::EnemyAi;
use cat_bomber_system_fuse::Fuse;
use cat_bomber_system_player_control::{PlayerControl, PlayerIntent};
use cat_bomber_world::{self as world, query, Config, World};
use clap::Parser;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const BUILT_IN_LEVEL: &str = "\
###############
#1..+..b..+..2#
#.#+#.#+#.#+#.#
#..+...E...+..#
#.#.#+#p#+#.#.#
#+..s..+..h..+#
#.#.#+#+#+#.#.#
#..+...E...+..#
#.#+#.#+#.#+#.#
#3..+..b..+..4#
###############
";

/// Runs a headless Cat Bomber round with scripted random players.
#[derive(Debug, Parser)]
#[command(name = "cat-bomber", about = "Headless Cat Bomber simulation")]
struct Cli {
    /// Level file; defaults to the built-in arena.
    #[arg(short, long)]
    level: Option<PathBuf>,

    /// TOML file overriding gameplay tuning.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate.
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Seed for player intents and explosion jitter.
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Overlay distance-map values on empty cells.
    #[arg(long)]
    show_distances: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let config = load_config(cli.config.as_deref())?;
    let level = match &cli.level {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read level {}", path.display()))?,
        None => BUILT_IN_LEVEL.to_owned(),
    };
    let world = World::from_level(&level, config).context("invalid level")?;

    let summary = run(world, &cli);
    print!("{}", ascii::render(&summary.world, cli.show_distances));
    print!("{}", ascii::hud(&summary.world));
    println!(
        "ticks: {}, explosions: {}, enemies destroyed: {}, players eliminated: {}",
        summary.ticks, summary.explosions, summary.enemies_destroyed, summary.players_eliminated
    );
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

struct Summary {
    world: World,
    ticks: u64,
    explosions: usize,
    enemies_destroyed: usize,
    players_eliminated: usize,
}

impl Summary {
    fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::BombExploded { .. } => self.explosions += 1,
                Event::EntityRemoved {
                    tag: EntityTag::Enemy,
                    ..
                } => self.enemies_destroyed += 1,
                Event::PlayerEliminated { .. } => self.players_eliminated += 1,
                _ => {}
            }
        }
    }
}

fn run(mut world: World, cli: &Cli) -> Summary {
    let spawned = world.drain_events().len();
    debug!(spawned, "initial entities spawned");

    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
    let mut control = PlayerControl;
    let mut enemy_ai = EnemyAi;
    let mut fuse = Fuse::new(rng.gen());

    let mut summary = Summary {
        world,
        ticks: 0,
        explosions: 0,
        enemies_destroyed: 0,
        players_eliminated: 0,
    };

    for tick in 1..=cli.ticks {
        let world = &mut summary.world;
        let now = Timestamp::from_millis(tick.saturating_mul(cli.tick_ms));
        let mut events = Vec::new();
        world::apply(world, Command::Tick { now }, &mut events);

        let intents = random_intents(&mut rng, world);
        let mut commands = Vec::new();
        control.handle(&intents, &query::cat_view(world), &mut commands);
        let snapshot: &World = world;
        enemy_ai.handle(
            &events,
            &query::enemy_view(snapshot),
            |cell| query::nearest_distance(snapshot, cell),
            |cell| query::is_passable_at(snapshot, cell),
            &mut commands,
        );
        fuse.handle(&events, &query::bomb_view(world), &mut commands);

        for command in commands {
            world::apply(world, command, &mut events);
        }
        summary.record(&events);
        summary.ticks = tick;

        let alive = players_alive(&summary.world);
        if alive == 0 {
            info!(tick, "all players eliminated");
            break;
        }
    }

    info!(
        ticks = summary.ticks,
        explosions = summary.explosions,
        players_alive = players_alive(&summary.world),
        "round finished"
    );
    summary
}

fn players_alive(world: &World) -> usize {
    (0..MAX_PLAYERS)
        .filter_map(PlayerIndex::new)
        .filter(|player| query::player_cat(world, *player).is_some())
        .count()
}

fn random_intents(rng: &mut ChaCha8Rng, world: &World) -> Vec<PlayerIntent> {
    (0..MAX_PLAYERS)
        .filter_map(PlayerIndex::new)
        .filter(|player| query::player_cat(world, *player).is_some())
        .map(|player| {
            let movement = if rng.gen_bool(0.7) {
                Direction::ALL.choose(&mut *rng).copied()
            } else {
                None
            };
            PlayerIntent::new(player, movement, rng.gen_bool(0.04))
        })
        .collect()
}
