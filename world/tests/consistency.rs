use cat_bomber_core::{Command, Direction, Handle, Health, Modifier, Position, Timestamp};
use cat_bomber_world::{self as world, query, Config, EntityKind, World};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WIDTH: u32 = 9;
const HEIGHT: u32 = 7;

fn assert_consistent(world: &World) {
    let grid = query::grid(world);
    let entities = query::entities(world);

    for (entity, handle) in entities.iter() {
        let holders: Vec<Position> = grid
            .iter()
            .filter(|(tile, _)| tile.contains(&handle))
            .map(|(_, position)| position)
            .collect();
        assert_eq!(
            holders,
            vec![entity.position],
            "{handle:?} must live in exactly its own tile"
        );

        let back = match entity.kind {
            EntityKind::Cat(record) => query::cats(world).get(record).map(|cat| cat.entity),
            EntityKind::Bomb(record) => query::bombs(world).get(record).map(|bomb| bomb.entity),
            EntityKind::Enemy(record) => query::enemies(world)
                .get(record)
                .map(|enemy| enemy.entity),
            EntityKind::ModifierPickup(record) => query::pickups(world)
                .get(record)
                .map(|pickup| pickup.entity),
            EntityKind::Wall => Some(handle),
        };
        assert_eq!(back, Some(handle), "{handle:?} back-reference broken");
    }

    for (tile, position) in grid.iter() {
        for handle in tile.iter() {
            let entity = entities
                .get(*handle)
                .unwrap_or_else(|| panic!("tile {position} holds stale {handle:?}"));
            assert_eq!(entity.position, position);
        }
    }

    let records = query::cats(world).len()
        + query::bombs(world).len()
        + query::enemies(world).len()
        + query::pickups(world).len();
    let with_record = entities
        .iter()
        .filter(|(entity, _)| entity.kind.record().is_some())
        .count();
    assert_eq!(records, with_record, "orphaned specialised records");
}

fn has_room(world: &World, position: Position) -> bool {
    world.is_passable_at(position) && query::grid(world).at(position).len() < 4
}

fn random_position(rng: &mut ChaCha8Rng) -> Position {
    Position::new(rng.gen_range(0..WIDTH), rng.gen_range(0..HEIGHT))
}

#[test]
fn random_operation_sequences_keep_pools_and_grid_in_sync() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_cafe);
    let mut world = World::new(WIDTH, HEIGHT, Config::default());
    let mut now = 0;

    for _ in 0..2_000 {
        let live: Vec<Handle> = query::entities(&world).handles();
        let mut events = Vec::new();

        match rng.gen_range(0..9) {
            0 => {
                let position = random_position(&mut rng);
                if has_room(&world, position) {
                    let _ = world.create_cat(position, None).expect("cat");
                }
            }
            1 => {
                let position = random_position(&mut rng);
                if has_room(&world, position) {
                    let _ = world.create_enemy(position).expect("enemy");
                }
            }
            2 => {
                let position = random_position(&mut rng);
                if has_room(&world, position) {
                    let health = rng.gen_bool(0.5).then(|| Health::new(2));
                    let _ = world.create_wall(position, health).expect("wall");
                }
            }
            3 => {
                let position = random_position(&mut rng);
                if has_room(&world, position) {
                    let _ = world
                        .create_modifier_pickup(position, Modifier::BombPower)
                        .expect("pickup");
                }
            }
            4 => {
                if let Some(handle) = live.choose(&mut rng) {
                    assert!(world.remove_entity(*handle));
                    assert!(!world.remove_entity(*handle));
                }
            }
            5 => {
                let position = random_position(&mut rng);
                let _ = world.deal_damage_at(position, rng.gen_range(1..3), Handle::NONE);
            }
            6 => {
                if let Some(handle) = live.choose(&mut rng) {
                    let direction = *Direction::ALL.choose(&mut rng).expect("direction");
                    world::apply(
                        &mut world,
                        Command::StepEntity {
                            entity: *handle,
                            direction,
                        },
                        &mut events,
                    );
                }
            }
            7 => {
                if let Some(handle) = live.choose(&mut rng) {
                    world::apply(&mut world, Command::PlaceBomb { cat: *handle }, &mut events);
                    let bombs: Vec<Handle> = query::bomb_view(&world)
                        .iter()
                        .map(|bomb| bomb.entity)
                        .collect();
                    if let Some(bomb) = bombs.choose(&mut rng) {
                        world::apply(
                            &mut world,
                            Command::DetonateBomb {
                                bomb: *bomb,
                                jitter: rng.gen(),
                            },
                            &mut events,
                        );
                    }
                }
            }
            _ => {
                now += rng.gen_range(1..500);
                world::apply(
                    &mut world,
                    Command::Tick {
                        now: Timestamp::from_millis(now),
                    },
                    &mut events,
                );
            }
        }

        assert_consistent(&world);
    }
}

#[test]
fn stale_entity_handles_stay_dead_after_slot_reuse() {
    let mut world = World::new(3, 1, Config::default());
    let first = world.create_wall(Position::new(0, 0), None).expect("wall");
    assert!(world.remove_entity(first));

    let second = world.create_wall(Position::new(1, 0), None).expect("wall");
    assert_eq!(second.index(), first.index());
    assert_ne!(second, first);
    assert!(query::entity(&world, first).is_none());
    assert!(!world.remove_entity(first));
    assert!(world.is_indestructible_wall_at(Position::new(1, 0)));
}

#[test]
fn damage_is_idempotent_on_dead_targets() {
    let mut world = World::new(2, 2, Config::default());
    let position = Position::new(1, 1);
    let enemy = world.create_enemy(position).expect("enemy");

    let health = Config::default().enemy_health;
    assert_eq!(world.deal_damage_at(position, health + 10, Handle::NONE), health);
    assert!(query::entity(&world, enemy).is_none());
    assert!(query::enemies(&world).is_empty());
    assert_eq!(world.deal_damage_at(position, health + 10, Handle::NONE), 0);
    assert_consistent(&world);
}

#[test]
fn chained_bombs_detonate_on_the_following_tick() {
    let mut world = World::from_level("1.2\n", Config::default()).expect("level");
    let mut events = Vec::new();
    for cat in query::cat_view(&world).iter().map(|cat| cat.entity).collect::<Vec<_>>() {
        world::apply(&mut world, Command::PlaceBomb { cat }, &mut events);
    }
    let bombs = query::bomb_view(&world);
    let mut handles = bombs.iter().map(|bomb| bomb.entity);
    let first = handles.next().expect("first bomb");
    let second = handles.next().expect("second bomb");
    assert!(bombs.iter().all(|bomb| !bomb.due));

    world::apply(
        &mut world,
        Command::DetonateBomb {
            bomb: first,
            jitter: 0.0,
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::Tick {
            now: Timestamp::from_millis(1),
        },
        &mut events,
    );

    let due: Vec<Handle> = query::bomb_view(&world)
        .iter()
        .filter(|bomb| bomb.due)
        .map(|bomb| bomb.entity)
        .collect();
    assert_eq!(due, vec![second]);
}
