//! Read-only ASCII observer of the world.

use std::fmt::Write as _;

use cat_bomber_core::{EntityTag, Modifier, Position};
use cat_bomber_world::{query, EntityKind, Tile, World, UNREACHED};

/// Renders the grid row by row, one character per cell.
///
/// Occupants are drawn by priority: cats, enemies, bombs, walls, pickups.
/// Empty cells show active explosions, then, with `show_distances`, the
/// distance to the nearest tracked cat in base 36.
pub(crate) fn render(world: &World, show_distances: bool) -> String {
    let grid = query::grid(world);
    let mut out = String::with_capacity(grid.cell_count() + grid.height() as usize);
    let blasted: Vec<Position> = query::explosions(world)
        .iter()
        .flat_map(|explosion| explosion.cells.iter().copied())
        .collect();

    for (tile, position) in grid.iter() {
        let glyph = occupant_glyph(world, tile)
            .or_else(|| blasted.contains(&position).then_some('*'))
            .or_else(|| show_distances.then(|| distance_glyph(world, position)))
            .unwrap_or('.');
        out.push(glyph);
        if position.x() + 1 == grid.width() {
            out.push('\n');
        }
    }
    out
}

/// One status line per living cat.
pub(crate) fn hud(world: &World) -> String {
    let mut out = String::new();
    for cat in query::cat_view(world).iter() {
        let name = cat
            .player
            .map_or_else(|| "cat".to_owned(), |player| format!("P{}", player.get() + 1));
        let _ = writeln!(
            out,
            "{name} at {}: hp {} bombs {} power {}",
            cat.position,
            cat.health.get(),
            cat.bombs_left,
            cat.bomb_power
        );
    }
    out
}

fn occupant_glyph(world: &World, tile: &Tile) -> Option<char> {
    tile.iter()
        .filter_map(|handle| query::entity(world, *handle))
        .map(|entity| (priority(entity.tag()), glyph(world, entity.kind, entity.health.is_none())))
        .min_by_key(|(priority, _)| *priority)
        .map(|(_, glyph)| glyph)
}

const fn priority(tag: EntityTag) -> u8 {
    match tag {
        EntityTag::Cat => 0,
        EntityTag::Enemy => 1,
        EntityTag::Bomb => 2,
        EntityTag::Wall => 3,
        EntityTag::ModifierPickup => 4,
    }
}

fn glyph(world: &World, kind: EntityKind, indestructible: bool) -> char {
    match kind {
        EntityKind::Cat(record) => query::cats(world)
            .get(record)
            .and_then(|cat| cat.player)
            .and_then(|player| u32::try_from(player.get() + 1).ok())
            .and_then(|number| char::from_digit(number, 10))
            .unwrap_or('C'),
        EntityKind::Enemy(_) => 'E',
        EntityKind::Bomb(_) => 'o',
        EntityKind::Wall if indestructible => '#',
        EntityKind::Wall => '+',
        EntityKind::ModifierPickup(record) => match query::pickups(world)
            .get(record)
            .map(|pickup| pickup.modifier)
        {
            Some(Modifier::BombCount) => 'b',
            Some(Modifier::BombPower) => 'p',
            Some(Modifier::Speed) => 's',
            Some(Modifier::Heal) | None => 'h',
        },
    }
}

fn distance_glyph(world: &World, position: Position) -> char {
    match query::nearest_distance(world, position) {
        UNREACHED => '.',
        distance => char::from_digit(distance, 36).unwrap_or('~'),
    }
}
