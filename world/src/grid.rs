//! Spatial index mapping every cell to the handles of the entities occupying it.

use cat_bomber_core::{Handle, Position};

use crate::tile::FixedArray;

/// Maximum number of entities that may share a single cell.
pub const TILE_DEPTH: usize = 20;

/// Occupant list of a single grid cell.
pub type Tile = FixedArray<Handle, TILE_DEPTH>;

/// Dense row-major grid of [`Tile`] values.
///
/// All tiles live in one contiguous buffer allocated at construction; the grid
/// never reallocates afterwards.
#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid of empty tiles.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let count = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            height,
            tiles: vec![Tile::new(); count],
        }
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

    /// Reports whether `position` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x() < self.width && position.y() < self.height
    }

    /// Tile at `position`.
    ///
    /// # Panics
    ///
    /// Panics when `position` lies outside the grid.
    #[must_use]
    pub fn at(&self, position: Position) -> &Tile {
        match self.index(position) {
            Some(index) => &self.tiles[index],
            None => out_of_bounds(position, self.width, self.height),
        }
    }

    /// Mutable tile at `position`.
    ///
    /// # Panics
    ///
    /// Panics when `position` lies outside the grid.
    #[must_use]
    pub fn at_mut(&mut self, position: Position) -> &mut Tile {
        match self.index(position) {
            Some(index) => &mut self.tiles[index],
            None => out_of_bounds(position, self.width, self.height),
        }
    }

    /// Tile at `position`, or `None` outside the grid.
    #[must_use]
    pub fn at_or_null(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|index| &self.tiles[index])
    }

    /// Row-major traversal of every tile together with its position.
    #[must_use]
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            cursor: 0,
        }
    }

    /// Number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// Row-major offset of `position`, or `None` outside the grid.
    #[must_use]
    pub fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let row = usize::try_from(position.y()).ok()?;
        let column = usize::try_from(position.x()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(row * width + column)
    }

    fn position_of(&self, index: usize) -> Option<Position> {
        let width = usize::try_from(self.width).ok().filter(|width| *width > 0)?;
        let x = u32::try_from(index % width).ok()?;
        let y = u32::try_from(index / width).ok()?;
        Some(Position::new(x, y))
    }
}

/// Row-major iterator over `(tile, position)` pairs.
#[derive(Clone, Debug)]
pub struct GridIter<'a> {
    grid: &'a Grid,
    cursor: usize,
}

impl<'a> Iterator for GridIter<'a> {
    type Item = (&'a Tile, Position);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.grid.cell_count() {
            return None;
        }
        let position = self.grid.position_of(self.cursor)?;
        self.cursor += 1;
        self.grid.at_or_null(position).map(|tile| (tile, position))
    }
}

#[cold]
#[inline(never)]
fn out_of_bounds(position: Position, width: u32, height: u32) -> ! {
    panic!(
        "position ({}, {}) outside {width}x{height} grid",
        position.x(),
        position.y()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_map_row_major() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.index(Position::new(0, 0)), Some(0));
        assert_eq!(grid.index(Position::new(3, 0)), Some(3));
        assert_eq!(grid.index(Position::new(1, 2)), Some(9));
        assert_eq!(grid.index(Position::new(4, 0)), None);
        assert_eq!(grid.cell_count(), 12);
    }

    #[test]
    fn at_or_null_reports_out_of_range() {
        let grid = Grid::new(2, 2);
        assert!(grid.at_or_null(Position::new(1, 1)).is_some());
        assert!(grid.at_or_null(Position::new(2, 1)).is_none());
        assert!(grid.at_or_null(Position::new(0, 7)).is_none());
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn at_panics_out_of_range() {
        let grid = Grid::new(2, 2);
        let _ = grid.at(Position::new(2, 0));
    }

    #[test]
    fn iteration_sweeps_every_cell_once() {
        let mut grid = Grid::new(3, 2);
        grid.at_mut(Position::new(2, 1))
            .try_append(Handle::new(0, 9))
            .expect("room");

        let visited: Vec<Position> = grid.iter().map(|(_, position)| position).collect();
        assert_eq!(visited.len(), 6);
        assert_eq!(visited.first(), Some(&Position::new(0, 0)));
        assert_eq!(visited[3], Position::new(0, 1));
        assert_eq!(visited.last(), Some(&Position::new(2, 1)));

        let occupied: Vec<Position> = grid
            .iter()
            .filter(|(tile, _)| !tile.is_empty())
            .map(|(_, position)| position)
            .collect();
        assert_eq!(occupied, vec![Position::new(2, 1)]);
    }

    #[test]
    fn empty_grid_yields_nothing() {
        let grid = Grid::new(0, 5);
        assert_eq!(grid.iter().count(), 0);
    }
}
