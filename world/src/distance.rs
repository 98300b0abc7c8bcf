//! Breadth-first distance maps used by enemies to hunt cats.

use std::collections::VecDeque;

use cat_bomber_core::{Direction, Position};

/// Distance recorded for cells the search never reached.
pub const UNREACHED: u32 = u32::MAX;

/// Dense hop-count grid measured from a tracked position.
///
/// The map mirrors the world grid's dimensions and is rebuilt from scratch on
/// every recalculation. Cells that could not be reached hold [`UNREACHED`].
#[derive(Clone, Debug, Default)]
pub struct DistanceMap {
    width: u32,
    height: u32,
    origin: Option<Position>,
    distances: Vec<u32>,
}

impl DistanceMap {
    /// Creates a map where every cell is unreached.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let count = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            height,
            origin: None,
            distances: vec![UNREACHED; count],
        }
    }

    /// Rebuilds the distances with a breadth-first search starting at `start`.
    ///
    /// Only in-grid cells accepted by `is_passable` are expanded; `start`
    /// itself is always recorded at distance zero. `queue` is scratch space
    /// reused across rebuilds and is left empty.
    pub fn rebuild_from<F>(
        &mut self,
        start: Position,
        queue: &mut VecDeque<Position>,
        mut is_passable: F,
    ) where
        F: FnMut(Position) -> bool,
    {
        self.distances.fill(UNREACHED);
        self.origin = None;
        queue.clear();

        let Some(start_index) = self.index(start) else {
            return;
        };
        self.origin = Some(start);
        self.distances[start_index] = 0;
        queue.push_back(start);

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = self.index(cell) else {
                continue;
            };
            let next_distance = self.distances[current_index].saturating_add(1);

            for direction in Direction::ALL {
                let Some(neighbor) = cell.step(direction) else {
                    continue;
                };
                let Some(neighbor_index) = self.index(neighbor) else {
                    continue;
                };
                if self.distances[neighbor_index] != UNREACHED {
                    continue;
                }
                if !is_passable(neighbor) {
                    continue;
                }

                self.distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }
    }

    /// Width of the map in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the map in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Position the last rebuild started from.
    #[must_use]
    pub const fn origin(&self) -> Option<Position> {
        self.origin
    }

    /// Distances stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.distances
    }

    /// Distance recorded for `position`, or `None` outside the map.
    #[must_use]
    pub fn distance(&self, position: Position) -> Option<u32> {
        self.index(position)
            .and_then(|index| self.distances.get(index).copied())
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.x() >= self.width || position.y() >= self.height {
            return None;
        }
        let row = usize::try_from(position.y()).ok()?;
        let column = usize::try_from(position.x()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_grid_distances_equal_manhattan() {
        let mut map = DistanceMap::new(6, 5);
        let mut queue = VecDeque::new();
        let start = Position::new(2, 1);

        map.rebuild_from(start, &mut queue, |_| true);

        for y in 0..5 {
            for x in 0..6 {
                let cell = Position::new(x, y);
                assert_eq!(map.distance(cell), Some(start.manhattan_distance(cell)));
            }
        }
        assert!(queue.is_empty());
        assert_eq!(map.origin(), Some(start));
    }

    #[test]
    fn closed_ring_leaves_outside_unreached() {
        let mut map = DistanceMap::new(7, 7);
        let mut queue = VecDeque::new();
        let ring = |cell: Position| {
            let on_x = (1..=5).contains(&cell.x()) && (cell.y() == 1 || cell.y() == 5);
            let on_y = (1..=5).contains(&cell.y()) && (cell.x() == 1 || cell.x() == 5);
            on_x || on_y
        };

        map.rebuild_from(Position::new(3, 3), &mut queue, |cell| !ring(cell));

        assert_eq!(map.distance(Position::new(3, 3)), Some(0));
        assert_eq!(map.distance(Position::new(2, 2)), Some(2));
        assert_eq!(map.distance(Position::new(1, 1)), Some(UNREACHED));
        assert_eq!(map.distance(Position::new(0, 0)), Some(UNREACHED));
        assert_eq!(map.distance(Position::new(6, 3)), Some(UNREACHED));
    }

    #[test]
    fn walls_force_detours() {
        let mut map = DistanceMap::new(3, 4);
        let mut queue = VecDeque::new();
        let wall = Position::new(1, 1);

        map.rebuild_from(Position::new(1, 2), &mut queue, |cell| cell != wall);

        assert_eq!(map.distance(wall), Some(UNREACHED));
        assert_eq!(map.distance(Position::new(1, 0)), Some(4));
        assert_eq!(map.distance(Position::new(0, 1)), Some(2));
    }

    #[test]
    fn rebuild_discards_previous_results() {
        let mut map = DistanceMap::new(4, 1);
        let mut queue = VecDeque::new();
        map.rebuild_from(Position::new(0, 0), &mut queue, |_| true);
        assert_eq!(map.distance(Position::new(3, 0)), Some(3));

        map.rebuild_from(Position::new(3, 0), &mut queue, |cell| cell.x() != 1);
        assert_eq!(map.distance(Position::new(3, 0)), Some(0));
        assert_eq!(map.distance(Position::new(0, 0)), Some(UNREACHED));
    }

    #[test]
    fn start_outside_map_leaves_everything_unreached() {
        let mut map = DistanceMap::new(2, 2);
        let mut queue = VecDeque::new();
        map.rebuild_from(Position::new(9, 9), &mut queue, |_| true);
        assert!(map.cells().iter().all(|distance| *distance == UNREACHED));
        assert_eq!(map.origin(), None);
        assert_eq!(map.distance(Position::new(9, 9)), None);
    }
}
