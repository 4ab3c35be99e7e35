//! Orthogonal neighbour search.

use crate::grid::{CellAccess, Coord};
use crate::rules::GRID_SIZE;
use trophic_data::EntityKind;

/// The four orthogonal directions, in their fixed search order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Stable index of the direction in [`Direction::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::West => 2,
            Direction::East => 3,
        }
    }

    /// `(row, col)` offset.
    #[must_use]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        }
    }

    /// The neighbour of `from` in this direction, if it lies on the grid.
    #[must_use]
    pub fn step(self, from: Coord) -> Option<Coord> {
        let (dr, dc) = self.offset();
        let row = from.row.checked_add_signed(dr)?;
        let col = from.col.checked_add_signed(dc)?;
        (row < GRID_SIZE && col < GRID_SIZE).then_some(Coord::new(row, col))
    }
}

/// In-bounds neighbours of `origin`, in direction order.
pub fn neighbors(origin: Coord) -> impl Iterator<Item = (Direction, Coord)> {
    Direction::ALL
        .into_iter()
        .filter_map(move |dir| dir.step(origin).map(|at| (dir, at)))
}

/// Directions whose neighbour currently holds `kind`.
///
/// The order follows [`Direction::ALL`]; an empty result is a normal outcome.
pub fn search_neighbors<V: CellAccess + ?Sized>(
    view: &V,
    kind: EntityKind,
    origin: Coord,
) -> Vec<Direction> {
    neighbors(origin)
        .filter(|(_, at)| view.cell(*at).kind == kind)
        .map(|(dir, _)| dir)
        .collect()
}
