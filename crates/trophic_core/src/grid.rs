//! The cell matrix and its per-tick processed markers.

use crate::rules::{CELL_COUNT, GRID_SIZE};
use trophic_data::{Cell, Census, GridSnapshot};

/// Grid coordinate, row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// Row-major index.
    ///
    /// # Panics
    /// Panics if the coordinate lies outside the grid.
    #[must_use]
    pub fn index(self) -> usize {
        assert!(
            self.in_bounds(),
            "coordinate ({}, {}) outside {GRID_SIZE}x{GRID_SIZE} grid",
            self.row,
            self.col
        );
        self.row * GRID_SIZE + self.col
    }

    #[must_use]
    pub fn from_index(index: usize) -> Self {
        assert!(index < CELL_COUNT, "cell index {index} out of range");
        Self::new(index / GRID_SIZE, index % GRID_SIZE)
    }
}

/// Read/write access to cells and processed markers.
///
/// Implemented by [`Grid`] for single-threaded ticks and by
/// [`crate::coordinator::Neighborhood`] for locked access during parallel
/// ticks, so the rule systems are written once against this trait.
pub trait CellAccess {
    fn cell(&self, at: Coord) -> Cell;
    fn set_cell(&mut self, at: Coord, cell: Cell);
    fn is_processed(&self, at: Coord) -> bool;
    fn mark_processed(&mut self, at: Coord);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    processed: Vec<bool>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// An all-empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::empty(); CELL_COUNT],
            processed: vec![false; CELL_COUNT],
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    #[must_use]
    pub fn get(&self, at: Coord) -> Cell {
        self.cells[at.index()]
    }

    pub fn set(&mut self, at: Coord, cell: Cell) {
        self.cells[at.index()] = cell;
    }

    /// Empties every cell and clears every marker.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::empty());
        self.processed.fill(false);
    }

    pub fn clear_processed(&mut self) {
        self.processed.fill(false);
    }

    /// All coordinates in row-major order.
    pub fn coords() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).map(Coord::from_index)
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn census(&self) -> Census {
        self.cells.iter().collect()
    }

    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(
            self.cells
                .chunks(GRID_SIZE)
                .map(<[Cell]>::to_vec)
                .collect(),
        )
    }

    pub(crate) fn into_parts(self) -> (Vec<Cell>, Vec<bool>) {
        (self.cells, self.processed)
    }

    pub(crate) fn from_parts(cells: Vec<Cell>, processed: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), CELL_COUNT);
        debug_assert_eq!(processed.len(), CELL_COUNT);
        Self { cells, processed }
    }
}

impl CellAccess for Grid {
    fn cell(&self, at: Coord) -> Cell {
        self.get(at)
    }

    fn set_cell(&mut self, at: Coord, cell: Cell) {
        self.set(at, cell);
    }

    fn is_processed(&self, at: Coord) -> bool {
        self.processed[at.index()]
    }

    fn mark_processed(&mut self, at: Coord) {
        self.processed[at.index()] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trophic_data::EntityKind;

    #[test]
    fn test_new_grid_is_empty_and_square() {
        let grid = Grid::new();
        assert_eq!(grid.cells().len(), GRID_SIZE * GRID_SIZE);
        assert_eq!(grid.census().empty, CELL_COUNT);
        let snapshot = grid.snapshot();
        assert_eq!(snapshot.height(), GRID_SIZE);
        assert_eq!(snapshot.width(), GRID_SIZE);
    }

    #[test]
    fn test_set_and_get_round_trip_through_snapshot() {
        let mut grid = Grid::new();
        let at = Coord::new(3, 11);
        grid.set(at, Cell::new(EntityKind::Herbivore, 60, 2));
        assert_eq!(grid.get(at).kind, EntityKind::Herbivore);
        assert_eq!(grid.snapshot().cell(3, 11), Some(&grid.get(at)));
    }

    #[test]
    fn test_reset_clears_cells_and_markers() {
        let mut grid = Grid::new();
        let at = Coord::new(0, 0);
        grid.set(at, Cell::new(EntityKind::Plant, 0, 4));
        grid.mark_processed(at);
        grid.reset();
        assert!(grid.get(at).is_empty());
        assert!(!grid.is_processed(at));
    }

    #[test]
    fn test_index_is_row_major() {
        assert_eq!(Coord::new(0, 14).index(), 14);
        assert_eq!(Coord::new(1, 0).index(), 15);
        assert_eq!(Coord::from_index(224), Coord::new(14, 14));
        let order: Vec<Coord> = Grid::coords().take(16).collect();
        assert_eq!(order[15], Coord::new(1, 0));
    }

    #[test]
    #[should_panic(expected = "outside 15x15 grid")]
    fn test_out_of_bounds_access_panics() {
        let grid = Grid::new();
        let _ = grid.get(Coord::new(15, 0));
    }
}
