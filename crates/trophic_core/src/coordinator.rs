//! Per-cell locking for parallel ticks.
//!
//! Each cell lives behind its own mutex. A worker evaluating a cell locks the
//! cell together with its in-bounds orthogonal neighbours, always in
//! ascending row-major index order, runs the whole evaluation, and releases
//! every guard at once. Since every cell a rule can read or write is inside
//! that neighbourhood, each evaluation is one critical section and the
//! parallel tick is equivalent to some serial order of evaluations.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::grid::{CellAccess, Coord, Grid};
use crate::neighbors::neighbors;
use trophic_data::Cell;

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    cell: Cell,
    processed: bool,
}

/// The grid, split into independently lockable slots.
#[derive(Debug)]
pub struct LockedGrid {
    slots: Vec<Mutex<Slot>>,
}

impl LockedGrid {
    /// Takes ownership of `grid` for the duration of a tick.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        let (cells, processed) = grid.into_parts();
        let slots = cells
            .into_iter()
            .zip(processed)
            .map(|(cell, processed)| Mutex::new(Slot { cell, processed }))
            .collect();
        Self { slots }
    }

    /// Returns the grid once every worker has finished.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        let (cells, processed) = self
            .slots
            .into_iter()
            .map(|slot| {
                let slot = slot.into_inner().unwrap_or_else(PoisonError::into_inner);
                (slot.cell, slot.processed)
            })
            .unzip();
        Grid::from_parts(cells, processed)
    }

    /// Locks `origin` and its in-bounds neighbours.
    ///
    /// Blocks until every lock is held. Locks are taken in ascending index
    /// order, which rules out deadlock between overlapping neighbourhoods.
    pub fn lock_neighborhood(&self, origin: Coord) -> Neighborhood<'_> {
        let mut indices: Vec<usize> = neighbors(origin)
            .map(|(_, at)| at.index())
            .chain(std::iter::once(origin.index()))
            .collect();
        indices.sort_unstable();

        let mut guards = Vec::with_capacity(indices.len());
        for index in indices {
            if let Some((last, _)) = guards.last() {
                assert!(
                    *last < index,
                    "lock order violated: {index} requested after {last}"
                );
            }
            let guard = self.slots[index]
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            guards.push((index, guard));
        }
        Neighborhood { origin, guards }
    }
}

/// Exclusive view on one cell and its neighbours for a single evaluation.
///
/// Dropping the value releases all of its locks.
pub struct Neighborhood<'a> {
    origin: Coord,
    guards: Vec<(usize, MutexGuard<'a, Slot>)>,
}

impl Neighborhood<'_> {
    /// Number of cells held by this neighbourhood.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    fn position(&self, at: Coord) -> usize {
        let index = at.index();
        self.guards
            .binary_search_by_key(&index, |(i, _)| *i)
            .unwrap_or_else(|_| {
                panic!(
                    "cell {at:?} accessed outside the locked neighbourhood of {:?}",
                    self.origin
                )
            })
    }

    fn slot(&self, at: Coord) -> &Slot {
        &self.guards[self.position(at)].1
    }

    fn slot_mut(&mut self, at: Coord) -> &mut Slot {
        let position = self.position(at);
        &mut self.guards[position].1
    }
}

impl CellAccess for Neighborhood<'_> {
    fn cell(&self, at: Coord) -> Cell {
        self.slot(at).cell
    }

    fn set_cell(&mut self, at: Coord, cell: Cell) {
        self.slot_mut(at).cell = cell;
    }

    fn is_processed(&self, at: Coord) -> bool {
        self.slot(at).processed
    }

    fn mark_processed(&mut self, at: Coord) {
        self.slot_mut(at).processed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use trophic_data::EntityKind;

    #[test]
    fn test_round_trip_preserves_grid() {
        let mut grid = Grid::new();
        grid.set(Coord::new(2, 3), Cell::new(EntityKind::Plant, 0, 4));
        grid.mark_processed(Coord::new(2, 3));
        let back = LockedGrid::new(grid.clone()).into_grid();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_neighbourhood_sizes() {
        let locked = LockedGrid::new(Grid::new());
        assert_eq!(locked.lock_neighborhood(Coord::new(0, 0)).len(), 3);
        assert_eq!(locked.lock_neighborhood(Coord::new(0, 7)).len(), 4);
        assert_eq!(locked.lock_neighborhood(Coord::new(7, 7)).len(), 5);
    }

    #[test]
    fn test_writes_land_in_the_grid() {
        let locked = LockedGrid::new(Grid::new());
        {
            let mut hood = locked.lock_neighborhood(Coord::new(5, 5));
            hood.set_cell(Coord::new(5, 6), Cell::new(EntityKind::Herbivore, 70, 3));
            hood.mark_processed(Coord::new(5, 6));
        }
        let grid = locked.into_grid();
        assert_eq!(grid.get(Coord::new(5, 6)).energy, 70);
        assert!(grid.is_processed(Coord::new(5, 6)));
    }

    #[test]
    #[should_panic(expected = "outside the locked neighbourhood")]
    fn test_access_outside_neighbourhood_panics() {
        let locked = LockedGrid::new(Grid::new());
        let hood = locked.lock_neighborhood(Coord::new(5, 5));
        let _ = hood.cell(Coord::new(5, 7));
    }

    #[test]
    fn test_overlapping_neighbourhoods_do_not_deadlock() {
        let locked = Arc::new(LockedGrid::new(Grid::new()));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let locked = Arc::clone(&locked);
                thread::spawn(move || {
                    for i in 0..500 {
                        // Adjacent origins share cells and would cross-lock
                        // without a global order.
                        let origin = if (i + t) % 2 == 0 {
                            Coord::new(7, 7)
                        } else {
                            Coord::new(7, 8)
                        };
                        let mut hood = locked.lock_neighborhood(origin);
                        let current = hood.cell(origin);
                        hood.set_cell(origin, Cell { age: current.age + 1, ..current });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let locked = Arc::try_unwrap(locked).unwrap();
        let grid = locked.into_grid();
        assert_eq!(grid.get(Coord::new(7, 7)).age + grid.get(Coord::new(7, 8)).age, 2000);
    }
}
