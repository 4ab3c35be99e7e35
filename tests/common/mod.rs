use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use trophic_core::rules::{max_age, MAX_ENERGY};
use trophic_core::{Cell, Coord, EntityKind, Grid};

/// Builds a grid cell by cell for scenario tests.
#[allow(dead_code)]
#[derive(Default)]
pub struct GridBuilder {
    grid: Grid,
}

#[allow(dead_code)]
impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cell(
        mut self,
        row: usize,
        col: usize,
        kind: EntityKind,
        energy: i32,
        age: i32,
    ) -> Self {
        self.grid.set(Coord::new(row, col), Cell::new(kind, energy, age));
        self
    }

    pub fn with_plant(self, row: usize, col: usize, age: i32) -> Self {
        self.with_cell(row, col, EntityKind::Plant, 0, age)
    }

    pub fn with_herbivore(self, row: usize, col: usize, energy: i32, age: i32) -> Self {
        self.with_cell(row, col, EntityKind::Herbivore, energy, age)
    }

    pub fn with_carnivore(self, row: usize, col: usize, energy: i32, age: i32) -> Self {
        self.with_cell(row, col, EntityKind::Carnivore, energy, age)
    }

    /// Fills roughly `density` of the cells with random occupants.
    pub fn with_random_fill(mut self, seed: u64, density: f64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for at in Grid::coords() {
            if !rng.gen_bool(density) {
                continue;
            }
            let cell = match rng.gen_range(0..3) {
                0 => Cell::new(EntityKind::Plant, 0, rng.gen_range(0..=10)),
                1 => Cell::new(
                    EntityKind::Herbivore,
                    rng.gen_range(1..=MAX_ENERGY),
                    rng.gen_range(0..=50),
                ),
                _ => Cell::new(
                    EntityKind::Carnivore,
                    rng.gen_range(1..=MAX_ENERGY),
                    rng.gen_range(0..=80),
                ),
            };
            self.grid.set(at, cell);
        }
        self
    }

    pub fn build(self) -> Grid {
        self.grid
    }
}

/// Panics unless every cell satisfies the per-kind state invariants.
#[allow(dead_code)]
pub fn assert_cell_invariants(grid: &Grid) {
    for (index, cell) in grid.cells().iter().enumerate() {
        match cell.kind {
            EntityKind::Empty => {
                assert_eq!((cell.energy, cell.age), (0, 0), "empty cell {index}: {cell:?}");
            }
            EntityKind::Plant => {
                assert_eq!(cell.energy, 0, "plant {index}: {cell:?}");
            }
            EntityKind::Herbivore | EntityKind::Carnivore => {
                assert!(
                    (0..=MAX_ENERGY).contains(&cell.energy),
                    "animal {index} energy out of range: {cell:?}"
                );
            }
        }
        if !cell.is_empty() {
            assert!(
                (0..=max_age(cell.kind) + 1).contains(&cell.age),
                "cell {index} age out of range: {cell:?}"
            );
        }
    }
}
