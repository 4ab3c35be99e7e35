//! Fixed rule set of the ecosystem.
//!
//! None of these values are configurable at runtime.

use trophic_data::{Cell, EntityKind};

/// Side length of the square grid.
pub const GRID_SIZE: usize = 15;
/// Number of cells in the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

pub const MAX_ENERGY: i32 = 100;
pub const MOVE_COST: i32 = 5;
pub const REPRODUCTION_COST: i32 = 10;
pub const REPRODUCTION_ENERGY_THRESHOLD: i32 = 20;

pub const PLANT_MAX_AGE: i32 = 10;
pub const HERBIVORE_MAX_AGE: i32 = 50;
pub const CARNIVORE_MAX_AGE: i32 = 80;

pub const PLANT_REPRODUCTION_PROBABILITY: f64 = 0.2;

pub const HERBIVORE_EAT_GAIN: i32 = 30;
pub const CARNIVORE_EAT_GAIN: i32 = 20;

/// Energy condition an animal must meet before it may reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyGate {
    Above(i32),
    Below(i32),
}

impl EnergyGate {
    #[must_use]
    pub fn admits(self, energy: i32) -> bool {
        match self {
            EnergyGate::Above(limit) => energy > limit,
            EnergyGate::Below(limit) => energy < limit,
        }
    }
}

/// First-match decision chain of an animal species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimalRules {
    pub prey: EntityKind,
    pub eat_probability: f64,
    pub move_probability: f64,
    pub reproduce_probability: f64,
    pub reproduce_gate: EnergyGate,
}

pub const HERBIVORE_RULES: AnimalRules = AnimalRules {
    prey: EntityKind::Plant,
    eat_probability: 0.9,
    move_probability: 0.7,
    reproduce_probability: 0.075,
    reproduce_gate: EnergyGate::Above(REPRODUCTION_ENERGY_THRESHOLD),
};

// Carnivores reproduce when starving, herbivores when fed. Kept as-is.
pub const CARNIVORE_RULES: AnimalRules = AnimalRules {
    prey: EntityKind::Herbivore,
    eat_probability: 1.0,
    move_probability: 0.5,
    reproduce_probability: 0.025,
    reproduce_gate: EnergyGate::Below(REPRODUCTION_ENERGY_THRESHOLD),
};

#[must_use]
pub fn animal_rules(kind: EntityKind) -> Option<&'static AnimalRules> {
    match kind {
        EntityKind::Herbivore => Some(&HERBIVORE_RULES),
        EntityKind::Carnivore => Some(&CARNIVORE_RULES),
        EntityKind::Empty | EntityKind::Plant => None,
    }
}

/// Oldest age a living entity may reach; one tick past it, it dies.
#[must_use]
pub fn max_age(kind: EntityKind) -> i32 {
    match kind {
        EntityKind::Plant => PLANT_MAX_AGE,
        EntityKind::Herbivore => HERBIVORE_MAX_AGE,
        EntityKind::Carnivore => CARNIVORE_MAX_AGE,
        EntityKind::Empty => i32::MAX,
    }
}

#[must_use]
pub fn eat_gain(kind: EntityKind) -> i32 {
    if kind == EntityKind::Herbivore {
        HERBIVORE_EAT_GAIN
    } else {
        CARNIVORE_EAT_GAIN
    }
}

/// A freshly placed or freshly born entity.
#[must_use]
pub fn newborn(kind: EntityKind) -> Cell {
    let energy = if kind.has_energy() { MAX_ENERGY } else { 0 };
    Cell::new(kind, energy, 0)
}

/// Whether the death check removes this cell's occupant.
#[must_use]
pub fn is_dead(cell: &Cell) -> bool {
    if cell.is_empty() {
        return false;
    }
    cell.age > max_age(cell.kind) || (cell.kind.has_energy() && cell.energy <= 0)
}
