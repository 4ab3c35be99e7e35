//! Death check, aging and the species decision chains.

use super::action::{apply_action, Action};
use crate::grid::{CellAccess, Coord};
use crate::neighbors::search_neighbors;
use crate::rng::RandomSource;
use crate::rules::{animal_rules, is_dead, PLANT_REPRODUCTION_PROBABILITY};
use trophic_data::{Cell, EntityKind};

/// What happened to one cell during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Empty, or already handled earlier in the tick.
    Skipped,
    Died(EntityKind),
    /// Aged without touching a neighbour.
    Idle,
    Acted(Action),
}

/// Runs one cell through its full per-tick state machine.
///
/// Every decision is taken from `rng`; the cell and every neighbour it reads
/// or writes must be reachable through `view`.
pub fn evaluate_cell<V, R>(view: &mut V, rng: &mut R, origin: Coord) -> Outcome
where
    V: CellAccess + ?Sized,
    R: RandomSource,
{
    let cell = view.cell(origin);
    if cell.is_empty() || view.is_processed(origin) {
        return Outcome::Skipped;
    }

    if is_dead(&cell) {
        view.set_cell(origin, Cell::empty());
        view.mark_processed(origin);
        return Outcome::Died(cell.kind);
    }

    let aged = Cell {
        age: cell.age + 1,
        ..cell
    };
    view.set_cell(origin, aged);

    let outcome = match decide(rng, &aged) {
        Some((action, target_kind)) => {
            let candidates = search_neighbors(view, target_kind, origin);
            match apply_action(view, rng, action, aged.kind, origin, &candidates) {
                Some(_) => Outcome::Acted(action),
                None => Outcome::Idle,
            }
        }
        None => Outcome::Idle,
    };

    view.mark_processed(origin);
    outcome
}

/// First branch of the decision chain whose roll succeeds, with the kind of
/// neighbour it needs. Later branches are not rolled once one is taken.
fn decide<R: RandomSource>(rng: &mut R, cell: &Cell) -> Option<(Action, EntityKind)> {
    if cell.kind == EntityKind::Plant {
        return rng
            .bernoulli(PLANT_REPRODUCTION_PROBABILITY)
            .then_some((Action::Reproduce, EntityKind::Empty));
    }

    let rules = animal_rules(cell.kind)?;
    if rng.bernoulli(rules.eat_probability) {
        Some((Action::Eat, rules.prey))
    } else if rng.bernoulli(rules.move_probability) {
        Some((Action::Move, EntityKind::Empty))
    } else if rng.bernoulli(rules.reproduce_probability) && rules.reproduce_gate.admits(cell.energy)
    {
        Some((Action::Reproduce, EntityKind::Empty))
    } else {
        None
    }
}
