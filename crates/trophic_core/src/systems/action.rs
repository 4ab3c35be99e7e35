use crate::grid::{CellAccess, Coord};
use crate::neighbors::Direction;
use crate::rng::RandomSource;
use crate::rules::{eat_gain, newborn, MAX_ENERGY, MOVE_COST, REPRODUCTION_COST};
use trophic_data::{Cell, EntityKind};

/// What an entity does to a neighbouring cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Eat,
    /// Costs energy, floored at 0. An animal left at 0 stays on the grid
    /// until its next death check removes it.
    Move,
    Reproduce,
}

/// Applies `action` from `origin` towards one of `candidates`.
///
/// Returns the destination, or `None` when there was nothing to target.
/// Both touched cells are marked processed.
pub fn apply_action<V, R>(
    view: &mut V,
    rng: &mut R,
    action: Action,
    actor_kind: EntityKind,
    origin: Coord,
    candidates: &[Direction],
) -> Option<Coord>
where
    V: CellAccess + ?Sized,
    R: RandomSource,
{
    if candidates.is_empty() {
        return None;
    }

    let direction = rng.choose_one(candidates);
    let target = direction
        .step(origin)
        .unwrap_or_else(|| panic!("candidate {direction:?} leads off the grid from {origin:?}"));
    let actor = view.cell(origin);

    match action {
        Action::Eat => {
            let energy = (actor.energy + eat_gain(actor_kind)).min(MAX_ENERGY);
            view.set_cell(target, Cell::new(actor_kind, energy, actor.age));
            view.set_cell(origin, Cell::empty());
        }
        Action::Move => {
            let energy = (actor.energy - MOVE_COST).max(0);
            view.set_cell(target, Cell::new(actor_kind, energy, actor.age));
            view.set_cell(origin, Cell::empty());
        }
        Action::Reproduce => {
            view.set_cell(target, newborn(actor_kind));
            if actor_kind.has_energy() {
                let energy = (actor.energy - REPRODUCTION_COST).max(0);
                view.set_cell(origin, Cell { energy, ..actor });
            }
        }
    }

    view.mark_processed(origin);
    view.mark_processed(target);

    tracing::trace!(
        ?action,
        ?actor_kind,
        from = ?origin,
        to = ?target,
        "Action applied"
    );
    Some(target)
}
