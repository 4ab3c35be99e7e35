//! Random decision sources.
//!
//! Every probabilistic decision in the engine goes through [`RandomSource`].
//! Two implementations exist:
//! - [`ChaCha8Rng`] draws on demand and is used for placement and seeding.
//! - [`CellDraws`] replays a handful of values drawn for one cell before the
//!   cell is evaluated, so that no draw ever happens while a cell lock is held
//!   and both tick schedules see identical values for the same cell.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the three primitive random decisions.
pub trait RandomSource {
    /// Returns `true` with probability `p`.
    fn bernoulli(&mut self, p: f64) -> bool;

    /// Uniform integer in `min..=max`.
    fn uniform_int(&mut self, min: usize, max: usize) -> usize;

    /// Uniform pick among `candidates`.
    ///
    /// # Panics
    /// Panics when `candidates` is empty; callers check emptiness first.
    fn choose_one<T: Copy>(&mut self, candidates: &[T]) -> T {
        assert!(
            !candidates.is_empty(),
            "choose_one called with an empty candidate set"
        );
        candidates[self.uniform_int(0, candidates.len() - 1)]
    }
}

impl RandomSource for ChaCha8Rng {
    fn bernoulli(&mut self, p: f64) -> bool {
        debug_assert!((0.0..=1.0).contains(&p), "probability {p} out of range");
        self.gen::<f64>() < p
    }

    fn uniform_int(&mut self, min: usize, max: usize) -> usize {
        assert!(min <= max, "empty range {min}..={max}");
        self.gen_range(min..=max)
    }
}

/// Seeded generator, or an entropy-seeded one when no seed is configured.
#[must_use]
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Decision points per cell and tick: eat, move, reproduce.
pub const DECISION_POINTS: usize = 3;

/// Range of the selection ticket. Divisible by every candidate count 1..=4,
/// so `ticket % len` is exactly uniform.
pub const TICKET_SPAN: usize = 12;

/// Random values drawn for one cell ahead of its evaluation.
///
/// Each roll feeds exactly one bernoulli decision and the ticket feeds at most
/// one selection. Asking for more is a programming error.
#[derive(Debug, Clone, PartialEq)]
pub struct CellDraws {
    rolls: [f64; DECISION_POINTS],
    next_roll: usize,
    ticket: Option<usize>,
}

impl CellDraws {
    /// Draws a full set from `rng`.
    pub fn draw<R: Rng>(rng: &mut R) -> Self {
        let mut rolls = [0.0; DECISION_POINTS];
        for roll in &mut rolls {
            *roll = rng.gen::<f64>();
        }
        Self {
            rolls,
            next_roll: 0,
            ticket: Some(rng.gen_range(0..TICKET_SPAN)),
        }
    }

    /// Draws for the cell at row-major `index`, from its own stream of the
    /// tick seed. Independent of the order in which cells are visited.
    #[must_use]
    pub fn for_cell(tick_seed: u64, index: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(tick_seed);
        rng.set_stream(index as u64);
        Self::draw(&mut rng)
    }

    /// Fixed values, mostly for scripting scenarios in tests.
    ///
    /// A roll of `0.0` passes every non-zero probability, a roll of `1.0`
    /// fails every probability.
    #[must_use]
    pub fn from_parts(rolls: [f64; DECISION_POINTS], ticket: usize) -> Self {
        assert!(ticket < TICKET_SPAN, "ticket {ticket} out of range");
        Self {
            rolls,
            next_roll: 0,
            ticket: Some(ticket),
        }
    }

    /// Number of bernoulli rolls consumed so far.
    #[must_use]
    pub fn rolls_used(&self) -> usize {
        self.next_roll
    }
}

impl RandomSource for CellDraws {
    fn bernoulli(&mut self, p: f64) -> bool {
        let Some(&roll) = self.rolls.get(self.next_roll) else {
            panic!("more than {DECISION_POINTS} decisions requested for one cell");
        };
        self.next_roll += 1;
        roll < p
    }

    fn uniform_int(&mut self, min: usize, max: usize) -> usize {
        assert!(min <= max, "empty range {min}..={max}");
        let span = max - min + 1;
        assert!(
            TICKET_SPAN % span == 0,
            "selection span {span} not supported by pre-drawn ticket"
        );
        let ticket = self
            .ticket
            .take()
            .unwrap_or_else(|| panic!("selection ticket already used for this cell"));
        min + ticket % span
    }
}
