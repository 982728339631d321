//! Random Move Picker
//!
//! Selects moves uniformly at random from all legal moves. On its own it is
//! the weakest possible opponent; wrapped in a [`Handicap`] it weakens a real
//! engine by occasionally replacing its choice.
//!
//! Both can be seeded so games and tests replay exactly.

use chess_core::{legal_moves_into, Move, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

#[cfg(test)]
mod lib_tests;

/// Picks uniformly random legal moves.
#[derive(Debug, Clone)]
pub struct RandomMover {
    rng: StdRng,
    moves: Vec<Move>,
}

impl RandomMover {
    /// Deterministic mover: the same seed yields the same choices.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            moves: Vec::with_capacity(64),
        }
    }

    /// A random legal move, or `None` when the side to move has none.
    pub fn pick(&mut self, pos: &Position) -> Option<Move> {
        self.moves.clear();
        legal_moves_into(pos, &mut self.moves);
        self.moves.choose(&mut self.rng).copied()
    }

    fn roll(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }
}

/// Difficulty layer: with probability `probability` the engine's move is
/// replaced by a random legal one.
#[derive(Debug, Clone)]
pub struct Handicap {
    probability: f64,
    mover: RandomMover,
}

impl Handicap {
    /// `probability` is clamped to `[0, 1]`.
    pub fn new(probability: f64, mover: RandomMover) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { probability, mover }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Returns `chosen`, or a random legal move when the dice say so.
    pub fn maybe_substitute(&mut self, pos: &Position, chosen: Move) -> Move {
        if self.probability <= 0.0 || !self.mover.roll(self.probability) {
            return chosen;
        }
        match self.mover.pick(pos) {
            Some(random) => {
                debug!(%chosen, %random, "handicap substituted a random move");
                random
            }
            None => chosen,
        }
    }
}
