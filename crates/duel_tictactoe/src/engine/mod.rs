//! Computer opponent move selection.
//!
//! Three tiers share one entry point, [`choose_move`]:
//!
//! - **Easy**: uniform random choice among empty squares.
//! - **Medium**: take an immediate win, else block the opponent's immediate
//!   win, else play randomly.
//! - **Hard**: exhaustive minimax over the remaining game tree.
//!
//! Engines never touch the caller's board and return instantly. Pacing
//! (an artificial "thinking" delay) belongs to whoever drives the engine.

mod heuristic;
mod minimax;
mod random;

pub use heuristic::{heuristic_move, winning_move};
pub use minimax::{LOSS_SCORE, WIN_SCORE, best_move, evaluate};
pub use random::random_move;

use crate::position::Position;
use crate::types::{Board, Player};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Strength of the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random moves, no look-ahead.
    Easy,
    /// One-ply win/block heuristic with a random fallback.
    Medium,
    /// Full minimax search; never loses.
    #[default]
    Hard,
}

/// Selects a square for `ai` at the given difficulty.
///
/// Returns `None` when the board has no empty square, which callers treat
/// as a finished round rather than an error.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    ai: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Position> {
    match difficulty {
        Difficulty::Easy => random_move(board, rng),
        Difficulty::Medium => heuristic_move(board, ai, rng),
        Difficulty::Hard => best_move(board, ai),
    }
}

/// A computer opponent: a difficulty tier plus its own source of randomness.
#[derive(Debug, Clone)]
pub struct MoveEngine<R = StdRng> {
    difficulty: Difficulty,
    rng: R,
}

impl MoveEngine<StdRng> {
    /// Creates an engine seeded from the operating system.
    #[instrument]
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_os_rng())
    }

    /// Creates an engine with a fixed seed, for reproducible play.
    #[instrument]
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MoveEngine<R> {
    /// Creates an engine drawing randomness from `rng`.
    pub fn with_rng(difficulty: Difficulty, rng: R) -> Self {
        Self { difficulty, rng }
    }

    /// Returns the engine's difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Changes the engine's difficulty.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Chooses a move for `ai` on `board`.
    #[instrument(skip(self, board), fields(difficulty = %self.difficulty))]
    pub fn choose_move(&mut self, board: &Board, ai: Player) -> Option<Position> {
        let choice = choose_move(board, ai, self.difficulty, &mut self.rng);
        debug!(?choice, "Engine chose move");
        choice
    }
}
