//! Monotonic board invariant: squares never change once set.

use super::Invariant;
use crate::{Board, Round};

/// Invariant: the board is exactly the history replayed onto an empty board,
/// with no square written twice.
pub struct MonotonicBoardInvariant;

impl Invariant<Round> for MonotonicBoardInvariant {
    fn holds(round: &Round) -> bool {
        let mut reconstructed = Board::new();
        for mov in round.history() {
            if reconstructed.place(mov.position, mov.player).is_err() {
                return false;
            }
        }
        reconstructed == *round.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
