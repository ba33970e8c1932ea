//! Single winner invariant: at most one player holds a completed line.

use super::Invariant;
use crate::rules::has_won;
use crate::{Player, Round};

/// Invariant: X and O never both hold a completed line.
pub struct SingleWinnerInvariant;

impl Invariant<Round> for SingleWinnerInvariant {
    fn holds(round: &Round) -> bool {
        !(has_won(round.board(), Player::X) && has_won(round.board(), Player::O))
    }

    fn description() -> &'static str {
        "At most one player completes a line"
    }
}
