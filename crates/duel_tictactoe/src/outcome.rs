//! Round outcomes.

use crate::rules::{check_winner, is_full};
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};

/// Outcome of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the round.
    Winner(Player),
    /// Round ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Status of a round, derived from the board after every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Moves are still possible and nobody has won.
    Ongoing,
    /// A player completed a line.
    Won(Player),
    /// The board filled up with no line completed.
    Draw,
}

impl RoundOutcome {
    /// Evaluates a board from scratch.
    pub fn evaluate(board: &Board) -> Self {
        if let Some(winner) = check_winner(board) {
            RoundOutcome::Won(winner)
        } else if is_full(board) {
            RoundOutcome::Draw
        } else {
            RoundOutcome::Ongoing
        }
    }

    /// Returns the terminal outcome, or `None` while the round is ongoing.
    pub fn finished(self) -> Option<Outcome> {
        match self {
            RoundOutcome::Ongoing => None,
            RoundOutcome::Won(player) => Some(Outcome::Winner(player)),
            RoundOutcome::Draw => Some(Outcome::Draw),
        }
    }
}

impl From<Outcome> for RoundOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner(player) => RoundOutcome::Won(player),
            Outcome::Draw => RoundOutcome::Draw,
        }
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.finished() {
            Some(outcome) => write!(f, "{}", outcome),
            None => write!(f, "In progress"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate() {
        assert_eq!(RoundOutcome::evaluate(&Board::new()), RoundOutcome::Ongoing);
        let won: Board = "OOO XX. X..".parse().unwrap();
        assert_eq!(RoundOutcome::evaluate(&won), RoundOutcome::Won(Player::O));
        let drawn: Board = "XOX XOO OXX".parse().unwrap();
        assert_eq!(RoundOutcome::evaluate(&drawn), RoundOutcome::Draw);
    }

    #[test]
    fn test_finished_conversion() {
        assert_eq!(RoundOutcome::Ongoing.finished(), None);
        assert_eq!(
            RoundOutcome::Won(Player::X).finished(),
            Some(Outcome::Winner(Player::X))
        );
        assert_eq!(RoundOutcome::from(Outcome::Draw), RoundOutcome::Draw);
        assert_eq!(Outcome::Winner(Player::O).to_string(), "O wins");
    }
}
