//! Cumulative match scores.

use crate::outcome::Outcome;
use crate::types::Player;
use serde::{Deserialize, Serialize};

/// Wins per symbol, draws and the current round number.
///
/// Counts only grow within a match; [`Scoreboard::new`] is the only way
/// back to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scoreboard {
    x_wins: u32,
    o_wins: u32,
    draws: u32,
    round: u32,
}

impl Scoreboard {
    /// Fresh scoreboard at round 1.
    pub fn new() -> Self {
        Self {
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            round: 1,
        }
    }

    /// Wins recorded for `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    /// Drawn rounds.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Current round number, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Total finished rounds.
    pub fn rounds_played(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }

    /// Player with strictly more wins, if any.
    pub fn leader(&self) -> Option<Player> {
        match self.x_wins.cmp(&self.o_wins) {
            std::cmp::Ordering::Greater => Some(Player::X),
            std::cmp::Ordering::Less => Some(Player::O),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Player::X) => self.x_wins += 1,
            Outcome::Winner(Player::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub(crate) fn next_round(&mut self) -> u32 {
        self.round += 1;
        self.round
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "X: {} · O: {} · Draws: {}",
            self.x_wins, self.o_wins, self.draws
        )
    }
}
