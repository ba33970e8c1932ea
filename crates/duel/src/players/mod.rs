//! Participant trait and implementations.

mod computer;
mod human;

pub use computer::ComputerPlayer;
pub use human::{HumanPlayer, InputLines, spawn_stdin_reader};

use anyhow::Result;
use duel_tictactoe::{Opponent, Player, Position, SessionConfig, SessionSnapshot};
use std::time::Duration;

/// What a participant wants to do on their turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Place a mark on this square.
    Place(Position),
    /// Let the session's engine pick the square.
    ComputerMove,
    /// End the match now and show the result.
    EndMatch,
    /// Leave the game.
    Quit,
    /// Input that could not be understood.
    Unrecognised(String),
}

/// Choices offered between rounds and after a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Decision {
    /// Start the next round.
    #[strum(to_string = "[n]ext round")]
    NextRound,
    /// End the match with the current scores.
    #[strum(to_string = "[e]nd match")]
    EndMatch,
    /// Zero the scores and start again.
    #[strum(to_string = "[r]eset match")]
    ResetMatch,
    /// Leave the game.
    #[strum(to_string = "[q]uit")]
    Quit,
}

impl Decision {
    /// Parses a typed answer such as `n`, `next` or `reset`.
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "n" | "next" | "next round" => Some(Decision::NextRound),
            "e" | "end" | "end match" => Some(Decision::EndMatch),
            "r" | "reset" | "reset match" | "again" | "play again" => Some(Decision::ResetMatch),
            "q" | "quit" | "exit" => Some(Decision::Quit),
            _ => None,
        }
    }
}

/// Someone sitting at the board.
#[async_trait::async_trait]
pub trait Participant: Send {
    /// Decides what to do on this participant's turn.
    async fn next_turn(&mut self, snapshot: &SessionSnapshot) -> Result<Turn>;

    /// Picks one of `choices`, or `None` if the answer was not understood.
    async fn decide(&mut self, choices: &[Decision]) -> Result<Option<Decision>> {
        Ok(choices.first().copied())
    }

    /// Returns the participant's display name.
    fn name(&self) -> &str;

    /// True for participants whose moves come from the engine.
    fn is_computer(&self) -> bool {
        false
    }
}

/// Seats the participants for `config`, returning `(player_x, player_o)`.
pub fn seat(
    config: &SessionConfig,
    computer_delay: Duration,
    input: InputLines,
) -> (Box<dyn Participant>, Box<dyn Participant>) {
    let first: Box<dyn Participant> =
        Box::new(HumanPlayer::new(config.player_name().as_str(), input.clone()));
    let second: Box<dyn Participant> = match config.opponent() {
        Opponent::Computer => Box::new(ComputerPlayer::new(
            config.opponent_name().as_str(),
            computer_delay,
        )),
        Opponent::Human => Box::new(HumanPlayer::new(config.opponent_name().as_str(), input)),
    };

    match config.player_symbol() {
        Player::X => (first, second),
        Player::O => (second, first),
    }
}
