//! Duel - terminal front end for tic-tac-toe matches.
//!
//! The game rules live in `duel_tictactoe`; this crate seats the
//! participants, paces the computer, renders events as text and loads
//! settings.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod orchestrator;
pub mod players;
pub mod settings;
pub mod simulate;
pub mod ui;

pub use orchestrator::{GameEvent, Orchestrator};
pub use players::{ComputerPlayer, Decision, HumanPlayer, Participant, Turn};
pub use settings::{ConfigError, MatchSettings};
pub use simulate::{SimulationConfig, SimulationReport, simulate};
