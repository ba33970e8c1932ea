//! Tic-tac-toe rounds, best-of-N matches and a computer opponent.
//!
//! # Architecture
//!
//! - **Rules**: pure win/draw detection over the 8 fixed lines.
//! - **Engine**: move selection for the computer (random, win/block
//!   heuristic, exhaustive minimax).
//! - **Round**: one game's board, turn and terminal detection.
//! - **Match controller**: scores across rounds and best-of-N conclusion.
//! - **Session**: the event entry points a front end drives.
//!
//! # Example
//!
//! ```
//! use duel_tictactoe::{
//!     BestOf, Difficulty, GameSession, MatchMode, Opponent, Player, Position, RoundOutcome,
//!     SessionConfig,
//! };
//!
//! let config = SessionConfig::new(
//!     MatchMode::Quick,
//!     Opponent::Computer,
//!     Difficulty::Hard,
//!     Player::X,
//!     BestOf::Rounds(3),
//! );
//! let mut session = GameSession::start_match(config);
//!
//! let report = session.submit_move(Position::Center).unwrap();
//! assert_eq!(report.outcome, RoundOutcome::Ongoing);
//! assert!(session.computer_to_move());
//! session.request_computer_move().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod match_controller;
mod outcome;
mod position;
mod round;
mod scoreboard;
mod session;
mod types;

pub mod engine;
pub mod invariants;
pub mod rules;

pub use action::{Move, MoveError};
pub use config::{
    BestOf, COMPUTER_NAME, DEFAULT_OPPONENT_NAME, DEFAULT_PLAYER_NAME, MatchConfig, MatchMode,
    Opponent, SessionConfig,
};
pub use engine::{Difficulty, MoveEngine, choose_move};
pub use match_controller::{MatchController, MatchError, MatchProgress, MatchResult, MatchSummary};
pub use outcome::{Outcome, RoundOutcome};
pub use position::Position;
pub use round::Round;
pub use rules::has_won;
pub use scoreboard::Scoreboard;
pub use session::{GameSession, MoveReport, SessionError, SessionSnapshot};
pub use types::{Board, Player, Square};
