//! Game session: the event entry points a front end drives.
//!
//! A session owns one round, one match controller and the computer
//! opponent. Front ends feed it discrete events (a human move, a request
//! for the computer's move, round and match transitions) and render the
//! reports it returns. Nothing here sleeps, draws or plays sounds.

use crate::action::MoveError;
use crate::config::SessionConfig;
use crate::engine::MoveEngine;
use crate::match_controller::{MatchController, MatchError, MatchProgress, MatchSummary};
use crate::outcome::RoundOutcome;
use crate::position::Position;
use crate::round::Round;
use crate::scoreboard::Scoreboard;
use crate::types::{Board, Player};
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Result of one applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// Symbol that moved.
    pub mover: Player,
    /// Square that was filled.
    pub position: Position,
    /// Round status after the move.
    pub outcome: RoundOutcome,
    /// Present when the move finished the round.
    pub progress: Option<MatchProgress>,
}

/// Errors from session events. None of them changes session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    /// The round rejected the move.
    #[display("Invalid move: {}", _0)]
    #[from]
    InvalidMove(MoveError),

    /// The match rejected the transition.
    #[display("{}", _0)]
    #[from]
    Match(MatchError),

    /// The computer was asked to move on a full board.
    #[display("No move available")]
    NoMoveAvailable,

    /// A human move arrived while the computer is due to move.
    #[display("It's the computer's turn")]
    ComputersTurn,

    /// The computer was asked to move out of turn or in a human match.
    #[display("It's not the computer's turn")]
    NotComputersTurn,

    /// The next round was requested before the current one finished.
    #[display("The current round is still in progress")]
    RoundInProgress,
}

/// Serialisable view of a session for front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Board contents.
    pub board: Board,
    /// Player to move.
    pub to_move: Player,
    /// Whether the round accepts moves.
    pub active: bool,
    /// Round status.
    pub outcome: RoundOutcome,
    /// Completed line, for highlighting.
    pub winning_line: Option<[Position; 3]>,
    /// Scores and round number.
    pub scoreboard: Scoreboard,
    /// Wins needed to take the match.
    pub needed_wins: Option<u32>,
    /// Final summary once the match is over.
    pub summary: Option<MatchSummary>,
    /// Whether the front end should trigger the computer's move.
    pub computer_to_move: bool,
}

/// A match in progress between two participants.
#[derive(Debug, Clone)]
pub struct GameSession<R = StdRng> {
    config: SessionConfig,
    round: Round,
    controller: MatchController,
    engine: MoveEngine<R>,
}

impl GameSession<StdRng> {
    /// Starts a match with an OS-seeded computer opponent.
    #[instrument]
    pub fn start_match(config: SessionConfig) -> Self {
        let engine = MoveEngine::new(*config.difficulty());
        Self::with_engine(config, engine)
    }

    /// Starts a match whose computer opponent uses a fixed seed.
    #[instrument]
    pub fn seeded(config: SessionConfig, seed: u64) -> Self {
        let engine = MoveEngine::seeded(*config.difficulty(), seed);
        Self::with_engine(config, engine)
    }
}

impl<R: Rng> GameSession<R> {
    /// Starts a match with the given engine; its difficulty is taken from
    /// the configuration. Round 1 always opens with X.
    pub fn with_engine(config: SessionConfig, mut engine: MoveEngine<R>) -> Self {
        engine.set_difficulty(*config.difficulty());
        info!(
            mode = %config.mode(),
            opponent = %config.opponent(),
            difficulty = %config.difficulty(),
            player_symbol = %config.player_symbol(),
            best_of = %config.best_of(),
            "Match started"
        );
        Self {
            controller: MatchController::new(config.match_config()),
            round: Round::new(Player::X),
            config,
            engine,
        }
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the current round.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Returns the board of the current round.
    pub fn board(&self) -> &Board {
        self.round.board()
    }

    /// Returns the match controller.
    pub fn controller(&self) -> &MatchController {
        &self.controller
    }

    /// Returns the current scores.
    pub fn scoreboard(&self) -> &Scoreboard {
        self.controller.scoreboard()
    }

    /// Display name of whoever plays `symbol`.
    pub fn name_for(&self, symbol: Player) -> &str {
        self.config.name_for(symbol)
    }

    /// True when the current round is waiting on the computer.
    pub fn computer_to_move(&self) -> bool {
        self.round.is_active() && self.config.computer_symbol() == Some(self.round.to_move())
    }

    /// Applies a human move for the player whose turn it is.
    ///
    /// # Errors
    ///
    /// - [`SessionError::ComputersTurn`] while the computer is due to move.
    /// - [`SessionError::InvalidMove`] for an occupied square or a finished round.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, position: Position) -> Result<MoveReport, SessionError> {
        if self.computer_to_move() {
            warn!("Human move rejected: computer to move");
            return Err(SessionError::ComputersTurn);
        }
        self.play(position)
    }

    /// Lets the computer choose and play its move.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotComputersTurn`] against a human opponent or when
    ///   the human is to move.
    /// - [`SessionError::InvalidMove`] when the round is over.
    /// - [`SessionError::NoMoveAvailable`] if the engine finds no empty square.
    #[instrument(skip(self))]
    pub fn request_computer_move(&mut self) -> Result<MoveReport, SessionError> {
        let Some(ai) = self.config.computer_symbol() else {
            return Err(SessionError::NotComputersTurn);
        };
        if !self.round.is_active() {
            return Err(SessionError::InvalidMove(MoveError::RoundOver));
        }
        if self.round.to_move() != ai {
            return Err(SessionError::NotComputersTurn);
        }

        let position = self
            .engine
            .choose_move(self.round.board(), ai)
            .ok_or(SessionError::NoMoveAvailable)?;
        self.play(position)
    }

    fn play(&mut self, position: Position) -> Result<MoveReport, SessionError> {
        let mover = self.round.to_move();
        let outcome = self.round.apply_move(position)?;
        let progress = match outcome.finished() {
            Some(finished) => Some(self.controller.record_outcome(finished)?),
            None => None,
        };
        debug!(%mover, %position, %outcome, "Move reported");
        Ok(MoveReport {
            mover,
            position,
            outcome,
            progress,
        })
    }

    /// Starts the next round once the current one has finished.
    ///
    /// Returns the symbol that opens it; starting symbols alternate.
    ///
    /// # Errors
    ///
    /// - [`SessionError::RoundInProgress`] while the current round is active.
    /// - [`SessionError::Match`] once the match has concluded.
    #[instrument(skip(self))]
    pub fn advance_round(&mut self) -> Result<Player, SessionError> {
        if self.round.is_active() {
            return Err(SessionError::RoundInProgress);
        }
        let starting = self.controller.start_new_round()?;
        self.round.reset(starting);
        Ok(starting)
    }

    /// Ends the match now. The open round, if any, stops accepting moves.
    #[instrument(skip(self))]
    pub fn end_match(&mut self) -> MatchSummary {
        self.round.close();
        self.controller.force_end_match()
    }

    /// Clears scores and starts round 1 again with the same settings.
    #[instrument(skip(self))]
    pub fn reset_match(&mut self) {
        self.controller.reset_match();
        self.round.reset(Player::X);
    }

    /// Captures everything a front end needs to draw the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: *self.round.board(),
            to_move: self.round.to_move(),
            active: self.round.is_active(),
            outcome: self.round.outcome(),
            winning_line: self.round.winning_line(),
            scoreboard: *self.controller.scoreboard(),
            needed_wins: self.controller.needed_wins(),
            summary: self.controller.summary().copied(),
            computer_to_move: self.computer_to_move(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BestOf, MatchMode, Opponent};
    use crate::engine::Difficulty;

    fn human_match() -> GameSession {
        let config = SessionConfig::new(
            MatchMode::Endless,
            Opponent::Human,
            Difficulty::Easy,
            Player::X,
            BestOf::Unbounded,
        );
        GameSession::seeded(config, 1)
    }

    #[test]
    fn test_advance_requires_finished_round() {
        let mut session = human_match();
        assert_eq!(session.advance_round(), Err(SessionError::RoundInProgress));
    }

    #[test]
    fn test_computer_move_rejected_in_human_match() {
        let mut session = human_match();
        assert_eq!(
            session.request_computer_move(),
            Err(SessionError::NotComputersTurn)
        );
        assert!(!session.computer_to_move());
        assert_eq!(session.config().computer_symbol(), None);
    }

    #[test]
    fn test_end_match_closes_open_round() {
        let mut session = human_match();
        session.submit_move(Position::Center).unwrap();
        let summary = session.end_match();
        assert!(summary.forced);
        assert_eq!(
            session.submit_move(Position::TopLeft),
            Err(SessionError::InvalidMove(MoveError::RoundOver))
        );
        assert_eq!(
            session.advance_round(),
            Err(SessionError::Match(MatchError::Concluded))
        );

        session.reset_match();
        assert!(session.round().is_active());
        assert_eq!(session.scoreboard().round(), 1);
        assert!(session.snapshot().summary.is_none());
    }
}
