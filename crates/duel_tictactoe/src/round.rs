//! Single-round state machine.
//!
//! A round is **active** until a move completes a line or fills the board.
//! Terminal rounds accept no moves until [`Round::reset`] starts a new one.

use crate::action::{Move, MoveError};
#[cfg(debug_assertions)]
use crate::invariants::{InvariantSet, RoundInvariants};
use crate::outcome::RoundOutcome;
use crate::position::Position;
use crate::rules::{self, has_won};
use crate::types::{Board, Player, Square};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// One round of tic-tac-toe: board, player to move and active flag.
///
/// Serialize-only: a round is built by applying moves, never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    pub(crate) board: Board,
    pub(crate) to_move: Player,
    pub(crate) starting: Player,
    pub(crate) active: bool,
    pub(crate) history: Vec<Move>,
}

impl Round {
    /// Creates an active round with an empty board.
    #[instrument]
    pub fn new(starting: Player) -> Self {
        Self {
            board: Board::new(),
            to_move: starting,
            starting,
            active: true,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose turn it is.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the player who opened this round.
    pub fn starting(&self) -> Player {
        self.starting
    }

    /// Returns true while moves are accepted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Current outcome, recomputed from the board.
    pub fn outcome(&self) -> RoundOutcome {
        RoundOutcome::evaluate(&self.board)
    }

    /// The completed line, if the round has been won.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        [Player::X, Player::O]
            .into_iter()
            .find_map(|player| rules::winning_line(&self.board, player))
    }

    /// Returns valid positions.
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.active {
            Position::valid_moves(&self.board)
        } else {
            Vec::new()
        }
    }

    /// Places the current player's mark at `position`.
    ///
    /// The mover's lines are checked after every single move, so a round
    /// can never end holding lines for both players.
    ///
    /// # Errors
    ///
    /// - [`MoveError::RoundOver`] if the round is no longer active.
    /// - [`MoveError::SquareOccupied`] if the square already holds a mark.
    ///
    /// The round is unchanged when an error is returned.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn apply_move(&mut self, position: Position) -> Result<RoundOutcome, MoveError> {
        if !self.active {
            warn!("Move rejected: round is over");
            return Err(MoveError::RoundOver);
        }
        if !self.board.is_empty(position) {
            warn!("Move rejected: square occupied");
            return Err(MoveError::SquareOccupied(position));
        }

        let player = self.to_move;
        self.board.set(position, Square::Occupied(player));
        self.history.push(Move::new(player, position));

        let outcome = if has_won(&self.board, player) {
            self.active = false;
            info!(winner = %player, "Round won");
            RoundOutcome::Won(player)
        } else if rules::is_full(&self.board) {
            self.active = false;
            info!("Round drawn");
            RoundOutcome::Draw
        } else {
            self.to_move = player.opponent();
            debug!(next = %self.to_move, "Move applied");
            RoundOutcome::Ongoing
        };

        #[cfg(debug_assertions)]
        if let Err(violations) = RoundInvariants::check_all(self) {
            tracing::error!(?violations, "Round invariants violated");
            panic!("Round invariants violated: {:?}", violations);
        }

        Ok(outcome)
    }

    /// Clears the board and starts a fresh, active round.
    #[instrument(skip(self))]
    pub fn reset(&mut self, starting: Player) {
        *self = Self::new(starting);
        debug!("Round reset");
    }

    /// Stops accepting moves without changing the board.
    ///
    /// Used when a match ends while a round is still open.
    #[instrument(skip(self))]
    pub fn close(&mut self) {
        if self.active {
            debug!("Round closed");
        }
        self.active = false;
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new(Player::X)
    }
}
