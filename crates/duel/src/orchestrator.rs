//! Match orchestration between participants.

use crate::players::{Decision, Participant, Turn};
use anyhow::Result;
use duel_tictactoe::{
    BestOf, Board, GameSession, MatchMode, MatchProgress, MatchSummary, MoveReport, Outcome,
    Player, Position, Scoreboard, SessionError,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A match began.
    MatchStarted {
        /// Round boundary handling.
        mode: MatchMode,
        /// Match length.
        best_of: BestOf,
        /// Who plays X.
        x_name: String,
        /// Who plays O.
        o_name: String,
    },
    /// A round began.
    RoundStarted {
        /// Round number, from 1.
        round: u32,
        /// Symbol that opens the round.
        starting: Player,
        /// Name of whoever opens.
        name: String,
    },
    /// Board contents changed.
    BoardChanged {
        /// Current board.
        board: Board,
        /// Completed line, if any.
        winning_line: Option<[Position; 3]>,
    },
    /// Waiting for a human move.
    AwaitingMove {
        /// Symbol to move.
        player: Player,
        /// Name of the mover.
        name: String,
    },
    /// The computer is choosing.
    ComputerThinking {
        /// Computer's name.
        name: String,
    },
    /// A move was made.
    MoveMade {
        /// Symbol that moved.
        player: Player,
        /// Name of the mover.
        name: String,
        /// Square filled.
        position: Position,
    },
    /// Input was refused; nothing changed.
    MoveRejected {
        /// Why.
        reason: String,
    },
    /// A round finished.
    RoundOver {
        /// Result of the round.
        outcome: Outcome,
        /// Name of the round winner.
        winner: Option<String>,
        /// Scores after the round.
        scoreboard: Scoreboard,
    },
    /// Waiting for a choice between rounds or after the match.
    AwaitingDecision {
        /// Choices on offer.
        choices: Vec<Decision>,
    },
    /// The match finished.
    MatchOver {
        /// Final result.
        summary: MatchSummary,
        /// Name of the match winner.
        winner: Option<String>,
    },
    /// Scores were cleared and round 1 begins again.
    MatchReset,
}

/// What the loop does after handling one step.
enum Flow {
    Continue,
    Stop,
}

/// Drives a [`GameSession`] with two participants and reports progress
/// as [`GameEvent`]s.
pub struct Orchestrator {
    session: GameSession,
    player_x: Box<dyn Participant>,
    player_o: Box<dyn Participant>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        session: GameSession,
        player_x: Box<dyn Participant>,
        player_o: Box<dyn Participant>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            session,
            player_x,
            player_o,
            event_tx,
        }
    }

    /// Returns the session being played.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn participant_mut(&mut self, symbol: Player) -> &mut Box<dyn Participant> {
        match symbol {
            Player::X => &mut self.player_x,
            Player::O => &mut self.player_o,
        }
    }

    /// The participant who answers round-boundary questions: whoever
    /// holds the first player's symbol.
    fn host_mut(&mut self) -> &mut Box<dyn Participant> {
        let symbol = *self.session.config().player_symbol();
        self.participant_mut(symbol)
    }

    fn emit(&self, event: GameEvent) -> Result<()> {
        self.event_tx.send(event)?;
        Ok(())
    }

    /// Runs until a participant quits. Returns the last match summary, if
    /// a match was finished.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<Option<MatchSummary>> {
        info!("Starting match orchestration");
        let config = self.session.config().clone();
        self.emit(GameEvent::MatchStarted {
            mode: *config.mode(),
            best_of: *config.best_of(),
            x_name: self.session.name_for(Player::X).to_string(),
            o_name: self.session.name_for(Player::O).to_string(),
        })?;
        self.announce_round()?;

        loop {
            let flow = if self.session.round().is_active() {
                self.play_turn().await?
            } else if self.session.controller().is_concluded() {
                self.after_match().await?
            } else {
                self.between_rounds().await?
            };

            if let Flow::Stop = flow {
                info!("Orchestration finished");
                return Ok(self.session.controller().summary().copied());
            }
        }
    }

    fn announce_round(&self) -> Result<()> {
        let starting = self.session.round().starting();
        self.emit(GameEvent::RoundStarted {
            round: self.session.scoreboard().round(),
            starting,
            name: self.session.name_for(starting).to_string(),
        })?;
        self.emit_board()
    }

    fn emit_board(&self) -> Result<()> {
        self.emit(GameEvent::BoardChanged {
            board: *self.session.board(),
            winning_line: self.session.round().winning_line(),
        })
    }

    async fn play_turn(&mut self) -> Result<Flow> {
        let symbol = self.session.round().to_move();
        let name = self.session.name_for(symbol).to_string();
        let is_computer = self.participant_mut(symbol).is_computer();

        if is_computer {
            self.emit(GameEvent::ComputerThinking { name })?;
        } else {
            self.emit(GameEvent::AwaitingMove {
                player: symbol,
                name,
            })?;
        }

        let snapshot = self.session.snapshot();
        debug!(player = %symbol, "Waiting for turn");
        let turn = self.participant_mut(symbol).next_turn(&snapshot).await?;

        let result = match turn {
            Turn::Place(position) => self.session.submit_move(position),
            Turn::ComputerMove => self.session.request_computer_move(),
            Turn::EndMatch => {
                self.finish_match_early()?;
                return Ok(Flow::Continue);
            }
            Turn::Quit => {
                self.finish_match_early()?;
                return Ok(Flow::Stop);
            }
            Turn::Unrecognised(input) => {
                self.emit(GameEvent::MoveRejected {
                    reason: format!("'{}' is not a square; type 1-9", input),
                })?;
                return Ok(Flow::Continue);
            }
        };

        match result {
            Ok(report) => self.report_move(report)?,
            Err(error) => self.reject(error)?,
        }
        Ok(Flow::Continue)
    }

    fn reject(&self, error: SessionError) -> Result<()> {
        warn!(%error, "Turn rejected");
        self.emit(GameEvent::MoveRejected {
            reason: error.to_string(),
        })
    }

    fn report_move(&self, report: MoveReport) -> Result<()> {
        self.emit(GameEvent::MoveMade {
            player: report.mover,
            name: self.session.name_for(report.mover).to_string(),
            position: report.position,
        })?;
        self.emit_board()?;

        let (Some(outcome), Some(progress)) = (report.outcome.finished(), report.progress) else {
            return Ok(());
        };

        self.emit(GameEvent::RoundOver {
            outcome,
            winner: outcome
                .winner()
                .map(|winner| self.session.name_for(winner).to_string()),
            scoreboard: *progress.scoreboard(),
        })?;

        if let MatchProgress::MatchConcluded(summary) = progress {
            self.emit_match_over(summary)?;
        }
        Ok(())
    }

    fn emit_match_over(&self, summary: MatchSummary) -> Result<()> {
        self.emit(GameEvent::MatchOver {
            summary,
            winner: summary
                .result
                .winner()
                .map(|winner| self.session.name_for(winner).to_string()),
        })
    }

    fn finish_match_early(&mut self) -> Result<()> {
        let already_over = self.session.controller().is_concluded();
        let summary = self.session.end_match();
        if !already_over {
            self.emit_match_over(summary)?;
        }
        Ok(())
    }

    async fn between_rounds(&mut self) -> Result<Flow> {
        let mode = *self.session.config().mode();
        let decision = match mode {
            MatchMode::Quick => Decision::NextRound,
            MatchMode::Endless => {
                let choices = vec![
                    Decision::NextRound,
                    Decision::EndMatch,
                    Decision::ResetMatch,
                    Decision::Quit,
                ];
                match self.ask(choices).await? {
                    Some(decision) => decision,
                    None => return Ok(Flow::Continue),
                }
            }
        };
        self.apply(decision)
    }

    async fn after_match(&mut self) -> Result<Flow> {
        match self.ask(vec![Decision::ResetMatch, Decision::Quit]).await? {
            Some(decision) => self.apply(decision),
            None => Ok(Flow::Continue),
        }
    }

    async fn ask(&mut self, choices: Vec<Decision>) -> Result<Option<Decision>> {
        self.emit(GameEvent::AwaitingDecision {
            choices: choices.clone(),
        })?;
        let decision = self.host_mut().decide(&choices).await?;
        if decision.is_none() {
            self.emit(GameEvent::MoveRejected {
                reason: "Please pick one of the listed options".to_string(),
            })?;
        }
        Ok(decision)
    }

    fn apply(&mut self, decision: Decision) -> Result<Flow> {
        debug!(%decision, "Applying decision");
        match decision {
            Decision::NextRound => match self.session.advance_round() {
                Ok(_) => self.announce_round()?,
                Err(error) => self.reject(error)?,
            },
            Decision::EndMatch => self.finish_match_early()?,
            Decision::ResetMatch => {
                self.session.reset_match();
                self.emit(GameEvent::MatchReset)?;
                self.announce_round()?;
            }
            Decision::Quit => {
                self.finish_match_early()?;
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }
}
