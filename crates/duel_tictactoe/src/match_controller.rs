//! Match progression across rounds.
//!
//! The controller tallies finished rounds and decides after each one
//! whether the match is over. Bounded matches end as soon as either
//! player reaches `ceil(best_of / 2)` wins; unbounded matches only end
//! through [`MatchController::force_end_match`].

use crate::config::MatchConfig;
use crate::outcome::Outcome;
use crate::scoreboard::Scoreboard;
use crate::types::Player;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    /// The player with more round wins.
    Winner(Player),
    /// Both players won the same number of rounds.
    Tie,
}

impl MatchResult {
    /// Higher score wins; equal scores tie.
    pub fn from_scores(scoreboard: &Scoreboard) -> Self {
        scoreboard
            .leader()
            .map_or(MatchResult::Tie, MatchResult::Winner)
    }

    /// Returns the match winner, if any.
    pub fn winner(&self) -> Option<Player> {
        match self {
            MatchResult::Winner(player) => Some(*player),
            MatchResult::Tie => None,
        }
    }
}

/// Summary reported when a match ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Who took the match.
    pub result: MatchResult,
    /// Scores at the moment the match ended.
    pub scoreboard: Scoreboard,
    /// True when the match was ended by request rather than by score.
    pub forced: bool,
}

impl std::fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.result {
            MatchResult::Winner(player) => write!(f, "{} wins the match", player)?,
            MatchResult::Tie => write!(f, "Match tied")?,
        }
        write!(f, " (final score {})", self.scoreboard)
    }
}

/// What happens after a round has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchProgress {
    /// The match goes on; the caller should start another round.
    RoundConcluded(Scoreboard),
    /// The match is over.
    MatchConcluded(MatchSummary),
}

impl MatchProgress {
    /// Returns the summary if this round ended the match.
    pub fn summary(&self) -> Option<&MatchSummary> {
        match self {
            MatchProgress::RoundConcluded(_) => None,
            MatchProgress::MatchConcluded(summary) => Some(summary),
        }
    }

    /// Scores after the round.
    pub fn scoreboard(&self) -> &Scoreboard {
        match self {
            MatchProgress::RoundConcluded(scoreboard) => scoreboard,
            MatchProgress::MatchConcluded(summary) => &summary.scoreboard,
        }
    }
}

/// Errors from match transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MatchError {
    /// The match has already ended; reset it to play on.
    #[display("Match has already concluded")]
    Concluded,
}

/// Owns the scoreboard and the best-of rules for one match.
///
/// Serialize-only; the concluded summary must agree with the scoreboard,
/// so controllers are only ever built through [`MatchController::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchController {
    config: MatchConfig,
    scoreboard: Scoreboard,
    concluded: Option<MatchSummary>,
}

impl MatchController {
    /// Starts a match at round 1 with no scores.
    #[instrument]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            scoreboard: Scoreboard::new(),
            concluded: None,
        }
    }

    /// Returns the match rules.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Returns the current scores.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Wins needed to take the match, `None` when unbounded.
    pub fn needed_wins(&self) -> Option<u32> {
        self.config.needed_wins()
    }

    /// Returns true once the match has ended.
    pub fn is_concluded(&self) -> bool {
        self.concluded.is_some()
    }

    /// Returns the final summary once the match has ended.
    pub fn summary(&self) -> Option<&MatchSummary> {
        self.concluded.as_ref()
    }

    /// Records a finished round and decides whether the match is over.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Concluded`] if the match already ended.
    #[instrument(skip(self), fields(round = self.scoreboard.round()))]
    pub fn record_outcome(&mut self, outcome: Outcome) -> Result<MatchProgress, MatchError> {
        if self.is_concluded() {
            warn!("Outcome rejected: match already concluded");
            return Err(MatchError::Concluded);
        }

        self.scoreboard.record(outcome);
        info!(scores = %self.scoreboard, "Round recorded");

        let reached = self.needed_wins().is_some_and(|needed| {
            self.scoreboard.wins(Player::X) >= needed || self.scoreboard.wins(Player::O) >= needed
        });

        if reached {
            let summary = self.conclude(false);
            Ok(MatchProgress::MatchConcluded(summary))
        } else {
            Ok(MatchProgress::RoundConcluded(self.scoreboard))
        }
    }

    /// Advances the round counter and returns the symbol that opens the
    /// new round: X on odd rounds, O on even rounds.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Concluded`] if the match already ended.
    #[instrument(skip(self))]
    pub fn start_new_round(&mut self) -> Result<Player, MatchError> {
        if self.is_concluded() {
            warn!("New round rejected: match already concluded");
            return Err(MatchError::Concluded);
        }

        let round = self.scoreboard.next_round();
        let starting = Self::starting_player(round);
        info!(round, starting = %starting, "Starting new round");
        Ok(starting)
    }

    /// Ends the match now, whatever the scores.
    ///
    /// Ending a match that already concluded returns its existing summary.
    #[instrument(skip(self))]
    pub fn force_end_match(&mut self) -> MatchSummary {
        match self.concluded {
            Some(summary) => summary,
            None => self.conclude(true),
        }
    }

    /// Zeroes the scores and returns to round 1, keeping the rules.
    #[instrument(skip(self))]
    pub fn reset_match(&mut self) {
        self.scoreboard = Scoreboard::new();
        self.concluded = None;
        info!("Match reset");
    }

    /// Symbol that opens `round`.
    pub fn starting_player(round: u32) -> Player {
        if round % 2 == 1 { Player::X } else { Player::O }
    }

    fn conclude(&mut self, forced: bool) -> MatchSummary {
        let summary = MatchSummary {
            result: MatchResult::from_scores(&self.scoreboard),
            scoreboard: self.scoreboard,
            forced,
        };
        info!(result = ?summary.result, forced, "Match concluded");
        self.concluded = Some(summary);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BestOf;

    fn bounded(rounds: u32) -> MatchController {
        MatchController::new(MatchConfig::new(BestOf::rounds(rounds)))
    }

    #[test]
    fn test_round_concluded_until_majority() {
        let mut controller = bounded(5);
        let progress = controller.record_outcome(Outcome::Winner(Player::X)).unwrap();
        assert!(matches!(progress, MatchProgress::RoundConcluded(_)));
        controller.record_outcome(Outcome::Draw).unwrap();
        controller.record_outcome(Outcome::Winner(Player::X)).unwrap();
        assert!(!controller.is_concluded());

        let progress = controller.record_outcome(Outcome::Winner(Player::X)).unwrap();
        let summary = progress.summary().copied().unwrap();
        assert_eq!(summary.result, MatchResult::Winner(Player::X));
        assert!(!summary.forced);
        assert_eq!(summary.scoreboard.wins(Player::X), 3);
        assert_eq!(summary.scoreboard.draws(), 1);
    }

    #[test]
    fn test_draws_never_conclude() {
        let mut controller = bounded(1);
        for _ in 0..10 {
            let progress = controller.record_outcome(Outcome::Draw).unwrap();
            assert!(progress.summary().is_none());
        }
        assert_eq!(controller.scoreboard().draws(), 10);
    }

    #[test]
    fn test_concluded_match_rejects_further_rounds() {
        let mut controller = bounded(1);
        controller.record_outcome(Outcome::Winner(Player::O)).unwrap();
        assert!(controller.is_concluded());
        assert_eq!(
            controller.record_outcome(Outcome::Draw),
            Err(MatchError::Concluded)
        );
        assert_eq!(controller.start_new_round(), Err(MatchError::Concluded));
        assert_eq!(controller.scoreboard().draws(), 0);

        let summary = controller.force_end_match();
        assert!(!summary.forced);
        assert_eq!(summary.result, MatchResult::Winner(Player::O));
    }

    #[test]
    fn test_unbounded_match_only_ends_by_request() {
        let mut controller = MatchController::new(MatchConfig::default());
        for _ in 0..20 {
            let progress = controller.record_outcome(Outcome::Winner(Player::O)).unwrap();
            assert!(progress.summary().is_none());
        }
        let summary = controller.force_end_match();
        assert!(summary.forced);
        assert_eq!(summary.result, MatchResult::Winner(Player::O));
        assert!(controller.is_concluded());
    }

    #[test]
    fn test_forced_end_with_level_scores_ties() {
        let mut controller = MatchController::new(MatchConfig::default());
        controller.record_outcome(Outcome::Winner(Player::X)).unwrap();
        controller.record_outcome(Outcome::Winner(Player::O)).unwrap();
        let summary = controller.force_end_match();
        assert_eq!(summary.result, MatchResult::Tie);
        assert_eq!(summary.to_string(), "Match tied (final score X: 1 · O: 1 · Draws: 0)");
    }

    #[test]
    fn test_rounds_alternate_starting_player() {
        let mut controller = bounded(9);
        assert_eq!(controller.scoreboard().round(), 1);
        assert_eq!(controller.start_new_round(), Ok(Player::O));
        assert_eq!(controller.start_new_round(), Ok(Player::X));
        assert_eq!(controller.start_new_round(), Ok(Player::O));
        assert_eq!(controller.scoreboard().round(), 4);
    }

    #[test]
    fn test_reset_keeps_config() {
        let mut controller = bounded(3);
        controller.record_outcome(Outcome::Winner(Player::X)).unwrap();
        controller.start_new_round().unwrap();
        controller.record_outcome(Outcome::Winner(Player::X)).unwrap();
        assert!(controller.is_concluded());

        controller.reset_match();
        assert!(!controller.is_concluded());
        assert_eq!(*controller.scoreboard(), Scoreboard::new());
        assert_eq!(controller.needed_wins(), Some(2));
    }

    #[test]
    fn test_controller_serializes_concluded_summary() {
        let mut controller = bounded(1);
        let json = serde_json::to_value(&controller).unwrap();
        assert!(json["concluded"].is_null());

        controller.record_outcome(Outcome::Winner(Player::O)).unwrap();
        let json = serde_json::to_value(&controller).unwrap();
        assert_eq!(json["concluded"]["forced"], false);
        assert_eq!(json["concluded"]["result"]["Winner"], "O");
    }
}
