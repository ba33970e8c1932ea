//! Computer-versus-computer matches for comparing difficulty tiers.

use derive_getters::Getters;
use duel_tictactoe::{
    BestOf, Difficulty, MatchConfig, MatchController, MatchProgress, MatchResult, MatchSummary,
    MoveEngine, Player, Round, SessionError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Parameters for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Difficulty of the engine playing X.
    pub x: Difficulty,
    /// Difficulty of the engine playing O.
    pub o: Difficulty,
    /// Length of each match.
    pub best_of: BestOf,
    /// Number of matches.
    pub matches: u32,
    /// Rounds after which an undecided match is ended on the scores so far.
    pub max_rounds: u32,
    /// Seed for reproducible runs; the OS seeds the engines when absent.
    pub seed: Option<u64>,
}

/// Aggregated results of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Matches played.
    matches: u32,
    /// Matches won by X.
    x_match_wins: u32,
    /// Matches won by O.
    o_match_wins: u32,
    /// Matches ending level.
    tied_matches: u32,
    /// Matches stopped by the round limit.
    cut_short: u32,
    /// Rounds played across all matches.
    rounds: u32,
    /// Rounds won by X.
    x_round_wins: u32,
    /// Rounds won by O.
    o_round_wins: u32,
    /// Drawn rounds.
    draws: u32,
}

impl SimulationReport {
    fn record(&mut self, summary: &MatchSummary) {
        self.matches += 1;
        match summary.result {
            MatchResult::Winner(Player::X) => self.x_match_wins += 1,
            MatchResult::Winner(Player::O) => self.o_match_wins += 1,
            MatchResult::Tie => self.tied_matches += 1,
        }
        if summary.forced {
            self.cut_short += 1;
        }
        let scores = &summary.scoreboard;
        self.rounds += scores.rounds_played();
        self.x_round_wins += scores.wins(Player::X);
        self.o_round_wins += scores.wins(Player::O);
        self.draws += scores.draws();
    }
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Matches: {} (X: {} · O: {} · Tied: {} · Cut short: {})",
            self.matches, self.x_match_wins, self.o_match_wins, self.tied_matches, self.cut_short
        )?;
        write!(
            f,
            "Rounds: {} (X: {} · O: {} · Draws: {})",
            self.rounds, self.x_round_wins, self.o_round_wins, self.draws
        )
    }
}

/// Plays `config.matches` matches between two engines.
///
/// # Errors
///
/// Propagates session errors, which only arise if an engine picks an
/// illegal square.
#[instrument]
pub fn simulate(config: &SimulationConfig) -> Result<SimulationReport, SessionError> {
    let (mut x, mut o) = match config.seed {
        Some(seed) => (
            MoveEngine::seeded(config.x, seed),
            MoveEngine::seeded(config.o, seed.wrapping_add(1)),
        ),
        None => (MoveEngine::new(config.x), MoveEngine::new(config.o)),
    };

    let mut report = SimulationReport::default();
    for index in 0..config.matches {
        let summary = play_match(
            &mut x,
            &mut o,
            MatchConfig::new(config.best_of),
            config.max_rounds,
        )?;
        debug!(index, %summary, "Match simulated");
        report.record(&summary);
    }

    info!(
        matches = report.matches,
        x_wins = report.x_match_wins,
        o_wins = report.o_match_wins,
        "Simulation complete"
    );
    Ok(report)
}

/// Plays one match, alternating the opening symbol each round.
pub fn play_match(
    x: &mut MoveEngine,
    o: &mut MoveEngine,
    config: MatchConfig,
    max_rounds: u32,
) -> Result<MatchSummary, SessionError> {
    let mut controller = MatchController::new(config);
    let mut round = Round::new(Player::X);

    loop {
        let mover = round.to_move();
        let engine = match mover {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };
        let position = engine
            .choose_move(round.board(), mover)
            .ok_or(SessionError::NoMoveAvailable)?;

        let Some(outcome) = round.apply_move(position)?.finished() else {
            continue;
        };

        if let MatchProgress::MatchConcluded(summary) = controller.record_outcome(outcome)? {
            return Ok(summary);
        }
        if controller.scoreboard().rounds_played() >= max_rounds {
            return Ok(controller.force_end_match());
        }
        let starting = controller.start_new_round()?;
        round.reset(starting);
    }
}
