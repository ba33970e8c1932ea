//! Plain-text rendering of game events.

use crate::orchestrator::GameEvent;
use anyhow::Result;
use duel_tictactoe::{BestOf, MatchResult, Outcome};
use std::io::Write;
use tokio::sync::mpsc;
use tracing::debug;

/// Renders one event as the text shown to the players.
pub fn render_event(event: &GameEvent) -> String {
    match event {
        GameEvent::MatchStarted {
            mode,
            best_of,
            x_name,
            o_name,
        } => {
            let length = match best_of {
                BestOf::Unbounded => "play until you stop".to_string(),
                BestOf::Rounds(_) => best_of.to_string(),
            };
            format!("{} (X) vs {} (O) · {} mode · {}", x_name, o_name, mode, length)
        }
        GameEvent::RoundStarted {
            round,
            starting,
            name,
        } => format!("\nRound {}: {} ({}) starts", round, name, starting),
        GameEvent::BoardChanged {
            board,
            winning_line,
        } => match winning_line {
            Some(line) => format!(
                "{}\nWinning line: {}, {}, {}",
                board.display(),
                line[0],
                line[1],
                line[2]
            ),
            None => board.display(),
        },
        GameEvent::AwaitingMove { player, name } => {
            format!(
                "{} ({}), choose a square 1-9 ('end' ends the match, 'quit' leaves):",
                name, player
            )
        }
        GameEvent::ComputerThinking { name } => format!("{} is thinking...", name),
        GameEvent::MoveMade {
            player,
            name,
            position,
        } => format!("{} ({}) plays {}", name, player, position),
        GameEvent::MoveRejected { reason } => format!("✗ {}", reason),
        GameEvent::RoundOver {
            outcome,
            winner,
            scoreboard,
        } => {
            let headline = match (outcome, winner) {
                (Outcome::Winner(_), Some(name)) => format!("{} wins!", name),
                (Outcome::Winner(player), None) => format!("{} wins!", player),
                (Outcome::Draw, _) => "It's a draw.".to_string(),
            };
            format!("{}\nScore: {}", headline, scoreboard)
        }
        GameEvent::AwaitingDecision { choices } => {
            let options: Vec<String> = choices.iter().map(ToString::to_string).collect();
            format!("What next? {}", options.join(" · "))
        }
        GameEvent::MatchOver { summary, winner } => {
            let headline = match (summary.result, winner) {
                (MatchResult::Winner(_), Some(name)) => format!("{} wins the match!", name),
                (MatchResult::Winner(player), None) => format!("{} wins the match!", player),
                (MatchResult::Tie, _) => "Match ended in a draw!".to_string(),
            };
            format!("\n{}\nFinal score: {}", headline, summary.scoreboard)
        }
        GameEvent::MatchReset => "\nScores cleared.".to_string(),
    }
}

/// Prints events to stdout until the orchestrator hangs up.
pub async fn run_renderer(mut event_rx: mpsc::UnboundedReceiver<GameEvent>) -> Result<()> {
    while let Some(event) = event_rx.recv().await {
        debug!(?event, "Rendering event");
        print_event(&event)?;
    }
    Ok(())
}

fn print_event(event: &GameEvent) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", render_event(event))?;
    stdout.flush()
}
