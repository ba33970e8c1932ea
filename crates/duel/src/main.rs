//! Duel - tic-tac-toe in the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use duel::cli::{Cli, Command, PlayArgs, SimulateArgs};
use duel::players::{seat, spawn_stdin_reader};
use duel::{MatchSettings, Orchestrator, SimulationConfig, simulate, ui};
use duel_tictactoe::GameSession;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    match cli.command {
        Command::Play(args) => run_play(args).await,
        Command::Simulate(args) => run_simulate(args),
    }
}

/// Logs go to stderr, or to `log_file` so they don't interleave with play.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("info,duel=debug,duel_tictactoe=debug")),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Run an interactive match
#[instrument(skip(args))]
async fn run_play(args: PlayArgs) -> Result<()> {
    let settings = MatchSettings::load(args.config.as_deref())
        .context("Failed to load settings")?
        .with_overrides(&args);
    let config = settings.session_config();
    info!(?config, "Starting interactive match");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let renderer = tokio::spawn(ui::run_renderer(event_rx));

    let (player_x, player_o) = seat(&config, settings.computer_delay(), spawn_stdin_reader());
    let mut orchestrator =
        Orchestrator::new(GameSession::start_match(config), player_x, player_o, event_tx);
    let summary = orchestrator.run().await?;
    drop(orchestrator);

    renderer.await.context("Renderer task failed")??;
    if let Some(summary) = summary {
        info!(%summary, "Match finished");
    }
    Ok(())
}

/// Run computer-versus-computer matches
#[instrument(skip(args))]
fn run_simulate(args: SimulateArgs) -> Result<()> {
    let config = SimulationConfig {
        x: args.x,
        o: args.o,
        best_of: args.best_of,
        matches: args.matches,
        max_rounds: args.max_rounds.max(1),
        seed: args.seed,
    };
    let report = simulate(&config)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        println!("X ({}) vs O ({}), {}", config.x, config.o, config.best_of);
        println!("{}", report);
    }
    Ok(())
}
