//! Command-line interface for duel.

use clap::{Args, Parser, Subcommand};
use duel_tictactoe::{BestOf, Difficulty, MatchMode, Opponent, Player};
use std::path::PathBuf;

/// Duel - tic-tac-toe matches in the terminal
#[derive(Parser, Debug)]
#[command(name = "duel")]
#[command(about = "Play tic-tac-toe matches against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive match
    Play(PlayArgs),

    /// Pit two computer opponents against each other
    Simulate(SimulateArgs),
}

/// Options for an interactive match. Unset flags fall back to the
/// settings file, then to built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Settings file (defaults to duel.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Round boundaries: quick or endless
    #[arg(long)]
    pub mode: Option<MatchMode>,

    /// Opponent: computer or human
    #[arg(long)]
    pub opponent: Option<Opponent>,

    /// Computer strength: easy, medium or hard
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Your symbol: X or O
    #[arg(short, long)]
    pub symbol: Option<Player>,

    /// Match length; 0 or anything non-numeric plays until you stop
    #[arg(short, long)]
    pub best_of: Option<BestOf>,

    /// Your name
    #[arg(long)]
    pub name: Option<String>,

    /// Second player's name (human opponents only)
    #[arg(long)]
    pub opponent_name: Option<String>,

    /// Pause before each computer move, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

/// Options for computer-versus-computer simulation.
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Difficulty of the X engine
    #[arg(long = "x", default_value = "hard")]
    pub x: Difficulty,

    /// Difficulty of the O engine
    #[arg(long = "o", default_value = "hard")]
    pub o: Difficulty,

    /// Match length
    #[arg(short, long, default_value = "3")]
    pub best_of: BestOf,

    /// Number of matches to play
    #[arg(short, long, default_value = "10")]
    pub matches: u32,

    /// Rounds after which an undecided match is ended
    #[arg(long, default_value = "25")]
    pub max_rounds: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
