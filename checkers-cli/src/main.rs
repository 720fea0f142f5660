//! Checkers CLI - Command-line interface
//!
//! Commands:
//! - play: Random self-play games
//! - perft: Count move paths from the starting position
//! - replay: Apply a move list and show the resulting position

mod perft_cmd;
mod play;
mod replay;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "checkers")]
#[command(about = "Checkers rules engine")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play random legal games and report outcomes
    Play(play::PlayArgs),
    /// Count move paths per depth
    Perft(perft_cmd::PerftArgs),
    /// Apply moves to a new game and print the position
    Replay(replay::ReplayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Perft(args) => perft_cmd::run(args),
        Commands::Replay(args) => replay::run(args),
    }
}
