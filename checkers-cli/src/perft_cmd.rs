//! Perft command - count move paths from the starting position

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;

use checkers_core::{Board, BoardConfig};

#[derive(Args)]
pub struct PerftArgs {
    /// Deepest ply to count
    #[arg(long, default_value = "6")]
    pub depth: u32,

    /// Split root moves across threads
    #[arg(long)]
    pub parallel: bool,

    /// Board configuration JSON file (standard board if omitted)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: PerftArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => BoardConfig::load(path)
            .with_context(|| format!("Failed to load board config: {}", path.display()))?,
        None => BoardConfig::default(),
    };
    let board = Board::with_config(&config)?;

    tracing::info!(
        "Counting move paths to depth {} ({})",
        args.depth,
        if args.parallel { "parallel" } else { "sequential" }
    );

    println!("{:>5} {:>14} {:>10}", "depth", "nodes", "ms");
    for depth in 1..=args.depth {
        let start = Instant::now();
        let nodes = if args.parallel {
            board.perft_parallel(depth)
        } else {
            board.perft(depth)
        };
        println!("{:>5} {:>14} {:>10}", depth, nodes, start.elapsed().as_millis());
    }

    Ok(())
}
