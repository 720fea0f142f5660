//! Play command - random self-play games
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_config(), play_match(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use checkers_core::{BoardConfig, GameController, Move, Player};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Safety cap on plies per game
    #[arg(long, default_value = "2000")]
    pub max_plies: usize,

    /// Board configuration JSON file (standard board if omitted)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// How a single game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Won(Player),
    /// Move limit reached without a winner
    Drawn,
    /// Stopped by the ply cap
    Unfinished,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub game_number: usize,
    pub outcome: Outcome,
    pub plies: usize,
    pub captures: usize,
    pub moves: Vec<Move>,
}

/// Aggregated match results
#[derive(Clone, Debug, Serialize)]
pub struct MatchResults {
    pub games: Vec<GameRecord>,
    pub player_one_wins: usize,
    pub player_two_wins: usize,
    pub draws: usize,
    pub unfinished: usize,
    pub avg_plies: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = load_config(&args)?;

    tracing::info!(
        "Starting {} random games on a {}x{} board (draw after {} quiet plies)",
        args.games,
        config.width,
        config.height,
        config.noncapture_move_limit
    );

    let results = play_match(&config, &args, seed)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_config(args: &PlayArgs) -> Result<BoardConfig> {
    match &args.config {
        Some(path) => BoardConfig::load(path)
            .with_context(|| format!("Failed to load board config: {}", path.display())),
        None => Ok(BoardConfig::default()),
    }
}

/// Play all games of the match
pub fn play_match(config: &BoardConfig, args: &PlayArgs, seed: Option<u64>) -> Result<MatchResults> {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        let record = play_single_game(config, game_num + 1, args.max_plies, &mut rng)?;

        tracing::info!(
            "Game {}: {:?} ({} plies, {} captures)",
            record.game_number,
            record.outcome,
            record.plies,
            record.captures
        );

        games.push(record);
    }

    Ok(compute_match_statistics(games))
}

fn report_results(results: &MatchResults, args: &PlayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game choosing uniformly among legal moves
pub fn play_single_game(
    config: &BoardConfig,
    game_number: usize,
    max_plies: usize,
    rng: &mut ChaCha8Rng,
) -> Result<GameRecord> {
    let mut game = GameController::with_config(config)?;
    let mut captures = 0;

    while !game.is_over() && game.moves().len() < max_plies {
        let moves = game.get_possible_moves();
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        game.make_move(mv)?;
        if game.board().previous_move_was_capture() {
            captures += 1;
        }
    }

    let outcome = match game.get_winner() {
        Some(player) => Outcome::Won(player),
        None if game.move_limit_reached() => Outcome::Drawn,
        None => Outcome::Unfinished,
    };

    Ok(GameRecord {
        game_number,
        outcome,
        plies: game.moves().len(),
        captures,
        moves: game.moves().to_vec(),
    })
}

fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let count = |outcome: Outcome| games.iter().filter(|g| g.outcome == outcome).count();
    let player_one_wins = count(Outcome::Won(Player::One));
    let player_two_wins = count(Outcome::Won(Player::Two));
    let draws = count(Outcome::Drawn);
    let unfinished = count(Outcome::Unfinished);

    let total_plies: usize = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    MatchResults {
        games,
        player_one_wins,
        player_two_wins,
        draws,
        unfinished,
        avg_plies,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn print_json_results(results: &MatchResults) {
    match serde_json::to_string_pretty(results) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("Failed to serialize results: {}", e),
    }
}

fn print_text_results(results: &MatchResults) {
    let total = results.games.len();
    let percent = |n: usize| {
        if total > 0 {
            n as f32 / total as f32 * 100.0
        } else {
            0.0
        }
    };

    println!("\n=== Match Results ===");
    println!("Total games:     {}", total);
    println!(
        "Player 1 wins:   {} ({:.1}%)",
        results.player_one_wins,
        percent(results.player_one_wins)
    );
    println!(
        "Player 2 wins:   {} ({:.1}%)",
        results.player_two_wins,
        percent(results.player_two_wins)
    );
    println!("Draws:           {} ({:.1}%)", results.draws, percent(results.draws));
    if results.unfinished > 0 {
        println!("Unfinished:      {}", results.unfinished);
    }
    println!("Average plies:   {:.1}", results.avg_plies);
}
