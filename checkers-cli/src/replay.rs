//! Replay command - apply a move list to a fresh game and show the result

use anyhow::{anyhow, Context, Result};
use clap::Args;

use checkers_core::{GameController, Move, Position};

#[derive(Args)]
pub struct ReplayArgs {
    /// Moves written as FROM-TO, e.g. 9-13 22-18
    #[arg(value_name = "MOVE")]
    pub moves: Vec<String>,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let mut game = GameController::new();

    for (ply, text) in args.moves.iter().enumerate() {
        let mv = parse_move(text)?;
        game.make_move(mv)
            .with_context(|| format!("Ply {} rejected", ply + 1))?;
    }

    let legal = game.get_possible_moves();
    let status = if !game.is_over() {
        "in progress".to_string()
    } else if let Some(winner) = game.get_winner() {
        format!("player {} wins", winner)
    } else {
        "drawn by move limit".to_string()
    };

    if args.json {
        let output = serde_json::json!({
            "moves": game.moves(),
            "turn": game.whose_turn().number(),
            "legal_moves": legal,
            "moves_since_last_capture": game.moves_since_last_capture(),
            "status": status,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Plies played:  {}", game.moves().len());
        println!("To move:       player {}", game.whose_turn());
        println!("Quiet plies:   {}", game.moves_since_last_capture());
        println!("Status:        {}", status);
        let legal: Vec<String> = legal.iter().map(Move::to_string).collect();
        println!("Legal moves:   {}", legal.join(" "));
    }

    Ok(())
}

/// Parse `FROM-TO` into a move
pub fn parse_move(text: &str) -> Result<Move> {
    let (from, to) = text
        .split_once('-')
        .ok_or_else(|| anyhow!("Expected FROM-TO, got {:?}", text))?;
    let from: Position = from
        .trim()
        .parse()
        .with_context(|| format!("Bad origin in {:?}", text))?;
    let to: Position = to
        .trim()
        .parse()
        .with_context(|| format!("Bad destination in {:?}", text))?;
    Ok(Move::new(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("9-13").unwrap(), Move::new(9, 13));
        assert_eq!(parse_move(" 22 - 18 ").unwrap(), Move::new(22, 18));
        assert!(parse_move("9x13").is_err());
        assert!(parse_move("a-13").is_err());
        assert!(parse_move("9-300").is_err());
    }
}
