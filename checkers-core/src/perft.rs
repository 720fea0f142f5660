//! Move path counting for move generation testing
//!
//! `perft(depth)` counts the distinct move sequences of length `depth` from a
//! board. Each jump of a capture chain is one ply. With the `parallel`
//! feature, root moves are spread across a rayon pool; every worker extends
//! its own cloned boards, so no state is shared between threads.

use crate::board::Board;

impl Board {
    /// Count leaf nodes `depth` plies below this board
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.get_possible_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        moves
            .into_iter()
            .map(|mv| self.create_new_board_from_move(mv).perft(depth - 1))
            .sum()
    }

    /// Same count as [`Board::perft`], split across threads at the root
    #[cfg(feature = "parallel")]
    pub fn perft_parallel(&self, depth: u32) -> u64 {
        use rayon::prelude::*;

        if depth <= 1 {
            return self.perft(depth);
        }

        self.get_possible_moves()
            .par_iter()
            .map(|&mv| self.create_new_board_from_move(mv).perft(depth - 1))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoardConfig, PieceSetup};
    use crate::piece::Player;

    #[test]
    fn test_perft_start_position() {
        let board = Board::new();
        assert_eq!(board.perft(0), 1);
        assert_eq!(board.perft(1), 7);
        assert_eq!(board.perft(2), 49);
    }

    #[test]
    fn test_perft_counts_each_jump() {
        // Double jump 9x18x27: two plies by the same side
        let board = Board::from_pieces(
            &BoardConfig::default(),
            Player::One,
            &[
                PieceSetup::man(Player::One, 9),
                PieceSetup::man(Player::Two, 14),
                PieceSetup::man(Player::Two, 23),
            ],
        )
        .unwrap();
        assert_eq!(board.perft(1), 1);
        assert_eq!(board.perft(2), 1);
        // Player two has no pieces left after the chain
        assert_eq!(board.perft(3), 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let board = Board::new();
        for depth in 0..=4 {
            assert_eq!(board.perft_parallel(depth), board.perft(depth));
        }
    }
}
