//! Medium tier: win if possible, otherwise block, otherwise random.

use super::random::random_move;
use crate::position::Position;
use crate::rules::has_won;
use crate::types::{Board, Player};
use rand::Rng;

/// Returns the first empty square (index order) that completes a line for `player`.
pub fn winning_move(board: &Board, player: Player) -> Option<Position> {
    board
        .empty_positions()
        .find(|&pos| has_won(&board.with(pos, player), player))
}

/// One-ply heuristic for `ai`: win, then block, then random.
pub fn heuristic_move<R: Rng + ?Sized>(board: &Board, ai: Player, rng: &mut R) -> Option<Position> {
    winning_move(board, ai)
        .or_else(|| winning_move(board, ai.opponent()))
        .or_else(|| random_move(board, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::check_winner;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    /// Collects every position reachable from `board` with `to_move` due,
    /// stopping at won or full boards.
    fn collect_reachable(board: Board, to_move: Player, seen: &mut HashSet<(Board, Player)>) {
        if check_winner(&board).is_some() || board.is_full() || !seen.insert((board, to_move)) {
            return;
        }
        for pos in board.empty_positions() {
            collect_reachable(board.with(pos, to_move), to_move.opponent(), seen);
        }
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut rng = StdRng::seed_from_u64(0);
        // O can win on the middle row and must not settle for blocking X.
        let board: Board = "XX. OO. X..".parse().unwrap();
        for _ in 0..20 {
            assert_eq!(
                heuristic_move(&board, Player::O, &mut rng),
                Some(Position::MiddleRight)
            );
        }
    }

    #[test]
    fn test_blocks_opponent_win() {
        let mut rng = StdRng::seed_from_u64(0);
        let board: Board = "XX. .O. ...".parse().unwrap();
        for _ in 0..20 {
            assert_eq!(
                heuristic_move(&board, Player::O, &mut rng),
                Some(Position::TopRight)
            );
        }
    }

    #[test]
    fn test_first_win_in_index_order() {
        // X has two winning squares: 2 (top row) and 6 (left column).
        let board: Board = "XX. XO. .O.".parse().unwrap();
        assert_eq!(winning_move(&board, Player::X), Some(Position::TopRight));
    }

    #[test]
    fn test_falls_back_to_random_empty_square() {
        let mut rng = StdRng::seed_from_u64(5);
        let board: Board = "X.. ... ...".parse().unwrap();
        for _ in 0..50 {
            let pos = heuristic_move(&board, Player::O, &mut rng).unwrap();
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_every_reachable_position_wins_then_blocks() {
        let mut seen = HashSet::new();
        collect_reachable(Board::new(), Player::X, &mut seen);
        collect_reachable(Board::new(), Player::O, &mut seen);
        assert!(!seen.is_empty());

        let mut rng = StdRng::seed_from_u64(11);
        for (board, ai) in seen {
            let choice = heuristic_move(&board, ai, &mut rng).unwrap();
            assert!(board.is_empty(choice), "{} on occupied square", ai);

            if let Some(win) = winning_move(&board, ai) {
                assert_eq!(choice, win, "missed win for {}:\n{}", ai, board.display());
                assert!(has_won(&board.with(choice, ai), ai));
            } else if let Some(block) = winning_move(&board, ai.opponent()) {
                assert_eq!(choice, block, "missed block for {}:\n{}", ai, board.display());
                let threat = ai.opponent();
                assert!(has_won(&board.with(choice, threat), threat));
            }
        }
    }
}
