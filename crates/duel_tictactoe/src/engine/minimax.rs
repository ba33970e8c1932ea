//! Hard tier: exhaustive minimax.
//!
//! Terminal boards score +10 for an `ai` win, -10 for an opponent win and 0
//! for a draw. Scores carry no depth discount, so equally winning lines are
//! not ranked by length; ties go to the first square in index order.
//! Each branch searches its own copy of the board.

use crate::position::Position;
use crate::rules::has_won;
use crate::types::{Board, Player};
use tracing::instrument;

/// Score of a board won by the searching player.
pub const WIN_SCORE: i32 = 10;

/// Score of a board won by the searching player's opponent.
pub const LOSS_SCORE: i32 = -WIN_SCORE;

#[derive(Debug, Clone, Copy)]
struct Scored {
    position: Option<Position>,
    score: i32,
}

/// Returns the minimax-optimal square for `ai`, or `None` on a finished board.
#[instrument(skip(board))]
pub fn best_move(board: &Board, ai: Player) -> Option<Position> {
    search(board, ai, ai).position
}

/// Game-theoretic value of `board` for `ai` with `to_move` to play.
pub fn evaluate(board: &Board, to_move: Player, ai: Player) -> i32 {
    search(board, to_move, ai).score
}

fn terminal_score(board: &Board, ai: Player) -> Option<i32> {
    if has_won(board, ai) {
        Some(WIN_SCORE)
    } else if has_won(board, ai.opponent()) {
        Some(LOSS_SCORE)
    } else if board.is_full() {
        Some(0)
    } else {
        None
    }
}

fn search(board: &Board, to_move: Player, ai: Player) -> Scored {
    if let Some(score) = terminal_score(board, ai) {
        return Scored {
            position: None,
            score,
        };
    }

    let maximizing = to_move == ai;
    let mut best: Option<Scored> = None;

    for pos in board.empty_positions() {
        let score = search(&board.with(pos, to_move), to_move.opponent(), ai).score;
        let improves = match best {
            None => true,
            Some(current) if maximizing => score > current.score,
            Some(current) => score < current.score,
        };
        if improves {
            best = Some(Scored {
                position: Some(pos),
                score,
            });
        }
    }

    // Non-terminal boards always have an empty square.
    best.unwrap_or(Scored {
        position: None,
        score: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: &str) -> Board {
        cells.parse().unwrap()
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        assert_eq!(evaluate(&Board::new(), Player::X, Player::X), 0);
    }

    #[test]
    fn test_empty_board_opens_top_left() {
        // Every opening draws, so the first square in index order wins the tie.
        assert_eq!(best_move(&Board::new(), Player::X), Some(Position::TopLeft));
    }

    #[test]
    fn test_takes_win_over_block() {
        let board = board("XX. .O. ..O");
        assert_eq!(best_move(&board, Player::X), Some(Position::TopRight));
    }

    #[test]
    fn test_blocks_column_threat() {
        let board = board("X.. XO. ...");
        assert_eq!(best_move(&board, Player::O), Some(Position::BottomLeft));
    }

    #[test]
    fn test_answers_corner_with_center() {
        // Any reply other than the center loses against a corner opening.
        let board = board("X.. ... ...");
        assert_eq!(best_move(&board, Player::O), Some(Position::Center));
        assert_eq!(evaluate(&board, Player::O, Player::O), 0);
    }

    #[test]
    fn test_terminal_boards_score_without_moves() {
        assert_eq!(best_move(&board("XXX OO. ..."), Player::O), None);
        assert_eq!(evaluate(&board("XXX OO. ..."), Player::O, Player::X), WIN_SCORE);
        assert_eq!(evaluate(&board("XXX OO. ..."), Player::O, Player::O), LOSS_SCORE);
        assert_eq!(evaluate(&board("XOX XOO OXX"), Player::X, Player::X), 0);
    }

    #[test]
    fn test_no_depth_discount_prefers_index_order() {
        // X wins at once on 8, but 3 forks (5, 6 and 8) and wins a move later.
        // Both score WIN_SCORE, so the lower index is kept.
        let board = board("XOO .X. ...");
        assert_eq!(
            crate::engine::winning_move(&board, Player::X),
            Some(Position::BottomRight)
        );
        assert_eq!(best_move(&board, Player::X), Some(Position::MiddleLeft));
    }
}
