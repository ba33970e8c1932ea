//! Easy tier: uniform random play.

use crate::position::Position;
use crate::types::Board;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Picks an empty square uniformly at random.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    let empties: Vec<Position> = board.empty_positions().collect();
    empties.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_random_move_is_always_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        let board: Board = "XO. OX. ..O".parse().unwrap();
        for _ in 0..200 {
            let pos = random_move(&board, &mut rng).unwrap();
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_random_move_reaches_every_empty_square() {
        let mut rng = StdRng::seed_from_u64(1);
        let board: Board = "X.. ... ..O".parse().unwrap();
        let seen: HashSet<Position> = (0..500)
            .filter_map(|_| random_move(&board, &mut rng))
            .collect();
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_single_empty_square() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut board: Board = "XOX OXO OX.".parse().unwrap();
        assert_eq!(random_move(&board, &mut rng), Some(Position::BottomRight));
        board.place(Position::BottomRight, Player::X).unwrap();
        assert_eq!(random_move(&board, &mut rng), None);
    }
}
