//! Alternating turn invariant: players alternate from the starting player.

use super::Invariant;
use crate::Round;

/// Invariant: history alternates players, beginning with the round's
/// starting player, and an active round waits on the correct player.
pub struct AlternatingTurnInvariant;

impl Invariant<Round> for AlternatingTurnInvariant {
    fn holds(round: &Round) -> bool {
        let history = round.history();

        if let Some(first) = history.first()
            && first.player != round.starting()
        {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].player == pair[1].player) {
            return false;
        }

        if !round.is_active() {
            return true;
        }

        let expected_next = if history.len() % 2 == 0 {
            round.starting()
        } else {
            round.starting().opponent()
        };
        round.to_move() == expected_next
    }

    fn description() -> &'static str {
        "Players alternate turns from the starting player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Player, Position};

    #[test]
    fn test_alternating_sequence_holds() {
        let mut round = Round::new(Player::O);
        for pos in [Position::TopLeft, Position::Center, Position::TopRight] {
            round.apply_move(pos).unwrap();
        }
        assert!(AlternatingTurnInvariant::holds(&round));
        assert_eq!(round.to_move(), Player::X);
    }

    #[test]
    fn test_same_player_twice_violates() {
        let mut round = Round::new(Player::X);
        round.history.push(Move::new(Player::X, Position::TopLeft));
        round.history.push(Move::new(Player::X, Position::Center));
        assert!(!AlternatingTurnInvariant::holds(&round));
    }

    #[test]
    fn test_wrong_opener_violates() {
        let mut round = Round::new(Player::X);
        round.history.push(Move::new(Player::O, Position::TopLeft));
        assert!(!AlternatingTurnInvariant::holds(&round));
    }
}
