//! Playing-strength checks for the computer opponent.

use duel_tictactoe::engine::{best_move, random_move};
use duel_tictactoe::{
    Board, Difficulty, MoveEngine, Outcome, Player, Position, Round, RoundOutcome,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Walks every line of play where `hard` answers with minimax and the
/// other side tries every empty square. Returns the number of finished games.
fn explore(round: &Round, hard: Player, losses: &mut Vec<Board>) -> usize {
    match round.outcome() {
        RoundOutcome::Won(winner) if winner != hard => {
            losses.push(*round.board());
            return 1;
        }
        RoundOutcome::Won(_) | RoundOutcome::Draw => return 1,
        RoundOutcome::Ongoing => {}
    }

    if round.to_move() == hard {
        let position = best_move(round.board(), hard).expect("ongoing round has a move");
        let mut next = round.clone();
        next.apply_move(position).unwrap();
        explore(&next, hard, losses)
    } else {
        round
            .valid_moves()
            .into_iter()
            .map(|position| {
                let mut next = round.clone();
                next.apply_move(position).unwrap();
                explore(&next, hard, losses)
            })
            .sum()
    }
}

#[test]
fn test_hard_never_loses_as_x() {
    let mut losses = Vec::new();
    let games = explore(&Round::new(Player::X), Player::X, &mut losses);
    assert!(games > 0);
    assert!(losses.is_empty(), "hard X lost on {:?}", losses);
}

#[test]
fn test_hard_never_loses_as_o() {
    let mut losses = Vec::new();
    let games = explore(&Round::new(Player::X), Player::O, &mut losses);
    assert!(games > 0);
    assert!(losses.is_empty(), "hard O lost on {:?}", losses);
}

#[test]
fn test_hard_never_loses_when_opening_second_round() {
    let mut losses = Vec::new();
    explore(&Round::new(Player::O), Player::O, &mut losses);
    explore(&Round::new(Player::O), Player::X, &mut losses);
    assert!(losses.is_empty());
}

fn play_out(
    x: &mut MoveEngine,
    o: &mut MoveEngine,
    starting: Player,
) -> Option<Outcome> {
    let mut round = Round::new(starting);
    loop {
        let engine = match round.to_move() {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };
        let position = engine.choose_move(round.board(), round.to_move())?;
        if let Some(outcome) = round.apply_move(position).unwrap().finished() {
            return Some(outcome);
        }
    }
}

#[test]
fn test_hard_against_hard_always_draws() {
    let mut x = MoveEngine::seeded(Difficulty::Hard, 1);
    let mut o = MoveEngine::seeded(Difficulty::Hard, 2);
    for starting in [Player::X, Player::O] {
        assert_eq!(play_out(&mut x, &mut o, starting), Some(Outcome::Draw));
    }
}

#[test]
fn test_hard_beats_or_draws_easy() {
    let mut hard = MoveEngine::seeded(Difficulty::Hard, 11);
    let mut easy = MoveEngine::seeded(Difficulty::Easy, 12);
    for game in 0..50 {
        let starting = if game % 2 == 0 { Player::X } else { Player::O };
        let outcome = play_out(&mut hard, &mut easy, starting);
        assert_ne!(outcome, Some(Outcome::Winner(Player::O)));
    }
}

#[test]
fn test_medium_outplays_easy() {
    let mut medium = MoveEngine::seeded(Difficulty::Medium, 21);
    let mut easy = MoveEngine::seeded(Difficulty::Easy, 22);
    let (mut wins, mut losses) = (0, 0);
    for game in 0..200 {
        let starting = if game % 2 == 0 { Player::X } else { Player::O };
        match play_out(&mut medium, &mut easy, starting) {
            Some(Outcome::Winner(Player::X)) => wins += 1,
            Some(Outcome::Winner(Player::O)) => losses += 1,
            _ => {}
        }
    }
    assert!(wins > losses * 2, "medium won {wins}, lost {losses}");
}

#[test]
fn test_random_move_only_picks_empty_squares() {
    let board: Board = "XOX .O. X.O".parse().unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let choice = random_move(&board, &mut rng).unwrap();
        assert!(matches!(
            choice,
            Position::MiddleLeft | Position::MiddleRight | Position::BottomCenter
        ));
    }
}
