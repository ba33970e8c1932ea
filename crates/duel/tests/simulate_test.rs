//! Computer-versus-computer simulation.

use duel::{SimulationConfig, simulate};
use duel_tictactoe::{BestOf, Difficulty};

fn config(x: Difficulty, o: Difficulty, matches: u32) -> SimulationConfig {
    SimulationConfig {
        x,
        o,
        best_of: BestOf::Rounds(3),
        matches,
        max_rounds: 10,
        seed: Some(2024),
    }
}

#[test]
fn test_hard_mirror_never_produces_a_winner() {
    let mirror = SimulationConfig {
        max_rounds: 4,
        ..config(Difficulty::Hard, Difficulty::Hard, 3)
    };
    let report = simulate(&mirror).unwrap();
    assert_eq!(*report.matches(), 3);
    assert_eq!(*report.tied_matches(), 3);
    assert_eq!(*report.cut_short(), 3);
    assert_eq!(*report.draws(), 12);
    assert_eq!(*report.x_round_wins() + *report.o_round_wins(), 0);
}

#[test]
fn test_hard_never_loses_a_match_to_easy() {
    let report = simulate(&config(Difficulty::Hard, Difficulty::Easy, 20)).unwrap();
    assert_eq!(*report.matches(), 20);
    assert_eq!(*report.o_match_wins(), 0);
    assert_eq!(*report.o_round_wins(), 0);
}

#[test]
fn test_seeded_runs_repeat() {
    let first = simulate(&config(Difficulty::Medium, Difficulty::Easy, 15)).unwrap();
    let second = simulate(&config(Difficulty::Medium, Difficulty::Easy, 15)).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        *first.rounds(),
        *first.x_round_wins() + *first.o_round_wins() + *first.draws()
    );
}

#[test]
fn test_report_serializes_to_json() {
    let report = simulate(&config(Difficulty::Easy, Difficulty::Easy, 2)).unwrap();
    let value = serde_json::to_value(report).unwrap();
    assert_eq!(value["matches"], 2);
}
