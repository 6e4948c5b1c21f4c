// Replay engine against recorded decision logs
//
// Fixtures only contain turns whose outcome does not depend on search tuning
// (forced moves and boards without food), so they survive heuristic changes.

use minimax_snake::bot::DecisionKind;
use minimax_snake::config::Config;
use minimax_snake::replay::ReplayEngine;
use minimax_snake::types::Direction;
use std::path::PathBuf;

/// Helper function to get the path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

fn engine() -> ReplayEngine {
    ReplayEngine::new(Config::default_hardcoded(), false)
}

#[test]
fn test_load_log_file() {
    let entries = engine()
        .load_log_file(fixture_path("decisions.jsonl"))
        .expect("Failed to load decisions.jsonl");

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].turn, 0);
    assert_eq!(entries[0].you_id, "us");
    assert_eq!(entries[1].chosen_move, "right");
    assert_eq!(entries[1].board.snakes.len(), 2);
    assert_eq!(
        entries[0].decision.map(|d| d.kind),
        Some(DecisionKind::OnlyMove)
    );
}

#[test]
fn test_malformed_line_reports_line_number() {
    let err = engine()
        .load_log_file(fixture_path("malformed.jsonl"))
        .unwrap_err();
    assert!(err.contains("line 2"), "unexpected error: {}", err);
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(engine()
        .load_log_file(fixture_path("does_not_exist.jsonl"))
        .is_err());
}

#[test]
fn test_replay_all_finds_the_mismatch() {
    let engine = engine();
    let entries = engine.load_log_file(fixture_path("decisions.jsonl")).unwrap();
    let results = engine.replay_all(&entries);

    assert_eq!(results.len(), 3);
    assert!(results[0].matches);
    assert_eq!(results[0].replayed_kind, DecisionKind::OnlyMove);

    // No food: the search has nothing to say and the first safe move wins
    assert!(!results[1].matches);
    assert_eq!(results[1].replayed_move, Direction::Up);
    assert_eq!(results[1].replayed_kind, DecisionKind::FirstSafe);

    assert!(results[2].matches);

    let stats = engine.generate_stats(&results);
    assert_eq!(stats.matches, 2);
    assert_eq!(stats.mismatches, 1);
}

#[test]
fn test_replay_selected_turns() {
    let engine = engine();
    let entries = engine.load_log_file(fixture_path("decisions.jsonl")).unwrap();

    let results = engine.replay_turns(&entries, &[2, 0]).unwrap();
    assert_eq!(results.iter().map(|r| r.turn).collect::<Vec<_>>(), vec![2, 0]);

    assert!(engine.replay_turns(&entries, &[42]).is_err());
}

#[test]
fn test_validate_logged_moves() {
    let engine = engine();
    let entries = engine.load_log_file(fixture_path("decisions.jsonl")).unwrap();

    assert!(engine
        .validate_expected_moves(
            &entries,
            &[(0, vec![Direction::Up]), (1, vec![Direction::Right, Direction::Up])]
        )
        .is_ok());
    assert!(engine
        .validate_expected_moves(&entries, &[(2, vec![Direction::Left])])
        .is_err());
}
