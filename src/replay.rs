// Replay module for analyzing historical game states and debugging decision-making
//
// Replays re-run the fixed-depth search (no deadline), so a replayed move depends only
// on the logged board and the configuration in use.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::{Bot, DecisionKind, MoveDecision};
use crate::config::Config;
use crate::types::{Board, Direction};

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub turn: i32,
    #[serde(default)]
    pub game_id: String,
    /// Missing in hand-written fixtures; the first snake on the board is assumed
    #[serde(default)]
    pub you_id: String,
    pub chosen_move: String,
    #[serde(default)]
    pub decision: Option<MoveDecision>,
    pub board: Board,
    #[serde(default)]
    pub timestamp: String,
}

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub replayed_kind: DecisionKind,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays the decision on a single board state
    /// Returns the decision and how long it took in milliseconds
    pub fn replay_turn(&self, board: &Board, our_snake_id: &str) -> Result<(MoveDecision, u128), String> {
        let our_snake = board
            .snakes
            .iter()
            .find(|s| s.id == our_snake_id)
            .ok_or_else(|| format!("Snake with id '{}' not found in board state", our_snake_id))?;

        let start_time = Instant::now();
        let decision = self.bot.choose_move(board, our_snake, None);

        Ok((decision, start_time.elapsed().as_millis()))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let our_snake_id = if entry.you_id.is_empty() {
            entry
                .board
                .snakes
                .first()
                .map(|s| s.id.clone())
                .ok_or("No snakes found in board state")?
        } else {
            entry.you_id.clone()
        };

        let original_move: Direction = entry.chosen_move.parse()?;
        let (decision, computation_time) = self.replay_turn(&entry.board, &our_snake_id)?;
        let matches = original_move == decision.direction;

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} ({:?}, time: {}ms)",
                    entry.turn, decision.direction, decision.kind, computation_time
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {}, Replayed: {} ({:?}, time: {}ms)",
                    entry.turn, original_move, decision.direction, decision.kind, computation_time
                );
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move: decision.direction,
            matches,
            replayed_kind: decision.kind,
            computation_time_ms: computation_time,
        })
    }

    /// Replays all entries in a log file, skipping turns that cannot be replayed
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(&self, entries: &[LogEntry], turn_numbers: &[i32]) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => warn!("Failed to replay turn {}: {}", turn_num, e),
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches: total_turns - matches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results.iter().map(|r| r.computation_time_ms as f64).sum::<f64>()
                / results.len() as f64;
            let searched = results
                .iter()
                .filter(|r| matches!(r.replayed_kind, DecisionKind::Searched { .. }))
                .count();

            println!("Searched Turns:             {}", searched);
            println!("Average Computation Time:   {:.1}ms\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} ({:?}, time: {}ms)",
                    result.turn,
                    result.original_move,
                    result.replayed_move,
                    result.replayed_kind,
                    result.computation_time_ms
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move: Direction = entry.chosen_move.parse()?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{board, snake};

    fn entry(turn: i32, chosen_move: &str, board: Board) -> LogEntry {
        LogEntry {
            turn,
            game_id: "g".to_string(),
            you_id: String::new(),
            chosen_move: chosen_move.to_string(),
            decision: None,
            board,
            timestamp: String::new(),
        }
    }

    fn cornered() -> Board {
        board(
            11,
            11,
            &[(5, 5)],
            vec![
                snake("us", 90, &[(0, 0), (1, 0), (2, 0)]),
                snake("them", 90, &[(8, 8), (8, 9)]),
            ],
        )
    }

    #[test]
    fn test_replay_entry_defaults_to_first_snake() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let result = engine.replay_entry(&entry(3, "up", cornered())).unwrap();
        assert!(result.matches);
        assert_eq!(result.replayed_kind, DecisionKind::OnlyMove);
    }

    #[test]
    fn test_replay_entry_reports_mismatch() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let result = engine.replay_entry(&entry(3, "down", cornered())).unwrap();
        assert!(!result.matches);
        assert_eq!(result.original_move, Direction::Down);
        assert_eq!(result.replayed_move, Direction::Up);
    }

    #[test]
    fn test_unknown_snake_id_is_an_error() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let mut e = entry(0, "up", cornered());
        e.you_id = "ghost".to_string();
        assert!(engine.replay_entry(&e).is_err());
    }

    #[test]
    fn test_bad_direction_is_an_error() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        assert!(engine.replay_entry(&entry(0, "none", cornered())).is_err());
    }

    #[test]
    fn test_stats_match_rate() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let results = engine.replay_all(&[
            entry(0, "up", cornered()),
            entry(1, "down", cornered()),
            entry(2, "bogus", cornered()),
        ]);
        let stats = engine.generate_stats(&results);
        assert_eq!(stats.total_turns, 2);
        assert_eq!(stats.matches, 1);
        assert_eq!(stats.mismatches, 1);
        assert_eq!(stats.match_rate, 50.0);
    }

    #[test]
    fn test_validate_expected_moves() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let entries = vec![entry(0, "up", cornered()), entry(1, "left", cornered())];

        assert!(engine
            .validate_expected_moves(&entries, &[(0, vec![Direction::Up])])
            .is_ok());
        assert!(engine
            .validate_expected_moves(&entries, &[(1, vec![Direction::Up, Direction::Down])])
            .is_err());
        assert!(engine
            .validate_expected_moves(&entries, &[(9, vec![Direction::Up])])
            .is_err());
    }
}
