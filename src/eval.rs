// Static board evaluation.
//
// Scores are only ever compared against other scores from the same search, so the
// absolute scale carries no meaning. Every weight comes from `HeuristicConfig`.

use crate::config::HeuristicConfig;
use crate::geometry::manhattan_distance;
use crate::safety::safe_moves;
use crate::types::{Board, Direction};

/// Individual heuristic terms for one snake, kept apart for logging and tuning
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub mobility: f64,
    pub hunger: f64,
    pub food_proximity: f64,
    pub length_advantage: f64,
    pub size: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.mobility + self.hunger + self.food_proximity + self.length_advantage + self.size
    }
}

/// Score of `board` from the point of view of the snake at `acting_index`.
/// Higher is better for that snake.
pub fn evaluate(
    board: &Board,
    acting_index: usize,
    opponent_index: usize,
    heuristics: &HeuristicConfig,
) -> f64 {
    score_breakdown(board, acting_index, opponent_index, heuristics).total()
}

/// Per-term version of [`evaluate`].
///
/// An `acting_index` that is not on the board scores as fully trapped. An
/// `opponent_index` that is not on the board contributes no length advantage.
pub fn score_breakdown(
    board: &Board,
    acting_index: usize,
    opponent_index: usize,
    heuristics: &HeuristicConfig,
) -> ScoreBreakdown {
    let Some(snake) = board.snakes.get(acting_index) else {
        return ScoreBreakdown {
            mobility: heuristics.trapped_penalty,
            ..ScoreBreakdown::default()
        };
    };

    let safe_count = safe_moves(&Direction::all(), &snake.body, board).len();
    let length = snake.body.len() as i32;

    let opponent_length = board
        .snakes
        .get(opponent_index)
        .filter(|_| opponent_index != acting_index)
        .map(|s| s.body.len() as i32);

    ScoreBreakdown {
        mobility: heuristics.mobility_penalty(safe_count),
        hunger: hunger_term(snake.health, heuristics),
        food_proximity: food_term(board, acting_index, heuristics),
        length_advantage: opponent_length
            .map(|other| length_advantage_term(length, other, heuristics))
            .unwrap_or(0.0),
        size: heuristics.size_weight * length as f64,
    }
}

/// -(threshold - health) once health drops under the threshold
pub fn hunger_term(health: i32, heuristics: &HeuristicConfig) -> f64 {
    if health < heuristics.hunger_threshold {
        -((heuristics.hunger_threshold - health) as f64)
    } else {
        0.0
    }
}

/// Small reward for having the nearest food within `food_radius`
pub fn food_term(board: &Board, acting_index: usize, heuristics: &HeuristicConfig) -> f64 {
    let Some(head) = board
        .snakes
        .get(acting_index)
        .and_then(|s| s.body.first().copied())
    else {
        return 0.0;
    };

    match board.food.iter().map(|&f| manhattan_distance(head, f)).min() {
        Some(distance) if distance <= heuristics.food_radius => {
            (heuristics.food_radius + 1 - distance) as f64
        }
        _ => 0.0,
    }
}

/// Reward for being strictly longer than the opponent
pub fn length_advantage_term(length: i32, opponent_length: i32, heuristics: &HeuristicConfig) -> f64 {
    if length > opponent_length {
        heuristics.length_advantage_weight * (length - opponent_length) as f64
    } else {
        0.0
    }
}
