// Immediate-death filter.
//
// A direction is safe when the head it produces stays on the board and does not land
// on any snake's body, tails excluded. Tails vacate as their snake moves, except when
// another segment of the same snake is stacked on that cell (a freshly fed or just
// spawned snake), which `body[..len - 1]` already covers.

use crate::geometry::{in_bounds, translate};
use crate::types::{Board, Coord, Direction};

/// The subset of `candidates` that does not kill the snake with `body` this turn,
/// in the caller's order
pub fn safe_moves(candidates: &[Direction], body: &[Coord], board: &Board) -> Vec<Direction> {
    let Some(&head) = body.first() else {
        return vec![];
    };

    candidates
        .iter()
        .copied()
        .filter(|&dir| is_safe_target(translate(head, dir), board))
        .collect()
}

/// True iff a head arriving at `target` survives the turn
pub fn is_safe_target(target: Coord, board: &Board) -> bool {
    in_bounds(target, board.width, board.height) && !hits_body(target, board)
}

fn hits_body(target: Coord, board: &Board) -> bool {
    board.snakes.iter().any(|snake| {
        let without_tail = snake.body.len().saturating_sub(1);
        snake.body[..without_tail].contains(&target)
    })
}
