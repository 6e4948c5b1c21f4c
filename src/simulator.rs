// Move simulation for the search tree.
//
// Both functions are pure: the input snake or board is never touched and the caller
// gets an owned successor, so sibling search branches cannot see each other's moves.
// No bounds or collision checks happen here; callers only simulate moves that the
// safety filter has already accepted.

use crate::geometry::translate;
use crate::types::{Battlesnake, Board, Direction};

/// Health lost by a snake on every simulated move
pub const HEALTH_LOSS_PER_TURN: i32 = 1;

/// Successor of `snake` after moving one step in `direction`.
///
/// The whole body shifts uniformly and health drops by one. Food is not eaten and the
/// snake does not grow.
pub fn simulate(snake: &Battlesnake, direction: Direction) -> Battlesnake {
    let body: Vec<_> = snake
        .body
        .iter()
        .map(|&segment| translate(segment, direction))
        .collect();

    Battlesnake {
        head: translate(snake.head, direction),
        health: snake.health - HEALTH_LOSS_PER_TURN,
        body,
        ..snake.clone()
    }
}

/// Copy of `board` with the snake at `index` replaced by its simulated successor
pub fn simulate_on_board(board: &Board, index: usize, direction: Direction) -> Board {
    let mut next = board.clone();
    if let Some(snake) = next.snakes.get_mut(index) {
        *snake = simulate(&board.snakes[index], direction);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{board, snake};
    use crate::types::Coord;

    #[test]
    fn test_simulate_shifts_whole_body() {
        let s = snake("a", 50, &[(2, 2), (2, 1), (1, 1)]);
        let next = simulate(&s, Direction::Up);

        assert_eq!(
            next.body,
            vec![Coord::new(2, 3), Coord::new(2, 2), Coord::new(1, 2)]
        );
        assert_eq!(next.head, Coord::new(2, 3));
        assert_eq!(next.health, 49);
        assert_eq!(next.length, 3);
        assert_eq!(next.id, "a");
    }

    #[test]
    fn test_simulate_leaves_input_untouched() {
        let s = snake("a", 50, &[(2, 2), (2, 1)]);
        let before = s.clone();
        let _ = simulate(&s, Direction::Left);
        assert_eq!(s, before);
    }

    #[test]
    fn test_simulate_is_unconditional() {
        // Walking off the board is allowed here
        let s = snake("a", 1, &[(0, 0), (1, 0)]);
        let next = simulate(&s, Direction::Left);
        assert_eq!(next.head, Coord::new(-1, 0));
        assert_eq!(next.health, 0);
    }

    #[test]
    fn test_simulate_on_board_isolates_branches() {
        let b = board(
            7,
            7,
            &[(3, 3)],
            vec![
                snake("a", 80, &[(1, 1), (1, 0)]),
                snake("b", 80, &[(5, 5), (5, 6)]),
            ],
        );

        let left = simulate_on_board(&b, 0, Direction::Left);
        let right = simulate_on_board(&b, 0, Direction::Right);

        assert_eq!(left.snakes[0].head, Coord::new(0, 1));
        assert_eq!(right.snakes[0].head, Coord::new(2, 1));
        assert_eq!(b.snakes[0].head, Coord::new(1, 1));
        assert_eq!(left.snakes[1], b.snakes[1]);
        assert_eq!(left.food, b.food);
    }

    #[test]
    fn test_simulate_on_board_unknown_index_is_a_copy() {
        let b = board(5, 5, &[], vec![snake("a", 80, &[(1, 1)])]);
        assert_eq!(simulate_on_board(&b, 3, Direction::Up), b);
    }
}
