// Coordinate arithmetic shared by the simulator, safety filter and evaluator.
//
// "up" increases y, matching the game server's coordinate system with (0, 0) in the
// bottom-left corner.

use crate::types::{Coord, Direction};

/// Coordinate reached by stepping once from `coord` in `direction`
pub fn translate(coord: Coord, direction: Direction) -> Coord {
    match direction {
        Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
        Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
        Direction::Left => Coord { x: coord.x - 1, y: coord.y },
        Direction::Right => Coord { x: coord.x + 1, y: coord.y },
    }
}

/// True iff `coord` lies inside a `width` x `height` board
pub fn in_bounds(coord: Coord, width: i32, height: i32) -> bool {
    coord.x >= 0 && coord.x < width && coord.y >= 0 && coord.y < height
}

/// Taxicab distance between two coordinates
pub fn manhattan_distance(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
