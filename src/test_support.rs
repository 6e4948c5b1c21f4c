// Board builders shared by the unit tests

use crate::types::{Battlesnake, Board, Coord};

pub fn snake(id: &str, health: i32, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

pub fn board(width: i32, height: i32, food: &[(i32, i32)], snakes: Vec<Battlesnake>) -> Board {
    Board {
        width,
        height,
        food: food.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
        snakes,
        hazards: vec![],
    }
}
