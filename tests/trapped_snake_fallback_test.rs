// Integration test for trapped snake fallback behavior
//
// When no direction is safe the bot still has to answer with a move. It picks one at
// random, but never one that leaves the board when an on-board direction exists.

use minimax_snake::bot::Bot;
use minimax_snake::config::Config;
use minimax_snake::types::{Battlesnake, Board, Coord, Game};

fn game() -> Game {
    Game {
        id: "test-game".to_string(),
        ruleset: Default::default(),
        timeout: 500,
        source: "test".to_string(),
    }
}

fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord { x, y }).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 50,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

async fn moves_over_many_turns(board: &Board, you: &Battlesnake) -> Vec<String> {
    let bot = Bot::new(Config::default_hardcoded());
    let mut moves = Vec::new();
    for turn in 0..25 {
        let response = bot.get_move(&game(), &turn, board, you).await;
        moves.push(response["move"].as_str().unwrap().to_string());
    }
    moves
}

/// Snake at top wall (y=10), left blocked by its own body, right by an opponent
#[tokio::test]
async fn test_trapped_at_top_wall_never_chooses_up() {
    let board = Board {
        height: 11,
        width: 11,
        food: vec![Coord { x: 0, y: 0 }],
        snakes: vec![
            snake("our-snake", &[(5, 10), (5, 9), (4, 9), (4, 10), (3, 10)]),
            snake("opponent", &[(6, 10), (6, 9), (6, 8)]),
        ],
        hazards: vec![],
    };
    let you = board.snakes[0].clone();

    for chosen in moves_over_many_turns(&board, &you).await {
        assert_ne!(chosen, "up", "Bot should not choose 'up' at the top wall");
    }
}

/// Snake in the bottom-left corner wrapped by its own body: only up and right are on the board
#[tokio::test]
async fn test_trapped_in_corner_stays_on_board() {
    let board = Board {
        height: 11,
        width: 11,
        food: vec![Coord { x: 9, y: 9 }],
        snakes: vec![snake(
            "our-snake",
            &[(0, 0), (0, 1), (1, 1), (1, 0), (2, 0)],
        )],
        hazards: vec![],
    };
    let you = board.snakes[0].clone();

    for chosen in moves_over_many_turns(&board, &you).await {
        assert!(
            chosen == "up" || chosen == "right",
            "Expected an on-board direction, got {}",
            chosen
        );
    }
}

/// Snake at the right wall, boxed in by an opponent on every open side
#[tokio::test]
async fn test_trapped_at_right_wall_avoids_right() {
    let board = Board {
        height: 11,
        width: 11,
        food: vec![Coord { x: 0, y: 0 }],
        snakes: vec![
            snake("our-snake", &[(10, 5), (9, 5), (8, 5)]),
            snake("opponent", &[(10, 4), (9, 4), (9, 3)]),
            snake("third", &[(10, 6), (9, 6), (9, 7)]),
        ],
        hazards: vec![],
    };
    let you = board.snakes[0].clone();

    for chosen in moves_over_many_turns(&board, &you).await {
        assert_ne!(chosen, "right", "Bot should not choose 'right' at x=10");
    }
}
