// Turn orchestration: safety filter first, minimax only when there is a real choice.
//
// Every call works on its own copy of the snapshot it was handed. Nothing is carried
// from one turn to the next, so concurrent games need no locking.

use log::{debug, error, info, warn};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::geometry::{in_bounds, translate};
use crate::safety::safe_moves;
use crate::search::{iterative_deepening, minimax, Roles};
use crate::types::{Battlesnake, Board, Direction, Game};

/// How a move was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionKind {
    /// No direction survives; picked at random among in-bounds directions
    Trapped,
    /// Exactly one safe direction
    OnlyMove,
    /// Chosen by minimax at the given depth
    Searched { score: f64, depth: u8 },
    /// Several safe directions but the search produced no move
    FirstSafe,
}

/// A chosen direction plus the reason it was chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveDecision {
    pub direction: Direction,
    pub kind: DecisionKind,
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with debug logging disabled
    pub fn new(config: Config) -> Self {
        Self::with_debug_logger(config, DebugLogger::disabled())
    }

    /// Creates a new Bot that records every decision through `debug_logger`
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": "minimax-snake",
            "color": "#9ebbba",
            "head": "silly",
            "tail": "hook",
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, board: &Board, _you: &Battlesnake) {
        info!(
            "GAME START {} ({}x{}, {} snakes)",
            game.id,
            board.width,
            board.height,
            board.snakes.len()
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, board: &Board, _you: &Battlesnake) {
        match board.snakes.first() {
            Some(winner) if board.snakes.len() == 1 => {
                info!("GAME OVER {} on turn {}: winner is {}", game.id, turn, winner.name)
            }
            _ => info!("GAME OVER {} on turn {}: draw", game.id, turn),
        }
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The decision runs on a blocking task so a deep search never stalls the async
    /// runtime. The search itself watches the deadline derived from the timing config.
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub async fn get_move(&self, game: &Game, turn: &i32, board: &Board, you: &Battlesnake) -> Value {
        let start_time = Instant::now();
        let deadline =
            start_time + Duration::from_millis(self.config.timing.effective_budget_ms());

        let task_board = board.clone();
        let task_you = you.clone();
        let config = self.config.clone();

        let decision = match tokio::task::spawn_blocking(move || {
            Bot::decide(&config, &task_board, &task_you, Some(deadline))
        })
        .await
        {
            Ok(decision) => decision,
            Err(e) => {
                error!("Turn {}: move computation failed: {}", turn, e);
                Self::emergency_decision(board, you)
            }
        };

        info!(
            "MOVE {}: {} ({:?}, time: {}ms)",
            turn,
            decision.direction,
            decision.kind,
            start_time.elapsed().as_millis()
        );

        self.debug_logger
            .log_move(*turn, &game.id, &you.id, board.clone(), decision);

        json!({ "move": decision.direction.as_str() })
    }

    /// Synchronous move choice
    ///
    /// With `deadline == None` the search runs to the configured depth and the result is
    /// fully deterministic, except for the random pick when trapped.
    pub fn choose_move(&self, board: &Board, you: &Battlesnake, deadline: Option<Instant>) -> MoveDecision {
        Self::decide(&self.config, board, you, deadline)
    }

    fn decide(config: &Config, board: &Board, you: &Battlesnake, deadline: Option<Instant>) -> MoveDecision {
        let safe = safe_moves(&Direction::all(), &you.body, board);

        match safe.as_slice() {
            [] => MoveDecision {
                direction: Self::trapped_fallback(board, you),
                kind: DecisionKind::Trapped,
            },
            [only] => MoveDecision {
                direction: *only,
                kind: DecisionKind::OnlyMove,
            },
            [first, ..] => Self::search_decision(config, board, you, &safe, deadline).unwrap_or(
                MoveDecision {
                    direction: *first,
                    kind: DecisionKind::FirstSafe,
                },
            ),
        }
    }

    fn search_decision(
        config: &Config,
        board: &Board,
        you: &Battlesnake,
        safe: &[Direction],
        deadline: Option<Instant>,
    ) -> Option<MoveDecision> {
        let Some(roles) = Self::resolve_roles(board, you) else {
            debug!("No opponent to search against");
            return None;
        };

        debug!("Searching {} safe moves: {:?}", safe.len(), safe);
        let heuristics = &config.heuristic;

        let (outcome, depth) = match deadline {
            Some(deadline) if config.search.iterative_deepening => {
                let result =
                    iterative_deepening(board, roles, config.search.max_depth, deadline, heuristics)?;
                debug!("Searched {} nodes", result.nodes);
                (result.outcome, result.depth)
            }
            _ => (
                minimax(board, roles, config.search.max_depth, heuristics),
                config.search.max_depth,
            ),
        };

        let direction = outcome.best_move?;
        Some(MoveDecision {
            direction,
            kind: DecisionKind::Searched {
                score: outcome.score,
                depth,
            },
        })
    }

    /// Us and the first other snake on the board
    pub fn resolve_roles(board: &Board, you: &Battlesnake) -> Option<Roles> {
        let max_index = board.snake_index(&you.id)?;
        let min_index = (0..board.snakes.len()).find(|&i| i != max_index)?;

        if board.snakes.len() > 2 {
            warn!(
                "{} snakes on the board; searching against {} only",
                board.snakes.len(),
                board.snakes[min_index].id
            );
        }

        Some(Roles::new(max_index, min_index))
    }

    /// Random direction that at least stays on the board, if any does
    fn trapped_fallback(board: &Board, you: &Battlesnake) -> Direction {
        let on_board: Vec<Direction> = match you.body.first() {
            Some(&head) => Direction::all()
                .into_iter()
                .filter(|&d| in_bounds(translate(head, d), board.width, board.height))
                .collect(),
            None => vec![],
        };

        let pool = if on_board.is_empty() {
            Direction::all().to_vec()
        } else {
            on_board
        };

        let direction = *pool.choose(&mut rand::rng()).unwrap_or(&Direction::Up);
        warn!("No safe moves, falling back to {}", direction);
        direction
    }

    fn emergency_decision(board: &Board, you: &Battlesnake) -> MoveDecision {
        match safe_moves(&Direction::all(), &you.body, board).first() {
            Some(&direction) => MoveDecision {
                direction,
                kind: DecisionKind::FirstSafe,
            },
            None => MoveDecision {
                direction: Self::trapped_fallback(board, you),
                kind: DecisionKind::Trapped,
            },
        }
    }
}
