// Two-player minimax over simulated boards.
//
// Plies alternate between the maximizing snake (us) and a single minimizing opponent.
// Each ply moves only the snake whose turn it is; every child board is an owned copy
// produced by the simulator, so branches never share state. Leaves are always scored
// from the maximizing snake's point of view.

use log::debug;
use std::time::Instant;

use crate::config::HeuristicConfig;
use crate::eval::evaluate;
use crate::safety::safe_moves;
use crate::simulator::simulate_on_board;
use crate::types::{Board, Direction};

/// Stable board indices of the two players in a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roles {
    pub max_index: usize,
    pub min_index: usize,
}

impl Roles {
    pub fn new(max_index: usize, min_index: usize) -> Self {
        Roles { max_index, min_index }
    }

    /// Board index of the snake that moves on `ply`
    pub fn mover(&self, ply: Ply) -> usize {
        match ply {
            Ply::Max => self.max_index,
            Ply::Min => self.min_index,
        }
    }
}

/// Whose turn it is at a search node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ply {
    Max,
    Min,
}

impl Ply {
    pub fn next(self) -> Ply {
        match self {
            Ply::Max => Ply::Min,
            Ply::Min => Ply::Max,
        }
    }
}

/// Backed-up value of a node and the move that achieves it.
///
/// `best_move` is `None` when the node was terminal or its mover had no safe move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub score: f64,
    pub best_move: Option<Direction>,
}

/// Result of the deepest fully completed iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeepeningResult {
    pub outcome: SearchOutcome,
    pub depth: u8,
    pub nodes: u64,
}

/// Game-over checks that stop the search regardless of remaining depth
pub fn is_terminal(board: &Board, roles: Roles) -> bool {
    let max_dead = board
        .snakes
        .get(roles.max_index)
        .map_or(true, |s| s.health <= 0);

    max_dead || board.snakes.len() <= 1 || board.food.is_empty()
}

/// Fixed-depth minimax entered as a maximizing ply. Deterministic for a given board.
pub fn minimax(board: &Board, roles: Roles, depth: u8, heuristics: &HeuristicConfig) -> SearchOutcome {
    let mut searcher = Searcher::new(heuristics, None);
    // Only a deadline can abort a search
    searcher
        .search(board, roles, Ply::Max, depth, None)
        .unwrap_or(SearchOutcome {
            score: f64::NEG_INFINITY,
            best_move: None,
        })
}

/// Runs minimax at depth 1, 2, ... `max_depth`, abandoning the iteration in progress
/// once `deadline` passes. Returns `None` if not even depth 1 finished in time.
pub fn iterative_deepening(
    board: &Board,
    roles: Roles,
    max_depth: u8,
    deadline: Instant,
    heuristics: &HeuristicConfig,
) -> Option<DeepeningResult> {
    let mut searcher = Searcher::new(heuristics, Some(deadline));
    let mut completed = None;

    for depth in 1..=max_depth {
        match searcher.search(board, roles, Ply::Max, depth, None) {
            Some(outcome) => {
                debug!(
                    "Depth {} complete: {:?} (score: {}, nodes: {})",
                    depth, outcome.best_move, outcome.score, searcher.nodes
                );
                completed = Some(DeepeningResult {
                    outcome,
                    depth,
                    nodes: searcher.nodes,
                });
            }
            None => {
                debug!("Depth {} abandoned at deadline after {} nodes", depth, searcher.nodes);
                break;
            }
        }

        if is_terminal(board, roles) {
            break;
        }
    }

    completed
}

struct Searcher<'a> {
    heuristics: &'a HeuristicConfig,
    deadline: Option<Instant>,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    fn new(heuristics: &'a HeuristicConfig, deadline: Option<Instant>) -> Self {
        Searcher {
            heuristics,
            deadline,
            nodes: 0,
        }
    }

    fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn leaf(&self, board: &Board, roles: Roles, best_move: Option<Direction>) -> SearchOutcome {
        SearchOutcome {
            score: evaluate(board, roles.max_index, roles.min_index, self.heuristics),
            best_move,
        }
    }

    /// `None` means the deadline passed and the whole iteration must be discarded
    fn search(
        &mut self,
        board: &Board,
        roles: Roles,
        ply: Ply,
        depth: u8,
        led_here: Option<Direction>,
    ) -> Option<SearchOutcome> {
        self.nodes += 1;
        if self.out_of_time() {
            return None;
        }

        if depth == 0 || is_terminal(board, roles) {
            return Some(self.leaf(board, roles, led_here));
        }

        let mover = roles.mover(ply);
        let candidates = match board.snakes.get(mover) {
            Some(snake) => safe_moves(&Direction::all(), &snake.body, board),
            None => vec![],
        };

        // Mover is boxed in. Our own trapped penalty is already part of the static
        // score; a boxed-in opponent is worth a bonus of the same order.
        if candidates.is_empty() {
            let mut outcome = self.leaf(board, roles, None);
            if ply == Ply::Min {
                outcome.score += self.heuristics.opponent_trapped_bonus;
            }
            return Some(outcome);
        }

        let mut best: Option<SearchOutcome> = None;
        for dir in candidates {
            let child = simulate_on_board(board, mover, dir);
            let reply = self.search(&child, roles, ply.next(), depth - 1, Some(dir))?;

            let improves = match (best, ply) {
                (None, _) => true,
                (Some(b), Ply::Max) => reply.score > b.score,
                (Some(b), Ply::Min) => reply.score < b.score,
            };
            if improves {
                best = Some(SearchOutcome {
                    score: reply.score,
                    best_move: Some(dir),
                });
            }
        }

        best
    }
}
