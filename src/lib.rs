// Library exports for the minimax Battlesnake
// The server binary, the replay tool and the integration tests all drive the engine
// through these modules.

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod eval;
pub mod geometry;
pub mod replay;
pub mod safety;
pub mod search;
pub mod simulator;
pub mod types;

#[cfg(test)]
mod test_support;
