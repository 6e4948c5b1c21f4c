// Configuration module for reading Snake.toml
// Search depth, turn timing and every heuristic weight live here so they can be tuned
// without touching the engine.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub search: SearchConfig,
    pub timing: TimingConfig,
    pub heuristic: HeuristicConfig,
    pub debug: DebugConfig,
}

/// Minimax search bounds
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub iterative_deepening: bool,
}

/// Timing and performance constants
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// Static evaluator weights
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HeuristicConfig {
    // Mobility ladder, indexed by how many directions are still safe
    pub trapped_penalty: f64,
    pub one_safe_penalty: f64,
    pub two_safe_penalty: f64,
    pub three_safe_penalty: f64,

    // Health below this costs one point per missing unit
    pub hunger_threshold: i32,

    // Food within this taxicab radius earns (radius + 1 - distance)
    pub food_radius: i32,

    pub length_advantage_weight: f64,
    pub size_weight: f64,

    // Added to a node where the opponent has no safe move
    pub opponent_trapped_bonus: f64,
}

impl HeuristicConfig {
    /// Penalty for having `safe_count` safe directions left (0..=4)
    pub fn mobility_penalty(&self, safe_count: usize) -> f64 {
        match safe_count {
            0 => self.trapped_penalty,
            1 => self.one_safe_penalty,
            2 => self.two_safe_penalty,
            3 => self.three_safe_penalty,
            _ => 0.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        if config.search.max_depth == 0 {
            return Err("search.max_depth must be at least 1".to_string());
        }

        Ok(config)
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                max_depth: 7,
                iterative_deepening: true,
            },
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
            },
            heuristic: HeuristicConfig {
                trapped_penalty: -1000.0,
                one_safe_penalty: -15.0,
                two_safe_penalty: -10.0,
                three_safe_penalty: -5.0,
                hunger_threshold: 20,
                food_radius: 3,
                length_advantage_weight: 2.0,
                size_weight: 4.0,
                opponent_trapped_bonus: 1000.0,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
