// Fire-and-forget JSONL log of every move decision.
//
// Writes happen on a spawned tokio task so the move response never waits on disk.
// The engine never reads this file back; it only feeds the replay tool.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::bot::MoveDecision;
use crate::types::Board;

/// One line of the debug log; read back by `replay::LogEntry`
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    turn: i32,
    game_id: String,
    you_id: String,
    chosen_move: String,
    decision: MoveDecision,
    board: Board,
    timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    /// Must be called from within a tokio runtime
    pub fn log_move(&self, turn: i32, game_id: &str, you_id: &str, board: Board, decision: MoveDecision) {
        if !self.enabled {
            return;
        }

        let entry = DebugLogEntry {
            turn,
            game_id: game_id.to_string(),
            you_id: you_id.to_string(),
            chosen_move: decision.direction.as_str().to_string(),
            decision,
            board,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let file_handle = self.file.clone();
        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        let Some(file) = file_guard.as_mut() else {
            return;
        };

        let json_line = match serde_json::to_string(&entry) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
                return;
            }
        };

        if let Err(e) = file.write_all(format!("{}\n", json_line).as_bytes()).await {
            error!("Failed to write debug log entry: {}", e);
        } else if let Err(e) = file.flush().await {
            error!("Failed to flush debug log: {}", e);
        }
    }
}
