//! Server configuration (SPEC_FULL.md §2 ambient stack).
//!
//! Tolerant of both sources it's built from: CLI flags parsed in `main.rs`
//! and `workspace/didChangeConfiguration` settings, which may carry keys
//! this server doesn't recognize — those are ignored rather than rejected.

use ghost_lsp_transport::LogLevel;

/// Server-wide configuration, set once at startup and updated only by
/// explicit `workspace/didChangeConfiguration` notifications.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Logging threshold (spec.md §6 `--log-level`).
    pub log_level: LogLevel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { log_level: LogLevel::default() }
    }
}

impl ServerConfig {
    /// Merge a `workspace/didChangeConfiguration` settings payload.
    /// Unknown keys and the wrong shape are silently ignored — a
    /// misconfigured client must not crash the server.
    pub fn apply_settings(&mut self, settings: &serde_json::Value) {
        if let Some(level) = settings.get("logLevel").and_then(|v| v.as_str())
            && let Ok(level) = level.parse::<LogLevel>()
        {
            self.log_level = level;
        }
    }
}
