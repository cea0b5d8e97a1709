//! Stderr-only diagnostic logging (spec.md "Logging" ambient stack section).
//!
//! LSP reserves stdout exclusively for framed protocol traffic, so every log
//! line this server emits goes to stderr, gated by a configured threshold.

use std::io::Write;
use std::str::FromStr;

/// Severity threshold for [`Logger::log`]. Totally ordered; set once at
/// startup from `--log-level` and never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// State transitions and per-request bookkeeping.
    Debug,
    /// Default level: lifecycle events and recoverable anomalies.
    #[default]
    Info,
    /// Requests answered with a JSON-RPC error.
    Warn,
    /// Failures that abort the current request/notification.
    Error,
    /// Suppress all logging.
    Silent,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "silent" | "off" => Ok(LogLevel::Silent),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Silent => "SILENT",
        }
    }
}

/// A threshold-gated logger that writes `[name] [LEVEL] message` to stderr.
pub struct Logger {
    name: &'static str,
    threshold: LogLevel,
}

impl Logger {
    /// Create a logger tagged with `name`, emitting at `threshold` and above.
    pub fn new(name: &'static str, threshold: LogLevel) -> Self {
        Self { name, threshold }
    }

    /// Log `message` at `level` if it meets the configured threshold. A no-op
    /// when `level` is below `threshold`, and `Silent` never logs.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if level < self.threshold || level == LogLevel::Silent {
            return;
        }
        let mut stderr = std::io::stderr();
        let _ = writeln!(stderr, "[{}] [{}] {}", self.name, level.label(), message.as_ref());
    }

    /// Convenience wrapper for [`LogLevel::Debug`].
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    /// Convenience wrapper for [`LogLevel::Info`].
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    /// Convenience wrapper for [`LogLevel::Warn`].
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    /// Convenience wrapper for [`LogLevel::Error`].
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_level_names() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("bogus".parse::<LogLevel>().is_err());
    }

    #[test]
    fn ordering_gates_lower_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Error > LogLevel::Warn);
    }

    #[test]
    fn silent_suppresses_everything() {
        let logger = Logger::new("test", LogLevel::Debug);
        // Silent is gated explicitly, not just by threshold comparison.
        logger.log(LogLevel::Silent, "should never print");
    }
}
