//! Filesystem watcher (spec.md §4.9).
//!
//! Poll-based: there is no background thread (spec.md §5, "no suspension
//! points besides read/write"). The server loop calls
//! [`FileWatcher::check_for_changes`] once per `workspace/didChangeWatchedFiles`
//! turn; nothing runs between messages.

use std::path::PathBuf;
use std::time::SystemTime;

/// One registered watch target.
struct WatchedFile {
    uri: String,
    path: PathBuf,
    last_mtime: Option<SystemTime>,
}

/// A change observed since the last poll.
#[derive(Debug, PartialEq, Eq)]
pub enum WatchedChange {
    /// The file's `stat` call now fails.
    Deleted(String),
    /// The file's mtime advanced since the last poll.
    Changed(String),
}

/// Registered watch patterns are stored for completeness but matched
/// against no behavior in this design (spec.md §4.9: "informational only").
#[derive(Default)]
pub struct FileWatcher {
    watched: Vec<WatchedFile>,
    patterns: Vec<String>,
}

impl FileWatcher {
    /// Create an empty watcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `uri`/`path` for polling, recording its current mtime.
    pub fn register(&mut self, uri: String, path: PathBuf) {
        let last_mtime = std::fs::metadata(&path).and_then(|m| m.modified()).ok();
        self.watched.push(WatchedFile { uri, path, last_mtime });
    }

    /// Record a glob pattern the client asked to be notified about.
    /// Informational only — see module docs.
    pub fn register_pattern(&mut self, pattern: String) {
        self.patterns.push(pattern);
    }

    /// `true` if any watch pattern was ever registered.
    pub fn has_patterns(&self) -> bool {
        !self.patterns.is_empty()
    }

    /// Stat every registered path and report deletions/mtime changes,
    /// updating each record's `last_mtime` in place.
    pub fn check_for_changes(&mut self) -> Vec<WatchedChange> {
        let mut changes = Vec::new();
        for watched in &mut self.watched {
            match std::fs::metadata(&watched.path).and_then(|m| m.modified()) {
                Err(_) => changes.push(WatchedChange::Deleted(watched.uri.clone())),
                Ok(mtime) => {
                    if watched.last_mtime.map(|prev| mtime > prev).unwrap_or(false) {
                        changes.push(WatchedChange::Changed(watched.uri.clone()));
                    }
                    watched.last_mtime = Some(mtime);
                }
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn detects_deletion() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.ghost");
        fs::write(&path, "let x = 1;\n").unwrap();

        let mut watcher = FileWatcher::new();
        watcher.register("file:///a.ghost".to_string(), path.clone());
        fs::remove_file(&path).unwrap();

        assert_eq!(watcher.check_for_changes(), vec![WatchedChange::Deleted("file:///a.ghost".to_string())]);
    }

    #[test]
    fn detects_modification() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.ghost");
        fs::write(&path, "let x = 1;\n").unwrap();

        let mut watcher = FileWatcher::new();
        watcher.register("file:///a.ghost".to_string(), path.clone());

        sleep(Duration::from_millis(10));
        fs::write(&path, "let x = 2;\n").unwrap();

        assert_eq!(watcher.check_for_changes(), vec![WatchedChange::Changed("file:///a.ghost".to_string())]);
    }

    #[test]
    fn no_change_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.ghost");
        fs::write(&path, "let x = 1;\n").unwrap();

        let mut watcher = FileWatcher::new();
        watcher.register("file:///a.ghost".to_string(), path);

        assert!(watcher.check_for_changes().is_empty());
    }
}
