//! Logging service - structured event logging to a JSON-lines file
//!
//! Events are appended to `events.jsonl` in the data directory. Only
//! operational context is recorded (event name, command, error text);
//! never party contents, emails, or credentials. Logging failures are
//! swallowed by callers so they can never break an operation.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;

const LOG_FILE: &str = "events.jsonl";

/// Counter for generating unique IDs within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique ID based on timestamp + counter
fn generate_id() -> u64 {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    // Timestamp in the upper bits, per-millisecond counter in the lower 16.
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    (timestamp << 16) | counter
}

/// Get current unix timestamp in milliseconds
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Detect the current platform
fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// Entry point for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    Cli,
}

/// A log event to be recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl LogEvent {
    /// Create a new log event with just an event name
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            command: None,
            error_message: None,
        }
    }

    /// Set the command context
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set error information
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

/// A recorded log entry, one JSON object per line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub ts: i64,
    pub entry_point: EntryPoint,
    pub app_version: String,
    pub platform: String,
    #[serde(flatten)]
    pub event: LogEvent,
}

/// Appends structured events to the data directory's log file
pub struct LoggingService {
    path: PathBuf,
    entry_point: EntryPoint,
    app_version: String,
    write_guard: Mutex<()>,
}

impl LoggingService {
    pub fn new(dir: &Path, entry_point: EntryPoint, app_version: &str) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(LOG_FILE),
            entry_point,
            app_version: app_version.to_string(),
            write_guard: Mutex::new(()),
        })
    }

    /// Record one event
    pub fn log(&self, event: LogEvent) -> Result<()> {
        let entry = LogEntry {
            id: generate_id(),
            ts: now_ms(),
            entry_point: self.entry_point,
            app_version: self.app_version.clone(),
            platform: detect_platform().to_string(),
            event,
        };
        let line = serde_json::to_string(&entry)?;

        let _guard = self.write_guard.lock().unwrap();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Read back all recorded entries, oldest first
    pub fn entries(&self) -> Result<Vec<LogEntry>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut entries = Vec::new();
        for line in raw.lines().filter(|l| !l.trim().is_empty()) {
            entries.push(serde_json::from_str(line)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_and_read_back() {
        let dir = TempDir::new().unwrap();
        let logger = LoggingService::new(dir.path(), EntryPoint::Cli, "0.1.0").unwrap();

        logger.log(LogEvent::new("party_launched").with_command("party launch")).unwrap();
        logger
            .log(LogEvent::new("login_failed").with_error("Invalid email or password"))
            .unwrap();

        let entries = logger.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event.event, "party_launched");
        assert_eq!(entries[0].event.command.as_deref(), Some("party launch"));
        assert_eq!(entries[1].event.error_message.as_deref(), Some("Invalid email or password"));
        assert!(entries[0].id != entries[1].id);
    }

    #[test]
    fn test_unique_ids_within_a_millisecond() {
        let ids: Vec<u64> = (0..100).map(|_| generate_id()).collect();
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }
}
