//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "app": { "simulatedLatencyMs": 1000 }
//! }
//! ```
//! Unknown keys are ignored so the file can be shared with other
//! front-ends.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

const SETTINGS_FILE: &str = "settings.json";

/// The original front-end faked its backend round-trip at one second.
const DEFAULT_LATENCY_MS: u64 = 1000;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default = "default_latency_ms")]
    simulated_latency_ms: u64,
}

fn default_latency_ms() -> u64 {
    DEFAULT_LATENCY_MS
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            simulated_latency_ms: DEFAULT_LATENCY_MS,
        }
    }
}

/// Loaded application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed suspension applied to identity calls, standing in for a
    /// backend round-trip
    pub simulated_latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulated_latency_ms: DEFAULT_LATENCY_MS,
        }
    }
}

impl Config {
    /// Load configuration from `settings.json`, defaulting when absent
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        let settings: SettingsFile = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| Error::Config(format!("invalid {}: {}", SETTINGS_FILE, e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SettingsFile::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            simulated_latency_ms: settings.app.simulated_latency_ms,
        })
    }

    /// A configuration with no artificial latency (used by tests)
    pub fn without_latency() -> Self {
        Self {
            simulated_latency_ms: 0,
        }
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}
