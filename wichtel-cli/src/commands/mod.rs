//! CLI command implementations

pub mod auth;
pub mod dashboard;
pub mod gift;
pub mod invite;
pub mod party;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use wichtel_core::services::{EntryPoint, LogEvent, LoggingService};
use wichtel_core::{SessionUser, WichtelContext};

/// Get the wichtel directory from environment or default
pub fn get_wichtel_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WICHTEL_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".wichtel")
    }
}

/// Get or create the wichtel context
pub fn get_context() -> Result<WichtelContext> {
    let wichtel_dir = get_wichtel_dir();
    std::fs::create_dir_all(&wichtel_dir)
        .with_context(|| format!("Failed to create wichtel directory: {:?}", wichtel_dir))?;
    WichtelContext::new(&wichtel_dir)
}

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let wichtel_dir = get_wichtel_dir();
    std::fs::create_dir_all(&wichtel_dir).ok()?;
    LoggingService::new(&wichtel_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// The logged-in user, or a friendly error
pub async fn require_user(ctx: &WichtelContext) -> Result<SessionUser> {
    Ok(ctx.identity_service.require_user().await?)
}

/// A spinner shown while an identity call sits in its simulated
/// backend round-trip; silent when stderr is not a terminal
pub fn backend_spinner(msg: &str) -> Option<ProgressBar> {
    if !atty::is(atty::Stream::Stderr) {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

/// Stop and clear a spinner, if one was shown
pub fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(s) = spinner {
        s.finish_and_clear();
    }
}
