//! CLI command implementations

pub mod auth;
pub mod coin;
pub mod coins;
pub mod demo;
pub mod logs;
pub mod settings;
pub mod status;
pub mod wallet;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use moonwallet_core::{EntryPoint, LogEvent, LoggingService, MoonWalletContext};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let moonwallet_dir = get_moonwallet_dir();
    std::fs::create_dir_all(&moonwallet_dir).ok()?;
    LoggingService::new(&moonwallet_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Log a command execution, ignoring any errors
pub fn log_command(logger: &Option<LoggingService>, command: &str) {
    if let Some(l) = logger {
        let _ = l.log_command(command);
    }
}

/// Get the moonwallet directory from environment or default
pub fn get_moonwallet_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MOONWALLET_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".moonwallet")
    }
}

/// Get or create the moonwallet context
pub async fn get_context() -> Result<MoonWalletContext> {
    let moonwallet_dir = get_moonwallet_dir();

    std::fs::create_dir_all(&moonwallet_dir)
        .with_context(|| format!("Failed to create moonwallet directory: {:?}", moonwallet_dir))?;

    MoonWalletContext::new(&moonwallet_dir)
        .await
        .context("Failed to initialize moonwallet context")
}
