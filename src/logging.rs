//! Logging configuration using the tracing ecosystem.
//!
//! This module configures structured logging with:
//! - File-based output (to avoid TUI corruption)
//! - Daily log rotation
//! - Environment-based log level configuration

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "lazystomp=info,warn";

/// Initialize the logging system.
///
/// Sets up tracing with:
/// - Daily rotating file appender in the user's local data directory
/// - Log level from `level` (the `--log-level` flag), else the `RUST_LOG`
///   environment variable
/// - Structured output with file/line numbers and thread IDs
///
/// # Log Directory
///
/// Logs are stored in the platform-specific local data directory:
/// - Linux: `~/.local/share/lazystomp/logs/`
/// - macOS: `~/Library/Application Support/lazystomp/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\lazystomp\logs\`
///
/// # Log Levels
///
/// Configure via `--log-level` or the `RUST_LOG` environment variable:
/// - `RUST_LOG=debug` - Verbose output for debugging
/// - `RUST_LOG=lazystomp=debug` - Debug only for lazystomp
/// - `RUST_LOG=lazystomp=trace` - Every key press, drag event and column resize
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be determined or created
/// - The tracing subscriber cannot be set
pub fn init(level: Option<&str>) -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "lazystomp.log");

    let filter = build_filter(level)?;

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "LazyStomp starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

/// Build the level filter.
///
/// An explicit level applies to this crate only; dependencies stay at `warn`.
fn build_filter(level: Option<&str>) -> anyhow::Result<EnvFilter> {
    match level {
        Some(level) => {
            level
                .parse::<tracing::Level>()
                .map_err(|_| anyhow::anyhow!("Unknown log level '{}'", level))?;
            Ok(EnvFilter::new(format!(
                "lazystomp={},warn",
                level.to_ascii_lowercase()
            )))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))),
    }
}

/// Get the log directory path.
///
/// Returns the platform-specific local data directory with `lazystomp/logs` appended.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("lazystomp").join("logs"))
}

/// Get the path where logs are stored.
///
/// This is useful for displaying to users where they can find log files.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log application shutdown.
///
/// Call this before the application exits to log a clean shutdown message.
pub fn shutdown() {
    tracing::info!("LazyStomp shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_has_expected_structure() {
        let dir = get_log_directory().unwrap();
        assert!(dir.ends_with("lazystomp/logs"));
    }

    #[test]
    fn test_build_filter_explicit_level() {
        let filter = build_filter(Some("debug")).unwrap();
        assert!(filter.to_string().to_lowercase().contains("lazystomp=debug"));
    }

    #[test]
    fn test_build_filter_rejects_unknown_level() {
        let err = build_filter(Some("loud")).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_log_directory_public_function() {
        let dir = log_directory();
        assert!(dir.is_some());
        assert!(dir.unwrap().ends_with("lazystomp/logs"));
    }
}
