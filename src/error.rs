//! Centralized error types for LazyStomp.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::config::ConfigError;
use crate::stomp::StompError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// STOMP session errors.
    #[error("{0}")]
    Stomp(#[from] StompError),

    /// The send body is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors (file system, terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Using defaults.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Using defaults.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                _ => "Could not access the configuration file.".to_string(),
            },
            AppError::Stomp(e) => match e {
                StompError::InvalidUrl(msg) => format!("Invalid broker URL: {}", msg),
                StompError::Closed => "Not connected. Connect to a broker first.".to_string(),
                StompError::MalformedFrame(_) | StompError::UnknownCommand(_) => {
                    "The broker sent a frame that could not be read.".to_string()
                }
            },
            AppError::Json(e) => e.to_string(),
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error prevents the application from working.
    pub fn is_critical(&self) -> bool {
        matches!(self, AppError::Io(_))
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_stomp_error() {
        let app_err: AppError = StompError::Closed.into();
        assert!(matches!(app_err, AppError::Stomp(StompError::Closed)));
        assert!(app_err.user_message().contains("Not connected"));
    }

    #[test]
    fn test_user_message_invalid_url() {
        let err = AppError::Stomp(StompError::InvalidUrl("bad scheme".to_string()));
        assert_eq!(err.user_message(), "Invalid broker URL: bad scheme");
    }

    #[test]
    fn test_user_message_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::from(json_err);
        assert!(err.user_message().contains("EOF"));
    }

    #[test]
    fn test_is_critical() {
        let io = AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, "tty"));
        assert!(io.is_critical());
        assert!(!AppError::other("x").is_critical());
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert_eq!(err.user_message(), "something went wrong");
        assert_eq!(err.to_string(), "something went wrong");
    }
}
