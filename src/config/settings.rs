//! Application settings configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// How the send body is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    /// JSON with highlighting and formatting.
    #[default]
    Json,
    /// Plain text.
    Raw,
}

impl BodyMode {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            BodyMode::Json => "JSON",
            BodyMode::Raw => "Raw",
        }
    }

    /// The other mode.
    pub fn toggled(&self) -> Self {
        match self {
            BodyMode::Json => BodyMode::Raw,
            BodyMode::Raw => BodyMode::Json,
        }
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Broker URL pre-filled in the address bar.
    pub default_url: Option<String>,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Maximum number of toasts shown at once.
    pub max_notifications: usize,
    /// WebSocket connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Initial body editor mode.
    pub body_mode: BodyMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_url: None,
            tick_rate_ms: 100,
            max_notifications: 3,
            connect_timeout_secs: 10,
            body_mode: BodyMode::Json,
        }
    }
}

impl Settings {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_notifications == 0 {
            return Err(ConfigError::ValidationError(
                "max_notifications must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "connect_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Connect timeout as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_body_mode_toggle() {
        assert_eq!(BodyMode::Json.toggled(), BodyMode::Raw);
        assert_eq!(BodyMode::Raw.toggled(), BodyMode::Json);
        assert_eq!(BodyMode::Raw.label(), "Raw");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let settings = Settings {
            connect_timeout_secs: 0,
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("connect_timeout_secs"));
    }

    #[test]
    fn test_body_mode_serialization() {
        let settings = Settings {
            body_mode: BodyMode::Raw,
            ..Settings::default()
        };
        let toml_str = toml::to_string(&settings).unwrap();
        assert!(toml_str.contains("body_mode = \"raw\""));
    }
}
