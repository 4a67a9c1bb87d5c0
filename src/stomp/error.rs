//! STOMP session error types.

use thiserror::Error;

/// Errors that can occur while talking to a STOMP broker.
#[derive(Debug, Error)]
pub enum StompError {
    /// The broker URL is not a usable WebSocket URL.
    #[error("Invalid broker URL: {0}")]
    InvalidUrl(String),

    /// A frame could not be parsed.
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// The frame command is not part of STOMP 1.2.
    #[error("Unknown frame command: {0}")]
    UnknownCommand(String),

    /// The session has been closed.
    #[error("Session is closed")]
    Closed,
}

/// Result type for STOMP operations.
pub type Result<T> = std::result::Result<T, StompError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StompError::InvalidUrl("http://example.com".to_string());
        assert_eq!(err.to_string(), "Invalid broker URL: http://example.com");

        let err = StompError::UnknownCommand("PING".to_string());
        assert_eq!(err.to_string(), "Unknown frame command: PING");

        assert_eq!(StompError::Closed.to_string(), "Session is closed");
    }
}
