//! STOMP-over-WebSocket client.
//!
//! This module contains the frame codec and the owned session object the UI
//! uses to connect, send, subscribe and disconnect.

pub mod error;
mod frame;
mod session;

use std::sync::OnceLock;

use regex::Regex;

pub use error::StompError;
pub use frame::{summarize_headers, Frame, FrameCommand};
pub use session::{SessionEvent, StompSession, SubscriptionId};

/// Pattern a broker URL must match before Connect is enabled.
const BROKER_URL_PATTERN: &str = r"^(ws|wss)?://[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*(:[0-9]+)?(/.*)?$";

fn broker_url_regex() -> Option<&'static Regex> {
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX
        .get_or_init(|| Regex::new(BROKER_URL_PATTERN).ok())
        .as_ref()
}

/// Check whether `url` looks like a WebSocket broker address.
pub fn is_valid_broker_url(url: &str) -> bool {
    broker_url_regex().is_some_and(|re| re.is_match(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_broker_urls() {
        assert!(is_valid_broker_url("ws://localhost:8080/ws"));
        assert!(is_valid_broker_url("wss://broker.example.com"));
        assert!(is_valid_broker_url("ws://127.0.0.1:15674/ws"));
    }

    #[test]
    fn test_invalid_broker_urls() {
        assert!(!is_valid_broker_url(""));
        assert!(!is_valid_broker_url("http://localhost:8080"));
        assert!(!is_valid_broker_url("ws://"));
        assert!(!is_valid_broker_url("ws://local host"));
        assert!(!is_valid_broker_url("ws://localhost:port"));
    }
}
