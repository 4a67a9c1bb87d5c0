//! Event handling for the application.
//!
//! Terminal input (keys, mouse, paste, resize) is converted into [`Event`]s by
//! the [`EventHandler`]. Broker traffic arrives separately as
//! `stomp::SessionEvent`s.

mod handler;
mod keys;

use crossterm::event::{KeyEvent, MouseEvent};

pub use handler::EventHandler;
pub use keys::{get_context_hints, KeyContext};

/// An application event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The mouse was clicked, dragged, released or scrolled.
    Mouse(MouseEvent),
    /// Text was pasted.
    Paste(String),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input arrived within the tick rate.
    Tick,
    /// The application should exit.
    Quit,
}
