//! Single-line text input.
//!
//! The cursor is a char index, so multi-byte input such as `/topic/größe`
//! edits cleanly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// A single-line text input with a placeholder.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position in chars.
    cursor: usize,
    placeholder: String,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input with an initial value and the cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_value(value);
        input
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// True when the value is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert pasted text at the cursor. Line breaks are dropped.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let mut changed = false;
        for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(c);
            changed = true;
        }
        changed
    }

    /// Handle a key press.
    ///
    /// Returns true if the value changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                true
            }
            (KeyCode::Backspace, _) if self.cursor > 0 => {
                self.cursor -= 1;
                self.remove_at(self.cursor);
                true
            }
            (KeyCode::Delete, _) if self.cursor < self.char_len() => {
                self.remove_at(self.cursor);
                true
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                false
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_len();
                false
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) if !self.value.is_empty() => {
                self.clear();
                true
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) if self.cursor > 0 => {
                let chars: Vec<char> = self.value.chars().collect();
                let mut start = self.cursor;
                while start > 0 && !chars[start - 1].is_alphanumeric() {
                    start -= 1;
                }
                while start > 0 && chars[start - 1].is_alphanumeric() {
                    start -= 1;
                }
                let from = self.byte_index(start);
                let to = self.byte_index(self.cursor);
                self.value.replace_range(from..to, "");
                self.cursor = start;
                true
            }
            _ => false,
        }
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn remove_at(&mut self, char_index: usize) {
        let at = self.byte_index(char_index);
        self.value.remove(at);
    }

    /// Render the input inside a bordered block titled with `label`.
    ///
    /// A disabled input is drawn dimmed and never shows the cursor.
    pub fn render_with_label(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        focused: bool,
        disabled: bool,
    ) {
        let showing_placeholder = self.value.is_empty() && !self.placeholder.is_empty();
        let display = if showing_placeholder {
            self.placeholder.as_str()
        } else {
            self.value.as_str()
        };

        let accent = if disabled {
            Color::DarkGray
        } else if focused {
            Color::Yellow
        } else {
            Color::Gray
        };
        let text_style = if showing_placeholder || disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let title_style = if focused {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent)
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", label), title_style))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));

        // Scroll horizontally so the cursor stays inside the box
        let inner_width = area.width.saturating_sub(2) as usize;
        let offset = (self.cursor + 1).saturating_sub(inner_width);
        let visible: String = display.chars().skip(offset).collect();
        frame.render_widget(Paragraph::new(visible).style(text_style).block(block), area);

        if focused && !disabled && area.height > 2 {
            let x = area.x + 1 + (self.cursor - offset) as u16;
            if x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor_position(Position::new(x, area.y + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_new_input() {
        let input = TextInput::new();
        assert!(input.is_empty());
        assert!(input.is_blank());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_with_value_puts_cursor_at_end() {
        let input = TextInput::with_value("/topic/a");
        assert_eq!(input.value(), "/topic/a");
        assert_eq!(input.cursor(), 8);
    }

    #[test]
    fn test_blank_is_whitespace_only() {
        assert!(TextInput::with_value("   ").is_blank());
        assert!(!TextInput::with_value(" /q ").is_blank());
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = TextInput::new();
        assert!(input.handle_input(key(KeyCode::Char('a'))));
        assert!(input.handle_input(key(KeyCode::Char('b'))));
        assert_eq!(input.value(), "ab");
        assert!(input.handle_input(key(KeyCode::Backspace)));
        assert_eq!(input.value(), "a");
        input.handle_input(key(KeyCode::Backspace));
        assert!(!input.handle_input(key(KeyCode::Backspace)));
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::with_value("größe");
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Backspace));
        assert_eq!(input.value(), "gröe");
        input.handle_input(key(KeyCode::Home));
        input.handle_input(key(KeyCode::Delete));
        assert_eq!(input.value(), "röe");
    }

    #[test]
    fn test_cursor_movement_stays_in_bounds() {
        let mut input = TextInput::with_value("ab");
        input.handle_input(key(KeyCode::Right));
        assert_eq!(input.cursor(), 2);
        input.handle_input(ctrl('a'));
        input.handle_input(key(KeyCode::Left));
        assert_eq!(input.cursor(), 0);
        input.handle_input(ctrl('e'));
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_ctrl_u_and_ctrl_w() {
        let mut input = TextInput::with_value("/topic/orders");
        assert!(input.handle_input(ctrl('w')));
        assert_eq!(input.value(), "/topic/");
        assert!(input.handle_input(ctrl('u')));
        assert!(input.is_empty());
        assert!(!input.handle_input(ctrl('u')));
    }

    #[test]
    fn test_insert_str_drops_newlines() {
        let mut input = TextInput::new();
        assert!(input.insert_str("/queue/\na"));
        assert_eq!(input.value(), "/queue/a");
        assert!(!input.insert_str("\n"));
    }
}
