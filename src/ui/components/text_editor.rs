//! Multi-line text editor used for message bodies and the frame data pane.
//!
//! Columns are char indices. In JSON mode each visible line is tokenized and
//! coloured; the text itself is never rewritten except by [`format_json`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Pretty-print a JSON document with two-space indentation.
pub fn format_json(text: &str) -> Result<String, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    serde_json::to_string_pretty(&value)
}

/// A multi-line text editor.
#[derive(Debug, Clone)]
pub struct TextEditor {
    lines: Vec<String>,
    cursor_line: usize,
    cursor_col: usize,
    /// First visible line.
    scroll: usize,
    json_highlight: bool,
}

impl TextEditor {
    /// Create an editor holding `content`, cursor at the start.
    pub fn new(content: &str) -> Self {
        let mut editor = Self {
            lines: Vec::new(),
            cursor_line: 0,
            cursor_col: 0,
            scroll: 0,
            json_highlight: false,
        };
        editor.set_content(content);
        editor
    }

    pub fn empty() -> Self {
        Self::new("")
    }

    /// Replace the whole content and reset the cursor.
    pub fn set_content(&mut self, content: &str) {
        self.lines = content.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect();
        self.cursor_line = 0;
        self.cursor_col = 0;
        self.scroll = 0;
    }

    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn clear(&mut self) {
        self.set_content("");
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn set_json_highlight(&mut self, enabled: bool) {
        self.json_highlight = enabled;
    }

    pub fn json_highlight(&self) -> bool {
        self.json_highlight
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_line, self.cursor_col)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines[line].chars().count()
    }

    fn byte_at(&self, line: usize, col: usize) -> usize {
        let text = &self.lines[line];
        text.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    }

    fn ensure_cursor_visible(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.cursor_line < self.scroll {
            self.scroll = self.cursor_line;
        }
        if self.cursor_line >= self.scroll + visible_height {
            self.scroll = self.cursor_line + 1 - visible_height;
        }
    }

    /// Insert pasted text at the cursor, line breaks included.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let mut changed = false;
        for c in text.chars() {
            match c {
                '\r' => {}
                '\n' => self.insert_newline(),
                c => self.insert_char(c),
            }
            changed = true;
        }
        changed
    }

    /// Handle a key press.
    ///
    /// Returns true if the content changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                true
            }
            (KeyCode::Enter, _) => {
                self.insert_newline();
                true
            }
            (KeyCode::Backspace, _) => self.delete_backward(),
            (KeyCode::Delete, _) => self.delete_forward(),
            (KeyCode::Left, _) => {
                self.move_left();
                false
            }
            (KeyCode::Right, _) => {
                self.move_right();
                false
            }
            (KeyCode::Up, _) => {
                if self.cursor_line > 0 {
                    self.cursor_line -= 1;
                    self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_line));
                }
                false
            }
            (KeyCode::Down, _) => {
                if self.cursor_line + 1 < self.lines.len() {
                    self.cursor_line += 1;
                    self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_line));
                }
                false
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor_col = 0;
                false
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor_col = self.line_len(self.cursor_line);
                false
            }
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                if self.cursor_col < self.line_len(self.cursor_line) {
                    let at = self.byte_at(self.cursor_line, self.cursor_col);
                    self.lines[self.cursor_line].truncate(at);
                    true
                } else {
                    self.delete_forward()
                }
            }
            _ => false,
        }
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_at(self.cursor_line, self.cursor_col);
        self.lines[self.cursor_line].insert(at, c);
        self.cursor_col += 1;
    }

    fn insert_newline(&mut self) {
        let at = self.byte_at(self.cursor_line, self.cursor_col);
        let rest = self.lines[self.cursor_line].split_off(at);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    fn delete_backward(&mut self) -> bool {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            let at = self.byte_at(self.cursor_line, self.cursor_col);
            self.lines[self.cursor_line].remove(at);
            true
        } else if self.cursor_line > 0 {
            let current = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
            self.lines[self.cursor_line].push_str(&current);
            true
        } else {
            false
        }
    }

    fn delete_forward(&mut self) -> bool {
        if self.cursor_col < self.line_len(self.cursor_line) {
            let at = self.byte_at(self.cursor_line, self.cursor_col);
            self.lines[self.cursor_line].remove(at);
            true
        } else if self.cursor_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next);
            true
        } else {
            false
        }
    }

    fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
        }
    }

    fn move_right(&mut self) {
        if self.cursor_col < self.line_len(self.cursor_line) {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    /// Render the editor in a bordered block.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, title: &str, focused: bool) {
        let visible_height = area.height.saturating_sub(2) as usize;
        self.ensure_cursor_visible(visible_height);

        let display_lines: Vec<Line> = self
            .lines
            .iter()
            .skip(self.scroll)
            .take(visible_height)
            .map(|line| {
                if self.json_highlight {
                    highlight_json_line(line)
                } else {
                    Line::from(line.clone())
                }
            })
            .collect();

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(border_style);
        frame.render_widget(Paragraph::new(display_lines).block(block), area);

        if focused {
            let x = area.x + 1 + self.cursor_col as u16;
            let y = area.y + 1 + (self.cursor_line - self.scroll) as u16;
            if y < area.bottom().saturating_sub(1) && x < area.right().saturating_sub(1) {
                frame.set_cursor_position(Position::new(x, y));
            }
        }
    }
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::empty()
    }
}

/// Colour one line of JSON text.
///
/// Works line by line, so a string spanning lines is only coloured up to the
/// line end.
fn highlight_json_line(line: &str) -> Line<'static> {
    let key_style = Style::default().fg(Color::Cyan);
    let string_style = Style::default().fg(Color::Green);
    let number_style = Style::default().fg(Color::Magenta);
    let literal_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let punct_style = Style::default().fg(Color::DarkGray);

    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    let flush = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if !plain.is_empty() {
            spans.push(Span::raw(std::mem::take(plain)));
        }
    };

    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            flush(&mut plain, &mut spans);
            let start = i;
            i += 1;
            while i < chars.len() && chars[i] != '"' {
                if chars[i] == '\\' {
                    i += 1;
                }
                i += 1;
            }
            i = (i + 1).min(chars.len());
            let token: String = chars[start..i].iter().collect();
            let is_key = chars[i..]
                .iter()
                .find(|c| !c.is_whitespace())
                .is_some_and(|c| *c == ':');
            spans.push(Span::styled(token, if is_key { key_style } else { string_style }));
        } else if c == '-' || c.is_ascii_digit() {
            flush(&mut plain, &mut spans);
            let start = i;
            while i < chars.len()
                && (chars[i].is_ascii_digit() || matches!(chars[i], '-' | '+' | '.' | 'e' | 'E'))
            {
                i += 1;
            }
            spans.push(Span::styled(chars[start..i].iter().collect::<String>(), number_style));
        } else if c.is_ascii_alphabetic() {
            flush(&mut plain, &mut spans);
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let style = if matches!(word.as_str(), "true" | "false" | "null") {
                literal_style
            } else {
                Style::default()
            };
            spans.push(Span::styled(word, style));
        } else if matches!(c, '{' | '}' | '[' | ']' | ':' | ',') {
            flush(&mut plain, &mut spans);
            spans.push(Span::styled(c.to_string(), punct_style));
            i += 1;
        } else {
            plain.push(c);
            i += 1;
        }
    }
    flush(&mut plain, &mut spans);
    Line::from(spans)
}
