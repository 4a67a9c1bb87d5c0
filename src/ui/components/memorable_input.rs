//! Text input that remembers what was typed into it.
//!
//! When focus leaves the input with a non-blank value, the value is queued
//! and added to the remembered options once [`COMMIT_DELAY`] has passed. The
//! delay keeps the option popup from flickering while focus moves around.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use super::TextInput;

/// How long a blurred value waits before it is remembered.
pub const COMMIT_DELAY: Duration = Duration::from_millis(300);

/// Most options shown in the popup at once.
const MAX_VISIBLE_OPTIONS: usize = 5;

#[derive(Debug, Clone)]
struct PendingCommit {
    value: String,
    due: Instant,
}

/// A labelled [`TextInput`] with remembered values offered as completions.
#[derive(Debug, Clone)]
pub struct MemorableInput {
    input: TextInput,
    label: String,
    options: Vec<String>,
    /// Index into the filtered options.
    highlighted: Option<usize>,
    /// One entry per blur, oldest first.
    pending: Vec<PendingCommit>,
}

impl MemorableInput {
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        let mut input = TextInput::new();
        input.set_placeholder(placeholder);
        Self {
            input,
            label: label.into(),
            options: Vec::new(),
            highlighted: None,
            pending: Vec::new(),
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn is_blank(&self) -> bool {
        self.input.is_blank()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.input.set_value(value);
        self.highlighted = None;
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.highlighted = None;
    }

    /// All remembered values, oldest first.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Remembered values matching the current text, case-insensitively.
    pub fn filtered_options(&self) -> Vec<&str> {
        let needle = self.input.value().to_lowercase();
        self.options
            .iter()
            .filter(|o| o.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn highlighted(&self) -> Option<&str> {
        let index = self.highlighted?;
        self.filtered_options().get(index).copied()
    }

    /// Handle a key press.
    ///
    /// Up/Down move the option highlight; everything else edits the text.
    /// Returns true if the value changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Down, KeyModifiers::NONE) => {
                let count = self.filtered_options().len();
                if count > 0 {
                    self.highlighted = Some(match self.highlighted {
                        Some(i) if i + 1 < count => i + 1,
                        _ => 0,
                    });
                }
                false
            }
            (KeyCode::Up, KeyModifiers::NONE) => {
                let count = self.filtered_options().len();
                if count > 0 {
                    self.highlighted = Some(match self.highlighted {
                        Some(0) | None => count - 1,
                        Some(i) => i - 1,
                    });
                }
                false
            }
            (KeyCode::Esc, _) => {
                self.highlighted = None;
                false
            }
            _ => {
                let changed = self.input.handle_input(key);
                if changed {
                    self.highlighted = None;
                }
                changed
            }
        }
    }

    /// Insert pasted text.
    pub fn paste(&mut self, text: &str) -> bool {
        let changed = self.input.insert_str(text);
        if changed {
            self.highlighted = None;
        }
        changed
    }

    /// Replace the value with the highlighted option.
    ///
    /// Returns false when nothing was highlighted.
    pub fn accept_highlighted(&mut self) -> bool {
        match self.highlighted().map(str::to_string) {
            Some(option) => {
                self.input.set_value(option);
                self.highlighted = None;
                true
            }
            None => false,
        }
    }

    /// Focus left the input. Queues the current value to be remembered.
    pub fn blur(&mut self, now: Instant) {
        self.highlighted = None;
        if !self.input.is_blank() {
            self.pending.push(PendingCommit {
                value: self.input.value().to_string(),
                due: now + COMMIT_DELAY,
            });
        }
    }

    /// Remember every queued value whose delay has passed.
    ///
    /// Returns true if a new option was added.
    pub fn tick(&mut self, now: Instant) -> bool {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| now >= p.due);
        self.pending = waiting;

        let mut added = false;
        for pending in due {
            if self.options.contains(&pending.value) {
                continue;
            }
            tracing::debug!(label = %self.label, value = %pending.value, "Remembering input");
            self.options.push(pending.value);
            added = true;
        }
        added
    }

    /// Render the input box.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool, disabled: bool) {
        self.input
            .render_with_label(frame, area, &self.label, focused, disabled);
    }

    /// Render the option popup under `anchor`, clipped to `bounds`.
    ///
    /// Drawn last so it overlays whatever sits below the input.
    pub fn render_options(&self, frame: &mut Frame, anchor: Rect, bounds: Rect) {
        let options = self.filtered_options();
        if options.is_empty() {
            return;
        }

        let shown = options.len().min(MAX_VISIBLE_OPTIONS);
        let height = (shown as u16 + 2).min(bounds.bottom().saturating_sub(anchor.bottom()));
        if height < 3 {
            return;
        }
        let popup = Rect::new(anchor.x, anchor.bottom(), anchor.width, height);

        // Keep the highlighted option in view
        let first = self
            .highlighted
            .map(|h| (h + 1).saturating_sub(shown))
            .unwrap_or(0);

        let items: Vec<ListItem> = options
            .iter()
            .enumerate()
            .skip(first)
            .take(shown)
            .map(|(i, option)| {
                let style = if Some(i) == self.highlighted {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(option.to_string())).style(style)
            })
            .collect();

        frame.render_widget(Clear, popup);
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
            popup,
        );
    }
}
