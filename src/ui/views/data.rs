//! Data pane: a scratch editor showing the body of the active frame.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::ui::components::TextEditor;

/// The data pane under the frame table.
#[derive(Default)]
pub struct DataView {
    editor: TextEditor,
    /// Key of the frame currently shown.
    shown: Option<usize>,
}

impl DataView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a frame body. JSON bodies are highlighted.
    pub fn show(&mut self, key: usize, body: &str) {
        let is_json = serde_json::from_str::<serde_json::Value>(body).is_ok();
        self.editor.set_content(body);
        self.editor.set_json_highlight(is_json);
        self.shown = Some(key);
    }

    pub fn shown(&self) -> Option<usize> {
        self.shown
    }

    pub fn content(&self) -> String {
        self.editor.content()
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        self.editor.handle_input(key)
    }

    pub fn paste(&mut self, text: &str) {
        self.editor.insert_str(text);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let title = match self.shown {
            Some(key) => format!("Data #{}", key),
            None => "Data".to_string(),
        };
        self.editor.render(frame, area, &title, focused);
    }
}
