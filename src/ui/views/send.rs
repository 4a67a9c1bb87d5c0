//! Send tab: destination, body mode and the body editor.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::config::BodyMode;
use crate::events::KeyContext;
use crate::ui::components::{format_json, MemorableInput, TextEditor};
use crate::ui::theme::Theme;

/// What the send tab asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendAction {
    /// Publish `body` to `destination`.
    Send { destination: String, body: String },
    /// The editor was emptied.
    Cleared,
    /// Format JSON failed with the parse error.
    FormatFailed(String),
    /// The body mode changed.
    ModeChanged(BodyMode),
}

/// The send tab.
pub struct SendPanel {
    destination: MemorableInput,
    editor: TextEditor,
    mode: BodyMode,
    /// Screen area of the destination input, for mouse focus.
    destination_area: Rect,
    editor_area: Rect,
    button_area: Rect,
}

impl SendPanel {
    pub fn new(mode: BodyMode) -> Self {
        let mut editor = TextEditor::empty();
        editor.set_json_highlight(mode == BodyMode::Json);
        Self {
            destination: MemorableInput::new("Destination", "/app/hello"),
            editor,
            mode,
            destination_area: Rect::default(),
            editor_area: Rect::default(),
            button_area: Rect::default(),
        }
    }

    pub fn destination(&self) -> &MemorableInput {
        &self.destination
    }

    pub fn destination_mut(&mut self) -> &mut MemorableInput {
        &mut self.destination
    }

    pub fn body(&self) -> String {
        self.editor.content()
    }

    pub fn set_body(&mut self, body: &str) {
        self.editor.set_content(body);
    }

    pub fn mode(&self) -> BodyMode {
        self.mode
    }

    /// Send is possible only on a live session with a non-blank destination.
    pub fn can_send(&self, connected: bool) -> bool {
        connected && !self.destination.is_blank()
    }

    fn send(&self, connected: bool) -> Option<SendAction> {
        self.can_send(connected).then(|| SendAction::Send {
            destination: self.destination.value().trim().to_string(),
            body: self.editor.content(),
        })
    }

    /// Replace the body with its pretty-printed JSON.
    ///
    /// Does nothing in raw mode.
    pub fn format_body(&mut self) -> Option<SendAction> {
        if self.mode != BodyMode::Json {
            return None;
        }
        match format_json(&self.editor.content()) {
            Ok(formatted) => {
                self.editor.set_content(&formatted);
                None
            }
            Err(e) => Some(SendAction::FormatFailed(e.to_string())),
        }
    }

    pub fn clear_body(&mut self) -> SendAction {
        self.editor.clear();
        SendAction::Cleared
    }

    pub fn toggle_mode(&mut self) -> SendAction {
        self.mode = self.mode.toggled();
        self.editor.set_json_highlight(self.mode == BodyMode::Json);
        SendAction::ModeChanged(self.mode)
    }

    /// Handle a key press while `focus` is inside this tab.
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        focus: KeyContext,
        connected: bool,
    ) -> Option<SendAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('f'), KeyModifiers::CONTROL) => self.format_body(),
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => Some(self.clear_body()),
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => Some(self.toggle_mode()),
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => self.send(connected),
            (KeyCode::Enter, _) if focus == KeyContext::SendDestination => self.send(connected),
            _ => {
                match focus {
                    KeyContext::SendDestination => {
                        self.destination.handle_input(key);
                    }
                    KeyContext::BodyEditor => {
                        self.editor.handle_input(key);
                    }
                    _ => {}
                }
                None
            }
        }
    }

    pub fn paste(&mut self, text: &str, focus: KeyContext) {
        match focus {
            KeyContext::SendDestination => {
                self.destination.paste(text);
            }
            KeyContext::BodyEditor => {
                self.editor.insert_str(text);
            }
            _ => {}
        }
    }

    /// Which part of the tab sits under a screen position.
    pub fn focus_at(&self, x: u16, y: u16) -> Option<KeyContext> {
        let position = ratatui::layout::Position::new(x, y);
        if self.destination_area.contains(position) {
            Some(KeyContext::SendDestination)
        } else if self.editor_area.contains(position) {
            Some(KeyContext::BodyEditor)
        } else {
            None
        }
    }

    /// A click on the Send button. Sends when sending is possible.
    pub fn click(&self, x: u16, y: u16, connected: bool) -> Option<SendAction> {
        if self.button_area.contains(ratatui::layout::Position::new(x, y)) {
            self.send(connected)
        } else {
            None
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        focus: KeyContext,
        connected: bool,
        theme: &Theme,
    ) {
        let [input_row, toolbar, editor_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [input_area, button_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(10)]).areas(input_row);

        self.destination_area = input_area;
        self.editor_area = editor_area;
        self.button_area = button_area;

        self.destination
            .render(frame, input_area, focus == KeyContext::SendDestination, false);
        let button = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(" ➤ Send", theme.button(self.can_send(connected)))),
        ]);
        frame.render_widget(button, button_area);

        let key = Style::default().fg(Color::Cyan);
        let muted = Style::default().fg(theme.muted);
        let mut spans = vec![
            Span::styled(" Body: ", muted),
            Span::styled(self.mode.label(), Style::default().fg(theme.fg)),
            Span::styled(" ^R ", key),
            Span::styled(" Clear", muted),
            Span::styled(" ^L ", key),
        ];
        if self.mode == BodyMode::Json {
            spans.push(Span::styled(" Format JSON", muted));
            spans.push(Span::styled(" ^F", key));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), toolbar);

        let title = format!("Body ({})", self.mode.label());
        self.editor
            .render(frame, editor_area, &title, focus == KeyContext::BodyEditor);

        if focus == KeyContext::SendDestination {
            self.destination.render_options(frame, input_area, area);
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

    fn type_into(panel: &mut SendPanel, focus: KeyContext, text: &str) {
        for c in text.chars() {
            panel.handle_input(key(KeyCode::Char(c)), focus, true);
        }
    }

    #[test]
    fn test_send_requires_connection_and_destination() {
        let mut panel = SendPanel::new(BodyMode::Json);
        assert!(!panel.can_send(true));

        type_into(&mut panel, KeyContext::SendDestination, "  ");
        assert!(!panel.can_send(true));

        type_into(&mut panel, KeyContext::SendDestination, "/app/hello");
        assert!(panel.can_send(true));
        assert!(!panel.can_send(false));
        assert_eq!(
            panel.handle_input(key(KeyCode::Enter), KeyContext::SendDestination, false),
            None
        );
    }

    #[test]
    fn test_enter_sends_editor_content() {
        let mut panel = SendPanel::new(BodyMode::Raw);
        type_into(&mut panel, KeyContext::SendDestination, "/app/hello");
        panel.set_body("ping");

        let action = panel.handle_input(key(KeyCode::Enter), KeyContext::SendDestination, true);
        assert_eq!(
            action,
            Some(SendAction::Send {
                destination: "/app/hello".to_string(),
                body: "ping".to_string(),
            })
        );
    }

    #[test]
    fn test_ctrl_s_sends_from_editor() {
        let mut panel = SendPanel::new(BodyMode::Raw);
        panel.destination_mut().set_value("/app/x");
        let action = panel.handle_input(ctrl('s'), KeyContext::BodyEditor, true);
        assert!(matches!(action, Some(SendAction::Send { .. })));
    }

    #[test]
    fn test_format_json_pretty_prints() {
        let mut panel = SendPanel::new(BodyMode::Json);
        panel.set_body(r#"{"a":[1,2]}"#);
        assert_eq!(panel.handle_input(ctrl('f'), KeyContext::BodyEditor, false), None);
        assert_eq!(panel.body(), "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn test_format_json_failure_reports_error() {
        let mut panel = SendPanel::new(BodyMode::Json);
        panel.set_body("{oops");
        let action = panel.handle_input(ctrl('f'), KeyContext::BodyEditor, false);
        assert!(matches!(action, Some(SendAction::FormatFailed(_))));
        assert_eq!(panel.body(), "{oops");
    }

    #[test]
    fn test_format_is_disabled_in_raw_mode() {
        let mut panel = SendPanel::new(BodyMode::Raw);
        panel.set_body("{oops");
        assert_eq!(panel.format_body(), None);
        assert_eq!(panel.body(), "{oops");
    }

    #[test]
    fn test_clear_and_toggle() {
        let mut panel = SendPanel::new(BodyMode::Json);
        panel.set_body("x");
        assert_eq!(
            panel.handle_input(ctrl('l'), KeyContext::BodyEditor, false),
            Some(SendAction::Cleared)
        );
        assert_eq!(panel.body(), "");
        assert_eq!(
            panel.handle_input(ctrl('r'), KeyContext::BodyEditor, false),
            Some(SendAction::ModeChanged(BodyMode::Raw))
        );
        assert_eq!(panel.mode(), BodyMode::Raw);
    }

    #[test]
    fn test_click_on_send_button() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut panel = SendPanel::new(BodyMode::Raw);
        panel.destination_mut().set_value("/app/hello");
        panel.set_body("ping");
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| panel.render(f, f.area(), KeyContext::BodyEditor, true, &theme))
            .unwrap();

        // Button occupies the last ten columns of the input row
        assert_eq!(panel.click(52, 1, false), None);
        assert_eq!(panel.click(10, 1, true), None);
        assert_eq!(
            panel.click(52, 1, true),
            Some(SendAction::Send {
                destination: "/app/hello".to_string(),
                body: "ping".to_string(),
            })
        );
    }

    #[test]
    fn test_paste_goes_to_focused_part() {
        let mut panel = SendPanel::new(BodyMode::Json);
        panel.paste("{\n}", KeyContext::BodyEditor);
        panel.paste("/app/p", KeyContext::SendDestination);
        assert_eq!(panel.body(), "{\n}");
        assert_eq!(panel.destination().value(), "/app/p");
    }
}
