//! Subscribe tab: destination input and the list of live subscriptions.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::events::KeyContext;
use crate::stomp::SubscriptionId;
use crate::ui::components::MemorableInput;
use crate::ui::theme::Theme;

/// A subscription the user created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub destination: String,
}

/// What the subscribe tab asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeAction {
    Subscribe(String),
    Unsubscribe(Subscription),
}

/// The subscribe tab.
pub struct SubscribePanel {
    destination: MemorableInput,
    subscriptions: Vec<Subscription>,
    list_state: ListState,
    destination_area: Rect,
    list_area: Rect,
    button_area: Rect,
}

impl Default for SubscribePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscribePanel {
    pub fn new() -> Self {
        Self {
            destination: MemorableInput::new("Destination", "/topic/greetings"),
            subscriptions: Vec::new(),
            list_state: ListState::default(),
            destination_area: Rect::default(),
            list_area: Rect::default(),
            button_area: Rect::default(),
        }
    }

    pub fn destination(&self) -> &MemorableInput {
        &self.destination
    }

    pub fn destination_mut(&mut self) -> &mut MemorableInput {
        &mut self.destination
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn can_subscribe(&self, connected: bool) -> bool {
        connected && !self.destination.is_blank()
    }

    /// Record a subscription the session accepted and empty the input.
    ///
    /// The submitted destination is still remembered as an option.
    pub fn add(&mut self, id: SubscriptionId, destination: String) {
        self.destination.blur(Instant::now());
        self.destination.clear();
        self.subscriptions.push(Subscription { id, destination });
        if self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        }
    }

    /// Forget every subscription, e.g. after the session ended.
    pub fn clear_subscriptions(&mut self) {
        self.subscriptions.clear();
        self.list_state.select(None);
    }

    fn remove_selected(&mut self) -> Option<Subscription> {
        let index = self.list_state.selected()?;
        if index >= self.subscriptions.len() {
            return None;
        }
        let removed = self.subscriptions.remove(index);
        let selected = match self.subscriptions.len() {
            0 => None,
            len => Some(index.min(len - 1)),
        };
        self.list_state.select(selected);
        Some(removed)
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.subscriptions.len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if down => (i + 1).min(len - 1),
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        focus: KeyContext,
        connected: bool,
    ) -> Option<SubscribeAction> {
        match focus {
            KeyContext::SubscribeDestination => match key.code {
                KeyCode::Enter => self
                    .can_subscribe(connected)
                    .then(|| SubscribeAction::Subscribe(self.destination.value().trim().to_string())),
                _ => {
                    self.destination.handle_input(key);
                    None
                }
            },
            KeyContext::Subscriptions => match (key.code, key.modifiers) {
                (KeyCode::Char('j') | KeyCode::Down, KeyModifiers::NONE) => {
                    self.move_selection(true);
                    None
                }
                (KeyCode::Char('k') | KeyCode::Up, KeyModifiers::NONE) => {
                    self.move_selection(false);
                    None
                }
                (KeyCode::Char('d') | KeyCode::Delete, _) => {
                    self.remove_selected().map(SubscribeAction::Unsubscribe)
                }
                _ => None,
            },
            _ => None,
        }
    }

    pub fn paste(&mut self, text: &str, focus: KeyContext) {
        if focus == KeyContext::SubscribeDestination {
            self.destination.paste(text);
        }
    }

    /// Which part of the tab sits under a screen position.
    pub fn focus_at(&self, x: u16, y: u16) -> Option<KeyContext> {
        let position = Position::new(x, y);
        if self.destination_area.contains(position) {
            Some(KeyContext::SubscribeDestination)
        } else if self.list_area.contains(position) {
            Some(KeyContext::Subscriptions)
        } else {
            None
        }
    }

    /// A click on the Subscribe button.
    pub fn click(&self, x: u16, y: u16, connected: bool) -> Option<SubscribeAction> {
        let on_button = self.button_area.contains(Position::new(x, y));
        (on_button && self.can_subscribe(connected))
            .then(|| SubscribeAction::Subscribe(self.destination.value().trim().to_string()))
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        focus: KeyContext,
        connected: bool,
        theme: &Theme,
    ) {
        let [input_row, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);
        let [input_area, button_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(14)]).areas(input_row);
        self.destination_area = input_area;
        self.list_area = list_area;
        self.button_area = button_area;

        self.destination.render(
            frame,
            input_area,
            focus == KeyContext::SubscribeDestination,
            false,
        );
        let button = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                " 🔔 Subscribe",
                theme.button(self.can_subscribe(connected)),
            )),
        ]);
        frame.render_widget(button, button_area);

        let list_focused = focus == KeyContext::Subscriptions;
        let items: Vec<ListItem> = self
            .subscriptions
            .iter()
            .map(|s| {
                ListItem::new(Line::from(vec![
                    Span::styled(s.destination.clone(), Style::default().fg(Color::LightYellow)),
                    Span::styled(format!("  ({})", s.id), Style::default().fg(theme.muted)),
                ]))
            })
            .collect();
        let border_style = if list_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.muted)
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!(" Subscriptions ({}) ", self.subscriptions.len()))
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("› ");
        frame.render_stateful_widget(list, list_area, &mut self.list_state);

        if focus == KeyContext::SubscribeDestination {
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

    #[test]
    fn test_subscribe_requires_connection_and_destination() {
        let mut panel = SubscribePanel::new();
        let enter = key(KeyCode::Enter);
        assert_eq!(panel.handle_input(enter, KeyContext::SubscribeDestination, true), None);

        panel.destination_mut().set_value("/topic/greetings");
        assert_eq!(panel.handle_input(enter, KeyContext::SubscribeDestination, false), None);
        assert_eq!(
            panel.handle_input(enter, KeyContext::SubscribeDestination, true),
            Some(SubscribeAction::Subscribe("/topic/greetings".to_string()))
        );
    }

    #[test]
    fn test_add_clears_input_and_remembers_destination() {
        let mut panel = SubscribePanel::new();
        panel.destination_mut().set_value("/topic/a");
        panel.add("sub-0".to_string(), "/topic/a".to_string());

        assert!(panel.destination().is_blank());
        assert_eq!(panel.subscriptions().len(), 1);

        panel
            .destination_mut()
            .tick(Instant::now() + std::time::Duration::from_millis(400));
        assert_eq!(panel.destination().options(), &["/topic/a".to_string()]);
    }

    #[test]
    fn test_click_on_subscribe_button() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut panel = SubscribePanel::new();
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|f| panel.render(f, f.area(), KeyContext::Subscriptions, true, &theme))
            .unwrap();

        assert_eq!(panel.click(50, 1, true), None);
        panel.destination_mut().set_value("/topic/greetings");
        assert_eq!(panel.click(50, 1, false), None);
        assert_eq!(panel.click(10, 1, true), None);
        assert_eq!(
            panel.click(50, 1, true),
            Some(SubscribeAction::Subscribe("/topic/greetings".to_string()))
        );
    }

    #[test]
    fn test_unsubscribe_removes_selected_entry() {
        let mut panel = SubscribePanel::new();
        panel.add("sub-0".to_string(), "/topic/a".to_string());
        panel.add("sub-1".to_string(), "/topic/b".to_string());

        panel.handle_input(key(KeyCode::Char('j')), KeyContext::Subscriptions, true);
        let action = panel.handle_input(key(KeyCode::Char('d')), KeyContext::Subscriptions, true);
        assert_eq!(
            action,
            Some(SubscribeAction::Unsubscribe(Subscription {
                id: "sub-1".to_string(),
                destination: "/topic/b".to_string(),
            }))
        );
        assert_eq!(panel.subscriptions().len(), 1);
        assert_eq!(panel.subscriptions()[0].id, "sub-0");
    }

    #[test]
    fn test_unsubscribe_on_empty_list_is_noop() {
        let mut panel = SubscribePanel::new();
        assert_eq!(
            panel.handle_input(key(KeyCode::Delete), KeyContext::Subscriptions, true),
            None
        );
    }

    #[test]
    fn test_same_destination_twice_keeps_both_entries() {
        let mut panel = SubscribePanel::new();
        panel.add("sub-0".to_string(), "/topic/a".to_string());
        panel.add("sub-1".to_string(), "/topic/a".to_string());
        panel.handle_input(key(KeyCode::Char('d')), KeyContext::Subscriptions, true);
        assert_eq!(panel.subscriptions()[0].id, "sub-1");
    }
}
