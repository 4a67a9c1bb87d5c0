//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application. Terminal input arrives through
//! [`App::update`], broker traffic through [`App::poll_session`], and the
//! screen is drawn by [`App::view`].

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::config::{BodyMode, Settings};
use crate::error::AppError;
use crate::events::{Event, KeyContext};
use crate::stomp::{
    is_valid_broker_url, summarize_headers, FrameCommand, SessionEvent, StompSession,
};
use crate::ui::{
    render_status_bar, DataView, FramesView, NotificationManager, SendAction, SendPanel,
    SubscribeAction, SubscribePanel, TableAction, TextInput, Theme,
};

/// Tab titles, in order.
const TAB_TITLES: [&str; 2] = ["Send", "Subscribe"];

/// Width of the Connect/Disconnect button.
const CONNECT_BUTTON_WIDTH: u16 = 16;

/// The tab shown under the URL bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Send,
    Subscribe,
}

impl Tab {
    fn index(self) -> usize {
        match self {
            Tab::Send => 0,
            Tab::Subscribe => 1,
        }
    }

    fn toggled(self) -> Self {
        match self {
            Tab::Send => Tab::Subscribe,
            Tab::Subscribe => Tab::Send,
        }
    }

    /// Focus order while this tab is shown.
    fn focus_order(self) -> [KeyContext; 5] {
        let (first, second) = match self {
            Tab::Send => (KeyContext::SendDestination, KeyContext::BodyEditor),
            Tab::Subscribe => (KeyContext::SubscribeDestination, KeyContext::Subscriptions),
        };
        [
            KeyContext::UrlBar,
            first,
            second,
            KeyContext::FrameTable,
            KeyContext::DataEditor,
        ]
    }
}

/// Screen rectangles from the last render, used to route mouse clicks.
#[derive(Debug, Clone, Copy, Default)]
struct Areas {
    url: Rect,
    connect_button: Rect,
    tabs: Rect,
    frames: Rect,
    data: Rect,
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    should_quit: bool,
    settings: Settings,
    theme: Theme,
    url: TextInput,
    /// The live session, if any.
    session: Option<StompSession>,
    /// Events of the live session. Replaced on every connect.
    session_events: Option<mpsc::UnboundedReceiver<SessionEvent>>,
    /// Whether the broker acknowledged CONNECT.
    connected: bool,
    tab: Tab,
    focus: KeyContext,
    send: SendPanel,
    subscribe: SubscribePanel,
    frames: FramesView,
    data: DataView,
    notifications: NotificationManager,
    areas: Areas,
}

impl App {
    /// Create a new application instance.
    ///
    /// `url` pre-fills the URL bar; `body_mode` is the initial mode of the
    /// send body editor.
    pub fn new(settings: Settings, url: Option<String>, body_mode: BodyMode) -> Self {
        debug!("Creating new application instance");

        let theme = Theme::default();
        let mut url_input = TextInput::with_value(url.unwrap_or_default());
        url_input.set_placeholder("ws://localhost:8080/ws");

        Self {
            should_quit: false,
            notifications: NotificationManager::with_max_visible(settings.max_notifications),
            settings,
            url: url_input,
            session: None,
            session_events: None,
            connected: false,
            tab: Tab::Send,
            focus: KeyContext::UrlBar,
            send: SendPanel::new(body_mode),
            subscribe: SubscribePanel::new(),
            frames: FramesView::new(&theme),
            data: DataView::new(),
            theme,
            areas: Areas::default(),
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn focus(&self) -> KeyContext {
        self.focus
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    pub fn frames(&self) -> &FramesView {
        &self.frames
    }

    /// Report an error to the user without interrupting them.
    pub fn handle_error(&mut self, error: &AppError) {
        warn!(error = %error, critical = error.is_critical(), "Application error");
        self.notifications.error("Error", error.user_message());
    }

    /// Connect is offered for any well-formed URL, and Disconnect while a
    /// session is open.
    pub fn can_toggle_connection(&self) -> bool {
        self.session.is_some() || is_valid_broker_url(self.url.value().trim())
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.quit();
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            Event::Paste(text) => self.handle_paste(&text),
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.handle_tick(Instant::now()),
        }
    }

    fn quit(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
        }
        self.should_quit = true;
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c' | 'q'), KeyModifiers::CONTROL) => {
                self.quit();
                return;
            }
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                self.switch_tab();
                return;
            }
            (KeyCode::BackTab, _) => {
                self.cycle_focus(false);
                return;
            }
            (KeyCode::Tab, KeyModifiers::NONE) => {
                let accepted = match self.focus {
                    KeyContext::SendDestination => {
                        self.send.destination_mut().accept_highlighted()
                    }
                    KeyContext::SubscribeDestination => {
                        self.subscribe.destination_mut().accept_highlighted()
                    }
                    _ => false,
                };
                if !accepted {
                    self.cycle_focus(true);
                }
                return;
            }
            (KeyCode::Char('q'), KeyModifiers::NONE)
                if matches!(self.focus, KeyContext::FrameTable | KeyContext::Subscriptions) =>
            {
                self.quit();
                return;
            }
            _ => {}
        }

        match self.focus {
            KeyContext::UrlBar => {
                if key.code == KeyCode::Enter {
                    self.toggle_connection();
                } else {
                    self.url.handle_input(key);
                }
            }
            KeyContext::SendDestination | KeyContext::BodyEditor => {
                if let Some(action) = self.send.handle_input(key, self.focus, self.connected) {
                    self.handle_send_action(action);
                }
            }
            KeyContext::SubscribeDestination | KeyContext::Subscriptions => {
                if let Some(action) = self.subscribe.handle_input(key, self.focus, self.connected)
                {
                    self.handle_subscribe_action(action);
                }
            }
            KeyContext::FrameTable => {
                let action = self.frames.handle_input(key);
                self.handle_table_action(action);
            }
            KeyContext::DataEditor => {
                self.data.handle_input(key);
            }
        }
    }

    fn handle_mouse_event(&mut self, event: MouseEvent) {
        let position = Position::new(event.column, event.row);

        // A column drag owns the mouse until the button is released
        if self.frames.is_dragging() {
            let action = self.frames.handle_mouse(event);
            self.handle_table_action(action);
            return;
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.areas.connect_button.contains(position) {
                    self.toggle_connection();
                } else if self.areas.url.contains(position) {
                    self.set_focus(KeyContext::UrlBar);
                } else if self.areas.tabs.contains(position) {
                    if let Some(tab) = tab_at(self.areas.tabs, event.column) {
                        if tab != self.tab {
                            self.switch_tab();
                        }
                    }
                } else if self.areas.frames.contains(position) {
                    self.set_focus(KeyContext::FrameTable);
                    let action = self.frames.handle_mouse(event);
                    self.handle_table_action(action);
                } else if self.areas.data.contains(position) {
                    self.set_focus(KeyContext::DataEditor);
                } else {
                    let (x, y) = (event.column, event.row);
                    match self.tab {
                        Tab::Send => {
                            if let Some(action) = self.send.click(x, y, self.connected) {
                                self.handle_send_action(action);
                                return;
                            }
                        }
                        Tab::Subscribe => {
                            if let Some(action) = self.subscribe.click(x, y, self.connected) {
                                self.handle_subscribe_action(action);
                                return;
                            }
                        }
                    }
                    let target = match self.tab {
                        Tab::Send => self.send.focus_at(x, y),
                        Tab::Subscribe => self.subscribe.focus_at(x, y),
                    };
                    if let Some(focus) = target {
                        self.set_focus(focus);
                    }
                }
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp
                if self.areas.frames.contains(position) =>
            {
                let action = self.frames.handle_mouse(event);
                self.handle_table_action(action);
            }
            _ => {}
        }
    }

    fn handle_paste(&mut self, text: &str) {
        match self.focus {
            KeyContext::UrlBar => {
                self.url.insert_str(text);
            }
            KeyContext::SendDestination | KeyContext::BodyEditor => {
                self.send.paste(text, self.focus)
            }
            KeyContext::SubscribeDestination => self.subscribe.paste(text, self.focus),
            KeyContext::DataEditor => self.data.paste(text),
            KeyContext::Subscriptions | KeyContext::FrameTable => {}
        }
    }

    fn handle_tick(&mut self, now: Instant) {
        self.notifications.tick();
        self.send.destination_mut().tick(now);
        self.subscribe.destination_mut().tick(now);
    }

    /// Move focus, blurring a destination input that loses it.
    fn set_focus(&mut self, focus: KeyContext) {
        if focus == self.focus {
            return;
        }
        let now = Instant::now();
        match self.focus {
            KeyContext::SendDestination => self.send.destination_mut().blur(now),
            KeyContext::SubscribeDestination => self.subscribe.destination_mut().blur(now),
            _ => {}
        }
        trace!(from = ?self.focus, to = ?focus, "Focus changed");
        self.focus = focus;
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.tab.focus_order();
        let current = order.iter().position(|c| *c == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.set_focus(order[next]);
    }

    fn switch_tab(&mut self) {
        let old_order = self.tab.focus_order();
        let position = old_order.iter().position(|c| *c == self.focus);
        self.tab = self.tab.toggled();
        debug!(tab = ?self.tab, "Switched tab");
        // Keep focus on the same slot when it belonged to the old tab
        if let Some(position @ 1..=2) = position {
            self.set_focus(self.tab.focus_order()[position]);
        }
    }

    /// Connect when idle, disconnect when a session is open.
    pub fn toggle_connection(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
            self.session_events = None;
            self.end_session();
            self.notifications.success("Disconnected", session.url().as_str());
            return;
        }

        let url = self.url.value().trim().to_string();
        if !is_valid_broker_url(&url) {
            debug!(url = %url, "Connect ignored: URL is not a broker address");
            return;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        match StompSession::open(&url, self.settings.connect_timeout(), tx) {
            Ok(session) => {
                info!(url = %url, "Connecting");
                self.session = Some(session);
                self.session_events = Some(rx);
            }
            Err(e) => {
                let error = AppError::from(e);
                warn!(error = %error, "Could not open session");
                self.notifications
                    .error("WebSocket error", error.user_message());
            }
        }
    }

    fn end_session(&mut self) {
        self.connected = false;
        self.subscribe.clear_subscriptions();
    }

    /// Drain every event the session has produced since the last call.
    pub fn poll_session(&mut self) {
        let mut pending = Vec::new();
        if let Some(rx) = self.session_events.as_mut() {
            while let Ok(event) = rx.try_recv() {
                pending.push(event);
            }
        }
        for event in pending {
            self.handle_session_event(event);
        }
    }

    /// Apply one broker event.
    pub fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Connected { headers } => {
                info!("Connected");
                self.connected = true;
                self.notifications
                    .success("Connected", summarize_headers(&headers));
            }
            SessionEvent::Message {
                subscription,
                destination,
                body,
            } => {
                trace!(subscription = %subscription, destination = %destination, "Message");
                self.frames.push(FrameCommand::Message, destination, body);
            }
            SessionEvent::Receipt { receipt_id } => {
                debug!(receipt_id = %receipt_id, "Receipt");
            }
            SessionEvent::ServerError { message, body } => {
                warn!(message = %message, "Broker error");
                self.frames.push(FrameCommand::Error, "", body);
                self.notifications.error("STOMP error", message);
            }
            SessionEvent::WebSocketError { reason } => {
                if let Some(mut session) = self.session.take() {
                    session.close();
                }
                self.session_events = None;
                self.end_session();
                self.notifications.error("WebSocket error", reason);
            }
            SessionEvent::Disconnected { headers } => {
                self.session = None;
                self.session_events = None;
                self.end_session();
                self.notifications
                    .success("Disconnected", summarize_headers(&headers));
            }
        }
    }

    fn handle_send_action(&mut self, action: SendAction) {
        match action {
            SendAction::Send { destination, body } => {
                let Some(session) = self.session.as_ref() else {
                    return;
                };
                match session.publish(&destination, &body) {
                    Ok(()) => {
                        self.frames.push(FrameCommand::Send, destination, body);
                    }
                    Err(e) => self
                        .notifications
                        .error("Send failed", AppError::from(e).user_message()),
                }
            }
            SendAction::Cleared => self.notifications.success("Successfully cleared", ""),
            SendAction::FormatFailed(reason) => {
                self.notifications.error("Format JSON failed", reason)
            }
            SendAction::ModeChanged(mode) => debug!(mode = mode.label(), "Body mode changed"),
        }
    }

    fn handle_subscribe_action(&mut self, action: SubscribeAction) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match action {
            SubscribeAction::Subscribe(destination) => match session.subscribe(&destination) {
                Ok(id) => self.subscribe.add(id, destination),
                Err(e) => self
                    .notifications
                    .error("Subscribe failed", AppError::from(e).user_message()),
            },
            SubscribeAction::Unsubscribe(subscription) => {
                if let Err(e) = session.unsubscribe(&subscription.id) {
                    self.notifications
                        .error("Unsubscribe failed", AppError::from(e).user_message());
                }
            }
        }
    }

    fn handle_table_action(&mut self, action: Option<TableAction<usize>>) {
        match action {
            Some(TableAction::RowSelected(key)) => {
                if let Some(record) = self.frames.records().get(key) {
                    self.data.show(key, &record.body);
                }
            }
            Some(TableAction::ColumnResized { index, width }) => {
                trace!(index, width, "Column resized");
            }
            None => {}
        }
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header);

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(body);
        self.render_left(frame, left);

        let [frames_area, data_area] =
            Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(right);
        self.areas.frames = frames_area;
        self.areas.data = data_area;
        self.frames
            .render(frame, frames_area, self.focus == KeyContext::FrameTable);
        self.data
            .render(frame, data_area, self.focus == KeyContext::DataEditor);

        render_status_bar(frame, footer, self.focus, self.connected);

        self.notifications.render(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " LazyStomp ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(session) = &self.session {
            let state = if self.connected { "" } else { " (connecting…)" };
            spans.push(Span::styled(
                format!(" {}{}", session.url(), state),
                Style::default().fg(self.theme.muted),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_left(&mut self, frame: &mut Frame, area: Rect) {
        let [url_row, tabs_area, panel_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [url_area, button_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(CONNECT_BUTTON_WIDTH),
        ])
        .areas(url_row);
        self.areas.url = url_area;
        self.areas.connect_button = button_area;
        self.areas.tabs = tabs_area;

        self.url
            .render_with_label(frame, url_area, "URL", self.focus == KeyContext::UrlBar, false);
        let label = if self.session.is_some() {
            " ⏏ Disconnect"
        } else {
            " 🔗 Connect"
        };
        let button = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                label,
                self.theme.button(self.can_toggle_connection()),
            )),
        ]);
        frame.render_widget(button, button_area);

        let tabs = Tabs::new(TAB_TITLES)
            .select(self.tab.index())
            .style(Style::default().fg(self.theme.muted))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            );
        frame.render_widget(tabs, tabs_area);

        match self.tab {
            Tab::Send => {
                self.send
                    .render(frame, panel_area, self.focus, self.connected, &self.theme)
            }
            Tab::Subscribe => {
                self.subscribe
                    .render(frame, panel_area, self.focus, self.connected, &self.theme)
            }
        }
    }
}

/// Which tab title sits under column `x`.
///
/// Titles are drawn with one cell of padding on each side and a one-cell
/// divider between them.
fn tab_at(area: Rect, x: u16) -> Option<Tab> {
    let mut start = area.x;
    for (index, title) in TAB_TITLES.iter().enumerate() {
        let end = start + title.chars().count() as u16 + 2;
        if x >= start && x < end {
            return Some(if index == 0 { Tab::Send } else { Tab::Subscribe });
        }
        start = end + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{SinkExt, StreamExt};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    fn app() -> App {
        App::new(Settings::default(), None, BodyMode::Json)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.update(key(KeyCode::Char(c)));
        }
    }

    fn find_symbol(terminal: &Terminal<TestBackend>, symbol: &str) -> Option<(u16, u16)> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .iter()
            .position(|c| c.symbol() == symbol)
            .map(|i| ((i % width) as u16, (i / width) as u16))
    }

    fn titles(app: &App) -> Vec<String> {
        app.notifications().iter().map(|n| n.title.clone()).collect()
    }

    #[test]
    fn test_app_new() {
        let app = App::new(Settings::default(), Some("ws://h/ws".into()), BodyMode::Raw);
        assert!(!app.should_quit());
        assert!(!app.is_connected());
        assert_eq!(app.focus(), KeyContext::UrlBar);
        assert_eq!(app.tab(), Tab::Send);
        assert_eq!(app.url.value(), "ws://h/ws");
        assert_eq!(app.send.mode(), BodyMode::Raw);
    }

    #[test]
    fn test_quit_on_ctrl_c_and_ctrl_q() {
        let mut app = app();
        app.update(ctrl('c'));
        assert!(app.should_quit());

        let mut app = self::app();
        app.update(ctrl('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_plain_q_is_text_in_inputs() {
        let mut app = app();
        app.update(key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert_eq!(app.url.value(), "q");
    }

    #[test]
    fn test_quit_event() {
        let mut app = app();
        app.update(Event::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_tab_cycles_focus_within_tab() {
        let mut app = app();
        let expected = [
            KeyContext::SendDestination,
            KeyContext::BodyEditor,
            KeyContext::FrameTable,
            KeyContext::DataEditor,
            KeyContext::UrlBar,
        ];
        for context in expected {
            app.update(key(KeyCode::Tab));
            assert_eq!(app.focus(), context);
        }
        app.update(key(KeyCode::BackTab));
        assert_eq!(app.focus(), KeyContext::DataEditor);
    }

    #[test]
    fn test_switch_tab_moves_focus_to_matching_slot() {
        let mut app = app();
        app.update(key(KeyCode::Tab));
        assert_eq!(app.focus(), KeyContext::SendDestination);
        app.update(ctrl('t'));
        assert_eq!(app.tab(), Tab::Subscribe);
        assert_eq!(app.focus(), KeyContext::SubscribeDestination);

        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Tab));
        assert_eq!(app.focus(), KeyContext::FrameTable);
        app.update(ctrl('t'));
        assert_eq!(app.focus(), KeyContext::FrameTable);
    }

    #[test]
    fn test_connect_requires_valid_url() {
        let mut app = app();
        type_text(&mut app, "http://localhost");
        assert!(!app.can_toggle_connection());
        app.update(key(KeyCode::Enter));
        assert!(app.session.is_none());
    }

    #[test]
    fn test_connected_event_notifies_with_headers() {
        let mut app = app();
        app.handle_session_event(SessionEvent::Connected {
            headers: vec![
                ("version".to_string(), "1.2".to_string()),
                ("server".to_string(), "test".to_string()),
            ],
        });
        assert!(app.is_connected());
        let toast = app.notifications().iter().last().unwrap();
        assert_eq!(toast.title, "Connected");
        assert_eq!(toast.description.as_deref(), Some("version: 1.2, server: test"));
    }

    #[test]
    fn test_message_event_appends_row() {
        let mut app = app();
        app.handle_session_event(SessionEvent::Message {
            subscription: "sub-0".to_string(),
            destination: "/topic/a".to_string(),
            body: "hi".to_string(),
        });
        let record = &app.frames().records()[0];
        assert_eq!(record.command, FrameCommand::Message);
        assert_eq!(record.destination, "/topic/a");
    }

    #[test]
    fn test_websocket_error_disconnects() {
        let mut app = app();
        app.handle_session_event(SessionEvent::Connected { headers: vec![] });
        app.handle_session_event(SessionEvent::WebSocketError {
            reason: "reset".to_string(),
        });
        assert!(!app.is_connected());
        assert_eq!(titles(&app).last().map(String::as_str), Some("WebSocket error"));
    }

    #[test]
    fn test_server_error_adds_error_row() {
        let mut app = app();
        app.handle_session_event(SessionEvent::ServerError {
            message: "bad destination".to_string(),
            body: "details".to_string(),
        });
        assert_eq!(app.frames().records()[0].command, FrameCommand::Error);
        assert!(titles(&app).contains(&"STOMP error".to_string()));
    }

    #[test]
    fn test_send_is_ignored_while_disconnected() {
        let mut app = app();
        app.update(key(KeyCode::Tab));
        type_text(&mut app, "/app/hello");
        app.update(key(KeyCode::Enter));
        assert!(app.frames().is_empty());
    }

    #[test]
    fn test_clear_and_format_notifications() {
        let mut app = app();
        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Tab));
        assert_eq!(app.focus(), KeyContext::BodyEditor);

        type_text(&mut app, "{oops");
        app.update(ctrl('f'));
        assert!(titles(&app).contains(&"Format JSON failed".to_string()));

        app.update(ctrl('l'));
        assert!(titles(&app).contains(&"Successfully cleared".to_string()));
        assert_eq!(app.send.body(), "");
    }

    #[test]
    fn test_selecting_row_loads_data_editor() {
        let mut app = app();
        for body in ["one", "two"] {
            app.handle_session_event(SessionEvent::Message {
                subscription: "sub-0".to_string(),
                destination: "/topic/a".to_string(),
                body: body.to_string(),
            });
        }
        app.set_focus(KeyContext::FrameTable);
        app.update(key(KeyCode::Char('G')));
        assert_eq!(app.data.content(), "two");
        assert_eq!(app.data.shown(), Some(1));
    }

    #[test]
    fn test_blur_remembers_destination_after_delay() {
        let mut app = app();
        app.update(key(KeyCode::Tab));
        type_text(&mut app, "/app/hello");
        app.update(key(KeyCode::Tab));

        app.handle_tick(Instant::now() + Duration::from_millis(350));
        assert_eq!(
            app.send.destination().options(),
            &["/app/hello".to_string()]
        );
    }

    #[test]
    fn test_handle_error_shows_user_message() {
        let mut app = app();
        app.handle_error(&AppError::other("config is broken"));
        let toast = app.notifications().iter().last().unwrap();
        assert_eq!(toast.title, "Error");
        assert_eq!(toast.description.as_deref(), Some("config is broken"));
    }

    #[test]
    fn test_tab_at() {
        let area = Rect::new(10, 0, 30, 1);
        assert_eq!(tab_at(area, 10), Some(Tab::Send));
        assert_eq!(tab_at(area, 15), Some(Tab::Send));
        assert_eq!(tab_at(area, 16), None);
        assert_eq!(tab_at(area, 17), Some(Tab::Subscribe));
        assert_eq!(tab_at(area, 40), None);
    }

    #[test]
    fn test_view_renders_panes() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|f| app.view(f)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("LazyStomp"));
        assert!(text.contains("Connect"));
        assert!(text.contains("Frames"));
        assert!(text.contains("Subscribe"));
    }

    #[tokio::test]
    async fn test_connect_send_and_disconnect_against_broker() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let broker = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let _connect = ws.next().await.unwrap().unwrap();
            ws.send(WsMessage::text("CONNECTED\nversion:1.2\n\n\0".to_string()))
                .await
                .unwrap();
            let send = ws.next().await.unwrap().unwrap();
            send.to_text().unwrap().to_string()
        });

        let mut app = App::new(
            Settings::default(),
            Some(format!("ws://{}/ws", addr)),
            BodyMode::Raw,
        );
        app.update(key(KeyCode::Enter));
        assert!(app.session.is_some());

        for _ in 0..100 {
            app.poll_session();
            if app.is_connected() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(app.is_connected());

        app.update(key(KeyCode::Tab));
        type_text(&mut app, "/app/hello");

        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|f| app.view(f)).unwrap();
        let (column, row) = find_symbol(&terminal, "➤").unwrap();
        app.update(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(app.frames().records()[0].command, FrameCommand::Send);

        let sent = broker.await.unwrap();
        assert!(sent.starts_with("SEND\n"));
        assert!(sent.contains("destination:/app/hello"));

        app.set_focus(KeyContext::UrlBar);
        app.update(key(KeyCode::Enter));
        assert!(!app.is_connected());
        assert!(app.session.is_none());
        assert!(titles(&app).contains(&"Disconnected".to_string()));
    }
}
