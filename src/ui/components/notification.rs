//! Toast notifications.
//!
//! Connect, disconnect, broker errors and editor actions are reported as
//! short-lived toasts stacked in the top-right corner of the screen.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Width of a toast including its border.
const TOAST_WIDTH: u16 = 48;

/// The kind of notification, which determines its appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Informational message.
    Info,
    /// Something the user asked for worked.
    Success,
    /// Something failed.
    Error,
}

impl NotificationKind {
    /// Get the icon for this kind.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Info => "ℹ",
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✗",
        }
    }

    /// Get the color for this kind.
    pub fn color(&self) -> Color {
        match self {
            NotificationKind::Info => Color::Blue,
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        }
    }

    fn lifetime(&self) -> Duration {
        match self {
            NotificationKind::Error => Duration::from_secs(6),
            _ => Duration::from_secs(3),
        }
    }
}

/// A single toast: a bold title and an optional description line.
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub kind: NotificationKind,
    created_at: Instant,
    lifetime: Duration,
}

impl Notification {
    /// Create a notification with the default lifetime for its kind.
    pub fn new(title: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            title: title.into(),
            description: None,
            kind,
            created_at: Instant::now(),
            lifetime: kind.lifetime(),
        }
    }

    /// Attach a description shown under the title.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.is_empty()).then_some(description);
        self
    }

    /// Override how long the toast stays on screen.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Check if the toast has outlived its lifetime.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.lifetime
    }
}

/// Keeps the visible toasts, oldest first.
#[derive(Debug)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
    max_visible: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::with_max_visible(3)
    }
}

impl NotificationManager {
    /// Create a manager that keeps at most `max_visible` toasts.
    pub fn with_max_visible(max_visible: usize) -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible: max_visible.max(1),
        }
    }

    /// Add a toast, dropping the oldest one when over the limit.
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(title = %notification.title, kind = ?notification.kind, "Notify");
        self.notifications.push_back(notification);
        while self.notifications.len() > self.max_visible {
            self.notifications.pop_front();
        }
    }

    pub fn info(&mut self, title: impl Into<String>) {
        self.push(Notification::new(title, NotificationKind::Info));
    }

    pub fn success(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push(Notification::new(title, NotificationKind::Success).with_description(description));
    }

    pub fn error(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push(Notification::new(title, NotificationKind::Error).with_description(description));
    }

    /// Remove expired toasts. Called on every tick.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Render the toasts stacked from the top-right corner of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
        let inner_width = width.saturating_sub(2).max(1) as usize;

        let heights: Vec<u16> = self
            .notifications
            .iter()
            .map(|n| {
                let title_lines = (n.title.chars().count() + 2).div_ceil(inner_width).max(1);
                let description_lines = n
                    .description
                    .as_ref()
                    .map(|d| d.chars().count().div_ceil(inner_width).max(1))
                    .unwrap_or(0);
                (title_lines + description_lines) as u16 + 2
            })
            .collect();

        let total_height = heights.iter().sum::<u16>().min(area.height.saturating_sub(1));
        let x = area.x + area.width.saturating_sub(width + 1);
        let stack = Rect::new(x, area.y + 1, width, total_height);

        let chunks = Layout::vertical(heights.iter().map(|&h| Constraint::Length(h))).split(stack);
        for (notification, chunk) in self.notifications.iter().zip(chunks.iter()) {
            render_notification(notification, frame, *chunk);
        }
    }
}

fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    frame.render_widget(Clear, area);

    let style = Style::default().fg(notification.kind.color());
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{} ", notification.kind.icon()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            notification.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])];
    if let Some(description) = &notification.description {
        lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_kind_icon_and_color() {
        assert_eq!(NotificationKind::Success.icon(), "✓");
        assert_eq!(NotificationKind::Error.color(), Color::Red);
        assert_eq!(NotificationKind::Info.color(), Color::Blue);
    }

    #[test]
    fn test_error_lives_longer_than_success() {
        assert!(NotificationKind::Error.lifetime() > NotificationKind::Success.lifetime());
    }

    #[test]
    fn test_empty_description_is_dropped() {
        let n = Notification::new("Disconnected", NotificationKind::Info).with_description("");
        assert!(n.description.is_none());
    }

    #[test]
    fn test_expiry() {
        let n = Notification::new("Gone", NotificationKind::Info)
            .with_lifetime(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        assert!(n.is_expired());
        assert!(!Notification::new("Here", NotificationKind::Info).is_expired());
    }

    #[test]
    fn test_manager_drops_oldest_over_limit() {
        let mut manager = NotificationManager::with_max_visible(2);
        manager.info("1");
        manager.success("2", "");
        manager.error("3", "boom");
        let titles: Vec<&str> = manager.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["2", "3"]);
    }

    #[test]
    fn test_manager_tick_removes_expired() {
        let mut manager = NotificationManager::default();
        manager.push(
            Notification::new("Expires", NotificationKind::Info)
                .with_lifetime(Duration::from_millis(1)),
        );
        std::thread::sleep(Duration::from_millis(5));
        manager.tick();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_render_shows_title_and_description() {
        let mut manager = NotificationManager::default();
        manager.success("Connected", "version: 1.2");

        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|f| manager.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Connected"));
        assert!(text.contains("version: 1.2"));
    }
}
