//! Status bar: connection indicator plus shortcut hints for the focused pane.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};

/// Render the status bar.
///
/// The left side shows the hints for `context`, the right side whether a
/// broker session is active.
pub fn render_status_bar(frame: &mut Frame, area: Rect, context: KeyContext, connected: bool) {
    let (label, color) = if connected {
        ("● connected ", Color::Green)
    } else {
        ("○ disconnected ", Color::DarkGray)
    };
    let [hints_area, state_area] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(label.chars().count() as u16),
    ])
    .areas(area);

    let hints = Paragraph::new(Line::from(hint_spans(get_context_hints(context))));
    frame.render_widget(hints, hints_area);

    let state = Paragraph::new(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(state, state_area);
}

/// Split hint text into spans, colouring the bracketed keys.
fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    let mut rest = hints;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), text_style));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key_style));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }
    spans
}
