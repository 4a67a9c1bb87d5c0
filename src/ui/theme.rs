//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

use crate::stomp::FrameCommand;

/// Color theme for the application.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Accent for focused panes and the active tab.
    pub accent: Color,
    /// Background of the active frame row.
    pub highlight: Color,
    /// Dimmed text: placeholders, disabled buttons.
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Yellow,
            highlight: Color::Cyan,
            muted: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Style of the active row in the frame table.
    pub fn active_row(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Style of a button-like label, dimmed when disabled.
    pub fn button(&self, enabled: bool) -> Style {
        if enabled {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.muted)
        }
    }
}

/// Tag colour of a frame command.
pub fn frame_color(command: FrameCommand) -> Color {
    match command {
        FrameCommand::Connect => Color::Blue,
        FrameCommand::Stomp => Color::LightGreen,
        FrameCommand::Connected => Color::Green,
        FrameCommand::Send => Color::Cyan,
        FrameCommand::Subscribe => Color::LightBlue,
        FrameCommand::Unsubscribe => Color::Yellow,
        FrameCommand::Ack => Color::Green,
        FrameCommand::Nack => Color::Red,
        FrameCommand::Begin => Color::Magenta,
        FrameCommand::Commit => Color::LightRed,
        FrameCommand::Abort => Color::LightRed,
        FrameCommand::Disconnect => Color::LightYellow,
        FrameCommand::Message => Color::LightBlue,
        FrameCommand::Receipt => Color::LightMagenta,
        FrameCommand::Error => Color::Red,
    }
}

/// Style of a frame command tag: coloured bold text.
pub fn frame_tag_style(command: FrameCommand) -> Style {
    Style::default()
        .fg(frame_color(command))
        .add_modifier(Modifier::BOLD)
}
