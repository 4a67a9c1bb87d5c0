//! Frame log view: every sent and received frame in a resizable table.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

use crate::stomp::FrameCommand;
use crate::ui::components::{
    ColumnDescriptor, ResizableTable, TableAction, TableOptions, TableRecord, TableSize,
};
use crate::ui::theme::{frame_tag_style, Theme};

/// One row of the frame log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    /// Position in the log; stable for the session.
    pub key: usize,
    pub command: FrameCommand,
    pub destination: String,
    pub body: String,
}

impl TableRecord for FrameRecord {
    type Key = usize;

    fn key(&self) -> usize {
        self.key
    }

    fn field(&self, data_key: &str) -> Option<String> {
        match data_key {
            "frame" => Some(self.command.to_string()),
            "destination" => Some(self.destination.clone()),
            "body" => Some(self.body.clone()),
            _ => None,
        }
    }
}

/// Draw a command as a coloured tag.
fn render_frame_tag(value: &str) -> Line<'static> {
    match value.parse::<FrameCommand>() {
        Ok(command) => Line::from(Span::styled(
            format!("[{}]", command),
            frame_tag_style(command),
        )),
        Err(_) => Line::from(value.to_string()),
    }
}

/// Draw a destination in a code-like style.
fn render_code(value: &str) -> Line<'static> {
    Line::from(Span::styled(
        value.to_string(),
        Style::default().fg(Color::LightYellow),
    ))
}

fn error_row_style(record: &FrameRecord) -> Style {
    if record.command == FrameCommand::Error {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    }
}

/// Columns of the frame log.
///
/// The last column has no title or width and soaks up the remaining space.
pub fn frame_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("Frame")
            .data_key("frame")
            .renderer(render_frame_tag)
            .width(14)
            .resizable()
            .min_width(10),
        ColumnDescriptor::new("Destination")
            .data_key("destination")
            .renderer(render_code)
            .width(24)
            .resizable()
            .min_width(10),
        ColumnDescriptor::new("Body")
            .data_key("body")
            .ellipsis()
            .width(40)
            .resizable()
            .min_width(10),
        ColumnDescriptor::spacer(),
    ]
}

/// The frame log.
pub struct FramesView {
    table: ResizableTable<FrameRecord>,
    records: Vec<FrameRecord>,
    active: Option<usize>,
}

impl FramesView {
    pub fn new(theme: &Theme) -> Self {
        let options = TableOptions {
            bordered: true,
            size: TableSize::Small,
            title: Some("Frames".to_string()),
            highlight_style: theme.active_row(),
            row_style: Some(error_row_style),
        };
        Self {
            table: ResizableTable::new(&frame_columns(), options),
            records: Vec::new(),
            active: None,
        }
    }

    /// Append a frame and return its key.
    pub fn push(
        &mut self,
        command: FrameCommand,
        destination: impl Into<String>,
        body: impl Into<String>,
    ) -> usize {
        let key = self.records.len();
        self.records.push(FrameRecord {
            key,
            command,
            destination: destination.into(),
            body: body.into(),
        });
        key
    }

    pub fn records(&self) -> &[FrameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record the user last selected.
    pub fn active(&self) -> Option<&FrameRecord> {
        self.records.get(self.active?)
    }

    pub fn table(&self) -> &ResizableTable<FrameRecord> {
        &self.table
    }

    fn track(&mut self, action: Option<TableAction<usize>>) -> Option<TableAction<usize>> {
        if let Some(TableAction::RowSelected(key)) = &action {
            self.active = Some(*key);
        }
        action
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<TableAction<usize>> {
        let action = self.table.handle_input(key, &self.records);
        self.track(action)
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<TableAction<usize>> {
        let action = self.table.handle_mouse(event, &self.records);
        self.track(action)
    }

    /// Whether a column drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.table.is_dragging()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        self.table.render(frame, area, &self.records, focused);
    }
}
