//! Resizable-column table component.
//!
//! This module wraps `ratatui::widgets::Table` with per-column width state that
//! the user can change at runtime, either by dragging a header handle with the
//! mouse or with the keyboard. It is made of three parts:
//!
//! - [`ColumnWidthStore`] owns a copy of the caller's column descriptors and is
//!   the only writer of column widths.
//! - [`ResizableHeaderCell`] renders one header cell, with a drag handle when
//!   the column is resizable and sized, and turns drag motion into clamped
//!   [`ResizeEvent`]s.
//! - [`ResizableTable`] merges the two on every render and hands the result to
//!   the ratatui table for row layout, highlighting and scrolling.
//!
//! Columns without a width (the trailing "spacer" column) never get a drag
//! handle and take up the remaining horizontal space.

use std::sync::atomic::{AtomicU64, Ordering};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use tracing::trace;

/// Glyph drawn in the last column of a resizable header cell.
const HANDLE_GLYPH: &str = "┃";

/// Source of unique column identifiers.
static NEXT_COLUMN_ID: AtomicU64 = AtomicU64::new(1);

/// Produces display content from a cell's raw value.
pub type CellRenderer = fn(&str) -> Line<'static>;

/// Derives a style for a whole row from its record.
pub type RowStyleFn<R> = fn(&R) -> Style;

/// A row that can be displayed in a [`ResizableTable`].
pub trait TableRecord {
    /// Stable identity of the row.
    type Key: Clone + PartialEq + std::fmt::Debug;

    /// Get the row's key.
    fn key(&self) -> Self::Key;

    /// Read the raw value stored under `data_key`, if any.
    fn field(&self, data_key: &str) -> Option<String>;
}

/// Stable identifier of a column within a [`ColumnWidthStore`].
///
/// Identifiers are generated when the store is built and never reused, so a
/// resize handle keeps pointing at the same column for the table's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnId(u64);

impl ColumnId {
    fn next() -> Self {
        Self(NEXT_COLUMN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Caller-supplied template describing one column.
#[derive(Debug, Clone, Default)]
pub struct ColumnDescriptor {
    /// Header label. `None` renders an empty header (spacer columns).
    pub title: Option<String>,
    /// Key used to read the cell value from each row.
    pub data_key: Option<&'static str>,
    /// Optional renderer for the raw cell value.
    pub renderer: Option<CellRenderer>,
    /// Whether the header exposes a drag handle.
    pub resizable: bool,
    /// Lower bound enforced while dragging.
    pub min_width: Option<u16>,
    /// Current width in terminal cells.
    pub width: Option<u16>,
    /// Truncate overflowing plain text with an ellipsis.
    pub ellipsis: bool,
}

impl ColumnDescriptor {
    /// Create a fixed-width-less column with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Create an untitled, unsized column that absorbs leftover space.
    pub fn spacer() -> Self {
        Self::default()
    }

    /// Set the data key.
    pub fn data_key(mut self, key: &'static str) -> Self {
        self.data_key = Some(key);
        self
    }

    /// Set the cell renderer.
    pub fn renderer(mut self, renderer: CellRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Set the initial width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Mark the column as resizable.
    pub fn resizable(mut self) -> Self {
        self.resizable = true;
        self
    }

    /// Set the minimum drag width.
    pub fn min_width(mut self, min_width: u16) -> Self {
        self.min_width = Some(min_width);
        self
    }

    /// Truncate long values with an ellipsis.
    pub fn ellipsis(mut self) -> Self {
        self.ellipsis = true;
        self
    }

    /// The width if it is set and non-zero.
    fn sized_width(&self) -> Option<u16> {
        self.width.filter(|w| *w > 0)
    }
}

/// The new size reported by a header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSize {
    /// Candidate width after clamping.
    pub width: u16,
}

/// A width change emitted by a [`ResizableHeaderCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    /// The column being resized.
    pub column: ColumnId,
    /// The new size.
    pub size: ResizeSize,
}

/// Resize wiring bound to one column.
///
/// Handles are rebuilt on every render and carry the column's stable id, not
/// its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeHandle {
    column: ColumnId,
}

impl ResizeHandle {
    /// The column this handle resizes.
    pub fn column(&self) -> ColumnId {
        self.column
    }

    /// Build the event for a new size.
    pub fn on_resize(&self, size: ResizeSize) -> ResizeEvent {
        ResizeEvent {
            column: self.column,
            size,
        }
    }
}

/// Properties handed to a header cell for a resizable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderCellProps {
    /// Current width. `None` or zero disables the drag handle.
    pub width: Option<u16>,
    /// Lower bound for dragging.
    pub min_width: Option<u16>,
    /// Where resize events go.
    pub handle: ResizeHandle,
}

#[derive(Debug, Clone)]
struct ColumnEntry {
    id: ColumnId,
    descriptor: ColumnDescriptor,
}

/// A column as seen by one render pass.
#[derive(Debug, Clone)]
pub struct MergedColumn<'a> {
    /// Stable column id.
    pub id: ColumnId,
    /// The stored descriptor, including its current width.
    pub descriptor: &'a ColumnDescriptor,
    /// Header resize wiring. `None` for non-resizable columns.
    pub on_header_cell: Option<HeaderCellProps>,
}

/// Authoritative column state for a table.
///
/// Holds an owned copy of the caller's descriptors. The number and order of
/// columns never change; only `width` is updated, and only for resizable,
/// already-sized columns.
#[derive(Debug, Clone)]
pub struct ColumnWidthStore {
    columns: Vec<ColumnEntry>,
}

impl ColumnWidthStore {
    /// Create a store from the caller's columns.
    pub fn new(columns: &[ColumnDescriptor]) -> Self {
        Self {
            columns: columns
                .iter()
                .cloned()
                .map(|descriptor| ColumnEntry {
                    id: ColumnId::next(),
                    descriptor,
                })
                .collect(),
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the store has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get the descriptor at `index`.
    pub fn column(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index).map(|c| &c.descriptor)
    }

    /// Iterate over the stored descriptors in order.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().map(|c| &c.descriptor)
    }

    /// Get the id of the column at `index`.
    pub fn id_at(&self, index: usize) -> Option<ColumnId> {
        self.columns.get(index).map(|c| c.id)
    }

    /// Find the position of a column by id.
    pub fn index_of(&self, id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Get the current width of the column at `index`.
    pub fn width(&self, index: usize) -> Option<u16> {
        self.column(index).and_then(|c| c.width)
    }

    /// Replace the width of the column at `index`.
    ///
    /// Out-of-range indices, fixed columns and unsized columns are ignored.
    pub fn apply_resize(&mut self, index: usize, new_width: u16) {
        let Some(entry) = self.columns.get_mut(index) else {
            trace!(index, "Ignoring resize for unknown column");
            return;
        };
        if !entry.descriptor.resizable || entry.descriptor.sized_width().is_none() {
            trace!(index, "Ignoring resize for fixed or unsized column");
            return;
        }
        entry.descriptor.width = Some(new_width);
    }

    /// Replace the width of the column with the given id.
    pub fn apply_resize_by_id(&mut self, id: ColumnId, new_width: u16) {
        if let Some(index) = self.index_of(id) {
            self.apply_resize(index, new_width);
        }
    }

    /// Apply an event produced by a header cell.
    pub fn apply_event(&mut self, event: ResizeEvent) {
        self.apply_resize_by_id(event.column, event.size.width);
    }

    /// Build the column list for one render, with header wiring for resizable
    /// columns.
    pub fn merge_for_render(&self) -> Vec<MergedColumn<'_>> {
        self.columns
            .iter()
            .map(|entry| MergedColumn {
                id: entry.id,
                descriptor: &entry.descriptor,
                on_header_cell: entry.descriptor.resizable.then_some(HeaderCellProps {
                    width: entry.descriptor.width,
                    min_width: entry.descriptor.min_width,
                    handle: ResizeHandle { column: entry.id },
                }),
            })
            .collect()
    }
}

/// An in-progress drag on a header handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDrag {
    handle: ResizeHandle,
    start_x: u16,
    start_width: u16,
    min_width: u16,
}

impl HeaderDrag {
    /// The column being dragged.
    pub fn column(&self) -> ColumnId {
        self.handle.column
    }

    /// Report the clamped width for the pointer at `x`.
    pub fn moved_to(&self, x: u16) -> ResizeEvent {
        let candidate = i32::from(self.start_width) + i32::from(x) - i32::from(self.start_x);
        self.handle.on_resize(ResizeSize {
            width: clamp_width(candidate, self.min_width),
        })
    }
}

fn clamp_width(candidate: i32, min_width: u16) -> u16 {
    candidate.clamp(i32::from(min_width), i32::from(u16::MAX)) as u16
}

/// A single header cell, optionally wrapped in a drag handle.
#[derive(Debug, Clone, Copy)]
pub struct ResizableHeaderCell<'a> {
    title: Option<&'a str>,
    props: Option<HeaderCellProps>,
}

impl<'a> ResizableHeaderCell<'a> {
    /// Create a header cell.
    pub fn new(title: Option<&'a str>, props: Option<HeaderCellProps>) -> Self {
        Self { title, props }
    }

    /// Props of a cell that has a usable drag handle.
    ///
    /// Unsized columns fall back to a plain header even when wired for resize,
    /// otherwise the spacer column would collapse the table layout.
    fn active_props(&self) -> Option<(HeaderCellProps, u16)> {
        let props = self.props?;
        let width = props.width.filter(|w| *w > 0)?;
        Some((props, width))
    }

    /// Whether this cell shows a drag handle.
    pub fn is_resizable(&self) -> bool {
        self.active_props().is_some()
    }

    /// Start dragging from pointer position `x`.
    pub fn begin_drag(&self, x: u16) -> Option<HeaderDrag> {
        let (props, width) = self.active_props()?;
        Some(HeaderDrag {
            handle: props.handle,
            start_x: x,
            start_width: width,
            min_width: props.min_width.unwrap_or(0),
        })
    }

    /// Report a resize to `candidate` cells, clamped to the minimum width.
    pub fn resize_to(&self, candidate: i32) -> Option<ResizeEvent> {
        let (props, _) = self.active_props()?;
        Some(props.handle.on_resize(ResizeSize {
            width: clamp_width(candidate, props.min_width.unwrap_or(0)),
        }))
    }

    /// Report a resize by `delta` cells from the current width.
    pub fn nudge(&self, delta: i32) -> Option<ResizeEvent> {
        let (_, width) = self.active_props()?;
        self.resize_to(i32::from(width) + delta)
    }

    /// Build the ratatui cell.
    pub fn cell(&self, style: Style, focused: bool) -> Cell<'static> {
        let title = self.title.unwrap_or_default().to_string();
        let Some((_, width)) = self.active_props() else {
            return Cell::from(title).style(style);
        };

        let text_width = usize::from(width.saturating_sub(1));
        let mut label: String = title.chars().take(text_width).collect();
        let pad = text_width.saturating_sub(label.chars().count());
        label.push_str(&" ".repeat(pad));

        let handle_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Cell::from(Line::from(vec![
            Span::styled(label, style),
            Span::styled(HANDLE_GLYPH, handle_style),
        ]))
    }
}

/// Visual density of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableSize {
    /// One cell between columns.
    #[default]
    Small,
    /// Two cells between columns.
    Middle,
}

impl TableSize {
    fn column_spacing(self) -> u16 {
        match self {
            TableSize::Small => 1,
            TableSize::Middle => 2,
        }
    }
}

/// Configuration passed through to the underlying table.
pub struct TableOptions<R> {
    /// Draw a border around the table.
    pub bordered: bool,
    /// Column spacing.
    pub size: TableSize,
    /// Optional block title.
    pub title: Option<String>,
    /// Style for the active row.
    pub highlight_style: Style,
    /// Per-row style derivation.
    pub row_style: Option<RowStyleFn<R>>,
}

impl<R> Default for TableOptions<R> {
    fn default() -> Self {
        Self {
            bordered: true,
            size: TableSize::Small,
            title: None,
            highlight_style: Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            row_style: None,
        }
    }
}

/// Something the user did to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction<K> {
    /// A row became the active row.
    RowSelected(K),
    /// A column changed width.
    ColumnResized {
        /// Column position.
        index: usize,
        /// New width.
        width: u16,
    },
}

/// Screen placement of one rendered header cell.
#[derive(Debug, Clone, Copy)]
struct HeaderHit {
    area: Rect,
    index: usize,
}

/// A table whose column widths are owned by a [`ColumnWidthStore`].
pub struct ResizableTable<R: TableRecord> {
    store: ColumnWidthStore,
    options: TableOptions<R>,
    state: TableState,
    focused_column: Option<usize>,
    drag: Option<HeaderDrag>,
    header_hits: Vec<HeaderHit>,
    body_area: Rect,
}

impl<R: TableRecord> ResizableTable<R> {
    /// Create a table from a column list and options.
    pub fn new(columns: &[ColumnDescriptor], options: TableOptions<R>) -> Self {
        let store = ColumnWidthStore::new(columns);
        let focused_column = (0..store.len()).find(|&i| is_draggable(&store, i));
        Self {
            store,
            options,
            state: TableState::default(),
            focused_column,
            drag: None,
            header_hits: Vec::new(),
            body_area: Rect::default(),
        }
    }

    /// Read-only access to the column state.
    pub fn store(&self) -> &ColumnWidthStore {
        &self.store
    }

    /// Index of the selected row.
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Select a row by index.
    pub fn select(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    /// Column focused for keyboard resizing.
    pub fn focused_column(&self) -> Option<usize> {
        self.focused_column
    }

    /// Whether a header drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Header cell for the column at `index`, wired from the current state.
    fn header_cell(&self, index: usize) -> Option<ResizableHeaderCell<'_>> {
        let merged = self.store.merge_for_render();
        let column = merged.get(index)?;
        Some(ResizableHeaderCell::new(
            column.descriptor.title.as_deref(),
            column.on_header_cell,
        ))
    }

    /// Apply a header event and report it as an action.
    fn apply(&mut self, event: ResizeEvent) -> Option<TableAction<R::Key>> {
        self.store.apply_event(event);
        let index = self.store.index_of(event.column)?;
        let width = self.store.width(index)?;
        trace!(index, width, "Column resized");
        Some(TableAction::ColumnResized { index, width })
    }

    /// Resize the column at `index` as a drag gesture would.
    ///
    /// The minimum width is enforced; columns without a drag handle are left
    /// untouched.
    pub fn resize_column(&mut self, index: usize, candidate: u16) -> Option<TableAction<R::Key>> {
        let event = self.header_cell(index)?.resize_to(i32::from(candidate))?;
        self.apply(event)
    }

    /// Move keyboard focus to the next or previous resizable column.
    pub fn focus_column(&mut self, forward: bool) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let start = self.focused_column.unwrap_or(0);
        for step in 1..=len {
            let candidate = if forward {
                (start + step) % len
            } else {
                (start + len - step % len) % len
            };
            if is_draggable(&self.store, candidate) {
                self.focused_column = Some(candidate);
                return;
            }
        }
    }

    /// Widen the focused column by one cell.
    pub fn widen_focused(&mut self) -> Option<TableAction<R::Key>> {
        self.nudge_focused(1)
    }

    /// Narrow the focused column by one cell.
    pub fn narrow_focused(&mut self) -> Option<TableAction<R::Key>> {
        self.nudge_focused(-1)
    }

    fn nudge_focused(&mut self, delta: i32) -> Option<TableAction<R::Key>> {
        let index = self.focused_column?;
        let event = self.header_cell(index)?.nudge(delta)?;
        self.apply(event)
    }

    /// Move the row selection by `delta` and report the new active row.
    fn move_selection(&mut self, rows: &[R], delta: isize) -> Option<TableAction<R::Key>> {
        if rows.is_empty() {
            return None;
        }
        let last = rows.len() - 1;
        let next = match self.state.selected() {
            Some(current) => current.saturating_add_signed(delta).min(last),
            None if delta < 0 => last,
            None => 0,
        };
        self.select_index(rows, next)
    }

    fn select_index(&mut self, rows: &[R], index: usize) -> Option<TableAction<R::Key>> {
        let row = rows.get(index)?;
        self.state.select(Some(index));
        Some(TableAction::RowSelected(row.key()))
    }

    /// Handle keyboard input while the table is focused.
    pub fn handle_input(&mut self, key: KeyEvent, rows: &[R]) -> Option<TableAction<R::Key>> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('j') | KeyCode::Down, KeyModifiers::NONE) => {
                self.move_selection(rows, 1)
            }
            (KeyCode::Char('k') | KeyCode::Up, KeyModifiers::NONE) => {
                self.move_selection(rows, -1)
            }
            (KeyCode::Char('g') | KeyCode::Home, KeyModifiers::NONE) => self.select_index(rows, 0),
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                self.select_index(rows, rows.len().checked_sub(1)?)
            }
            (KeyCode::Char('h') | KeyCode::Left, KeyModifiers::NONE) => {
                self.focus_column(false);
                None
            }
            (KeyCode::Char('l') | KeyCode::Right, KeyModifiers::NONE) => {
                self.focus_column(true);
                None
            }
            (KeyCode::Char('>' | '+'), _) => self.widen_focused(),
            (KeyCode::Char('<' | '-'), _) => self.narrow_focused(),
            _ => None,
        }
    }

    /// Find the header whose drag handle covers the given position.
    ///
    /// The handle is the last cell of the header plus the gap after it.
    fn handle_at(&self, x: u16, y: u16) -> Option<usize> {
        let spacing = self.options.size.column_spacing();
        self.header_hits
            .iter()
            .find(|hit| {
                let right = hit.area.x + hit.area.width;
                y == hit.area.y && x + 1 >= right && x < right + spacing
            })
            .map(|hit| hit.index)
    }

    /// Handle a mouse event.
    pub fn handle_mouse(&mut self, event: MouseEvent, rows: &[R]) -> Option<TableAction<R::Key>> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.handle_at(event.column, event.row) {
                    self.drag = self.header_cell(index)?.begin_drag(event.column);
                    if self.drag.is_some() {
                        self.focused_column = Some(index);
                        trace!(index, "Column drag started");
                    }
                    return None;
                }
                self.row_at(event.column, event.row)
                    .and_then(|index| self.select_index(rows, index))
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let drag = self.drag?;
                self.apply(drag.moved_to(event.column))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag = None;
                None
            }
            MouseEventKind::ScrollDown => self.move_selection(rows, 1),
            MouseEventKind::ScrollUp => self.move_selection(rows, -1),
            _ => None,
        }
    }

    /// Map a screen position to a row index.
    fn row_at(&self, x: u16, y: u16) -> Option<usize> {
        let area = self.body_area;
        if x < area.x || x >= area.x + area.width || y < area.y || y >= area.y + area.height {
            return None;
        }
        Some(usize::from(y - area.y) + self.state.offset())
    }

    /// Render the table.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, rows: &[R], focused: bool) {
        let merged = self.store.merge_for_render();
        let spacing = self.options.size.column_spacing();

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut block = if self.options.bordered {
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
        } else {
            Block::default()
        };
        if let Some(title) = &self.options.title {
            block = block.title(format!(" {} ", title));
        }
        let inner = block.inner(area);

        let constraints: Vec<Constraint> = merged
            .iter()
            .map(|c| match c.descriptor.sized_width() {
                Some(width) => Constraint::Length(width),
                None => Constraint::Fill(1),
            })
            .collect();

        let header_row_area = Rect { height: inner.height.min(1), ..inner };
        let cell_areas = Layout::horizontal(constraints.clone())
            .flex(Flex::Start)
            .spacing(spacing)
            .split(header_row_area);
        self.header_hits = cell_areas
            .iter()
            .enumerate()
            .map(|(index, area)| HeaderHit { area: *area, index })
            .collect();
        self.body_area = Rect {
            y: inner.y + header_row_area.height,
            height: inner.height.saturating_sub(header_row_area.height),
            ..inner
        };

        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let header = Row::new(merged.iter().enumerate().map(|(index, column)| {
            ResizableHeaderCell::new(column.descriptor.title.as_deref(), column.on_header_cell)
                .cell(header_style, focused && self.focused_column == Some(index))
        }));

        let body: Vec<Row> = rows
            .iter()
            .map(|record| {
                let cells = merged
                    .iter()
                    .map(|column| body_cell(column.descriptor, record));
                let row = Row::new(cells);
                match self.options.row_style {
                    Some(style_fn) => row.style(style_fn(record)),
                    None => row,
                }
            })
            .collect();

        let table = Table::new(body, constraints)
            .header(header)
            .column_spacing(spacing)
            .flex(Flex::Start)
            .highlight_style(self.options.highlight_style)
            .block(block);

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

fn is_draggable(store: &ColumnWidthStore, index: usize) -> bool {
    store
        .column(index)
        .is_some_and(|c| c.resizable && c.sized_width().is_some())
}

/// Build one body cell from a record.
fn body_cell<R: TableRecord>(column: &ColumnDescriptor, record: &R) -> Cell<'static> {
    let value = column
        .data_key
        .and_then(|key| record.field(key))
        .unwrap_or_default();

    if let Some(renderer) = column.renderer {
        return Cell::from(renderer(&value));
    }

    match column.sized_width() {
        Some(width) if column.ellipsis => Cell::from(truncate_with_ellipsis(&value, width)),
        _ => Cell::from(value),
    }
}

/// Truncate `text` to `width` characters, ending in `…` when shortened.
///
/// Only the first line is kept.
pub fn truncate_with_ellipsis(text: &str, width: u16) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let width = usize::from(width);
    let shortened = first_line.len() < text.len();
    if first_line.chars().count() <= width && !shortened {
        return first_line.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = first_line.chars().take(width - 1).collect();
    out.push('…');
    out
}
