//! Reusable UI components.

mod help_bar;
mod input;
mod memorable_input;
mod notification;
mod table;
mod text_editor;

pub use help_bar::render_status_bar;
pub use input::TextInput;
pub use memorable_input::MemorableInput;
pub use notification::NotificationManager;
pub use table::{
    ColumnDescriptor, ResizableTable, TableAction, TableOptions, TableRecord, TableSize,
};
pub use text_editor::{format_json, TextEditor};
