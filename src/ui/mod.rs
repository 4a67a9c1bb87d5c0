//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the reusable components
//! (resizable table, inputs, editors, toasts) and the panes built from them.

mod components;
pub mod theme;
mod views;

pub use components::{render_status_bar, NotificationManager, TableAction, TextInput};
pub use theme::Theme;
pub use views::{
    DataView, FramesView, SendAction, SendPanel, SubscribeAction, SubscribePanel,
};
