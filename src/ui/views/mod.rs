//! Application views (panes).

mod data;
mod frames;
mod send;
mod subscribe;

pub use data::DataView;
pub use frames::FramesView;
pub use send::{SendAction, SendPanel};
pub use subscribe::{SubscribeAction, SubscribePanel};
