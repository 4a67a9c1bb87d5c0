//! Key binding hints per focus context.

/// Which part of the screen has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyContext {
    /// The broker URL bar.
    #[default]
    UrlBar,
    /// The send destination input.
    SendDestination,
    /// The send body editor.
    BodyEditor,
    /// The subscribe destination input.
    SubscribeDestination,
    /// The list of active subscriptions.
    Subscriptions,
    /// The frame table.
    FrameTable,
    /// The data editor under the frame table.
    DataEditor,
}

/// Get the shortcut hints shown in the status bar for a context.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::UrlBar => "[Enter] connect/disconnect  [Tab] next  [Ctrl+T] tab  [Ctrl+Q] quit",
        KeyContext::SendDestination => {
            "[Enter] send  [↑/↓] history  [Tab] accept/next  [Ctrl+T] tab  [Ctrl+Q] quit"
        }
        KeyContext::BodyEditor => {
            "[Ctrl+S] send  [Ctrl+F] format JSON  [Ctrl+R] JSON/Raw  [Ctrl+L] clear  [Tab] next"
        }
        KeyContext::SubscribeDestination => {
            "[Enter] subscribe  [↑/↓] history  [Tab] accept/next  [Ctrl+T] tab  [Ctrl+Q] quit"
        }
        KeyContext::Subscriptions => "[j/k] move  [d] unsubscribe  [Tab] next  [Ctrl+Q] quit",
        KeyContext::FrameTable => {
            "[j/k] row  [h/l] column  [</>] resize  [drag ┃] resize  [Tab] next  [Ctrl+Q] quit"
        }
        KeyContext::DataEditor => "[arrows] move  [Tab] next  [Ctrl+Q] quit",
    }
}
