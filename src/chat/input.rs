//! Input events from the host's chat view.

/// A key reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
}

/// Events the host forwards to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The send control was activated.
    SendClicked,
    /// A key was pressed in the input field.
    KeyPress { key: Key, shift: bool },
}

impl InputEvent {
    /// Whether this event submits the draft.
    ///
    /// Shift+Enter is left to the host (newline in the draft).
    pub fn submits(&self) -> bool {
        match self {
            Self::SendClicked => true,
            Self::KeyPress { key, shift } => *key == Key::Enter && !shift,
        }
    }
}
