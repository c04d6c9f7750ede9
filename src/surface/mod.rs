//! Rendering surfaces.
//!
//! A surface is the append-only message list plus the input field and send
//! control of a chat view. The session logic only ever talks to the
//! [`RenderSurface`] trait, so it runs the same against a terminal, a test
//! recorder, or any other front-end.
//!
//! - [`MemorySurface`]: records every operation for inspection
//! - [`TerminalSurface`]: line-oriented output to any writer

mod memory;
mod terminal;

pub use memory::MemorySurface;
pub use terminal::TerminalSurface;

use crate::chat::booking::BookingOptions;

/// Fixed identifier of the typing indicator node.
pub const TYPING_INDICATOR_ID: &str = "typing-indicator";

/// Sender of a rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A rendered chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageNode {
    pub role: Role,
    pub content: String,
    /// Rendered with warning styling.
    pub warning: bool,
}

/// Anything that can be appended to the message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Message(MessageNode),
    /// Placeholder shown while a reply is pending.
    TypingIndicator,
    Booking(BookingOptions),
}

impl Node {
    /// Identifier usable with [`RenderSurface::remove`], if the node has one.
    pub fn id(&self) -> Option<&'static str> {
        match self {
            Self::TypingIndicator => Some(TYPING_INDICATOR_ID),
            Self::Message(_) | Self::Booking(_) => None,
        }
    }
}

/// The view a chat session renders into.
pub trait RenderSurface {
    /// Append a node to the end of the message list.
    fn append(&mut self, node: Node);

    /// Remove the node with the given identifier. Returns whether one existed.
    fn remove(&mut self, id: &str) -> bool;

    /// Scroll the message list to its end.
    fn scroll_to_end(&mut self);

    /// Clear the input field.
    fn clear_input(&mut self);

    /// Enable or disable the input field.
    fn set_input_enabled(&mut self, enabled: bool);

    /// Enable or disable the send control.
    fn set_send_enabled(&mut self, enabled: bool);
}
