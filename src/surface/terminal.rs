//! Terminal surface.

use std::io::{self, Write};

use tracing::warn;

use super::{MessageNode, Node, RenderSurface, Role};
use crate::chat::booking::BookingOptions;

/// Line-oriented surface writing to any [`Write`].
///
/// The message list is the output stream itself, so "scroll to end" is a
/// flush and removing the typing indicator only updates bookkeeping.
#[derive(Debug)]
pub struct TerminalSurface<W: Write> {
    out: W,
    typing_shown: bool,
    input_enabled: bool,
    send_enabled: bool,
}

impl TerminalSurface<io::Stdout> {
    /// Surface printing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            typing_shown: false,
            input_enabled: true,
            send_enabled: true,
        }
    }

    /// Whether the user may still type.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn send_enabled(&self) -> bool {
        self.send_enabled
    }

    /// Consume the surface and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_node(&mut self, node: &Node) -> io::Result<()> {
        match node {
            Node::Message(msg) => self.write_message(msg),
            Node::TypingIndicator => writeln!(self.out, "assistant is typing..."),
            Node::Booking(options) => self.write_booking(options),
        }
    }

    fn write_message(&mut self, msg: &MessageNode) -> io::Result<()> {
        let prefix = match (msg.role, msg.warning) {
            (Role::User, _) => "you",
            (Role::Assistant, false) => "assistant",
            (Role::Assistant, true) => "assistant [warning]",
        };
        let mut lines = msg.content.lines();
        writeln!(self.out, "{prefix}> {}", lines.next().unwrap_or_default())?;
        for line in lines {
            writeln!(self.out, "  {line}")?;
        }
        Ok(())
    }

    fn write_booking(&mut self, options: &BookingOptions) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "== {} ==", options.heading)?;
        writeln!(self.out, "{}", options.subtitle)?;
        for (index, choice) in options.choices.iter().enumerate() {
            writeln!(self.out)?;
            writeln!(self.out, "  {}. {} {}", index + 1, choice.icon, choice.title)?;
            writeln!(self.out, "     {}", choice.description)?;
            writeln!(self.out, "     [{}] {}", choice.action_label, choice.href)?;
        }
        writeln!(self.out)
    }

    fn report(result: io::Result<()>) {
        if let Err(e) = result {
            warn!(name: "surface.terminal.write_failed", error = %e, "Terminal write failed");
        }
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn append(&mut self, node: Node) {
        if matches!(node, Node::TypingIndicator) {
            self.typing_shown = true;
        }
        Self::report(self.write_node(&node));
    }

    fn remove(&mut self, id: &str) -> bool {
        if id == super::TYPING_INDICATOR_ID && self.typing_shown {
            self.typing_shown = false;
            return true;
        }
        false
    }

    fn scroll_to_end(&mut self) {
        Self::report(self.out.flush());
    }

    fn clear_input(&mut self) {}

    fn set_input_enabled(&mut self, enabled: bool) {
        if self.input_enabled && !enabled {
            Self::report(writeln!(self.out, "(chat input closed)"));
        }
        self.input_enabled = enabled;
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }
}
