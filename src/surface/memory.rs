//! In-memory surface.

use super::{MessageNode, Node, RenderSurface, Role};
use crate::chat::booking::BookingOptions;

/// Surface that keeps everything in memory.
///
/// Used by tests and by hosts that render the transcript themselves.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    nodes: Vec<Node>,
    input_enabled: bool,
    send_enabled: bool,
    input_clears: usize,
    scrolls: usize,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    /// Create an empty surface with input and send control enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            input_enabled: true,
            send_enabled: true,
            input_clears: 0,
            scrolls: 0,
        }
    }

    /// All nodes, in order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Rendered messages, in order.
    pub fn messages(&self) -> Vec<&MessageNode> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Message(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    /// Number of rendered messages.
    pub fn message_count(&self) -> usize {
        self.messages().len()
    }

    /// Messages rendered for the given role.
    pub fn messages_by(&self, role: Role) -> Vec<&MessageNode> {
        self.messages()
            .into_iter()
            .filter(|msg| msg.role == role)
            .collect()
    }

    /// The last rendered message.
    pub fn last_message(&self) -> Option<&MessageNode> {
        self.messages().pop()
    }

    pub fn has_typing_indicator(&self) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(node, Node::TypingIndicator))
    }

    /// Booking blocks rendered so far.
    pub fn booking_blocks(&self) -> Vec<&BookingOptions> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Booking(options) => Some(options),
                _ => None,
            })
            .collect()
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn send_enabled(&self) -> bool {
        self.send_enabled
    }

    /// How many times the input field was cleared.
    pub fn input_clears(&self) -> usize {
        self.input_clears
    }

    /// How many times the list was scrolled to its end.
    pub fn scrolls(&self) -> usize {
        self.scrolls
    }
}

impl RenderSurface for MemorySurface {
    fn append(&mut self, node: Node) {
        self.nodes.push(node);
    }

    fn remove(&mut self, id: &str) -> bool {
        match self.nodes.iter().position(|node| node.id() == Some(id)) {
            Some(index) => {
                self.nodes.remove(index);
                true
            }
            None => false,
        }
    }

    fn scroll_to_end(&mut self) {
        self.scrolls += 1;
    }

    fn clear_input(&mut self) {
        self.input_clears += 1;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TYPING_INDICATOR_ID;

    fn message(role: Role, content: &str) -> Node {
        Node::Message(MessageNode {
            role,
            content: content.to_string(),
            warning: false,
        })
    }

    #[test]
    fn test_remove_by_id_only_touches_indicator() {
        let mut surface = MemorySurface::new();
        surface.append(message(Role::User, "hi"));
        surface.append(Node::TypingIndicator);

        assert!(surface.has_typing_indicator());
        assert!(surface.remove(TYPING_INDICATOR_ID));
        assert!(!surface.has_typing_indicator());
        assert!(!surface.remove(TYPING_INDICATOR_ID));
        assert_eq!(surface.message_count(), 1);
    }

    #[test]
    fn test_messages_by_role() {
        let mut surface = MemorySurface::new();
        surface.append(message(Role::Assistant, "hello"));
        surface.append(message(Role::User, "hi"));
        surface.append(message(Role::Assistant, "how can I help?"));

        assert_eq!(surface.messages_by(Role::Assistant).len(), 2);
        assert_eq!(surface.messages_by(Role::User).len(), 1);
        assert_eq!(surface.last_message().unwrap().content, "how can I help?");
    }
}
