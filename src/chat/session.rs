//! The chat session client.

use tracing::{info, warn};

use crate::api::{ChatBackend, ContinueRequest, ContinueResponse, TriageOutcome};
use crate::error::Result;
use crate::surface::{MessageNode, Node, RenderSurface, Role, TYPING_INDICATOR_ID};

use super::booking::BookingOptions;
use super::input::InputEvent;
use super::state::UiState;

/// Shown when the session could not be started.
pub const START_FAILED_MESSAGE: &str = "Sorry, something went wrong. Please refresh the page.";

/// Shown when a continue-request fails.
pub const SEND_FAILED_MESSAGE: &str = "Sorry, something went wrong. Please try again.";

const DEFAULT_BOOKING_BASE: &str = "/clinics";

/// A dispatched message awaiting its reply.
///
/// Returned by [`ChatSession::begin_send`]; hand it back to
/// [`ChatSession::complete_send`] together with the backend's answer.
#[derive(Debug)]
#[must_use = "a pending turn must be completed or the session stays loading"]
pub struct PendingTurn {
    request: ContinueRequest,
}

impl PendingTurn {
    /// The request to issue to Message-Continue.
    pub fn request(&self) -> &ContinueRequest {
        &self.request
    }
}

/// One chat session for one page view.
///
/// Owns the session identifier and the in-flight guard, and renders every
/// state change into its surface.
///
/// # Example
///
/// ```rust,no_run
/// use care_navigator_chat::api::HttpBackend;
/// use care_navigator_chat::chat::ChatSession;
/// use care_navigator_chat::surface::MemorySurface;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("http://localhost:8000")?;
/// let mut session = ChatSession::new(backend, MemorySurface::new());
///
/// session.start().await;
/// session.send("I have had a headache since yesterday").await;
///
/// for msg in session.surface().messages() {
///     println!("{}: {}", msg.role.as_str(), msg.content);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ChatSession<B, S> {
    backend: B,
    surface: S,
    booking_base: String,
    session_id: Option<String>,
    in_flight: bool,
    state: UiState,
}

impl<B: ChatBackend, S: RenderSurface> ChatSession<B, S> {
    pub fn new(backend: B, surface: S) -> Self {
        Self {
            backend,
            surface,
            booking_base: DEFAULT_BOOKING_BASE.to_string(),
            session_id: None,
            in_flight: false,
            state: UiState::Idle,
        }
    }

    /// Set the path the booking cards link under.
    #[must_use]
    pub fn with_booking_base(mut self, base: impl Into<String>) -> Self {
        self.booking_base = base.into();
        self
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    /// Whether a send is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Start the session. Call once on load.
    ///
    /// On failure the apology is rendered and the session stays without an
    /// identifier, so every later send is a no-op.
    pub async fn start(&mut self) {
        if self.session_id.is_some() {
            return;
        }

        match self.backend.start().await {
            Ok(response) => {
                info!(
                    name: "chat.session.started",
                    session_id = response.id.as_deref().unwrap_or(""),
                    transcript_len = response.messages.len(),
                    greeting_role = response.greeting_role().unwrap_or(""),
                    "Chat session started"
                );
                if let Some(greeting) = response.greeting() {
                    self.render(Role::Assistant, greeting, false);
                }
                if response.id.is_none() {
                    warn!(
                        name: "chat.session.missing_id",
                        "Start response carried no session id; sending stays disabled"
                    );
                }
                self.session_id = response.id;
            }
            Err(e) => {
                warn!(name: "chat.session.start_failed", error = %e, "Failed to start session");
                self.render(Role::Assistant, START_FAILED_MESSAGE, false);
            }
        }
    }

    /// Send a message and handle the reply.
    ///
    /// Returns `false` without side effects if the message was not
    /// dispatched (blank text, no session, already loading, or triage
    /// concluded).
    pub async fn send(&mut self, text: &str) -> bool {
        let Some(pending) = self.begin_send(text) else {
            return false;
        };
        let result = self.backend.continue_turn(pending.request()).await;
        self.complete_send(pending, result);
        true
    }

    /// Forward an input event with the current draft.
    ///
    /// Returns the pending turn if the event dispatched a message.
    pub fn handle_input(&mut self, event: InputEvent, draft: &str) -> Option<PendingTurn> {
        if event.submits() {
            self.begin_send(draft)
        } else {
            None
        }
    }

    /// First half of [`send`](Self::send): check preconditions and dispatch.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingTurn> {
        let message = text.trim();
        if message.is_empty() || self.in_flight || self.state.is_terminal() {
            return None;
        }
        let session_id = self.session_id.clone()?;

        self.surface.clear_input();
        self.render(Role::User, message, false);
        self.in_flight = true;
        self.state = UiState::AwaitingResponse;
        self.surface.set_send_enabled(false);
        self.show_typing();

        info!(
            name: "chat.turn.dispatched",
            session_id = %session_id,
            len = message.len(),
            "Message dispatched"
        );

        Some(PendingTurn {
            request: ContinueRequest {
                session_id,
                message: message.to_string(),
            },
        })
    }

    /// Second half of [`send`](Self::send): apply the backend's answer.
    pub fn complete_send(&mut self, pending: PendingTurn, result: Result<ContinueResponse>) {
        self.hide_typing();

        match result {
            Ok(response) => self.apply_turn(&pending, &response),
            Err(e) => {
                warn!(
                    name: "chat.turn.failed",
                    session_id = %pending.request.session_id,
                    error = %e,
                    "Failed to send message"
                );
                self.render(Role::Assistant, SEND_FAILED_MESSAGE, false);
                self.state = UiState::Idle;
            }
        }

        self.in_flight = false;
        if !self.state.is_terminal() {
            self.surface.set_send_enabled(true);
        }
    }

    /// Append a message to the surface and scroll to it.
    pub fn render(&mut self, role: Role, content: &str, warning: bool) {
        self.surface.append(Node::Message(MessageNode {
            role,
            content: content.to_string(),
            warning,
        }));
        self.surface.scroll_to_end();
    }

    fn apply_turn(&mut self, pending: &PendingTurn, response: &ContinueResponse) {
        let outcome = response.triage_outcome();
        info!(
            name: "chat.turn.completed",
            session_id = %pending.request.session_id,
            outcome = ?outcome,
            urgency = response.urgency_level.as_deref().unwrap_or(""),
            needs_followup = response.needs_followup.unwrap_or(false),
            booking_confirmed = response.booking_confirmed.unwrap_or(false),
            booking_id = response.booking_id,
            "Reply received"
        );

        if let Some(warning) = &response.trigger_warning {
            self.render(Role::Assistant, warning, true);
        }
        if let Some(message) = &response.message {
            self.render(Role::Assistant, message, false);
        }

        // should_triage with an unrecognised result decodes to None.
        self.state = match outcome {
            TriageOutcome::None => UiState::Idle,
            TriageOutcome::Clinic => {
                self.show_booking_options();
                UiState::TriagedClinic
            }
            TriageOutcome::Emergency => {
                self.lock_input();
                UiState::TriagedEmergency
            }
        };

        if self.state.is_terminal() {
            info!(
                name: "chat.triage.concluded",
                session_id = %pending.request.session_id,
                state = %self.state,
                "Triage concluded"
            );
        }
    }

    fn show_booking_options(&mut self) {
        self.surface
            .append(Node::Booking(BookingOptions::for_base(&self.booking_base)));
        self.surface.scroll_to_end();
        self.lock_input();
    }

    fn lock_input(&mut self) {
        self.surface.set_input_enabled(false);
        self.surface.set_send_enabled(false);
    }

    fn show_typing(&mut self) {
        // At most one indicator.
        self.surface.remove(TYPING_INDICATOR_ID);
        self.surface.append(Node::TypingIndicator);
        self.surface.scroll_to_end();
    }

    fn hide_typing(&mut self) {
        self.surface.remove(TYPING_INDICATOR_ID);
    }
}
