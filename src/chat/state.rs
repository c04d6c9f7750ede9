//! UI state of a chat session.

use std::fmt;

/// Where the chat view is in its lifecycle.
///
/// Only `Idle` and `AwaitingResponse` alternate; both triage states are
/// final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    /// A continue-request is outstanding; typing indicator shown.
    AwaitingResponse,
    /// Booking cards shown; input locked.
    TriagedClinic,
    /// Input permanently locked.
    TriagedEmergency,
}

impl UiState {
    /// No further messages can be sent from this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::TriagedClinic | Self::TriagedEmergency)
    }
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::AwaitingResponse => "awaiting-response",
            Self::TriagedClinic => "triaged-clinic",
            Self::TriagedEmergency => "triaged-emergency",
        })
    }
}
