//! Wire types for the chat backend.
//!
//! Response fields are decoded leniently: a field that is missing, `null`
//! or of an unexpected type is treated as absent rather than failing the
//! whole response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Session-Start
// =============================================================================

/// Request body for `POST /api/chat/start`. Always serializes to `{}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StartRequest {}

/// Response from starting a chat session.
#[derive(Debug, Clone, Deserialize)]
pub struct StartResponse {
    /// Backend-assigned session identifier. `None` when missing, `null`,
    /// empty, or not a string or integer.
    #[serde(default, deserialize_with = "session_id")]
    pub id: Option<String>,
    /// Transcript so far; normally a single greeting.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub messages: Vec<TranscriptEntry>,
}

impl StartResponse {
    /// The greeting to show after start: the content of the last entry.
    pub fn greeting(&self) -> Option<&str> {
        self.messages
            .last()
            .and_then(|entry| entry.content.as_deref())
    }

    /// Wire role of the greeting entry, if any.
    pub fn greeting_role(&self) -> Option<&str> {
        self.messages.last().and_then(|entry| entry.role.as_deref())
    }
}

/// An entry of the backend transcript.
///
/// `role` is kept as a plain string; the backend writes `agent` as well as
/// `assistant`.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptEntry {
    /// The role of the message sender.
    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<String>,
    /// The message content.
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
}

// =============================================================================
// Message-Continue
// =============================================================================

/// Request body for `POST /api/chat/continue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContinueRequest {
    /// Session the message belongs to.
    pub session_id: String,
    /// The user's message, already trimmed.
    pub message: String,
}

/// Response to a continue-request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContinueResponse {
    /// High-risk symptom warning, shown before the main message.
    #[serde(default, deserialize_with = "lenient_text")]
    pub trigger_warning: Option<String>,
    /// Main assistant reply.
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
    /// Whether triage has concluded on this turn.
    #[serde(default, deserialize_with = "lenient")]
    pub should_triage: Option<bool>,
    /// `clinic`, `emergency`, or `null` while triage is still running.
    #[serde(default, deserialize_with = "lenient")]
    pub triage_result: Option<String>,
    /// Urgency label attached to a concluded triage.
    #[serde(default, deserialize_with = "lenient")]
    pub urgency_level: Option<String>,
    /// Backend is asking a follow-up question about a detected trigger.
    #[serde(default, deserialize_with = "lenient")]
    pub needs_followup: Option<bool>,
    /// Backend recorded a booking from this turn.
    #[serde(default, deserialize_with = "lenient")]
    pub booking_confirmed: Option<bool>,
    /// Identifier of the booking, when one was recorded.
    #[serde(default, deserialize_with = "lenient")]
    pub booking_id: Option<u64>,
}

/// Outcome of a turn as far as the UI is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageOutcome {
    /// Conversation continues.
    None,
    /// Patient should book with a clinic.
    Clinic,
    /// Patient needs emergency care.
    Emergency,
}

impl ContinueResponse {
    /// Derive the triage outcome.
    ///
    /// Both `should_triage` and a recognised `triage_result` are required;
    /// anything else is [`TriageOutcome::None`].
    pub fn triage_outcome(&self) -> TriageOutcome {
        if self.should_triage != Some(true) {
            return TriageOutcome::None;
        }
        match self.triage_result.as_deref() {
            Some("clinic") => TriageOutcome::Clinic,
            Some("emergency") => TriageOutcome::Emergency,
            _ => TriageOutcome::None,
        }
    }
}

// =============================================================================
// Lenient decoding helpers
// =============================================================================

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], but an empty string also counts as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::<D, String>(deserializer)?.filter(|s| !s.is_empty()))
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Session ids arrive as strings or integer primary keys. An empty string
/// is no id at all.
fn session_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
