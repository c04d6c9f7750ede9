//! Backend API: wire types and the HTTP client.
//!
//! - [`ChatBackend`]: the Session-Start / Message-Continue seam
//! - [`HttpBackend`]: reqwest implementation
//! - [`types`]: request and response DTOs

mod client;
pub mod types;

pub use client::{ChatBackend, HttpBackend};
pub use types::{
    ContinueRequest, ContinueResponse, StartRequest, StartResponse, TranscriptEntry,
    TriageOutcome,
};
