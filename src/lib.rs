//! Care Navigator chat client
//!
//! Client side of the Care Navigator symptom-triage chat: starts a session
//! against the backend, exchanges messages, and drives the chat view
//! through to a clinic or emergency triage outcome.
//!
//! # Architecture
//!
//! - **API**: reqwest client for the Session-Start and Message-Continue endpoints
//! - **Chat**: session lifecycle and UI state machine
//! - **Surface**: abstract rendering target (memory, terminal)
//!
//! # Modules
//!
//! - [`api`]: backend trait, HTTP implementation and wire types
//! - [`chat`]: the chat session client
//! - [`config`]: layered configuration
//! - [`error`]: error types
//! - [`surface`]: rendering surfaces

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod surface;

pub use error::{Error, Result};
