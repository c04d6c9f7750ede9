//! Chat session lifecycle.
//!
//! # Architecture
//!
//! - [`ChatSession`]: session id, in-flight guard and UI state for one view
//! - [`UiState`]: `idle` ⇄ `awaiting-response` → triage states
//! - [`InputEvent`]: host input forwarded to the session
//! - [`BookingOptions`]: cards rendered on a clinic triage
//!
//! # Example
//!
//! ```rust,no_run
//! use care_navigator_chat::api::HttpBackend;
//! use care_navigator_chat::chat::{ChatSession, UiState};
//! use care_navigator_chat::surface::MemorySurface;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = ChatSession::new(HttpBackend::new("http://localhost:8000")?, MemorySurface::new());
//! session.start().await;
//!
//! if session.send("My knee is swollen").await && session.state() == UiState::TriagedClinic {
//!     println!("booking cards shown");
//! }
//! # Ok(())
//! # }
//! ```

pub mod booking;
pub mod input;
mod session;
mod state;

pub use booking::{BookingChoice, BookingOptions};
pub use input::{InputEvent, Key};
pub use session::{ChatSession, PendingTurn, SEND_FAILED_MESSAGE, START_FAILED_MESSAGE};
pub use state::UiState;
