//! Care Navigator terminal chat
//!
//! Runs one chat session against the backend, reading messages from stdin
//! and printing the conversation to stdout. Logs go to stderr.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use anyhow::Context;
use care_navigator_chat::api::{ChatBackend, HttpBackend};
use care_navigator_chat::chat::{ChatSession, InputEvent, Key};
use care_navigator_chat::config::{AppConfig, LogFormat};
use care_navigator_chat::surface::TerminalSurface;
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(config.logging.format);

    info!(
        name: "chat.config.loaded",
        base_url = %config.backend.base_url,
        booking_base = %config.booking.base_path,
        "Configuration loaded"
    );

    let backend = HttpBackend::from_config(&config.backend).context("invalid backend URL")?;
    let mut session = ChatSession::new(backend, TerminalSurface::stdout())
        .with_booking_base(config.booking.base_path.clone());

    session.start().await;
    if session.session_id().is_none() {
        return Ok(());
    }

    // Each line is the draft followed by Enter.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while session.surface().input_enabled() {
        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        let event = InputEvent::KeyPress {
            key: Key::Enter,
            shift: false,
        };
        if let Some(pending) = session.handle_input(event, &line) {
            let result = session.backend().continue_turn(pending.request()).await;
            session.complete_send(pending, result);
        }
    }

    info!(name: "chat.session.closed", state = %session.state(), "Chat session closed");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
