//! Chat sessions against an in-process HTTP backend.

use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use care_navigator_chat::api::{ChatBackend, ContinueRequest, HttpBackend};
use care_navigator_chat::chat::{ChatSession, SEND_FAILED_MESSAGE, START_FAILED_MESSAGE, UiState};
use care_navigator_chat::error::Error;
use care_navigator_chat::surface::{MemorySurface, Role};
use serde_json::{Value, json};

/// Request bodies received by the mock backend, in order.
type Log = Arc<Mutex<Vec<Value>>>;

async fn start_ok(State(log): State<Log>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    log.lock().unwrap().push(body);
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 7,
            "messages": [{
                "role": "agent",
                "content": "Hi! I'm your AI agent. What brings you here today?"
            }],
            "symptoms_collected": [],
            "triage_result": null,
        })),
    )
}

/// Triage reply keyed off the message text.
async fn continue_ok(State(log): State<Log>, Json(body): Json<Value>) -> Json<Value> {
    let message = body["message"].as_str().unwrap_or_default().to_string();
    log.lock().unwrap().push(body);

    Json(match message.as_str() {
        "clinic please" => json!({
            "message": "Based on your symptoms, a clinic visit is recommended.",
            "triage_result": "clinic",
            "urgency_level": "MEDIUM",
            "should_triage": true,
        }),
        "chest pain" => json!({
            "message": "Does the pain spread to your arm?",
            "trigger_warning": "Chest pain can be serious.",
            "triage_result": null,
            "should_triage": false,
            "needs_followup": true,
        }),
        "emergency" => json!({
            "message": "Call emergency services immediately.",
            "triage_result": "emergency",
            "urgency_level": "HIGH",
            "should_triage": true,
        }),
        _ => json!({
            "message": "I understand. Can you tell me more?",
            "triage_result": null,
            "should_triage": false,
        }),
    })
}

async fn fail() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Session not found" })),
    )
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn healthy_backend() -> (String, Log) {
    let log = Log::default();
    let app = Router::new()
        .route("/api/chat/start", post(start_ok))
        .route("/api/chat/continue", post(continue_ok))
        .with_state(Arc::clone(&log));
    (spawn(app).await, log)
}

#[tokio::test]
async fn test_start_posts_empty_object_and_accepts_integer_id() {
    let (base, log) = healthy_backend().await;
    let backend = HttpBackend::new(&base).unwrap();

    let started = backend.start().await.unwrap();
    assert_eq!(started.id.as_deref(), Some("7"));
    assert_eq!(log.lock().unwrap().as_slice(), &[json!({})]);
}

#[tokio::test]
async fn test_continue_posts_session_and_message() {
    let (base, log) = healthy_backend().await;
    let backend = HttpBackend::new(&base).unwrap();

    let reply = backend
        .continue_turn(&ContinueRequest {
            session_id: "7".into(),
            message: "headache".into(),
        })
        .await
        .unwrap();

    assert_eq!(
        reply.message.as_deref(),
        Some("I understand. Can you tell me more?")
    );
    assert_eq!(
        log.lock().unwrap().last().unwrap(),
        &json!({ "session_id": "7", "message": "headache" })
    );
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let app = Router::new().route("/api/chat/start", post(fail));
    let base = spawn(app).await;
    let backend = HttpBackend::new(&base).unwrap();

    match backend.start().await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Session not found"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_conversation_to_clinic_triage() {
    let (base, _log) = healthy_backend().await;
    let mut session =
        ChatSession::new(HttpBackend::new(&base).unwrap(), MemorySurface::new());

    session.start().await;
    assert_eq!(session.session_id(), Some("7"));
    assert_eq!(session.surface().message_count(), 1);

    assert!(session.send("chest pain").await);
    let messages = session.surface().messages();
    assert_eq!(messages.len(), 4);
    assert!(messages[2].warning);
    assert_eq!(messages[3].content, "Does the pain spread to your arm?");
    assert_eq!(session.state(), UiState::Idle);

    assert!(session.send("clinic please").await);
    assert_eq!(session.state(), UiState::TriagedClinic);
    assert_eq!(session.surface().booking_blocks().len(), 1);
    assert!(!session.surface().input_enabled());
    assert!(!session.surface().send_enabled());
    assert!(!session.surface().has_typing_indicator());

    assert!(!session.send("anything else").await);
}

#[tokio::test]
async fn test_conversation_to_emergency() {
    let (base, _log) = healthy_backend().await;
    let mut session =
        ChatSession::new(HttpBackend::new(&base).unwrap(), MemorySurface::new());

    session.start().await;
    session.send("emergency").await;

    assert_eq!(session.state(), UiState::TriagedEmergency);
    assert!(session.surface().booking_blocks().is_empty());
    assert!(!session.surface().input_enabled());
    assert!(!session.surface().send_enabled());
}

#[tokio::test]
async fn test_start_failure_renders_refresh_apology() {
    let app = Router::new().route("/api/chat/start", post(fail));
    let base = spawn(app).await;
    let mut session =
        ChatSession::new(HttpBackend::new(&base).unwrap(), MemorySurface::new());

    session.start().await;

    assert_eq!(session.session_id(), None);
    let messages = session.surface().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::Assistant);
    assert_eq!(messages[0].content, START_FAILED_MESSAGE);
    assert!(!session.send("hello").await);
}

async fn start_without_id() -> Json<Value> {
    Json(json!({ "messages": [{ "role": "agent", "content": "Hi there" }] }))
}

#[tokio::test]
async fn test_start_without_id_shows_greeting() {
    let app = Router::new().route("/api/chat/start", post(start_without_id));
    let base = spawn(app).await;
    let mut session =
        ChatSession::new(HttpBackend::new(&base).unwrap(), MemorySurface::new());

    session.start().await;

    assert_eq!(session.session_id(), None);
    let messages = session.surface().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "Hi there");
    assert!(!session.send("hello").await);
}

#[tokio::test]
async fn test_continue_failure_renders_retry_apology() {
    let log = Log::default();
    let app = Router::new()
        .route("/api/chat/start", post(start_ok))
        .route("/api/chat/continue", post(fail))
        .with_state(log);
    let base = spawn(app).await;
    let mut session =
        ChatSession::new(HttpBackend::new(&base).unwrap(), MemorySurface::new());

    session.start().await;
    session.send("headache").await;

    let messages = session.surface().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].content, SEND_FAILED_MESSAGE);
    assert_eq!(session.state(), UiState::Idle);
    assert!(session.surface().send_enabled());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_unreachable_backend_is_recovered() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpBackend::new(format!("http://{addr}")).unwrap();
    let mut session = ChatSession::new(backend, MemorySurface::new());
    session.start().await;

    assert_eq!(session.session_id(), None);
    assert_eq!(
        session.surface().last_message().unwrap().content,
        START_FAILED_MESSAGE
    );
}
