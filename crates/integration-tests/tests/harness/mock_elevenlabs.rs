//! Mock ElevenLabs speech-to-text backend for integration tests
//!
//! Records every request and answers with canned transcripts, webhook
//! acknowledgements or scripted failures.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// One request as the mock received it
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    pub api_key: Option<String>,
    pub query: BTreeMap<String, String>,
    /// Text form fields
    pub fields: BTreeMap<String, String>,
    /// Uploaded file name and content
    pub file: Option<(String, Vec<u8>)>,
}

/// Scripted failure: status and body returned for the first `times` requests
#[derive(Debug, Clone)]
struct Failure {
    status: u16,
    body: Value,
}

/// Mock ElevenLabs backend
pub struct MockElevenLabs {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    request_count: AtomicU32,
    /// Number of requests to fail before succeeding
    fail_count: AtomicU32,
    failure: Option<Failure>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockElevenLabs {
    /// Start a mock that always succeeds
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(0, None).await
    }

    /// Start a mock that fails the first `n` requests with `status` and `body`
    pub async fn start_failing(n: u32, status: u16, body: Value) -> anyhow::Result<Self> {
        Self::start_inner(n, Some(Failure { status, body })).await
    }

    async fn start_inner(fail_count: u32, failure: Option<Failure>) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            request_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
            failure,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/speech-to-text", routing::post(handle_speech_to_text))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the provider
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of speech-to-text requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }
}

impl Drop for MockElevenLabs {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_speech_to_text(
    State(state): State<Arc<MockState>>,
    Query(query): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut recorded = RecordedRequest {
        api_key: headers
            .get("xi-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        query,
        ..RecordedRequest::default()
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_owned();
        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_owned();
            let content = field.bytes().await.unwrap_or_default().to_vec();
            recorded.file = Some((file_name, content));
        } else {
            let value = field.text().await.unwrap_or_default();
            recorded.fields.insert(name, value);
        }
    }

    let webhook = recorded.fields.get("webhook").is_some_and(|v| v == "true");
    state.requests.lock().unwrap().push(recorded);
    let count = state.request_count.fetch_add(1, Ordering::Relaxed) + 1;

    if let Some(ref failure) = state.failure {
        let remaining = state.fail_count.load(Ordering::Relaxed);
        if remaining > 0 {
            state.fail_count.fetch_sub(1, Ordering::Relaxed);
            let status = StatusCode::from_u16(failure.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return (status, Json(failure.body.clone())).into_response();
        }
    }

    if webhook {
        return Json(json!({
            "message": "Request processed successfully",
            "request_id": format!("req_{count}"),
            "transcription_id": format!("tr_{count}")
        }))
        .into_response();
    }

    Json(json!({
        "language_code": "eng",
        "language_probability": 0.98,
        "text": "Hello world",
        "words": [
            { "text": "Hello", "start": 0.0, "end": 0.4, "type": "word", "speaker_id": "speaker_0", "logprob": -0.05 },
            { "text": " ", "start": 0.4, "end": 0.5, "type": "spacing", "speaker_id": "speaker_0", "logprob": 0.0 },
            { "text": "world", "start": 0.5, "end": 0.9, "type": "word", "speaker_id": "speaker_0", "logprob": -0.1 }
        ],
        "transcription_id": format!("tr_{count}")
    }))
    .into_response()
}
