//! Stub collaborators shared by the handler tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use domus_app::ports::{LanguageModel, Synthesizer, Transcriber};
use domus_app::prompt::Prompt;
use domus_app::services::conversation_service::{ConversationService, ConversationSettings};
use domus_app::telemetry_bus::TelemetryBus;
use domus_domain::error::{Collaborator, DomusError, UpstreamError};

use crate::router;
use crate::state::AppState;

pub struct StubTranscriber;

impl Transcriber for StubTranscriber {
    async fn transcribe(&self, _audio: Vec<u8>) -> Result<String, DomusError> {
        Ok("apaga las luces".to_string())
    }
}

pub struct StubModel {
    reply: Option<&'static str>,
}

impl StubModel {
    pub fn replying(reply: &'static str) -> Self {
        Self { reply: Some(reply) }
    }

    pub fn failing() -> Self {
        Self { reply: None }
    }
}

impl LanguageModel for StubModel {
    async fn complete(&self, _prompt: &Prompt) -> Result<String, DomusError> {
        self.reply.map(str::to_string).ok_or_else(|| {
            UpstreamError::new(Collaborator::LanguageModel, "model offline").into()
        })
    }
}

pub struct StubSynthesizer;

impl Synthesizer for StubSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, DomusError> {
        Ok(format!("wav:{text}").into_bytes())
    }
}

pub type TestState = AppState<StubTranscriber, StubModel, StubSynthesizer>;

pub fn test_state(model: StubModel) -> (TestState, Arc<TelemetryBus>) {
    let telemetry = Arc::new(TelemetryBus::new());
    let conversation = ConversationService::new(
        StubTranscriber,
        model,
        StubSynthesizer,
        Arc::clone(&telemetry),
        ConversationSettings::default(),
    );
    (
        AppState::new(conversation, Arc::clone(&telemetry)),
        telemetry,
    )
}

pub fn test_app(model: StubModel) -> (Router, Arc<TelemetryBus>) {
    let (state, telemetry) = test_state(model);
    (router::build(state), telemetry)
}

pub async fn request_json(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

const BOUNDARY: &str = "domus-test-boundary";

/// `multipart/form-data` POST to `uri` with one part per `(name, content)`.
pub fn multipart_request(uri: &str, parts: &[(&str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, content) in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{name}.wav\"\r\nContent-Type: audio/wav\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
