//! Conversation handlers: text turns and the full voice pipeline.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use domus_app::ports::{LanguageModel, Synthesizer, Transcriber};
use domus_app::services::conversation_service::TurnRequest;
use domus_app::telemetry_bus::TelemetryBus;
use domus_domain::device::DeviceState;
use domus_domain::reconcile::ReconciledResponse;
use domus_domain::utterance::Utterance;

use crate::api::upload::AudioUpload;
use crate::error::ApiError;
use crate::state::AppState;

/// Device state supplied by the caller. Any omitted device is taken from the
/// latest telemetry, or the all-on defaults.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceOverrides {
    #[serde(default, alias = "ventilador")]
    pub fan: Option<bool>,
    #[serde(default, alias = "persianas")]
    pub blinds: Option<bool>,
    #[serde(default, alias = "bulbs")]
    pub lights: Option<bool>,
}

impl DeviceOverrides {
    fn resolve(&self, telemetry: &TelemetryBus) -> Option<DeviceState> {
        if self.fan.is_none() && self.blinds.is_none() && self.lights.is_none() {
            return None;
        }
        let base = telemetry.snapshot_or_defaults().device_state();
        Some(DeviceState::new(
            self.fan.unwrap_or(base.fan),
            self.blinds.unwrap_or(base.blinds),
            self.lights.unwrap_or(base.lights),
        ))
    }
}

/// Request body for a text turn.
#[derive(Debug, Deserialize)]
pub struct SmartHomeRequest {
    pub request: String,
    #[serde(flatten)]
    pub state: DeviceOverrides,
}

/// Possible responses from the smart-home endpoint.
pub enum SmartHomeResponse {
    Ok(Json<ReconciledResponse>),
}

impl IntoResponse for SmartHomeResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Body of a successful voice turn. `audio` is base64-encoded WAV.
#[derive(Debug, Serialize)]
pub struct PipelineBody {
    pub transcription: String,
    #[serde(flatten)]
    pub response: ReconciledResponse,
    pub audio: String,
}

/// Possible responses from the pipeline endpoint.
pub enum PipelineResponse {
    Ok(Json<PipelineBody>),
}

impl IntoResponse for PipelineResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/v1/smart-home`
pub async fn smart_home<T, M, S>(
    State(state): State<AppState<T, M, S>>,
    Json(req): Json<SmartHomeRequest>,
) -> Result<SmartHomeResponse, ApiError>
where
    T: Transcriber + Send + Sync + 'static,
    M: LanguageModel + Send + Sync + 'static,
    S: Synthesizer + Send + Sync + 'static,
{
    let device_state = req.state.resolve(&state.telemetry);
    let outcome = state
        .conversation
        .respond(TurnRequest {
            utterance: Utterance::new(req.request),
            state: device_state,
        })
        .await?;
    Ok(SmartHomeResponse::Ok(Json(outcome.response)))
}

/// `POST /api/v1/pipeline` — multipart `file` upload or raw audio body.
pub async fn pipeline<T, M, S>(
    State(state): State<AppState<T, M, S>>,
    Query(overrides): Query<DeviceOverrides>,
    AudioUpload(audio): AudioUpload,
) -> Result<PipelineResponse, ApiError>
where
    T: Transcriber + Send + Sync + 'static,
    M: LanguageModel + Send + Sync + 'static,
    S: Synthesizer + Send + Sync + 'static,
{
    let device_state = overrides.resolve(&state.telemetry);
    let outcome = state
        .conversation
        .process_audio(audio, device_state)
        .await?;
    Ok(PipelineResponse::Ok(Json(PipelineBody {
        transcription: outcome.transcription,
        response: outcome.response,
        audio: STANDARD.encode(&outcome.audio),
    })))
}
