//! Sensor snapshot handlers.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use domus_app::ports::{LanguageModel, Synthesizer, Transcriber};
use domus_domain::sensor::SensorReading;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the sensor snapshot endpoints.
pub enum ReadingResponse {
    Ok(Json<SensorReading>),
}

impl IntoResponse for ReadingResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/v1/sensors/latest` — all-zero reading before the first ingest.
pub async fn latest<T, M, S>(State(state): State<AppState<T, M, S>>) -> ReadingResponse
where
    T: Transcriber + Send + Sync + 'static,
    M: LanguageModel + Send + Sync + 'static,
    S: Synthesizer + Send + Sync + 'static,
{
    ReadingResponse::Ok(Json(state.telemetry.snapshot_or_zeroed()))
}

/// `GET /api/v1/sensors/current` — 503 before the first ingest.
pub async fn current<T, M, S>(
    State(state): State<AppState<T, M, S>>,
) -> Result<ReadingResponse, ApiError>
where
    T: Transcriber + Send + Sync + 'static,
    M: LanguageModel + Send + Sync + 'static,
    S: Synthesizer + Send + Sync + 'static,
{
    let reading = state.telemetry.require_latest()?;
    Ok(ReadingResponse::Ok(Json(reading)))
}
