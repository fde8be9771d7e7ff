//! Server-Sent Events (SSE) stream of sensor readings.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use tokio_stream::StreamExt;

use domus_app::ports::{LanguageModel, Synthesizer, Transcriber};
use domus_app::sensor_stream::sensor_stream;

use crate::state::AppState;

/// `GET /api/v1/sensors/stream` — SSE stream of sensor readings.
///
/// Registers a dedicated client queue on the telemetry bus and sends every
/// reading as a JSON `data:` frame. When nothing arrives within the keepalive
/// interval a `{"status":"keepalive"}` frame is sent instead. The client is
/// deregistered when the connection drops.
pub async fn stream<T, M, S>(
    State(state): State<AppState<T, M, S>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>
where
    T: Transcriber + Send + Sync + 'static,
    M: LanguageModel + Send + Sync + 'static,
    S: Synthesizer + Send + Sync + 'static,
{
    let events = sensor_stream(state.telemetry.subscribe(), state.keepalive).map_while(|event| {
        match serde_json::to_string(&event) {
            Ok(json) => Some(Ok(Event::default().data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize sensor event, closing SSE stream");
                None
            }
        }
    });

    Sse::new(events)
}
