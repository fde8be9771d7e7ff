//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod conversation;
#[allow(clippy::missing_errors_doc)]
pub mod sensors;
#[allow(clippy::missing_errors_doc)]
pub mod speech;
pub mod sse;
pub mod upload;

use axum::Router;
use axum::routing::{get, post};

use domus_app::ports::{LanguageModel, Synthesizer, Transcriber};

use crate::state::AppState;

/// Build the `/api/v1` sub-router.
pub fn routes<T, M, S>() -> Router<AppState<T, M, S>>
where
    T: Transcriber + Send + Sync + 'static,
    M: LanguageModel + Send + Sync + 'static,
    S: Synthesizer + Send + Sync + 'static,
{
    Router::new()
        .route("/smart-home", post(conversation::smart_home::<T, M, S>))
        .route("/pipeline", post(conversation::pipeline::<T, M, S>))
        .route("/transcribe", post(speech::transcribe::<T, M, S>))
        .route("/tts", post(speech::tts::<T, M, S>))
        .route("/sensors/latest", get(sensors::latest::<T, M, S>))
        .route("/sensors/current", get(sensors::current::<T, M, S>))
        .route("/sensors/stream", get(sse::stream::<T, M, S>))
}
