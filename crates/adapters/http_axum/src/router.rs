//! Axum router assembly.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use domus_app::ports::{LanguageModel, Synthesizer, Transcriber};

use crate::state::AppState;

/// Largest accepted request body. Recorded audio easily exceeds axum's
/// default limit.
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api/v1`. CORS is permissive so browser clients
/// on other origins can call the API. Includes a [`TraceLayer`] that logs each
/// HTTP request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<T, M, S>(state: AppState<T, M, S>) -> Router
where
    T: Transcriber + Send + Sync + 'static,
    M: LanguageModel + Send + Sync + 'static,
    S: Synthesizer + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", crate::api::routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
