//! Shared application state for axum handlers.

use std::sync::Arc;
use std::time::Duration;

use domus_app::ports::{LanguageModel, Synthesizer, Transcriber};
use domus_app::sensor_stream::DEFAULT_KEEPALIVE;
use domus_app::services::conversation_service::ConversationService;
use domus_app::telemetry_bus::TelemetryBus;

/// Application state shared across all axum handlers.
///
/// Generic over the collaborator types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<T, M, S> {
    /// Conversation pipeline.
    pub conversation: Arc<ConversationService<T, M, S>>,
    /// Latest reading and per-client queues.
    pub telemetry: Arc<TelemetryBus>,
    /// Idle interval after which the sensor stream emits a keepalive.
    pub keepalive: Duration,
}

impl<T, M, S> Clone for AppState<T, M, S> {
    fn clone(&self) -> Self {
        Self {
            conversation: Arc::clone(&self.conversation),
            telemetry: Arc::clone(&self.telemetry),
            keepalive: self.keepalive,
        }
    }
}

impl<T, M, S> AppState<T, M, S>
where
    T: Transcriber + Send + Sync + 'static,
    M: LanguageModel + Send + Sync + 'static,
    S: Synthesizer + Send + Sync + 'static,
{
    /// Create a new application state with the default keepalive.
    pub fn new(conversation: ConversationService<T, M, S>, telemetry: Arc<TelemetryBus>) -> Self {
        Self {
            conversation: Arc::new(conversation),
            telemetry,
            keepalive: DEFAULT_KEEPALIVE,
        }
    }

    /// Override the sensor stream keepalive interval.
    #[must_use]
    pub fn with_keepalive(mut self, keepalive: Duration) -> Self {
        self.keepalive = keepalive;
        self
    }
}
