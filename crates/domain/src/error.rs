//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`DomusError`]
//! via `#[from]` (or an `into_domain` helper in adapters).

/// Top-level error crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum DomusError {
    /// The request itself is invalid.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A dependency has no data yet; the caller may retry later.
    #[error("temporarily unavailable")]
    Unavailable(#[from] UnavailableError),

    /// An external collaborator (transcription, model, synthesis) failed.
    #[error("upstream failure")]
    Upstream(#[from] UpstreamError),
}

/// Invariant violations on incoming requests.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The utterance contains no text.
    #[error("utterance must not be empty")]
    EmptyUtterance,
    /// The text to synthesize contains nothing to say.
    #[error("text to synthesize must not be empty")]
    EmptySpeechText,
    /// No audio bytes were provided.
    #[error("audio payload must not be empty")]
    EmptyAudio,
}

/// Retryable unavailability of an internal data source.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UnavailableError {
    /// No sensor reading has been ingested since startup.
    #[error("no telemetry has been received yet")]
    NoTelemetry,
}

/// The external collaborator that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    Transcription,
    LanguageModel,
    Synthesis,
}

impl std::fmt::Display for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transcription => f.write_str("transcription"),
            Self::LanguageModel => f.write_str("language model"),
            Self::Synthesis => f.write_str("speech synthesis"),
        }
    }
}

/// Failure of an external collaborator, fatal to the current request.
#[derive(Debug, thiserror::Error)]
#[error("{collaborator} failed")]
pub struct UpstreamError {
    /// Which collaborator failed.
    pub collaborator: Collaborator,
    /// Underlying cause.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl UpstreamError {
    /// Wrap an adapter error for the given collaborator.
    pub fn new(
        collaborator: Collaborator,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            collaborator,
            source: source.into(),
        }
    }
}
