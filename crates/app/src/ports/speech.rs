//! Speech ports — transcription and synthesis collaborators.

use std::future::Future;

use domus_domain::error::DomusError;

/// Turns recorded audio into text.
pub trait Transcriber {
    /// Transcribe `audio` (WAV bytes).
    ///
    /// Failures are reported as [`DomusError::Upstream`].
    fn transcribe(&self, audio: Vec<u8>) -> impl Future<Output = Result<String, DomusError>> + Send;
}

/// Turns text into audio.
pub trait Synthesizer {
    /// Synthesize `text`, returning WAV bytes.
    ///
    /// Failures are reported as [`DomusError::Upstream`].
    fn synthesize(&self, text: &str) -> impl Future<Output = Result<Vec<u8>, DomusError>> + Send;
}

impl<T: Transcriber + Send + Sync> Transcriber for std::sync::Arc<T> {
    fn transcribe(&self, audio: Vec<u8>) -> impl Future<Output = Result<String, DomusError>> + Send {
        (**self).transcribe(audio)
    }
}

impl<T: Synthesizer + Send + Sync> Synthesizer for std::sync::Arc<T> {
    fn synthesize(&self, text: &str) -> impl Future<Output = Result<Vec<u8>, DomusError>> + Send {
        (**self).synthesize(text)
    }
}
