//! Conversation service — one voice or text turn from utterance to answer.

use std::sync::Arc;

use domus_domain::device::DeviceState;
use domus_domain::error::{DomusError, ValidationError};
use domus_domain::interpreter::interpret;
use domus_domain::reconcile::{ReconciledResponse, reconcile};
use domus_domain::time::local_now;
use domus_domain::utterance::{Classification, Utterance};

use crate::ports::{LanguageModel, Synthesizer, Transcriber};
use crate::prompt::{Prompt, PromptContext};
use crate::telemetry_bus::TelemetryBus;

/// UTC offset of America/Lima, the smart-space's home timezone.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -300;

/// Persona and locale of the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSettings {
    pub assistant_name: String,
    /// Offset applied to the wall clock shown to the model.
    pub utc_offset_minutes: i32,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            assistant_name: "Alexa".to_string(),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

/// A text turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    pub utterance: Utterance,
    /// Device state as seen by the caller. When absent the latest telemetry
    /// is used, then all-on defaults.
    pub state: Option<DeviceState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub classification: Classification,
    pub response: ReconciledResponse,
}

/// Result of the full audio round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub transcription: String,
    pub response: ReconciledResponse,
    /// Synthesized answer (WAV bytes).
    pub audio: Vec<u8>,
}

/// Orchestrates transcription, interpretation, the language model,
/// reconciliation and synthesis.
///
/// Holds no lock while collaborators run, so concurrent turns never wait on
/// each other.
pub struct ConversationService<T, M, S> {
    transcriber: T,
    model: M,
    synthesizer: S,
    telemetry: Arc<TelemetryBus>,
    settings: ConversationSettings,
}

impl<T, M, S> ConversationService<T, M, S>
where
    T: Transcriber,
    M: LanguageModel,
    S: Synthesizer,
{
    pub fn new(
        transcriber: T,
        model: M,
        synthesizer: S,
        telemetry: Arc<TelemetryBus>,
        settings: ConversationSettings,
    ) -> Self {
        Self {
            transcriber,
            model,
            synthesizer,
            telemetry,
            settings,
        }
    }

    /// Transcribe recorded audio.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyAudio`] for an empty body, or the
    /// transcriber's upstream error.
    #[tracing::instrument(skip(self, audio), fields(audio_bytes = audio.len()))]
    pub async fn transcribe(&self, audio: Vec<u8>) -> Result<String, DomusError> {
        if audio.is_empty() {
            return Err(ValidationError::EmptyAudio.into());
        }
        let text = self.transcriber.transcribe(audio).await?;
        tracing::debug!(chars = text.chars().count(), "audio transcribed");
        Ok(text)
    }

    /// Synthesize `text` into audio.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptySpeechText`] for blank text, or the
    /// synthesizer's upstream error.
    #[tracing::instrument(skip(self, text))]
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, DomusError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptySpeechText.into());
        }
        self.synthesizer.synthesize(text).await
    }

    /// Answer one text turn and decide the resulting device state.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUtterance`] for a blank utterance, or
    /// the language model's upstream error. Malformed model output is not an
    /// error: it yields the fallback answer.
    #[tracing::instrument(skip(self, request))]
    pub async fn respond(&self, request: TurnRequest) -> Result<TurnOutcome, DomusError> {
        if request.utterance.is_blank() {
            return Err(ValidationError::EmptyUtterance.into());
        }

        let readings = self.telemetry.snapshot_or_defaults();
        let current = request.state.unwrap_or_else(|| readings.device_state());
        let interpretation = interpret(&request.utterance, current);
        tracing::debug!(
            classification = %interpretation.classification,
            rule = interpretation.rule.unwrap_or("none"),
            "utterance interpreted"
        );

        let prompt = Prompt::build(&PromptContext {
            assistant_name: &self.settings.assistant_name,
            utterance: &request.utterance,
            interpretation: &interpretation,
            current,
            readings: &readings,
            now: local_now(self.settings.utc_offset_minutes),
        });
        let raw = self.model.complete(&prompt).await?;

        let mut response = reconcile(&raw, interpretation.state);
        if response.is_fallback() {
            tracing::warn!("model output could not be decoded, answering with fallback");
        }
        if interpretation.classification == Classification::Question {
            response.state = current;
        }

        Ok(TurnOutcome {
            classification: interpretation.classification,
            response,
        })
    }

    /// Full voice turn: transcribe, respond, synthesize the answer.
    ///
    /// # Errors
    ///
    /// Propagates the first failing step; see [`transcribe`](Self::transcribe),
    /// [`respond`](Self::respond) and [`synthesize`](Self::synthesize).
    #[tracing::instrument(skip(self, audio), fields(audio_bytes = audio.len()))]
    pub async fn process_audio(
        &self,
        audio: Vec<u8>,
        state: Option<DeviceState>,
    ) -> Result<PipelineOutcome, DomusError> {
        let transcription = self.transcribe(audio).await?;
        let turn = self
            .respond(TurnRequest {
                utterance: Utterance::new(transcription.clone()),
                state,
            })
            .await?;
        let audio = self.synthesize(&turn.response.answer).await?;
        tracing::info!(
            classification = %turn.classification,
            audio_bytes = audio.len(),
            "voice turn completed"
        );
        Ok(PipelineOutcome {
            transcription,
            response: turn.response,
            audio,
        })
    }
}
