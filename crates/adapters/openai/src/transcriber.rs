//! Speech-to-text over `/audio/transcriptions`.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use domus_app::ports::Transcriber;
use domus_domain::error::{Collaborator, DomusError};

use crate::client::OpenAiClient;
use crate::config::OpenAiConfig;
use crate::error::OpenAiError;

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Whisper-style transcriber.
pub struct WhisperTranscriber {
    client: OpenAiClient,
    model: String,
    language: String,
}

impl WhisperTranscriber {
    #[must_use]
    pub fn new(client: OpenAiClient, config: &OpenAiConfig) -> Self {
        Self {
            client,
            model: config.transcription_model.clone(),
            language: config.language.clone(),
        }
    }

    async fn request(&self, audio: Vec<u8>) -> Result<String, OpenAiError> {
        tracing::debug!(audio_bytes = audio.len(), model = %self.model, "starting transcription");

        let file = Part::bytes(audio)
            .file_name("audio.wav")
            .mime_str("audio/wav")?;
        let form = Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("language", self.language.clone());

        let response =
            OpenAiClient::send(self.client.post("audio/transcriptions").multipart(form)).await?;
        let result: TranscriptionResponse = response.json().await?;
        let text = result.text.trim().to_string();

        tracing::info!(transcript = %text, "transcription complete");
        Ok(text)
    }
}

impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: Vec<u8>) -> Result<String, DomusError> {
        self.request(audio).await.map_err(|err| {
            tracing::error!(error = %err, "transcription failed");
            err.into_domain(Collaborator::Transcription)
        })
    }
}
