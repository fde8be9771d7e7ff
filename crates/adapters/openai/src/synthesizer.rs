//! Text-to-speech over `/audio/speech`.

use serde::Serialize;

use domus_app::ports::Synthesizer;
use domus_domain::error::{Collaborator, DomusError};

use crate::client::OpenAiClient;
use crate::config::OpenAiConfig;
use crate::error::OpenAiError;

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

/// Speech synthesizer returning WAV audio.
pub struct SpeechSynthesizer {
    client: OpenAiClient,
    model: String,
    voice: String,
}

impl SpeechSynthesizer {
    #[must_use]
    pub fn new(client: OpenAiClient, config: &OpenAiConfig) -> Self {
        Self {
            client,
            model: config.speech_model.clone(),
            voice: config.voice.clone(),
        }
    }

    async fn request(&self, text: &str) -> Result<Vec<u8>, OpenAiError> {
        let request = SpeechRequest {
            model: &self.model,
            input: text,
            voice: &self.voice,
            response_format: "wav",
        };
        let response = OpenAiClient::send(self.client.post("audio/speech").json(&request)).await?;
        let audio = response.bytes().await?;
        tracing::debug!(audio_bytes = audio.len(), "speech synthesized");
        Ok(audio.to_vec())
    }
}

impl Synthesizer for SpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, DomusError> {
        self.request(text).await.map_err(|err| {
            tracing::error!(error = %err, "speech synthesis failed");
            err.into_domain(Collaborator::Synthesis)
        })
    }
}
