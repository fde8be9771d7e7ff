//! Collaborator endpoint and model configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration shared by the transcription, chat and speech clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API root, without trailing slash.
    pub base_url: String,
    /// Bearer token. Left empty for local servers that need none.
    pub api_key: String,
    pub transcription_model: String,
    /// ISO-639-1 hint passed to the transcriber.
    pub language: String,
    pub speech_model: String,
    pub voice: String,
    pub chat_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            transcription_model: "whisper-1".to_string(),
            language: "es".to_string(),
            speech_model: "tts-1".to_string(),
            voice: "nova".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            max_tokens: 150,
            temperature: 0.3,
            top_p: 0.9,
            timeout_secs: 60,
        }
    }
}

impl OpenAiConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
