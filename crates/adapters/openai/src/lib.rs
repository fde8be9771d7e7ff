//! # domus-adapter-openai
//!
//! Implements the speech and language ports against OpenAI-compatible HTTP
//! APIs. Pointing `base_url` at a local server (llama.cpp, faster-whisper,
//! piper behind an OpenAI shim) keeps everything on-premises.
//!
//! | Port | Implementation | Endpoint |
//! |------|----------------|----------|
//! | `Transcriber` | [`WhisperTranscriber`] | `POST {base_url}/audio/transcriptions` |
//! | `LanguageModel` | [`ChatModel`] | `POST {base_url}/chat/completions` |
//! | `Synthesizer` | [`SpeechSynthesizer`] | `POST {base_url}/audio/speech` |
//!
//! Every failure surfaces as `DomusError::Upstream` naming the collaborator.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `domus-app` and `domus-domain`.

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod synthesizer;
pub mod transcriber;

pub use chat::ChatModel;
pub use client::OpenAiClient;
pub use config::OpenAiConfig;
pub use error::OpenAiError;
pub use synthesizer::SpeechSynthesizer;
pub use transcriber::WhisperTranscriber;

#[cfg(test)]
mod testing;
