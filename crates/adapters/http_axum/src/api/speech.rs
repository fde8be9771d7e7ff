//! Speech handlers: transcription and synthesis on their own.

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use domus_app::ports::{LanguageModel, Synthesizer, Transcriber};

use crate::api::upload::AudioUpload;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TranscriptionBody {
    pub text: String,
}

/// Possible responses from the transcribe endpoint.
pub enum TranscribeResponse {
    Ok(Json<TranscriptionBody>),
}

impl IntoResponse for TranscribeResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Request body for speech synthesis.
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
}

/// Possible responses from the tts endpoint.
pub enum SpeechResponse {
    Wav(Vec<u8>),
}

impl IntoResponse for SpeechResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Wav(audio) => ([(header::CONTENT_TYPE, "audio/wav")], audio).into_response(),
        }
    }
}

/// `POST /api/v1/transcribe` — multipart `file` upload or raw audio body.
pub async fn transcribe<T, M, S>(
    State(state): State<AppState<T, M, S>>,
    AudioUpload(audio): AudioUpload,
) -> Result<TranscribeResponse, ApiError>
where
    T: Transcriber + Send + Sync + 'static,
    M: LanguageModel + Send + Sync + 'static,
    S: Synthesizer + Send + Sync + 'static,
{
    let text = state.conversation.transcribe(audio).await?;
    Ok(TranscribeResponse::Ok(Json(TranscriptionBody { text })))
}

/// `POST /api/v1/tts`
pub async fn tts<T, M, S>(
    State(state): State<AppState<T, M, S>>,
    Json(req): Json<SpeechRequest>,
) -> Result<SpeechResponse, ApiError>
where
    T: Transcriber + Send + Sync + 'static,
    M: LanguageModel + Send + Sync + 'static,
    S: Synthesizer + Send + Sync + 'static,
{
    let audio = state.conversation.synthesize(&req.text).await?;
    Ok(SpeechResponse::Wav(audio))
}
