//! Audio upload extraction.

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use domus_domain::error::{DomusError, ValidationError};

use crate::error::ApiError;

/// Form field carrying the recording in a multipart upload.
pub const AUDIO_FIELD: &str = "file";

/// Recorded audio sent either as a `multipart/form-data` upload with a
/// `file` field or as the raw request body.
#[derive(Debug)]
pub struct AudioUpload(pub Vec<u8>);

impl<S> FromRequest<S> for AudioUpload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(Self(body.to_vec()));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(IntoResponse::into_response)?
        {
            if field.name() != Some(AUDIO_FIELD) {
                continue;
            }
            let audio = field.bytes().await.map_err(IntoResponse::into_response)?;
            tracing::debug!(audio_bytes = audio.len(), "multipart audio received");
            return Ok(Self(audio.to_vec()));
        }

        tracing::debug!("multipart upload without a file field");
        Err(ApiError::from(DomusError::from(ValidationError::EmptyAudio)).into_response())
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}
