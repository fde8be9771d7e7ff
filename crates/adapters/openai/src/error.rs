//! OpenAI adapter error types.

use domus_domain::error::{Collaborator, DomusError, UpstreamError};

/// Errors specific to the OpenAI-compatible clients.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    /// Transport failure, timeout or undecodable response body.
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The chat completion carried no message content.
    #[error("completion contained no content")]
    EmptyCompletion,
}

impl OpenAiError {
    /// Convert into [`DomusError::Upstream`] for propagation across port
    /// boundaries.
    pub fn into_domain(self, collaborator: Collaborator) -> DomusError {
        UpstreamError::new(collaborator, self).into()
    }
}
