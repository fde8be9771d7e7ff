//! Language model port.

use std::future::Future;

use domus_domain::error::DomusError;

use crate::prompt::Prompt;

/// A generative model answering a chat-style prompt.
///
/// The completion is untrusted text; callers run it through
/// [`reconcile`](domus_domain::reconcile::reconcile).
pub trait LanguageModel {
    /// Complete `prompt`.
    ///
    /// Failures are reported as [`DomusError::Upstream`].
    fn complete(&self, prompt: &Prompt) -> impl Future<Output = Result<String, DomusError>> + Send;
}

impl<T: LanguageModel + Send + Sync> LanguageModel for std::sync::Arc<T> {
    fn complete(&self, prompt: &Prompt) -> impl Future<Output = Result<String, DomusError>> + Send {
        (**self).complete(prompt)
    }
}
