//! Language model over `/chat/completions`.

use serde::{Deserialize, Serialize};

use domus_app::ports::LanguageModel;
use domus_app::prompt::Prompt;
use domus_domain::error::{Collaborator, DomusError};

use crate::client::OpenAiClient;
use crate::config::OpenAiConfig;
use crate::error::OpenAiError;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completion model with fixed sampling parameters.
pub struct ChatModel {
    client: OpenAiClient,
    model: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

impl ChatModel {
    #[must_use]
    pub fn new(client: OpenAiClient, config: &OpenAiConfig) -> Self {
        Self {
            client,
            model: config.chat_model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }

    async fn request(&self, prompt: &Prompt) -> Result<String, OpenAiError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                Message {
                    role: "system",
                    content: &prompt.system,
                },
                Message {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        };

        let response =
            OpenAiClient::send(self.client.post("chat/completions").json(&request)).await?;
        let result: ChatCompletionResponse = response.json().await?;

        let content = result
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(OpenAiError::EmptyCompletion)?;

        tracing::debug!(chars = content.chars().count(), "completion received");
        Ok(content)
    }
}

impl LanguageModel for ChatModel {
    async fn complete(&self, prompt: &Prompt) -> Result<String, DomusError> {
        self.request(prompt).await.map_err(|err| {
            tracing::error!(error = %err, "chat completion failed");
            err.into_domain(Collaborator::LanguageModel)
        })
    }
}
