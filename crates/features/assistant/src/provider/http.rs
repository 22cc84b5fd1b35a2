use super::{CompletionProvider, CompletionRequest, ProviderError, ProviderErrorExt};
use jobchat_domain::config::AssistantConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// OpenAI-compatible chat completions over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl HttpProvider {
    /// Builds a provider for `config.endpoint`.
    ///
    /// # Errors
    /// Returns [`ProviderError::Transport`] if the HTTP client cannot be initialized.
    pub fn new(config: &AssistantConfig, client_id: &str) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(client_id)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, endpoint: config.endpoint.clone() })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CompletionProvider for HttpProvider {
    #[instrument(skip_all, fields(model = request.model))]
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        let body = ChatCompletionBody {
            model: request.model,
            messages: [
                ChatMessage { role: "system", content: request.system_instructions },
                ChatMessage { role: "user", content: request.prompt },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(request.secret)
            .json(&body)
            .send()
            .await
            .context("Completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
            };
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: message.into(),
                context: None,
            });
        }

        let payload: ChatCompletionResponse =
            response.json().await.context("Failed to decode completion response")?;

        let text = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ProviderError::InvalidResponse {
                message: "Completion contained no text".into(),
                context: None,
            })?;

        debug!(chars = text.chars().count(), "Completion received");
        Ok(text)
    }
}
