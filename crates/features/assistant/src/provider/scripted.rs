use super::{CompletionProvider, CompletionRequest, ProviderError};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// An owned copy of a request seen by [`ScriptedProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub secret: String,
    pub prompt: String,
    pub system_instructions: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// An in-memory provider that replays queued outcomes in order.
///
/// Once the script runs out every call fails with [`ProviderError::Unavailable`].
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful completion.
    #[must_use]
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.script.lock().push_back(Ok(text.into()));
        self
    }

    /// Queues a failure.
    #[must_use]
    pub fn fail(self, error: ProviderError) -> Self {
        self.script.lock().push_back(Err(error));
        self
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        self.requests.lock().push(RecordedRequest {
            secret: request.secret.to_owned(),
            prompt: request.prompt.to_owned(),
            system_instructions: request.system_instructions.to_owned(),
            model: request.model.to_owned(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        });

        self.script.lock().pop_front().unwrap_or_else(|| {
            Err(ProviderError::Unavailable { message: "Script exhausted".into(), context: None })
        })
    }
}
