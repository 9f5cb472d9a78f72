//! Deterministic mock LLM client for offline use and tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AiError, Result};

use super::{CompletionRequest, CompletionResponse, FinishReason, LlmClient, Role, TokenUsage};

/// Deterministic step for scripted mock completions.
#[derive(Debug, Clone)]
pub enum MockStep {
    /// Return a plain assistant message.
    Text(String),
    /// Return an LLM error.
    Error(String),
}

impl MockStep {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

/// A deterministic mock LLM client driven by scripted steps.
///
/// When the script is exhausted the client echoes the last user message, so
/// agents exercising the mock always get *something* parseable back.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    model: String,
    script: Arc<Mutex<VecDeque<MockStep>>>,
}

impl MockLlmClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn from_steps(model: impl Into<String>, steps: Vec<MockStep>) -> Self {
        Self {
            model: model.into(),
            script: Arc::new(Mutex::new(VecDeque::from(steps))),
        }
    }

    pub async fn push_step(&self, step: MockStep) {
        self.script.lock().await.push_back(step);
    }

    async fn next_step(&self) -> Option<MockStep> {
        self.script.lock().await.pop_front()
    }

    fn usage_for(content_len: usize) -> TokenUsage {
        let completion_tokens = content_len as u32;
        TokenUsage {
            prompt_tokens: 1,
            completion_tokens,
            total_tokens: 1 + completion_tokens,
        }
    }

    fn fallback_response(request: &CompletionRequest) -> CompletionResponse {
        let text = request
            .messages
            .iter()
            .rev()
            .find(|msg| matches!(msg.role, Role::User))
            .map(|msg| format!("mock-echo: {}", msg.content))
            .unwrap_or_else(|| "mock-ok".to_string());

        CompletionResponse {
            usage: Some(Self::usage_for(text.len())),
            content: Some(text),
            finish_reason: FinishReason::Stop,
        }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let step = self.next_step().await;
        let Some(step) = step else {
            return Ok(Self::fallback_response(&request));
        };

        match step {
            MockStep::Text(content) => Ok(CompletionResponse {
                usage: Some(Self::usage_for(content.len())),
                content: Some(content),
                finish_reason: FinishReason::Stop,
            }),
            MockStep::Error(message) => Err(AiError::Llm(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;

    #[tokio::test]
    async fn mock_client_returns_scripted_text() {
        let client = MockLlmClient::from_steps("mock-model", vec![MockStep::text("hello")]);

        let response = client
            .complete(CompletionRequest::new(vec![Message::user("ping")]))
            .await
            .expect("mock response should succeed");

        assert_eq!(response.content.as_deref(), Some("hello"));
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[tokio::test]
    async fn mock_client_errors_then_echoes() {
        let client = MockLlmClient::from_steps("mock-model", vec![MockStep::error("down")]);

        let err = client
            .complete(CompletionRequest::new(vec![Message::user("ping")]))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::Llm(_)));

        let response = client
            .complete(CompletionRequest::new(vec![Message::user("ping")]))
            .await
            .unwrap();
        assert_eq!(response.content.as_deref(), Some("mock-echo: ping"));
    }
}
