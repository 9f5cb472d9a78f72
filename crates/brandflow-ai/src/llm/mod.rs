//! LLM client abstraction and backends.

mod client;
mod factory;
mod gemini;
mod mock_client;

pub use client::{
    CompletionRequest, CompletionResponse, FinishReason, LlmClient, Message, Role, TokenUsage,
};
pub use factory::{LlmBackend, create_client};
pub use gemini::GeminiClient;
pub use mock_client::{MockLlmClient, MockStep};
