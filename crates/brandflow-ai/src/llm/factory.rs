//! LLM backend selection.
//!
//! The backend is chosen once, at construction time, from configuration.
//! Business logic never probes the environment to decide between the real
//! client and the mock.

use std::sync::Arc;

use super::{GeminiClient, LlmClient, MockLlmClient};

/// Which LLM backend to construct.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmBackend {
    /// Gemini REST API with an API key.
    Gemini { api_key: String, model: String },
    /// Scripted deterministic mock (offline mode, tests).
    Mock { model: String },
}

/// Build an LLM client for the configured backend.
pub fn create_client(backend: &LlmBackend) -> Arc<dyn LlmClient> {
    match backend {
        LlmBackend::Gemini { api_key, model } => {
            tracing::info!(%model, "using Gemini LLM backend");
            Arc::new(GeminiClient::new(api_key.clone()).with_model(model.clone()))
        }
        LlmBackend::Mock { model } => {
            tracing::info!(%model, "using mock LLM backend");
            Arc::new(MockLlmClient::new(model.clone()))
        }
    }
}
