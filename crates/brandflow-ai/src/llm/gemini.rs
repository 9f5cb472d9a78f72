//! Gemini LLM provider (Generative Language REST API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AiError, Result};
use crate::llm::client::{
    CompletionRequest, CompletionResponse, FinishReason, LlmClient, Message, Role, TokenUsage,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: "gemini-2.0-flash".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL (tests, regional endpoints)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request(&self, request: &CompletionRequest) -> GeminiRequest {
        // Gemini separates the system instruction from the turn list and
        // calls the assistant role "model".
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();
        for message in &request.messages {
            match message.role {
                Role::System => system_parts.push(GeminiPart {
                    text: message.content.clone(),
                }),
                Role::User => contents.push(GeminiContent::from_message(message, "user")),
                Role::Assistant => contents.push(GeminiContent::from_message(message, "model")),
            }
        }

        let generation_config = if request.temperature.is_some()
            || request.top_p.is_some()
            || request.max_tokens.is_some()
        {
            Some(GenerationConfig {
                temperature: request.temperature,
                top_p: request.top_p,
                max_output_tokens: request.max_tokens,
            })
        } else {
            None
        };

        GeminiRequest {
            system_instruction: if system_parts.is_empty() {
                None
            } else {
                Some(GeminiSystemInstruction {
                    parts: system_parts,
                })
            },
            contents,
            generation_config,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn from_message(message: &Message, role: &str) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![GeminiPart {
                text: message.content.clone(),
            }],
        }
    }
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn provider(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = self.build_request(&request);

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::Llm(format!("Gemini API error {status}: {text}")));
        }

        let parsed: GeminiResponse = response.json().await?;
        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AiError::Llm("Gemini returned no candidates".to_string()))?;

        let content = candidate.content.map(|c| {
            c.parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        });

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("STOP") | None => FinishReason::Stop,
            Some("MAX_TOKENS") => FinishReason::MaxTokens,
            Some(_) => FinishReason::Error,
        };

        let usage = parsed.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(CompletionResponse {
            content,
            finish_reason,
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_messages_become_system_instruction() {
        let client = GeminiClient::new("test-key").with_model("gemini-2.0-flash");
        let request = CompletionRequest::new(vec![
            Message::system("You are a naming expert."),
            Message::user("Name a coffee brand."),
        ])
        .with_temperature(0.9);

        let body = client.build_request(&request);
        assert!(body.system_instruction.is_some());
        assert_eq!(body.contents.len(), 1);
        assert_eq!(body.contents[0].role.as_deref(), Some("user"));
        assert_eq!(body.generation_config.as_ref().unwrap().temperature, Some(0.9));
    }
}
