//! Environment-driven application configuration.
//!
//! All environment access happens here, once, at startup. Everything
//! downstream receives plain config values; no module probes the
//! environment to decide between real and stub backends at runtime.

use std::path::PathBuf;

use brandflow_ai::llm::LlmBackend;

const DEFAULT_LOCATION: &str = "us-central1";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Google Cloud project, when running against Vertex-managed quota.
    pub project_id: Option<String>,
    /// Google Cloud region.
    pub location: String,
    /// Model used for generation and summarization.
    pub model_name: String,
    /// Explicit token-limit override for the compactor.
    pub token_limit: Option<usize>,
    pub google_api_key: Option<String>,
    pub uspto_api_key: Option<String>,
    /// Offline mode: mock LLM and deterministic lookup stubs.
    pub offline: bool,
    /// Session storage root override (defaults to ~/.brandflow/sessions).
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            location: DEFAULT_LOCATION.to_string(),
            model_name: DEFAULT_MODEL.to_string(),
            token_limit: None,
            google_api_key: None,
            uspto_api_key: None,
            offline: false,
            data_dir: None,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let token_limit = env_var("BRANDFLOW_TOKEN_LIMIT").and_then(|raw| match raw.parse() {
            Ok(limit) => Some(limit),
            Err(_) => {
                tracing::warn!(%raw, "ignoring unparseable BRANDFLOW_TOKEN_LIMIT");
                None
            }
        });

        let offline = env_var("BRANDFLOW_OFFLINE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            project_id: env_var("GOOGLE_CLOUD_PROJECT"),
            location: env_var("GOOGLE_CLOUD_LOCATION")
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            model_name: env_var("BRANDFLOW_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            token_limit,
            google_api_key: env_var("GOOGLE_API_KEY"),
            uspto_api_key: env_var("USPTO_API_KEY"),
            offline,
            data_dir: env_var("BRANDFLOW_DIR").map(PathBuf::from),
        }
    }

    /// Which LLM backend this configuration selects.
    ///
    /// No API key means the mock backend - decided here, not detected
    /// somewhere inside an agent mid-request.
    pub fn llm_backend(&self) -> LlmBackend {
        if self.offline || self.google_api_key.is_none() {
            LlmBackend::Mock {
                model: self.model_name.clone(),
            }
        } else {
            LlmBackend::Gemini {
                api_key: self.google_api_key.clone().unwrap_or_default(),
                model: self.model_name.clone(),
            }
        }
    }

    /// Whether lookup backends should be deterministic stubs.
    pub fn use_stub_lookups(&self) -> bool {
        self.offline
    }

    /// Resolve the session storage root.
    pub fn sessions_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => {
                let sessions = dir.join("sessions");
                std::fs::create_dir_all(&sessions)?;
                Ok(sessions)
            }
            None => brandflow_storage::paths::ensure_sessions_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_selects_mock_backend() {
        let config = AppConfig::default();
        assert!(matches!(config.llm_backend(), LlmBackend::Mock { .. }));
    }

    #[test]
    fn offline_overrides_api_key() {
        let config = AppConfig {
            google_api_key: Some("key".into()),
            offline: true,
            ..AppConfig::default()
        };
        assert!(matches!(config.llm_backend(), LlmBackend::Mock { .. }));
        assert!(config.use_stub_lookups());
    }

    #[test]
    fn api_key_selects_gemini_backend() {
        let config = AppConfig {
            google_api_key: Some("key".into()),
            model_name: "gemini-2.5-pro".into(),
            ..AppConfig::default()
        };
        match config.llm_backend() {
            LlmBackend::Gemini { model, .. } => assert_eq!(model, "gemini-2.5-pro"),
            other => panic!("expected Gemini backend, got {other:?}"),
        }
    }
}
