//! Brainstorming pipeline.
//!
//! One brainstorm round runs generate -> validate -> enrich (SEO + story for
//! the viable names), appending everything to the session as it goes. Each
//! appended event carries a `turn` object in its metadata; the ordered turn
//! sequence reconstructed from those objects is what the compactor sees.

use std::sync::Arc;

use anyhow::{Context, Result};
use brandflow_ai::agent::{
    BrandBrief, BrandStory, NameCandidate, NameGeneratorAgent, SeoAgent, SeoResult, StoryAgent,
    ValidationAgent,
};
use brandflow_ai::memory::ContextCompactor;
use brandflow_models::{
    CompactionResult, ConversationTurn, Session, ValidationResult, ValidationStatus,
};
use brandflow_storage::SessionStore;
use serde_json::{Map, Value, json};

use crate::core::AppCore;

/// How many viable names get the SEO treatment per round.
const SEO_ENRICHMENT_LIMIT: usize = 3;

/// Input for one brainstorm round.
#[derive(Debug, Clone)]
pub struct BrainstormRequest {
    pub user_id: String,
    /// Continue an existing session, or start a fresh one when `None`.
    pub session_id: Option<String>,
    pub brief: BrandBrief,
    pub count: usize,
    pub category: Option<String>,
}

/// Everything one brainstorm round produced.
#[derive(Debug, Clone)]
pub struct BrainstormOutcome {
    pub session_id: String,
    pub candidates: Vec<NameCandidate>,
    /// Validation results, best score first.
    pub validations: Vec<ValidationResult>,
    pub seo_results: Vec<SeoResult>,
    /// Story for the top viable name, when there is one.
    pub story: Option<BrandStory>,
    /// Set when this round pushed the history over the compaction threshold.
    pub compaction: Option<CompactionResult>,
}

/// Orchestrates agents, storage, and compaction for brainstorm rounds.
pub struct StudioService {
    store: Arc<SessionStore>,
    compactor: Arc<ContextCompactor>,
    name_generator: Arc<NameGeneratorAgent>,
    validator: Arc<ValidationAgent>,
    seo: SeoAgent,
    story: Arc<StoryAgent>,
}

impl StudioService {
    pub fn new(core: &AppCore) -> Self {
        Self {
            store: core.store.clone(),
            compactor: core.compactor.clone(),
            name_generator: core.name_generator.clone(),
            validator: core.validator.clone(),
            seo: core.seo.clone(),
            story: core.story.clone(),
        }
    }

    /// Run one brainstorm round against a session.
    pub async fn brainstorm(&self, request: BrainstormRequest) -> Result<BrainstormOutcome> {
        let session = match &request.session_id {
            Some(id) => self
                .store
                .get(id)
                .with_context(|| format!("loading session {id}"))?,
            None => self.store.create(&request.user_id, Map::new())?,
        };
        let session_id = session.session_id.clone();
        tracing::info!(%session_id, count = request.count, "starting brainstorm round");

        self.store.add_event(
            &session_id,
            "brief",
            "user",
            &request.brief.product_description,
            turn_metadata(json!({
                "type": "brief",
                "user_brief": serde_json::to_value(&request.brief)?,
            })),
        )?;

        let candidates = self
            .name_generator
            .generate(&request.brief, request.count)
            .await;
        let names: Vec<String> = candidates.iter().map(|c| c.name.clone()).collect();
        self.store.add_event(
            &session_id,
            "generation",
            "name_generator",
            &names.join(", "),
            turn_metadata(json!({"type": "generation", "generated_names": names.clone()})),
        )?;

        let validations = self
            .validator
            .validate_batch(&names, request.category.as_deref())
            .await;
        let approved: Vec<&str> = validations
            .iter()
            .filter(|v| v.validation_status == ValidationStatus::Clear)
            .map(|v| v.brand_name.as_str())
            .collect();
        self.store.add_event(
            &session_id,
            "validation",
            "validation_agent",
            &validation_digest(&validations),
            turn_metadata(json!({"type": "validation", "approved_names": approved})),
        )?;

        let viable: Vec<&ValidationResult> = validations
            .iter()
            .filter(|v| v.validation_status != ValidationStatus::Blocked)
            .collect();

        let seo_results: Vec<SeoResult> = viable
            .iter()
            .take(SEO_ENRICHMENT_LIMIT)
            .map(|v| {
                self.seo.optimize(
                    &v.brand_name,
                    &request.brief.product_description,
                    &request.brief.industry,
                )
            })
            .collect();

        let story = match viable.first() {
            Some(top) => Some(
                self.story
                    .generate(
                        &top.brand_name,
                        &request.brief.product_description,
                        &request.brief.brand_personality,
                        &request.brief.target_audience,
                    )
                    .await,
            ),
            None => None,
        };

        for validation in &validations {
            let rationale = candidates
                .iter()
                .find(|c| c.name == validation.brand_name)
                .map(|c| c.rationale.clone());
            let seo_score = seo_results
                .iter()
                .find(|s| s.brand_name == validation.brand_name)
                .map(|s| s.seo_score);

            let mut attributes = Map::new();
            attributes.insert("brand_name".into(), json!(validation.brand_name));
            if let Some(rationale) = rationale {
                attributes.insert("rationale".into(), json!(rationale));
            }
            attributes.insert(
                "validation".into(),
                serde_json::to_value(validation)?,
            );
            if let Some(score) = seo_score {
                attributes.insert("seo_score".into(), json!(score));
            }
            self.store.add_generated_brand(&session_id, attributes)?;
        }

        let history = conversation_history(&self.store.get(&session_id)?);
        let compaction = if self.compactor.should_compact(&history) {
            let result = self.compactor.compact(&history).await;
            let mut metadata = Map::new();
            metadata.insert("compaction".into(), serde_json::to_value(&result)?);
            // The summary joins the history as an ordinary turn, so later
            // rounds compact over it instead of re-reading what it replaced.
            metadata.insert(
                "turn".into(),
                json!({"type": "compaction", "summary": result.summary}),
            );
            self.store
                .add_event(&session_id, "compaction", "system", &result.summary, metadata)?;
            Some(result)
        } else {
            None
        };

        tracing::info!(%session_id, validated = validations.len(), "brainstorm round complete");
        Ok(BrainstormOutcome {
            session_id,
            candidates,
            validations,
            seo_results,
            story,
            compaction,
        })
    }
}

fn turn_metadata(turn: Value) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("turn".into(), turn);
    metadata
}

fn validation_digest(validations: &[ValidationResult]) -> String {
    validations
        .iter()
        .map(|v| format!("{} ({}, {})", v.brand_name, v.overall_score, v.validation_status))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Rebuild the conversation history from event metadata, in append order.
pub fn conversation_history(session: &Session) -> Vec<ConversationTurn> {
    session
        .events
        .iter()
        .filter_map(|event| event.metadata.get("turn").and_then(Value::as_object).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use tempfile::tempdir;

    fn offline_core(data_dir: &std::path::Path, token_limit: Option<usize>) -> AppCore {
        let config = AppConfig {
            offline: true,
            token_limit,
            data_dir: Some(data_dir.to_path_buf()),
            ..AppConfig::default()
        };
        AppCore::new(config).unwrap()
    }

    fn request(count: usize) -> BrainstormRequest {
        BrainstormRequest {
            user_id: "alice".to_string(),
            session_id: None,
            brief: BrandBrief {
                product_description: "smart coffee subscription service".to_string(),
                industry: "consumer goods".to_string(),
                brand_personality: "playful".to_string(),
                target_audience: "young professionals".to_string(),
            },
            count,
            category: None,
        }
    }

    #[tokio::test]
    async fn brainstorm_round_persists_session_state() {
        let dir = tempdir().unwrap();
        let core = offline_core(dir.path(), None);
        let studio = StudioService::new(&core);

        let outcome = studio.brainstorm(request(4)).await.unwrap();
        assert_eq!(outcome.validations.len(), outcome.candidates.len());
        assert!(
            outcome
                .validations
                .windows(2)
                .all(|w| w[0].overall_score >= w[1].overall_score)
        );

        let session = core.store.get(&outcome.session_id).unwrap();
        // brief + generation + validation
        assert_eq!(session.events.len(), 3);
        assert_eq!(session.generated_brands.len(), outcome.candidates.len());

        let history = conversation_history(&session);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0]["type"], "brief");
    }

    #[tokio::test]
    async fn brainstorm_continues_existing_session() {
        let dir = tempdir().unwrap();
        let core = offline_core(dir.path(), None);
        let studio = StudioService::new(&core);

        let first = studio.brainstorm(request(2)).await.unwrap();
        let mut second_request = request(2);
        second_request.session_id = Some(first.session_id.clone());
        let second = studio.brainstorm(second_request).await.unwrap();

        assert_eq!(first.session_id, second.session_id);
        let session = core.store.get(&first.session_id).unwrap();
        assert_eq!(session.events.len(), 6);
    }

    #[tokio::test]
    async fn tiny_token_limit_triggers_compaction() {
        let dir = tempdir().unwrap();
        // 40-token limit -> 30-token threshold -> 120 serialized chars.
        let core = offline_core(dir.path(), Some(40));
        let studio = StudioService::new(&core);

        let outcome = studio.brainstorm(request(3)).await.unwrap();
        let compaction = outcome.compaction.expect("compaction should trigger");
        assert_eq!(compaction.original_turns, 3);

        let session = core.store.get(&outcome.session_id).unwrap();
        assert!(session.events.iter().any(|e| e.event_type == "compaction"));
    }
}
