//! Context compaction for long brainstorming sessions.
//!
//! Conversation histories grow turn by turn; once the estimated token count
//! crosses a threshold the history is folded into a summary plus an
//! essential-info block (user brief, approved names, feedback themes, key
//! decisions). Summaries come from the LLM when one is configured and from a
//! rule-based formatter otherwise - or whenever the LLM call fails.

use std::collections::HashSet;
use std::sync::Arc;

use brandflow_models::{CompactionResult, ConversationTurn, EssentialInfo, KeyDecision};
use chrono::Utc;
use serde_json::Value;

use crate::llm::{CompletionRequest, LlmClient, Message};

pub const SUMMARY_PROMPT: &str = include_str!("templates/summary_prompt.md");

/// Conservative context-window estimates per model family.
pub const TOKEN_LIMIT_GEMINI_FLASH: usize = 32_000;
pub const TOKEN_LIMIT_GEMINI_PRO: usize = 128_000;

/// Compact when this fraction of the token limit is reached.
pub const COMPACTION_THRESHOLD: f64 = 0.75;

/// Approximate characters per token for English text.
pub const CHARS_PER_TOKEN: usize = 4;

/// Context compactor for brainstorming conversation histories.
pub struct ContextCompactor {
    token_limit: usize,
    threshold_tokens: usize,
    summarizer: Option<Arc<dyn LlmClient>>,
}

impl ContextCompactor {
    /// Create a compactor for the given model.
    ///
    /// The token limit defaults by model family ("flash" models get the
    /// smaller window) unless an explicit override is given. `summarizer`
    /// is optional; without one every summary is rule-based.
    pub fn new(
        model_name: &str,
        token_limit: Option<usize>,
        summarizer: Option<Arc<dyn LlmClient>>,
    ) -> Self {
        let token_limit = token_limit.unwrap_or_else(|| {
            if model_name.to_lowercase().contains("flash") {
                TOKEN_LIMIT_GEMINI_FLASH
            } else {
                TOKEN_LIMIT_GEMINI_PRO
            }
        });
        let threshold_tokens = (token_limit as f64 * COMPACTION_THRESHOLD) as usize;
        tracing::info!(
            model = model_name,
            token_limit,
            threshold_tokens,
            "context compactor initialized"
        );
        Self {
            token_limit,
            threshold_tokens,
            summarizer,
        }
    }

    pub fn token_limit(&self) -> usize {
        self.token_limit
    }

    pub fn threshold_tokens(&self) -> usize {
        self.threshold_tokens
    }

    /// Estimate the token count of a serialized text.
    pub fn estimate_tokens(text: &str) -> usize {
        text.len() / CHARS_PER_TOKEN
    }

    /// Whether the history has grown enough to warrant compaction.
    pub fn should_compact(&self, history: &[ConversationTurn]) -> bool {
        let estimated = Self::estimate_tokens(&serialize_history(history));
        let needed = estimated >= self.threshold_tokens;
        if needed {
            tracing::info!(
                estimated,
                threshold = self.threshold_tokens,
                "context compaction needed"
            );
        }
        needed
    }

    /// Compact a conversation history.
    ///
    /// Never fails: a summarizer error falls back to the rule-based summary.
    /// Each call recomputes essential info from scratch; there is no merging
    /// across compaction rounds.
    pub async fn compact(&self, history: &[ConversationTurn]) -> CompactionResult {
        tracing::info!(turns = history.len(), "compacting conversation");

        let essential_info = extract_essential_info(history);

        let summary = match &self.summarizer {
            Some(llm) => match self.summarize_with_model(llm.as_ref(), history, &essential_info).await {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::warn!(error = %e, "model summarization failed, using rule-based summary");
                    rule_based_summary(history, &essential_info)
                }
            },
            None => rule_based_summary(history, &essential_info),
        };

        let original_size = serialize_history(history).len();
        let compacted_size = serde_json::to_string(&summary).map(|s| s.len()).unwrap_or(0);
        // A summary can be longer than a tiny history; the ratio stays in
        // [0.0, 1.0] regardless.
        let compaction_ratio = if original_size > 0 {
            (1.0 - compacted_size as f64 / original_size as f64).max(0.0)
        } else {
            0.0
        };

        tracing::info!(
            turns = history.len(),
            reduction_pct = %format!("{:.1}", compaction_ratio * 100.0),
            "context compacted"
        );

        CompactionResult {
            summary,
            essential_info,
            compacted_at: Utc::now(),
            original_turns: history.len(),
            compaction_ratio,
        }
    }

    async fn summarize_with_model(
        &self,
        llm: &dyn LlmClient,
        history: &[ConversationTurn],
        essential_info: &EssentialInfo,
    ) -> crate::Result<String> {
        let history_text =
            serde_json::to_string_pretty(history).unwrap_or_else(|_| "[]".to_string());
        let essential_text =
            serde_json::to_string_pretty(essential_info).unwrap_or_else(|_| "{}".to_string());

        let prompt = format!(
            "CONVERSATION HISTORY:\n{history_text}\n\nESSENTIAL INFORMATION (MUST BE PRESERVED):\n{essential_text}\n\nSUMMARY:"
        );

        let request = CompletionRequest::new(vec![
            Message::system(SUMMARY_PROMPT),
            Message::user(prompt),
        ]);

        let response = llm.complete(request).await?;
        response
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| crate::AiError::Llm("summarizer returned empty content".to_string()))
    }
}

fn serialize_history(history: &[ConversationTurn]) -> String {
    serde_json::to_string(history).unwrap_or_default()
}

/// Extract the information that must survive compaction.
///
/// Pure function of the turn sequence: the first `user_brief` wins,
/// approved names and liked/disliked feedback accumulate across all turns,
/// and any `decision`/`constraint` field becomes a typed key decision.
/// Accumulated name lists are deduplicated preserving first occurrence.
pub fn extract_essential_info(history: &[ConversationTurn]) -> EssentialInfo {
    let mut essential = EssentialInfo::default();

    for turn in history {
        if essential.user_brief.is_empty()
            && let Some(Value::Object(brief)) = turn.get("user_brief")
        {
            essential.user_brief = brief.clone();
        }

        if let Some(names) = turn.get("approved_names") {
            essential.approved_names.extend(string_items(names));
        }

        if let Some(feedback) = turn.get("feedback") {
            if let Some(liked) = feedback.get("liked_names") {
                essential.feedback_themes.liked.extend(string_items(liked));
            }
            if let Some(disliked) = feedback.get("disliked_names") {
                essential
                    .feedback_themes
                    .disliked
                    .extend(string_items(disliked));
            }
        }

        let decision = turn
            .get("decision")
            .or_else(|| turn.get("constraint"))
            .and_then(Value::as_str);
        if let Some(content) = decision {
            let kind = turn
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            essential.key_decisions.push(KeyDecision {
                kind: kind.to_string(),
                content: content.to_string(),
            });
        }
    }

    dedup_in_place(&mut essential.approved_names);
    dedup_in_place(&mut essential.feedback_themes.liked);
    dedup_in_place(&mut essential.feedback_themes.disliked);

    essential
}

fn string_items(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Value::String(item) => vec![item.clone()],
        _ => Vec::new(),
    }
}

fn dedup_in_place(names: &mut Vec<String>) {
    let mut seen = HashSet::new();
    names.retain(|name| seen.insert(name.clone()));
}

/// Rule-based summarization fallback. Always available, zero dependencies.
fn rule_based_summary(history: &[ConversationTurn], essential: &EssentialInfo) -> String {
    let mut parts = Vec::new();

    if !essential.user_brief.is_empty() {
        let field = |key: &str| {
            essential
                .user_brief
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or("N/A")
                .to_string()
        };
        parts.push(format!(
            "User Brief: {} | Industry: {} | Personality: {}",
            field("product_description"),
            field("industry"),
            field("brand_personality"),
        ));
    }

    parts.push(format!("Total conversation turns: {}", history.len()));

    if !essential.approved_names.is_empty() {
        parts.push(format!(
            "Approved names: {}",
            essential.approved_names.join(", ")
        ));
    }

    let themes = &essential.feedback_themes;
    if !themes.liked.is_empty() {
        let liked: Vec<_> = themes.liked.iter().take(5).cloned().collect();
        parts.push(format!("Liked patterns: {}", liked.join(", ")));
    }
    if !themes.disliked.is_empty() {
        let disliked: Vec<_> = themes.disliked.iter().take(5).cloned().collect();
        parts.push(format!("Disliked patterns: {}", disliked.join(", ")));
    }

    if !essential.key_decisions.is_empty() {
        let decisions: Vec<_> = essential
            .key_decisions
            .iter()
            .take(3)
            .map(|d| d.content.clone())
            .collect();
        parts.push(format!("Key decisions: {}", decisions.join("; ")));
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MockLlmClient, MockStep};
    use serde_json::{Map, json};

    fn turn(fields: Value) -> ConversationTurn {
        match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn sample_history() -> Vec<ConversationTurn> {
        vec![
            turn(json!({
                "type": "brief",
                "user_brief": {
                    "product_description": "smart coffee subscriptions",
                    "industry": "consumer goods",
                    "brand_personality": "playful"
                }
            })),
            turn(json!({"type": "generation", "approved_names": ["Name1", "Brewly"]})),
            turn(json!({
                "type": "feedback",
                "feedback": {"liked_names": ["Brewly"], "disliked_names": ["KafGo"]}
            })),
            turn(json!({"type": "constraint", "constraint": "must work in German markets"})),
            turn(json!({"type": "generation", "approved_names": ["Name1"]})),
        ]
    }

    #[test]
    fn essential_info_deduplicates_approved_names() {
        let info = extract_essential_info(&sample_history());
        let count = info
            .approved_names
            .iter()
            .filter(|name| name.as_str() == "Name1")
            .count();
        assert_eq!(count, 1);
        assert_eq!(info.approved_names, ["Name1", "Brewly"]);
    }

    #[test]
    fn essential_info_captures_first_brief_and_decisions() {
        let mut history = sample_history();
        history.push(turn(json!({
            "user_brief": {"product_description": "a different product"}
        })));

        let info = extract_essential_info(&history);
        assert_eq!(
            info.user_brief["product_description"],
            "smart coffee subscriptions"
        );
        assert_eq!(info.key_decisions.len(), 1);
        assert_eq!(info.key_decisions[0].kind, "constraint");
        assert_eq!(info.feedback_themes.liked, ["Brewly"]);
        assert_eq!(info.feedback_themes.disliked, ["KafGo"]);
    }

    #[test]
    fn should_compact_respects_threshold() {
        // A handful of turns stays far below the default flash threshold.
        let default_compactor = ContextCompactor::new("gemini-2.0-flash", None, None);
        assert!(!default_compactor.should_compact(&sample_history()));

        // 100 token limit -> 75 token threshold -> 300 serialized chars.
        let tight = ContextCompactor::new("gemini-2.0-flash", Some(100), None);
        let big: Vec<ConversationTurn> = (0..20)
            .map(|i| turn(json!({"type": "message", "content": format!("turn number {i} with padding text")})))
            .collect();
        assert!(tight.should_compact(&big));
    }

    #[test]
    fn token_limit_defaults_by_model_family() {
        let flash = ContextCompactor::new("gemini-2.0-flash", None, None);
        assert_eq!(flash.token_limit(), TOKEN_LIMIT_GEMINI_FLASH);

        let pro = ContextCompactor::new("gemini-2.5-pro", None, None);
        assert_eq!(pro.token_limit(), TOKEN_LIMIT_GEMINI_PRO);

        let custom = ContextCompactor::new("gemini-2.0-flash", Some(5000), None);
        assert_eq!(custom.token_limit(), 5000);
        assert_eq!(custom.threshold_tokens(), 3750);
    }

    #[tokio::test]
    async fn compact_uses_model_summary_when_available() {
        let llm = Arc::new(MockLlmClient::from_steps(
            "mock-model",
            vec![MockStep::text("A tidy narrative summary.")],
        ));
        let compactor = ContextCompactor::new("gemini-2.0-flash", None, Some(llm));

        let result = compactor.compact(&sample_history()).await;
        assert_eq!(result.summary, "A tidy narrative summary.");
        assert_eq!(result.original_turns, 5);
        assert!(result.compaction_ratio > 0.0 && result.compaction_ratio <= 1.0);
    }

    #[tokio::test]
    async fn compact_falls_back_when_model_fails() {
        let llm = Arc::new(MockLlmClient::from_steps(
            "mock-model",
            vec![MockStep::error("quota exhausted")],
        ));
        let compactor = ContextCompactor::new("gemini-2.0-flash", None, Some(llm));

        let result = compactor.compact(&sample_history()).await;
        assert!(result.summary.contains("User Brief: smart coffee subscriptions"));
        assert!(result.summary.contains("Total conversation turns: 5"));
        assert!(result.summary.contains("Key decisions: must work in German markets"));
    }

    #[tokio::test]
    async fn compact_of_empty_history_has_zero_ratio() {
        let compactor = ContextCompactor::new("gemini-2.0-flash", None, None);
        let result = compactor.compact(&[]).await;
        assert_eq!(result.original_turns, 0);
        assert_eq!(result.compaction_ratio, 0.0);
    }
}
