//! Conversation history and compaction records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One turn in a brainstorming conversation.
///
/// Turns are open JSON objects rather than a fixed record: different agents
/// attach different fields (`user_brief`, `approved_names`, `feedback`,
/// `decision`, ...), and the compactor scans for the ones it cares about.
pub type ConversationTurn = Map<String, Value>;

/// Feedback patterns accumulated across a conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackThemes {
    pub liked: Vec<String>,
    pub disliked: Vec<String>,
}

/// A decision or constraint worth keeping past compaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDecision {
    /// Type tag of the turn the decision came from.
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

/// Information that must survive compaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EssentialInfo {
    /// Initial user brief (product description, industry, personality, ...).
    pub user_brief: Map<String, Value>,
    /// Deduplicated approved/selected brand names.
    pub approved_names: Vec<String>,
    pub feedback_themes: FeedbackThemes,
    pub key_decisions: Vec<KeyDecision>,
}

/// Output of one compaction round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactionResult {
    /// Narrative or rule-based summary of the conversation so far.
    pub summary: String,
    pub essential_info: EssentialInfo,
    pub compacted_at: DateTime<Utc>,
    /// Turn count of the history that was compacted.
    pub original_turns: usize,
    /// Fraction of serialized size removed, in [0.0, 1.0].
    pub compaction_ratio: f64,
}
