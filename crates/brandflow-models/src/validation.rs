//! Validation result model.
//!
//! Types exchanged between the lookup collaborators (domain/trademark
//! backends) and the validation agent. `ValidationResult` is derived purely
//! from lookup inputs and recomputed on every call; nothing here is stored
//! stateful.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall verdict for a candidate name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Clear,
    Caution,
    Blocked,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear => write!(f, "clear"),
            Self::Caution => write!(f, "caution"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// Trademark conflict risk level reported by a trademark search backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrademarkRisk {
    Low,
    Medium,
    High,
    Critical,
    Unknown,
}

impl fmt::Display for TrademarkRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Premium extension preference order: `.com` > `.ai` > `.io` > none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainExtension {
    Com,
    Ai,
    Io,
    None,
}

impl fmt::Display for DomainExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Com => write!(f, ".com"),
            Self::Ai => write!(f, ".ai"),
            Self::Io => write!(f, ".io"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Per-extension domain availability for one candidate name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCheck {
    pub com_available: bool,
    pub ai_available: bool,
    pub io_available: bool,
    pub best_available: DomainExtension,
}

/// Trademark findings folded into a validation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrademarkCheck {
    pub risk_level: TrademarkRisk,
    pub conflicts_found: usize,
    /// Mark names only; full records stay in [`TrademarkSearchResult`].
    pub exact_matches: Vec<String>,
    pub similar_marks: Vec<String>,
}

/// A single registered mark returned by a trademark search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrademarkMark {
    pub mark: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Raw output of a trademark search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrademarkSearchResult {
    pub risk_level: TrademarkRisk,
    pub conflicts_found: usize,
    #[serde(default)]
    pub exact_matches: Vec<TrademarkMark>,
    #[serde(default)]
    pub similar_marks: Vec<TrademarkMark>,
}

impl TrademarkSearchResult {
    /// A result meaning "the backend could not tell us anything".
    pub fn unknown() -> Self {
        Self {
            risk_level: TrademarkRisk::Unknown,
            conflicts_found: 0,
            exact_matches: Vec::new(),
            similar_marks: Vec::new(),
        }
    }
}

/// Full validation verdict for one candidate name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub brand_name: String,
    pub validation_status: ValidationStatus,
    pub domain_check: DomainCheck,
    pub trademark_check: TrademarkCheck,
    pub recommendation: String,
    pub concerns: Vec<String>,
    /// 0-100, higher is better.
    pub overall_score: u8,
}
