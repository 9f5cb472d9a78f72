//! BrandFlow Models - Shared domain model
//!
//! Plain serde types used across the storage, AI, and CLI crates. No I/O
//! lives here; constructors only stamp identifiers and timestamps.

pub mod compaction;
pub mod session;
pub mod validation;

pub use compaction::{
    CompactionResult, ConversationTurn, EssentialInfo, FeedbackThemes, KeyDecision,
};
pub use session::{GeneratedBrand, Session, SessionEvent, SessionSummary, StoreStatistics};
pub use validation::{
    DomainCheck, DomainExtension, TrademarkCheck, TrademarkMark, TrademarkRisk,
    TrademarkSearchResult, ValidationResult, ValidationStatus,
};
