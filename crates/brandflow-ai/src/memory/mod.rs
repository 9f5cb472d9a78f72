//! Conversation memory management.

mod compaction;

pub use compaction::{
    CHARS_PER_TOKEN, COMPACTION_THRESHOLD, ContextCompactor, TOKEN_LIMIT_GEMINI_FLASH,
    TOKEN_LIMIT_GEMINI_PRO, extract_essential_info,
};
