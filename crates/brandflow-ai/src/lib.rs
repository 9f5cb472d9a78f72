//! BrandFlow AI - agents, LLM clients, and context compaction
//!
//! This crate holds everything that talks to (or stands in for) a language
//! model plus the bookkeeping around it:
//!
//! - [`llm`]: the [`llm::LlmClient`] trait with a Gemini REST backend and a
//!   scripted deterministic mock, selected at construction time
//! - [`agent`]: the brand-naming agents (name generation, validation, SEO,
//!   story) built on that trait
//! - [`lookup`]: domain/trademark availability seams (HTTP backend or
//!   deterministic stub)
//! - [`cache`]: TTL cache in front of domain lookups
//! - [`memory`]: context compaction for long brainstorming sessions
//!
//! External failures never escape this crate as errors a caller must handle:
//! lookups degrade to optimistic defaults and summarization degrades to a
//! rule-based fallback.

pub mod agent;
pub mod cache;
pub mod error;
pub mod llm;
pub mod lookup;
pub mod memory;

pub use error::{AiError, Result};
