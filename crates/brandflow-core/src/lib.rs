//! BrandFlow Core - application composition and pipeline
//!
//! Builds the process-wide singletons (session store, domain cache, LLM
//! client, compactor, agents) from environment-driven configuration and
//! exposes the brainstorming pipeline that strings them together.

pub mod config;
pub mod core;
pub mod studio;

pub use config::AppConfig;
pub use core::AppCore;
pub use studio::{BrainstormOutcome, BrainstormRequest, StudioService};
