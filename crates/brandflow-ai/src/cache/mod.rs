//! Caching for external lookups.

mod domain_cache;

pub use domain_cache::DomainCache;
