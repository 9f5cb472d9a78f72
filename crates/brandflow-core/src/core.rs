//! Application composition root.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use brandflow_ai::agent::{NameGeneratorAgent, SeoAgent, StoryAgent, ValidationAgent};
use brandflow_ai::cache::DomainCache;
use brandflow_ai::llm::create_client;
use brandflow_ai::lookup::{
    DomainLookup, RdapDomainLookup, StubDomainLookup, StubTrademarkSearch, TrademarkSearch,
    UsptoTrademarkSearch,
};
use brandflow_ai::memory::ContextCompactor;
use brandflow_storage::SessionStore;

use crate::config::AppConfig;

/// Cached domain verdicts stay valid for an hour.
const DOMAIN_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// The process-wide application core.
///
/// Constructed once at startup; every component that needs the session
/// store, cache, or an agent gets an `Arc` from here instead of reaching
/// for a global.
pub struct AppCore {
    pub config: AppConfig,
    pub store: Arc<SessionStore>,
    pub domain_cache: Arc<DomainCache>,
    pub compactor: Arc<ContextCompactor>,
    pub name_generator: Arc<NameGeneratorAgent>,
    pub validator: Arc<ValidationAgent>,
    pub seo: SeoAgent,
    pub story: Arc<StoryAgent>,
}

impl AppCore {
    /// Build the core from configuration.
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = Arc::new(SessionStore::new(config.sessions_dir()?)?);

        let llm = create_client(&config.llm_backend());

        let domain_cache = Arc::new(DomainCache::new(DOMAIN_CACHE_TTL));
        let (domains, trademarks): (Arc<dyn DomainLookup>, Arc<dyn TrademarkSearch>) =
            if config.use_stub_lookups() {
                (Arc::new(StubDomainLookup), Arc::new(StubTrademarkSearch::new()))
            } else {
                (
                    Arc::new(RdapDomainLookup::new()),
                    Arc::new(UsptoTrademarkSearch::new(config.uspto_api_key.clone())),
                )
            };

        let compactor = Arc::new(ContextCompactor::new(
            &config.model_name,
            config.token_limit,
            Some(llm.clone()),
        ));

        let validator = Arc::new(ValidationAgent::new(
            domains,
            trademarks,
            domain_cache.clone(),
        ));

        Ok(Self {
            name_generator: Arc::new(NameGeneratorAgent::new(llm.clone())),
            story: Arc::new(StoryAgent::new(llm)),
            seo: SeoAgent::new(),
            store,
            domain_cache,
            compactor,
            validator,
            config,
        })
    }
}
