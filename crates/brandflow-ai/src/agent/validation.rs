//! Validation agent: domain availability + trademark risk scoring.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use brandflow_models::{
    DomainCheck, DomainExtension, TrademarkCheck, TrademarkRisk, TrademarkSearchResult,
    ValidationResult, ValidationStatus,
};

use crate::cache::DomainCache;
use crate::lookup::{DomainLookup, TrademarkSearch, normalize_name, premium_fqdns};

/// Delay between names in a batch, to stay friendly with lookup backends.
const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(500);

fn risk_penalty(risk: TrademarkRisk) -> i32 {
    match risk {
        TrademarkRisk::Critical => 60,
        TrademarkRisk::High => 40,
        TrademarkRisk::Medium => 20,
        TrademarkRisk::Low => 5,
        TrademarkRisk::Unknown => 10,
    }
}

/// Overall validation score, clamped to 0-100.
pub fn calculate_validation_score(
    com_available: bool,
    ai_available: bool,
    io_available: bool,
    trademark_risk: TrademarkRisk,
    exact_match_count: usize,
) -> u8 {
    let mut score: i32 = 100;

    if !com_available {
        score -= 20;
    }
    if !ai_available && !io_available {
        score -= 10;
    }

    score -= risk_penalty(trademark_risk);

    // Exact trademark matches are very serious.
    if exact_match_count > 0 {
        score -= 30;
    }

    score.clamp(0, 100) as u8
}

/// Status thresholds: 80 and above is clear, 50 and above is caution.
pub fn derive_status(score: u8) -> ValidationStatus {
    if score >= 80 {
        ValidationStatus::Clear
    } else if score >= 50 {
        ValidationStatus::Caution
    } else {
        ValidationStatus::Blocked
    }
}

/// Best available extension: `.com` > `.ai` > `.io` > none.
pub fn best_available(
    com_available: bool,
    ai_available: bool,
    io_available: bool,
) -> DomainExtension {
    if com_available {
        DomainExtension::Com
    } else if ai_available {
        DomainExtension::Ai
    } else if io_available {
        DomainExtension::Io
    } else {
        DomainExtension::None
    }
}

fn build_recommendation(status: ValidationStatus, best: DomainExtension) -> String {
    match status {
        ValidationStatus::Clear => {
            format!("Clear to use - {best} domain available with low trademark risk")
        }
        ValidationStatus::Caution => {
            if best == DomainExtension::None {
                "Use with caution - no ideal domain available".to_string()
            } else {
                format!("Use with caution - {best} available but trademark concerns exist")
            }
        }
        ValidationStatus::Blocked => {
            "Blocked - high risk due to trademark conflicts or domain unavailability".to_string()
        }
    }
}

fn identify_concerns(
    best: DomainExtension,
    risk: TrademarkRisk,
    trademark: &TrademarkSearchResult,
) -> Vec<String> {
    let mut concerns = Vec::new();

    if best == DomainExtension::None {
        concerns.push("No premium domains (.com, .ai, .io) available".to_string());
    } else if best != DomainExtension::Com {
        concerns.push(".com domain not available".to_string());
    }

    if matches!(risk, TrademarkRisk::Critical | TrademarkRisk::High) {
        concerns.push(format!("High trademark risk ({risk})"));
    }

    if let Some(conflict) = trademark.exact_matches.first() {
        concerns.push(format!("Exact trademark match found: {}", conflict.mark));
    }

    concerns
}

/// Compile lookup results into a [`ValidationResult`].
///
/// Pure function of its inputs; recomputed on every call, never cached.
pub fn compile_validation(
    brand_name: &str,
    domain_results: &HashMap<String, bool>,
    trademark_results: &TrademarkSearchResult,
) -> ValidationResult {
    let label = normalize_name(brand_name);
    let availability =
        |ext: &str| -> bool { *domain_results.get(&format!("{label}.{ext}")).unwrap_or(&false) };
    let com_available = availability("com");
    let ai_available = availability("ai");
    let io_available = availability("io");

    let best = best_available(com_available, ai_available, io_available);
    let risk = trademark_results.risk_level;

    let score = calculate_validation_score(
        com_available,
        ai_available,
        io_available,
        risk,
        trademark_results.exact_matches.len(),
    );
    let status = derive_status(score);

    ValidationResult {
        brand_name: brand_name.to_string(),
        validation_status: status,
        domain_check: DomainCheck {
            com_available,
            ai_available,
            io_available,
            best_available: best,
        },
        trademark_check: TrademarkCheck {
            risk_level: risk,
            conflicts_found: trademark_results.conflicts_found,
            exact_matches: trademark_results
                .exact_matches
                .iter()
                .map(|m| m.mark.clone())
                .collect(),
            similar_marks: trademark_results
                .similar_marks
                .iter()
                .map(|m| m.mark.clone())
                .collect(),
        },
        recommendation: build_recommendation(status, best),
        concerns: identify_concerns(best, risk, trademark_results),
        overall_score: score,
    }
}

/// Validation agent combining domain lookups (through the TTL cache) with
/// trademark search.
pub struct ValidationAgent {
    domains: Arc<dyn DomainLookup>,
    trademarks: Arc<dyn TrademarkSearch>,
    cache: Arc<DomainCache>,
    batch_delay: Duration,
}

impl ValidationAgent {
    pub fn new(
        domains: Arc<dyn DomainLookup>,
        trademarks: Arc<dyn TrademarkSearch>,
        cache: Arc<DomainCache>,
    ) -> Self {
        Self {
            domains,
            trademarks,
            cache,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }

    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Domain availability for a candidate, served from cache when possible.
    async fn domain_results(&self, brand_name: &str) -> HashMap<String, bool> {
        let fqdns = premium_fqdns(brand_name);
        let mut results = HashMap::new();
        for fqdn in &fqdns {
            if let Some(available) = self.cache.get(fqdn).await {
                results.insert(fqdn.clone(), available);
            }
        }
        if results.len() == fqdns.len() {
            tracing::debug!(brand_name, "domain availability served from cache");
            return results;
        }

        let fresh = self.domains.check(brand_name).await;
        for (fqdn, available) in fresh {
            self.cache.set(fqdn.clone(), available).await;
            results.insert(fqdn, available);
        }
        results
    }

    /// Validate a single brand name.
    pub async fn validate(&self, brand_name: &str, category: Option<&str>) -> ValidationResult {
        tracing::info!(brand_name, "validating brand name");

        let domain_results = self.domain_results(brand_name).await;
        let trademark_results = self.trademarks.search(brand_name, category).await;

        let result = compile_validation(brand_name, &domain_results, &trademark_results);
        tracing::info!(
            brand_name,
            status = %result.validation_status,
            score = result.overall_score,
            "validation complete"
        );
        result
    }

    /// Validate a list of names sequentially, best score first.
    ///
    /// Iterations are spaced by the batch delay to respect third-party rate
    /// limits; there is no adaptive backoff.
    pub async fn validate_batch(
        &self,
        brand_names: &[String],
        category: Option<&str>,
    ) -> Vec<ValidationResult> {
        tracing::info!(count = brand_names.len(), "starting batch validation");

        let mut results = Vec::with_capacity(brand_names.len());
        for (index, name) in brand_names.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.batch_delay).await;
            }
            results.push(self.validate(name, category).await);
        }

        // Stable sort: ties keep the input order.
        results.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
        results
    }
}
