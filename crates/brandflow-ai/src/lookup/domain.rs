//! Domain availability lookup.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::stable_hash;

/// Extensions checked for every candidate name, in preference order.
pub const PREMIUM_EXTENSIONS: [&str; 3] = ["com", "ai", "io"];

/// Normalize a brand name into its domain label: lowercased, spaces removed.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// The premium fully-qualified domains for a candidate name.
pub fn premium_fqdns(name: &str) -> Vec<String> {
    let label = normalize_name(name);
    PREMIUM_EXTENSIONS
        .iter()
        .map(|ext| format!("{label}.{ext}"))
        .collect()
}

/// Domain availability lookup over the premium extensions.
#[async_trait]
pub trait DomainLookup: Send + Sync {
    /// Backend name for logging.
    fn provider(&self) -> &str;

    /// Map each premium fqdn of `name` to an availability boolean.
    ///
    /// Lookups never fail: a backend that cannot answer reports the domain
    /// as available. That optimistic default is intentional - a false
    /// "available" is caught later during registration, while a false
    /// "taken" would silently discard a usable name.
    async fn check(&self, name: &str) -> HashMap<String, bool>;
}

/// RDAP-based domain lookup.
///
/// RDAP registries answer 404 for unregistered domains and 200 with a
/// record for registered ones, which is all this check needs.
pub struct RdapDomainLookup {
    client: Client,
    base_url: String,
}

impl RdapDomainLookup {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: "https://rdap.org".to_string(),
        }
    }

    /// Override the RDAP bootstrap endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn check_one(&self, fqdn: &str) -> bool {
        let url = format!("{}/domain/{fqdn}", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => true,
            Ok(response) if response.status().is_success() => false,
            Ok(response) => {
                tracing::warn!(fqdn, status = %response.status(), "unexpected RDAP status, treating as available");
                true
            }
            Err(e) => {
                tracing::warn!(fqdn, error = %e, "RDAP lookup failed, treating as available");
                true
            }
        }
    }
}

impl Default for RdapDomainLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainLookup for RdapDomainLookup {
    fn provider(&self) -> &str {
        "rdap"
    }

    async fn check(&self, name: &str) -> HashMap<String, bool> {
        let mut results = HashMap::new();
        for fqdn in premium_fqdns(name) {
            let available = self.check_one(&fqdn).await;
            results.insert(fqdn, available);
        }
        results
    }
}

/// Deterministic stub lookup for offline mode.
pub struct StubDomainLookup;

#[async_trait]
impl DomainLookup for StubDomainLookup {
    fn provider(&self) -> &str {
        "stub"
    }

    async fn check(&self, name: &str) -> HashMap<String, bool> {
        premium_fqdns(name)
            .into_iter()
            // .com space is the most crowded, so the stub makes it scarcer.
            .map(|fqdn| {
                let hash = stable_hash(&fqdn);
                let available = if fqdn.ends_with(".com") {
                    hash % 10 < 4
                } else {
                    hash % 10 < 7
                };
                (fqdn, available)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_spaces_and_case() {
        assert_eq!(normalize_name("Tech Flow"), "techflow");
        assert_eq!(
            premium_fqdns("Tech Flow"),
            ["techflow.com", "techflow.ai", "techflow.io"]
        );
    }

    #[tokio::test]
    async fn stub_lookup_is_deterministic() {
        let stub = StubDomainLookup;
        let first = stub.check("Lumina").await;
        let second = stub.check("Lumina").await;
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert!(first.contains_key("lumina.com"));
    }
}
