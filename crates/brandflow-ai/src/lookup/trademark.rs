//! Trademark conflict search.

use async_trait::async_trait;
use brandflow_models::{TrademarkMark, TrademarkRisk, TrademarkSearchResult};
use reqwest::Client;
use serde::Deserialize;

use super::stable_hash;

/// Trademark search over registered marks.
#[async_trait]
pub trait TrademarkSearch: Send + Sync {
    /// Backend name for logging.
    fn provider(&self) -> &str;

    /// Search registered marks conflicting with `name`, optionally narrowed
    /// to a Nice classification category.
    ///
    /// Never fails: a backend that cannot answer reports
    /// [`TrademarkSearchResult::unknown`].
    async fn search(&self, name: &str, category: Option<&str>) -> TrademarkSearchResult;
}

/// USPTO search backend.
pub struct UsptoTrademarkSearch {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl UsptoTrademarkSearch {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: "https://tsdrapi.uspto.gov/ts/cd".to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn query(&self, name: &str, category: Option<&str>) -> crate::Result<Vec<UsptoMark>> {
        let mut request = self
            .client
            .get(format!("{}/casestatus/search", self.base_url))
            .query(&[("searchText", name)]);
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }
        if let Some(key) = &self.api_key {
            request = request.header("USPTO-API-KEY", key);
        }

        let response = request.send().await?.error_for_status()?;
        let body: UsptoSearchResponse = response.json().await?;
        Ok(body.results)
    }

    /// Fold raw marks into the risk record the validation agent consumes.
    fn classify(name: &str, marks: Vec<UsptoMark>) -> TrademarkSearchResult {
        let needle = name.to_lowercase();
        let mut exact_matches = Vec::new();
        let mut similar_marks = Vec::new();

        for mark in marks {
            let record = TrademarkMark {
                mark: mark.mark_text.clone(),
                serial_number: mark.serial_number,
                status: mark.status,
            };
            if mark.mark_text.to_lowercase() == needle {
                exact_matches.push(record);
            } else {
                similar_marks.push(record);
            }
        }

        let risk_level = if !exact_matches.is_empty() {
            TrademarkRisk::Critical
        } else if similar_marks.len() >= 3 {
            TrademarkRisk::High
        } else if !similar_marks.is_empty() {
            TrademarkRisk::Medium
        } else {
            TrademarkRisk::Low
        };

        TrademarkSearchResult {
            risk_level,
            conflicts_found: exact_matches.len() + similar_marks.len(),
            exact_matches,
            similar_marks,
        }
    }
}

#[derive(Deserialize)]
struct UsptoSearchResponse {
    #[serde(default)]
    results: Vec<UsptoMark>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsptoMark {
    mark_text: String,
    #[serde(default)]
    serial_number: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[async_trait]
impl TrademarkSearch for UsptoTrademarkSearch {
    fn provider(&self) -> &str {
        "uspto"
    }

    async fn search(&self, name: &str, category: Option<&str>) -> TrademarkSearchResult {
        match self.query(name, category).await {
            Ok(marks) => Self::classify(name, marks),
            Err(e) => {
                tracing::warn!(name, error = %e, "trademark search failed, reporting unknown risk");
                TrademarkSearchResult::unknown()
            }
        }
    }
}

/// Deterministic stub search for offline mode.
///
/// A fixed blocklist of famous marks yields exact matches; everything else
/// gets a hash-derived risk level so repeated runs agree.
pub struct StubTrademarkSearch {
    blocklist: Vec<&'static str>,
}

impl StubTrademarkSearch {
    pub fn new() -> Self {
        Self {
            blocklist: vec![
                "apple", "google", "amazon", "nike", "tesla", "oracle", "visa", "adobe",
            ],
        }
    }
}

impl Default for StubTrademarkSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrademarkSearch for StubTrademarkSearch {
    fn provider(&self) -> &str {
        "stub"
    }

    async fn search(&self, name: &str, _category: Option<&str>) -> TrademarkSearchResult {
        let needle = name.to_lowercase();

        if self.blocklist.contains(&needle.as_str()) {
            let mark = TrademarkMark {
                mark: name.to_uppercase(),
                serial_number: None,
                status: Some("REGISTERED".to_string()),
            };
            return TrademarkSearchResult {
                risk_level: TrademarkRisk::Critical,
                conflicts_found: 1,
                exact_matches: vec![mark],
                similar_marks: Vec::new(),
            };
        }

        let risk_level = match stable_hash(&needle) % 10 {
            0 => TrademarkRisk::High,
            1 | 2 => TrademarkRisk::Medium,
            _ => TrademarkRisk::Low,
        };

        TrademarkSearchResult {
            risk_level,
            conflicts_found: 0,
            exact_matches: Vec::new(),
            similar_marks: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_flags_famous_marks() {
        let stub = StubTrademarkSearch::new();
        let result = stub.search("Nike", None).await;
        assert_eq!(result.risk_level, TrademarkRisk::Critical);
        assert_eq!(result.exact_matches.len(), 1);
    }

    #[tokio::test]
    async fn stub_is_deterministic_for_unknown_names() {
        let stub = StubTrademarkSearch::new();
        let first = stub.search("Lumivara", None).await;
        let second = stub.search("Lumivara", None).await;
        assert_eq!(first, second);
        assert!(first.exact_matches.is_empty());
    }

    #[test]
    fn classify_splits_exact_and_similar() {
        let marks = vec![
            UsptoMark {
                mark_text: "LUMINA".to_string(),
                serial_number: Some("123".to_string()),
                status: Some("LIVE".to_string()),
            },
            UsptoMark {
                mark_text: "LUMINARY LABS".to_string(),
                serial_number: None,
                status: None,
            },
        ];
        let result = UsptoTrademarkSearch::classify("Lumina", marks);
        assert_eq!(result.risk_level, TrademarkRisk::Critical);
        assert_eq!(result.exact_matches.len(), 1);
        assert_eq!(result.similar_marks.len(), 1);
        assert_eq!(result.conflicts_found, 2);
    }
}
