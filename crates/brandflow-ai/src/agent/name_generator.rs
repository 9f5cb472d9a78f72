//! Name generation agent.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::llm::{CompletionRequest, LlmClient, Message};

use super::strip_code_fences;

const NAME_GENERATOR_INSTRUCTION: &str = include_str!("templates/name_generator.md");

/// Suffixes used by the deterministic fallback combinator.
const FALLBACK_SUFFIXES: [&str; 6] = ["ly", "io", "ora", "ify", "nest", "axis"];

/// The user's product brief driving a generation round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandBrief {
    pub product_description: String,
    pub industry: String,
    pub brand_personality: String,
    pub target_audience: String,
}

/// One candidate name with its rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameCandidate {
    pub name: String,
    pub rationale: String,
}

/// LLM-backed name generator with a deterministic fallback.
pub struct NameGeneratorAgent {
    llm: Arc<dyn LlmClient>,
}

impl NameGeneratorAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Generate `count` candidate names for the brief.
    ///
    /// An unusable LLM reply (error, empty, unparseable JSON) degrades to
    /// the combinator fallback rather than surfacing an error.
    pub async fn generate(&self, brief: &BrandBrief, count: usize) -> Vec<NameCandidate> {
        tracing::info!(count, industry = %brief.industry, "generating name candidates");

        match self.generate_with_llm(brief, count).await {
            Ok(candidates) if !candidates.is_empty() => candidates,
            Ok(_) => {
                tracing::warn!("LLM returned no candidates, using fallback combinator");
                fallback_names(brief, count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "LLM generation failed, using fallback combinator");
                fallback_names(brief, count)
            }
        }
    }

    async fn generate_with_llm(
        &self,
        brief: &BrandBrief,
        count: usize,
    ) -> crate::Result<Vec<NameCandidate>> {
        let prompt = format!(
            "Generate {count} brand name candidates.\n\n\
             Product: {}\nIndustry: {}\nPersonality: {}\nTarget audience: {}",
            brief.product_description, brief.industry, brief.brand_personality,
            brief.target_audience,
        );

        let request = CompletionRequest::new(vec![
            Message::system(NAME_GENERATOR_INSTRUCTION),
            Message::user(prompt),
        ])
        .with_temperature(0.9)
        .with_top_p(0.95);

        let response = self.llm.complete(request).await?;
        let text = response
            .content
            .ok_or_else(|| crate::AiError::Llm("empty generation response".to_string()))?;

        let mut candidates: Vec<NameCandidate> =
            serde_json::from_str(strip_code_fences(&text))?;
        candidates.truncate(count);
        Ok(candidates)
    }
}

/// Deterministic fallback: keyword stems from the brief crossed with a
/// fixed suffix list.
fn fallback_names(brief: &BrandBrief, count: usize) -> Vec<NameCandidate> {
    let mut stems: Vec<String> = brief
        .product_description
        .split_whitespace()
        .filter(|word| word.len() > 4)
        .map(|word| {
            let stem: String = word
                .chars()
                .filter(|c| c.is_alphabetic())
                .take(5)
                .collect();
            capitalize(&stem)
        })
        .filter(|stem| stem.len() >= 3)
        .collect();
    if stems.is_empty() {
        stems.push(capitalize(&brief.industry));
    }
    if stems.iter().all(String::is_empty) {
        stems = vec!["Nova".to_string()];
    }

    let mut candidates = Vec::with_capacity(count);
    'outer: for suffix in FALLBACK_SUFFIXES {
        for stem in &stems {
            if candidates.len() >= count {
                break 'outer;
            }
            let name = format!("{stem}{suffix}");
            if candidates.iter().any(|c: &NameCandidate| c.name == name) {
                continue;
            }
            candidates.push(NameCandidate {
                rationale: format!(
                    "Coined from \"{}\" for the {} space",
                    stem.to_lowercase(),
                    brief.industry
                ),
                name,
            });
        }
    }
    // A sparse brief can run out of stem/suffix combinations; callers get
    // however many unique names exist rather than padded duplicates.
    candidates
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MockLlmClient, MockStep};

    fn brief() -> BrandBrief {
        BrandBrief {
            product_description: "smart coffee subscription service".to_string(),
            industry: "consumer goods".to_string(),
            brand_personality: "playful".to_string(),
            target_audience: "young professionals".to_string(),
        }
    }

    #[tokio::test]
    async fn parses_llm_candidates() {
        let llm = Arc::new(MockLlmClient::from_steps(
            "mock-model",
            vec![MockStep::text(
                r#"```json
[{"name": "Brewly", "rationale": "brew plus a friendly suffix"}]
```"#,
            )],
        ));
        let agent = NameGeneratorAgent::new(llm);

        let candidates = agent.generate(&brief(), 5).await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Brewly");
    }

    #[tokio::test]
    async fn falls_back_on_llm_error() {
        let llm = Arc::new(MockLlmClient::from_steps(
            "mock-model",
            vec![MockStep::error("unavailable")],
        ));
        let agent = NameGeneratorAgent::new(llm);

        let candidates = agent.generate(&brief(), 4).await;
        assert_eq!(candidates.len(), 4);
        // Deterministic: same brief, same names.
        let llm2 = Arc::new(MockLlmClient::from_steps(
            "mock-model",
            vec![MockStep::error("unavailable")],
        ));
        let again = NameGeneratorAgent::new(llm2).generate(&brief(), 4).await;
        let names: Vec<_> = candidates.iter().map(|c| &c.name).collect();
        let names_again: Vec<_> = again.iter().map(|c| &c.name).collect();
        assert_eq!(names, names_again);
    }

    #[tokio::test]
    async fn falls_back_on_unparseable_reply() {
        let llm = Arc::new(MockLlmClient::from_steps(
            "mock-model",
            vec![MockStep::text("Sure! Here are some great names: Brewly, KafGo")],
        ));
        let agent = NameGeneratorAgent::new(llm);

        let candidates = agent.generate(&brief(), 3).await;
        assert_eq!(candidates.len(), 3);
        assert!(candidates.iter().all(|c| !c.name.is_empty()));
    }
}
