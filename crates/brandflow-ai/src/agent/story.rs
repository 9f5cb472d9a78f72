//! Brand story agent.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::llm::{CompletionRequest, LlmClient, Message};

use super::strip_code_fences;

/// Narrative package for one brand name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandStory {
    pub taglines: Vec<String>,
    pub brand_story: String,
    pub hero_copy: String,
    pub value_proposition: String,
}

/// Story generator: LLM narrative with a template fallback.
pub struct StoryAgent {
    llm: Arc<dyn LlmClient>,
}

impl StoryAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Generate taglines, story, hero copy, and value proposition.
    ///
    /// Any LLM failure degrades to the personality-keyed templates.
    pub async fn generate(
        &self,
        brand_name: &str,
        product_description: &str,
        brand_personality: &str,
        target_audience: &str,
    ) -> BrandStory {
        tracing::info!(brand_name, "generating brand story");

        match self
            .generate_with_llm(brand_name, product_description, brand_personality, target_audience)
            .await
        {
            Ok(story) => story,
            Err(e) => {
                tracing::warn!(error = %e, "LLM story generation failed, using templates");
                template_story(brand_name, product_description, brand_personality)
            }
        }
    }

    async fn generate_with_llm(
        &self,
        brand_name: &str,
        product_description: &str,
        brand_personality: &str,
        target_audience: &str,
    ) -> crate::Result<BrandStory> {
        let prompt = format!(
            "Create a compelling brand identity for \"{brand_name}\".\n\n\
             Product: {product_description}\n\
             Personality: {brand_personality}\n\
             Target Audience: {target_audience}\n\n\
             Generate:\n\
             1. Five tagline options (5-8 words each)\n\
             2. Brand story (200-300 words)\n\
             3. Hero section copy (50-100 words)\n\
             4. Value proposition (20-30 words)\n\n\
             Return as JSON with keys: taglines (array), brand_story (string), \
             hero_copy (string), value_proposition (string)"
        );

        let request = CompletionRequest::new(vec![Message::user(prompt)])
            .with_temperature(0.9)
            .with_top_p(0.95);

        let response = self.llm.complete(request).await?;
        let text = response
            .content
            .ok_or_else(|| crate::AiError::Llm("empty story response".to_string()))?;

        Ok(serde_json::from_str(strip_code_fences(&text))?)
    }
}

fn personality_adjectives(brand_personality: &str) -> &'static str {
    match brand_personality {
        "playful" => "fun, creative, innovative",
        "professional" => "reliable, efficient, trustworthy",
        "innovative" => "cutting-edge, transformative, forward-thinking",
        "luxury" => "premium, exclusive, sophisticated",
        _ => "innovative, reliable",
    }
}

/// Template fallback keyed by brand personality.
fn template_story(
    brand_name: &str,
    product_description: &str,
    brand_personality: &str,
) -> BrandStory {
    let adjectives = personality_adjectives(brand_personality);

    BrandStory {
        taglines: vec![
            format!("{brand_name}: Where innovation meets simplicity"),
            format!("Elevate your experience with {brand_name}"),
            format!("{brand_name} - The future is here"),
            format!("Transform your world with {brand_name}"),
            format!("{brand_name}: Built for tomorrow"),
        ],
        brand_story: format!(
            "{brand_name} was born from a simple idea: {product_description} should be \
             accessible, {adjectives}, and transformative. We believe that great experiences \
             come from understanding what people truly need. Our mission is to deliver \
             solutions that not only meet expectations but exceed them. With {brand_name}, \
             you're joining a community of forward-thinkers who refuse to settle for the \
             status quo."
        ),
        hero_copy: format!(
            "Welcome to {brand_name}. We're revolutionizing {product_description} with a \
             {brand_personality} approach that puts you first. Experience the difference \
             that thoughtful design can make."
        ),
        value_proposition: format!(
            "{brand_name} delivers {product_description} that's {adjectives}, designed for \
             modern needs."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MockLlmClient, MockStep};

    #[tokio::test]
    async fn parses_llm_story() {
        let llm = Arc::new(MockLlmClient::from_steps(
            "mock-model",
            vec![MockStep::text(
                r#"{"taglines": ["Brew better days"], "brand_story": "story",
                    "hero_copy": "hero", "value_proposition": "value"}"#,
            )],
        ));
        let agent = StoryAgent::new(llm);

        let story = agent
            .generate("Brewly", "smart coffee subscriptions", "playful", "young professionals")
            .await;
        assert_eq!(story.taglines, ["Brew better days"]);
        assert_eq!(story.brand_story, "story");
    }

    #[tokio::test]
    async fn falls_back_to_templates() {
        let llm = Arc::new(MockLlmClient::from_steps(
            "mock-model",
            vec![MockStep::error("offline")],
        ));
        let agent = StoryAgent::new(llm);

        let story = agent
            .generate("Brewly", "smart coffee subscriptions", "luxury", "executives")
            .await;
        assert_eq!(story.taglines.len(), 5);
        assert!(story.brand_story.contains("premium, exclusive, sophisticated"));
        assert!(story.hero_copy.contains("Brewly"));
    }
}
