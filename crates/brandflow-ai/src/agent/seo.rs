//! SEO optimization agent.
//!
//! Fully deterministic: scoring and copy generation are rule-based, so SEO
//! results are reproducible and cost nothing. The heuristics favor short,
//! pronounceable names that echo the product description.

use serde::{Deserialize, Serialize};

/// SEO optimization output for one brand name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoResult {
    pub brand_name: String,
    pub seo_score: u8,
    pub meta_title: String,
    pub meta_description: String,
    pub primary_keywords: Vec<String>,
    pub secondary_keywords: Vec<String>,
    pub content_opportunities: Vec<String>,
    pub optimization_tips: Vec<String>,
}

/// Rule-based SEO agent.
#[derive(Debug, Clone, Default)]
pub struct SeoAgent;

impl SeoAgent {
    pub fn new() -> Self {
        Self
    }

    /// Generate SEO content and a 0-100 score for a brand name.
    pub fn optimize(
        &self,
        brand_name: &str,
        product_description: &str,
        industry: &str,
    ) -> SeoResult {
        tracing::info!(brand_name, "optimizing SEO");

        let result = SeoResult {
            brand_name: brand_name.to_string(),
            seo_score: seo_score(brand_name, product_description),
            meta_title: meta_title(brand_name, product_description),
            meta_description: meta_description(brand_name, product_description),
            primary_keywords: primary_keywords(product_description, industry),
            secondary_keywords: secondary_keywords(brand_name, industry),
            content_opportunities: content_topics(brand_name, industry),
            optimization_tips: optimization_tips(brand_name),
        };

        tracing::info!(brand_name, score = result.seo_score, "SEO optimization complete");
        result
    }
}

fn seo_score(brand_name: &str, product_description: &str) -> u8 {
    let mut score: u32 = 50;

    // Shorter names are easier to remember and type.
    let len = brand_name.chars().count();
    if (4..=12).contains(&len) {
        score += 15;
    }

    let desc_words: Vec<String> = product_description
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    let name_overlaps = brand_name
        .split_whitespace()
        .map(str::to_lowercase)
        .any(|word| desc_words.contains(&word));
    if name_overlaps {
        score += 20;
    }

    let vowels = brand_name
        .to_lowercase()
        .chars()
        .filter(|c| "aeiou".contains(*c))
        .count();
    let vowel_ratio = vowels as f64 / len.max(1) as f64;
    if (0.3..=0.5).contains(&vowel_ratio) {
        score += 15;
    }

    score.min(100) as u8
}

fn meta_title(brand_name: &str, description: &str) -> String {
    let words: Vec<&str> = description.split_whitespace().collect();
    let key_benefit = if words.len() >= 3 {
        words[..3].join(" ")
    } else {
        description.chars().take(20).collect()
    };

    truncate_chars(&format!("{brand_name} - {key_benefit}"), 60)
}

fn meta_description(brand_name: &str, description: &str) -> String {
    let mut desc = format!("{brand_name}: {description}");
    if desc.chars().count() < 150 {
        desc.push_str(" Discover the future of innovation.");
    }
    truncate_chars(&desc, 160)
}

fn primary_keywords(description: &str, industry: &str) -> Vec<String> {
    let mut keywords: Vec<String> = description
        .split_whitespace()
        .filter(|word| word.len() > 4)
        .take(3)
        .map(str::to_lowercase)
        .collect();
    let industry = industry.to_lowercase();
    if !keywords.contains(&industry) {
        keywords.push(industry);
    }
    keywords
}

fn secondary_keywords(brand_name: &str, industry: &str) -> Vec<String> {
    let industry = industry.to_lowercase();
    vec![
        format!("{} {industry}", brand_name.to_lowercase()),
        format!("best {industry} solution"),
        format!("{industry} platform"),
    ]
}

fn content_topics(brand_name: &str, industry: &str) -> Vec<String> {
    vec![
        format!("How {brand_name} transforms {industry}"),
        format!("Top {industry} trends"),
        format!("{brand_name} vs competitors: A comparison"),
    ]
}

fn optimization_tips(brand_name: &str) -> Vec<String> {
    let mut tips = vec!["Use brand name consistently across all platforms".to_string()];

    if brand_name.chars().count() > 15 {
        tips.push("Consider shortening brand name for better SEO".to_string());
    }

    tips.push("Create high-quality backlinks from industry sites".to_string());
    tips.push("Optimize page load speed for better rankings".to_string());

    tips
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        text.chars().take(max).collect()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_stays_within_bounds() {
        let agent = SeoAgent::new();
        let result = agent.optimize("Brewly", "smart coffee subscription service", "consumer goods");
        assert!(result.seo_score >= 50);
        assert!(result.seo_score <= 100);
    }

    #[test]
    fn short_pronounceable_name_scores_higher() {
        // "Lumina": 6 chars (+15), vowel ratio 0.5 (+15).
        assert_eq!(seo_score("Lumina", "lighting design studio"), 80);
        // 22 chars, no bonuses beyond base.
        assert!(seo_score("Xzglrkvvnstrpldqwmbfzt", "lighting") <= 50);
    }

    #[test]
    fn meta_fields_respect_length_limits() {
        let long_desc = "a ".repeat(200);
        let title = meta_title("Brewly", &long_desc);
        let desc = meta_description("Brewly", &long_desc);
        assert!(title.chars().count() <= 60);
        assert!(desc.chars().count() <= 160);

        let short = meta_description("Brewly", "coffee");
        assert!(short.contains("Discover the future of innovation."));
    }

    #[test]
    fn long_names_get_a_shortening_tip() {
        let tips = optimization_tips("AnExtremelyLongBrandName");
        assert!(tips.iter().any(|t| t.contains("shortening")));
        let tips = optimization_tips("Brewly");
        assert!(!tips.iter().any(|t| t.contains("shortening")));
    }
}
