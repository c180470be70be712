//! Offline placeholder generator.
//!
//! Returns canned, schema-valid payloads per generation method so the full
//! pipeline can run end-to-end without a network or a subprocess. This is
//! the default backend: real generation is deferred to an external
//! collaborator that the operator opts into.

use async_trait::async_trait;
use serde_json::{Value, json};

use copyforge_shared::{CopyforgeError, Result};

use crate::protocol::{Generated, GenerationRequest, Generator};

/// Generator producing deterministic placeholder payloads.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderGenerator;

impl PlaceholderGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Generator for PlaceholderGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<Generated> {
        let data = payload_for(&request.method).ok_or_else(|| {
            CopyforgeError::Generation(format!(
                "placeholder has no template for method '{}'",
                request.method
            ))
        })?;

        Ok(Generated {
            data,
            tokens_in: 0,
            tokens_out: 0,
            model: "placeholder".into(),
            latency_ms: 0,
        })
    }
}

/// Canned payload for a generation method, or `None` for unknown methods.
fn payload_for(method: &str) -> Option<Value> {
    let value = match method {
        // --- Content pipeline -------------------------------------------
        "seo_research" => json!({
            "primary_keyword": {
                "keyword": "placeholder keyword",
                "intent": "informational",
                "difficulty": 42
            },
            "long_tail": [
                { "keyword": "placeholder long tail one", "intent": "informational", "difficulty": 18 },
                { "keyword": "placeholder long tail two", "intent": "transactional", "difficulty": 25 }
            ],
            "competitor_gaps": ["no first-party data in ranking articles"],
            "questions": ["what does this cost?", "how long does rollout take?"],
            "recommended_length": 2400
        }),
        "headline_generation" => json!({
            "headlines": [
                { "text": "Placeholder headline with numbers: 3 lessons", "angle": "data-driven" },
                { "text": "The placeholder assumption everyone gets wrong", "angle": "contrarian" },
                { "text": "How to apply the placeholder method", "angle": "how-to" }
            ],
            "meta_description": "A placeholder meta description under 155 characters.",
            "social_variant": "Placeholder headline, social edition",
            "email_subject": "Placeholder subject line"
        }),
        "structure_design" => json!({
            "sections": [
                { "name": "hook", "key_message": "open with the stakes", "word_budget": 150, "keywords": [] },
                { "name": "discovery", "key_message": "surface the insight", "word_budget": 600, "keywords": [] },
                { "name": "method", "key_message": "step-by-step application", "word_budget": 900, "keywords": [] },
                { "name": "payoff", "key_message": "what changes for the reader", "word_budget": 350, "keywords": [] }
            ]
        }),
        "evidence_gathering" => json!({
            "opening_statistic": {
                "claim": "placeholder opening statistic",
                "source": "Placeholder Research, 2025"
            },
            "statistics": [
                { "claim": "placeholder supporting statistic", "source": "Placeholder Journal" }
            ],
            "benchmarks": ["industry placeholder benchmark"],
            "case_study": "A short placeholder case study with concrete numbers."
        }),
        "writing" => json!({
            "title": "Placeholder working title",
            "body_markdown": "## Placeholder draft\n\nBody copy goes here.",
            "word_count": 2000
        }),
        "seo_optimization" => json!({
            "body_markdown": "## Placeholder draft\n\nBody copy, keyword-tuned.",
            "changes": ["tightened keyword placement in headings"]
        }),
        "readability_edit" => json!({
            "body_markdown": "## Placeholder draft\n\nBody copy, smoothed for flow.",
            "changes": ["shortened paragraphs", "replaced passive voice"]
        }),
        "cta_optimization" => json!({
            "body_markdown": "## Placeholder draft\n\nBody copy with calls to action.",
            "changes": ["added mid-article CTA", "rewrote closing CTA"]
        }),
        "quality_audit" => json!({
            "score": 8.5,
            "issues": ["one uncited statistic remains"],
            "approved": true
        }),
        "fact_check" => json!({
            "summary": "placeholder fact-check pass",
            "findings": ["all checked claims held up"],
            "claims": []
        }),

        // --- Knowledge pipeline -----------------------------------------
        "primary_research" | "academic_research" | "data_analysis" | "industry_trends"
        | "historical_context" | "contrarian_views" | "framework_building"
        | "analogy_generation" | "example_generation" | "visualization_design"
        | "fact_verification" | "question_anticipation" => json!({
            "summary": format!("placeholder {method} summary"),
            "findings": [
                format!("placeholder {method} finding one"),
                format!("placeholder {method} finding two")
            ],
            "concepts": [
                {
                    "name": format!("{method} principle"),
                    "definition": "a well-supported placeholder concept",
                    "evidence_level": 0.9,
                    "related": [],
                    "tags": [method]
                },
                {
                    "name": format!("{method} open question"),
                    "definition": "a weakly-supported placeholder concept",
                    "evidence_level": 0.55,
                    "related": [],
                    "tags": [method]
                }
            ],
            "sources": [
                { "title": "Placeholder source", "reference": "placeholder-source-2025" }
            ],
            "claims": [format!("placeholder {method} claim")]
        }),
        "concept_mapping" => json!({
            "core": "core-concept",
            "concepts": [
                {
                    "name": "core-concept",
                    "definition": "the central placeholder concept",
                    "evidence_level": 0.9,
                    "related": ["supporting-concept"],
                    "tags": ["map"]
                },
                {
                    "name": "supporting-concept",
                    "definition": "a placeholder concept the core depends on",
                    "evidence_level": 0.8,
                    "related": ["core-concept"],
                    "tags": ["map"]
                }
            ],
            "relationships": [
                { "from": "core-concept", "to": "supporting-concept", "kind": "enables" }
            ]
        }),
        "multi_level_explanation" => json!({
            "concept": "core-concept",
            "levels": [
                { "audience": "child", "explanation": "placeholder analogy", "key_insight": "one core idea", "misconception": "it is magic", "check_question": "what does it do?" },
                { "audience": "teen", "explanation": "placeholder with basic terms", "key_insight": "terms map to things you know", "misconception": "terms are interchangeable", "check_question": "which term fits here?" },
                { "audience": "undergraduate", "explanation": "placeholder with a model", "key_insight": "the model predicts behavior", "misconception": "the model is exact", "check_question": "where does the model break?" },
                { "audience": "graduate", "explanation": "placeholder at full depth", "key_insight": "open problems remain", "misconception": "the field is settled", "check_question": "what is unresolved?" },
                { "audience": "expert", "explanation": "placeholder frontier view", "key_insight": "the debates that matter", "misconception": "consensus exists", "check_question": "which camp are you in, and why?" }
            ]
        }),
        "synthesis" => json!({
            "takeaways": [
                "placeholder takeaway one",
                "placeholder takeaway two",
                "placeholder takeaway three"
            ],
            "summary_short": "One-paragraph placeholder summary.",
            "summary_detailed": "A longer placeholder summary tying the research together."
        }),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_method_returns_payload() {
        let generated = PlaceholderGenerator::new()
            .generate(GenerationRequest::new("writing", "prompt"))
            .await
            .expect("placeholder result");
        assert_eq!(generated.model, "placeholder");
        assert!(generated.data["body_markdown"].is_string());
    }

    #[tokio::test]
    async fn unknown_method_is_an_error() {
        let err = PlaceholderGenerator::new()
            .generate(GenerationRequest::new("interpretive_dance", "prompt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("interpretive_dance"));
    }

    #[test]
    fn research_payloads_carry_concepts() {
        let data = payload_for("primary_research").expect("payload");
        let concepts = data["concepts"].as_array().expect("concepts array");
        assert_eq!(concepts.len(), 2);
        assert!(concepts[0]["evidence_level"].as_f64().unwrap() >= 0.7);
        assert!(concepts[1]["evidence_level"].as_f64().unwrap() < 0.7);
    }
}
