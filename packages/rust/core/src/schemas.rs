//! Typed per-phase output schemas.
//!
//! The collaborator returns JSON; before a result is aggregated it is parsed
//! into the schema declared for its phase, so shape problems surface as
//! [`CopyforgeError::Schema`] at the failing phase instead of as a corrupt
//! record downstream.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use copyforge_shared::{CopyforgeError, Result};

// ---------------------------------------------------------------------------
// Content pipeline schemas
// ---------------------------------------------------------------------------

/// One keyword with targeting metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordInsight {
    pub keyword: String,
    /// Search intent: informational, transactional, navigational.
    pub intent: String,
    /// Difficulty score, 0-100.
    pub difficulty: u8,
}

/// Output of the research phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoResearch {
    pub primary_keyword: KeywordInsight,
    #[serde(default)]
    pub long_tail: Vec<KeywordInsight>,
    #[serde(default)]
    pub competitor_gaps: Vec<String>,
    #[serde(default)]
    pub questions: Vec<String>,
    pub recommended_length: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Headline {
    pub text: String,
    /// Angle: data-driven, contrarian, how-to, curiosity, urgency.
    pub angle: String,
}

/// Output of the headlines phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlineSet {
    pub headlines: Vec<Headline>,
    pub meta_description: String,
    pub social_variant: String,
    pub email_subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineSection {
    pub name: String,
    pub key_message: String,
    pub word_budget: u32,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Output of the structure phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outline {
    pub sections: Vec<OutlineSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistic {
    pub claim: String,
    pub source: String,
}

/// Output of the evidence phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidencePack {
    pub opening_statistic: Statistic,
    #[serde(default)]
    pub statistics: Vec<Statistic>,
    #[serde(default)]
    pub benchmarks: Vec<String>,
    pub case_study: String,
}

/// Output of the draft phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub body_markdown: String,
    pub word_count: u32,
}

/// Output of the seo, readability, and cta passes: the revised body plus
/// the changes made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionPass {
    pub body_markdown: String,
    #[serde(default)]
    pub changes: Vec<String>,
}

/// Output of the audit phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Quality score out of ten.
    pub score: f64,
    #[serde(default)]
    pub issues: Vec<String>,
    pub approved: bool,
}

/// Parsed output of one content phase.
#[derive(Debug, Clone)]
pub enum ContentPhaseOutput {
    Research(SeoResearch),
    Headlines(HeadlineSet),
    Structure(Outline),
    Evidence(EvidencePack),
    Draft(Draft),
    Seo(RevisionPass),
    Readability(RevisionPass),
    Cta(RevisionPass),
    Audit(AuditReport),
}

impl ContentPhaseOutput {
    /// Parse collaborator JSON against the schema declared for `phase`.
    pub fn parse(phase: &str, data: Value) -> Result<Self> {
        match phase {
            "research" => Ok(Self::Research(from_value(phase, data)?)),
            "headlines" => Ok(Self::Headlines(from_value(phase, data)?)),
            "structure" => Ok(Self::Structure(from_value(phase, data)?)),
            "evidence" => Ok(Self::Evidence(from_value(phase, data)?)),
            "draft" => Ok(Self::Draft(from_value(phase, data)?)),
            "seo" => Ok(Self::Seo(from_value(phase, data)?)),
            "readability" => Ok(Self::Readability(from_value(phase, data)?)),
            "cta" => Ok(Self::Cta(from_value(phase, data)?)),
            "audit" => Ok(Self::Audit(from_value(phase, data)?)),
            other => Err(CopyforgeError::schema(format!(
                "unknown content phase '{other}'"
            ))),
        }
    }

    /// Normalized JSON for aggregation.
    pub fn to_value(&self) -> Result<Value> {
        let value = match self {
            Self::Research(v) => serde_json::to_value(v),
            Self::Headlines(v) => serde_json::to_value(v),
            Self::Structure(v) => serde_json::to_value(v),
            Self::Evidence(v) => serde_json::to_value(v),
            Self::Draft(v) => serde_json::to_value(v),
            Self::Seo(v) | Self::Readability(v) | Self::Cta(v) => serde_json::to_value(v),
            Self::Audit(v) => serde_json::to_value(v),
        };
        value.map_err(|e| CopyforgeError::schema(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Knowledge pipeline schemas
// ---------------------------------------------------------------------------

/// A concept surfaced by a research phase, destined for the knowledge graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptFinding {
    pub name: String,
    pub definition: String,
    /// Evidence strength in `[0, 1]` — validated by the graph on insert.
    pub evidence_level: f64,
    #[serde(default)]
    pub related: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub reference: String,
}

/// Common shape of the research-style knowledge phases. The source system
/// returned one findings mapping for every research agent; the schema is
/// per shape, not per role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchFindings {
    pub summary: String,
    #[serde(default)]
    pub findings: Vec<String>,
    #[serde(default)]
    pub concepts: Vec<ConceptFinding>,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    #[serde(default)]
    pub claims: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptLink {
    pub from: String,
    pub to: String,
    /// Relationship kind: causes, enables, contradicts, part-of, ...
    pub kind: String,
}

/// Output of the concept_map phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptMap {
    /// The most central concept.
    pub core: String,
    pub concepts: Vec<ConceptFinding>,
    #[serde(default)]
    pub relationships: Vec<ConceptLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplanationLevel {
    /// Audience band: child, teen, undergraduate, graduate, expert.
    pub audience: String,
    pub explanation: String,
    pub key_insight: String,
    pub misconception: String,
    pub check_question: String,
}

/// Output of the explanations phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplanationLadder {
    pub concept: String,
    pub levels: Vec<ExplanationLevel>,
}

/// Output of the synthesis phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synthesis {
    pub takeaways: Vec<String>,
    pub summary_short: String,
    pub summary_detailed: String,
}

/// Parsed output of one knowledge phase.
#[derive(Debug, Clone)]
pub enum KnowledgePhaseOutput {
    Findings(ResearchFindings),
    ConceptMap(ConceptMap),
    Explanations(ExplanationLadder),
    Synthesis(Synthesis),
}

impl KnowledgePhaseOutput {
    /// Parse collaborator JSON against the schema declared for `phase`.
    pub fn parse(phase: &str, data: Value) -> Result<Self> {
        match phase {
            "concept_map" => Ok(Self::ConceptMap(from_value(phase, data)?)),
            "explanations" => Ok(Self::Explanations(from_value(phase, data)?)),
            "synthesis" => Ok(Self::Synthesis(from_value(phase, data)?)),
            "primary_research" | "academic_research" | "data_analysis" | "industry_trends"
            | "historical_context" | "contrarian_views" | "frameworks" | "analogies"
            | "examples" | "visuals" | "verification" | "anticipated_questions" => {
                Ok(Self::Findings(from_value(phase, data)?))
            }
            other => Err(CopyforgeError::schema(format!(
                "unknown knowledge phase '{other}'"
            ))),
        }
    }

    /// Normalized JSON for aggregation.
    pub fn to_value(&self) -> Result<Value> {
        let value = match self {
            Self::Findings(v) => serde_json::to_value(v),
            Self::ConceptMap(v) => serde_json::to_value(v),
            Self::Explanations(v) => serde_json::to_value(v),
            Self::Synthesis(v) => serde_json::to_value(v),
        };
        value.map_err(|e| CopyforgeError::schema(e.to_string()))
    }

    /// Concepts this output contributes to the knowledge graph.
    pub fn concepts(&self) -> &[ConceptFinding] {
        match self {
            Self::Findings(f) => &f.concepts,
            Self::ConceptMap(m) => &m.concepts,
            _ => &[],
        }
    }

    /// Relationships this output contributes to the knowledge graph.
    pub fn relationships(&self) -> &[ConceptLink] {
        match self {
            Self::ConceptMap(m) => &m.relationships,
            _ => &[],
        }
    }
}

fn from_value<T: serde::de::DeserializeOwned>(phase: &str, data: Value) -> Result<T> {
    serde_json::from_value(data)
        .map_err(|e| CopyforgeError::schema(format!("phase '{phase}' output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn audit_parses() {
        let parsed = ContentPhaseOutput::parse(
            "audit",
            json!({ "score": 8.2, "issues": [], "approved": true }),
        )
        .expect("parse");
        match parsed {
            ContentPhaseOutput::Audit(audit) => {
                assert_eq!(audit.score, 8.2);
                assert!(audit.approved);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn shape_mismatch_is_a_schema_error() {
        let err = ContentPhaseOutput::parse("draft", json!({ "title": "only a title" }))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("schema error"), "got: {msg}");
        assert!(msg.contains("phase 'draft'"));
    }

    #[test]
    fn unknown_phase_rejected() {
        assert!(ContentPhaseOutput::parse("daydreaming", json!({})).is_err());
        assert!(KnowledgePhaseOutput::parse("daydreaming", json!({})).is_err());
    }

    #[test]
    fn research_findings_defaults_optional_lists() {
        let parsed =
            KnowledgePhaseOutput::parse("primary_research", json!({ "summary": "s" }))
                .expect("parse");
        match &parsed {
            KnowledgePhaseOutput::Findings(f) => {
                assert!(f.concepts.is_empty());
                assert!(f.claims.is_empty());
            }
            other => panic!("wrong variant: {other:?}"),
        }
        assert!(parsed.concepts().is_empty());
    }

    #[test]
    fn concept_map_exposes_graph_contributions() {
        let parsed = KnowledgePhaseOutput::parse(
            "concept_map",
            json!({
                "core": "a",
                "concepts": [
                    { "name": "a", "definition": "d", "evidence_level": 0.9 },
                    { "name": "b", "definition": "d", "evidence_level": 0.8 }
                ],
                "relationships": [ { "from": "a", "to": "b", "kind": "enables" } ]
            }),
        )
        .expect("parse");

        assert_eq!(parsed.concepts().len(), 2);
        assert_eq!(parsed.relationships().len(), 1);
        assert_eq!(parsed.relationships()[0].kind, "enables");
    }

    #[test]
    fn normalization_roundtrips() {
        let raw = json!({
            "title": "t",
            "body_markdown": "b",
            "word_count": 100,
            "unexpected_extra": "dropped"
        });
        let parsed = ContentPhaseOutput::parse("draft", raw).expect("parse");
        let normalized = parsed.to_value().expect("to_value");
        assert_eq!(normalized["title"], "t");
        // Unknown fields do not survive normalization.
        assert!(normalized.get("unexpected_extra").is_none());
    }
}
