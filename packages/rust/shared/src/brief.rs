//! Brief types — immutable descriptions of one content request.
//!
//! A [`Brief`] drives the content pipeline; a [`KnowledgeBrief`] drives the
//! knowledge pipeline. Both are constructed through builders that apply
//! defaults and reject malformed requests up front.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CopyforgeError, Result};

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for pipeline run identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Brief enums
// ---------------------------------------------------------------------------

/// What kind of piece the pipeline is producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    CaseStudy,
    HowTo,
    ThoughtLeadership,
    DataAnalysis,
    Research,
}

/// Business goal the piece serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessGoal {
    LeadGeneration,
    AuthorityBuilding,
    Education,
    KeywordResearch,
}

/// Voice the writing should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    ExpertGuide,
    Contrarian,
    Analytical,
    Conversational,
}

/// How time-sensitive the piece is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Breaking,
}

macro_rules! display_kebab {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// The kebab-case tag used on the wire and in prompts.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

display_kebab!(ContentType {
    CaseStudy => "case-study",
    HowTo => "how-to",
    ThoughtLeadership => "thought-leadership",
    DataAnalysis => "data-analysis",
    Research => "research",
});

display_kebab!(BusinessGoal {
    LeadGeneration => "lead-generation",
    AuthorityBuilding => "authority-building",
    Education => "education",
    KeywordResearch => "keyword-research",
});

display_kebab!(Tone {
    ExpertGuide => "expert-guide",
    Contrarian => "contrarian",
    Analytical => "analytical",
    Conversational => "conversational",
});

display_kebab!(Urgency {
    Low => "low",
    Medium => "medium",
    High => "high",
    Breaking => "breaking",
});

// ---------------------------------------------------------------------------
// Brief
// ---------------------------------------------------------------------------

/// Immutable description of one content request.
///
/// Construct via [`Brief::builder`]; read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brief {
    /// Subject of the piece.
    pub topic: String,
    /// Who the piece is written for.
    pub target_audience: String,
    /// Keyword the piece should rank for.
    pub primary_keyword: String,
    /// Supporting keywords, in priority order.
    #[serde(default)]
    pub secondary_keywords: Vec<String>,
    /// Kind of piece being produced.
    pub content_type: ContentType,
    /// Target length in words.
    pub word_count: u32,
    /// Business goal the piece serves.
    pub business_goal: BusinessGoal,
    /// Reader problems the piece addresses.
    #[serde(default)]
    pub pain_points: Vec<String>,
    /// Outcomes the reader should walk away with.
    #[serde(default)]
    pub desired_outcomes: Vec<String>,
    /// Voice of the writing.
    pub tone: Tone,
    /// Time sensitivity.
    pub urgency: Urgency,
    /// When the brief was created.
    pub created_at: DateTime<Utc>,
}

impl Brief {
    /// Start building a brief for `topic`.
    pub fn builder(topic: impl Into<String>) -> BriefBuilder {
        BriefBuilder::new(topic)
    }
}

/// Builder for [`Brief`] with defaulted fields.
#[derive(Debug, Clone)]
pub struct BriefBuilder {
    topic: String,
    target_audience: String,
    primary_keyword: Option<String>,
    secondary_keywords: Vec<String>,
    content_type: ContentType,
    word_count: u32,
    business_goal: BusinessGoal,
    pain_points: Vec<String>,
    desired_outcomes: Vec<String>,
    tone: Tone,
    urgency: Urgency,
}

impl BriefBuilder {
    fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            target_audience: "Enterprise decision makers".into(),
            primary_keyword: None,
            secondary_keywords: Vec::new(),
            content_type: ContentType::HowTo,
            word_count: 2000,
            business_goal: BusinessGoal::LeadGeneration,
            pain_points: Vec::new(),
            desired_outcomes: Vec::new(),
            tone: Tone::ExpertGuide,
            urgency: Urgency::Medium,
        }
    }

    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = audience.into();
        self
    }

    pub fn primary_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.primary_keyword = Some(keyword.into());
        self
    }

    pub fn secondary_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secondary_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn word_count(mut self, word_count: u32) -> Self {
        self.word_count = word_count;
        self
    }

    pub fn business_goal(mut self, goal: BusinessGoal) -> Self {
        self.business_goal = goal;
        self
    }

    pub fn pain_points<I, S>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pain_points = points.into_iter().map(Into::into).collect();
        self
    }

    pub fn desired_outcomes<I, S>(mut self, outcomes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.desired_outcomes = outcomes.into_iter().map(Into::into).collect();
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Validate and build the brief.
    ///
    /// Fails fast on an empty topic, an empty resolved primary keyword, or a
    /// zero word count.
    pub fn build(self) -> Result<Brief> {
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            return Err(CopyforgeError::brief("topic must not be empty"));
        }
        if self.word_count == 0 {
            return Err(CopyforgeError::brief("word count must be greater than zero"));
        }

        let primary_keyword = match self.primary_keyword {
            Some(k) if !k.trim().is_empty() => k.trim().to_string(),
            Some(_) => return Err(CopyforgeError::brief("primary keyword must not be empty")),
            None => slugify(&topic),
        };
        if primary_keyword.is_empty() {
            return Err(CopyforgeError::brief(
                "could not derive a primary keyword from the topic",
            ));
        }

        Ok(Brief {
            topic,
            target_audience: self.target_audience,
            primary_keyword,
            secondary_keywords: self.secondary_keywords,
            content_type: self.content_type,
            word_count: self.word_count,
            business_goal: self.business_goal,
            pain_points: self.pain_points,
            desired_outcomes: self.desired_outcomes,
            tone: self.tone,
            urgency: self.urgency,
            created_at: Utc::now(),
        })
    }
}

// ---------------------------------------------------------------------------
// KnowledgeBrief
// ---------------------------------------------------------------------------

/// Reader expertise band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// How wide the treatment of the topic should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    Comprehensive,
    Focused,
    Survey,
    DeepDive,
}

display_kebab!(DepthLevel {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
    Expert => "expert",
});

display_kebab!(Scope {
    Comprehensive => "comprehensive",
    Focused => "focused",
    Survey => "survey",
    DeepDive => "deep-dive",
});

/// Immutable description of one knowledge-first content request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBrief {
    pub topic: String,
    pub depth_level: DepthLevel,
    pub scope: Scope,
    /// Reader's current expertise.
    pub target_expertise: DepthLevel,
    /// Expertise the piece should leave the reader with.
    pub desired_expertise: DepthLevel,
    /// What the reader should understand afterwards.
    #[serde(default)]
    pub knowledge_goals: Vec<String>,
    /// Common wrong beliefs to correct.
    #[serde(default)]
    pub misconceptions_to_address: Vec<String>,
    /// What the reader needs to know first.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Minimum number of primary sources to ground the piece in.
    pub primary_sources_required: u32,
    /// Kinds of data or evidence required.
    #[serde(default)]
    pub data_requirements: Vec<String>,
    /// Charts, diagrams, and other visuals required.
    #[serde(default)]
    pub visual_requirements: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl KnowledgeBrief {
    /// Start building a knowledge brief for `topic`.
    pub fn builder(topic: impl Into<String>) -> KnowledgeBriefBuilder {
        KnowledgeBriefBuilder::new(topic)
    }
}

/// Builder for [`KnowledgeBrief`] with defaulted fields.
#[derive(Debug, Clone)]
pub struct KnowledgeBriefBuilder {
    topic: String,
    depth_level: DepthLevel,
    scope: Scope,
    target_expertise: DepthLevel,
    desired_expertise: DepthLevel,
    knowledge_goals: Vec<String>,
    misconceptions_to_address: Vec<String>,
    prerequisites: Vec<String>,
    primary_sources_required: u32,
    data_requirements: Vec<String>,
    visual_requirements: Vec<String>,
}

impl KnowledgeBriefBuilder {
    fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            depth_level: DepthLevel::Advanced,
            scope: Scope::Comprehensive,
            target_expertise: DepthLevel::Intermediate,
            desired_expertise: DepthLevel::Expert,
            knowledge_goals: Vec::new(),
            misconceptions_to_address: Vec::new(),
            prerequisites: Vec::new(),
            primary_sources_required: 10,
            data_requirements: Vec::new(),
            visual_requirements: Vec::new(),
        }
    }

    pub fn depth_level(mut self, depth: DepthLevel) -> Self {
        self.depth_level = depth;
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn target_expertise(mut self, level: DepthLevel) -> Self {
        self.target_expertise = level;
        self
    }

    pub fn desired_expertise(mut self, level: DepthLevel) -> Self {
        self.desired_expertise = level;
        self
    }

    pub fn knowledge_goals<I, S>(mut self, goals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.knowledge_goals = goals.into_iter().map(Into::into).collect();
        self
    }

    pub fn misconceptions<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.misconceptions_to_address = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn prerequisites<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn primary_sources_required(mut self, count: u32) -> Self {
        self.primary_sources_required = count;
        self
    }

    pub fn data_requirements<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_requirements = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn visual_requirements<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visual_requirements = items.into_iter().map(Into::into).collect();
        self
    }

    /// Validate and build the knowledge brief.
    pub fn build(self) -> Result<KnowledgeBrief> {
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            return Err(CopyforgeError::brief("topic must not be empty"));
        }

        Ok(KnowledgeBrief {
            topic,
            depth_level: self.depth_level,
            scope: self.scope,
            target_expertise: self.target_expertise,
            desired_expertise: self.desired_expertise,
            knowledge_goals: self.knowledge_goals,
            misconceptions_to_address: self.misconceptions_to_address,
            prerequisites: self.prerequisites,
            primary_sources_required: self.primary_sources_required,
            data_requirements: self.data_requirements,
            visual_requirements: self.visual_requirements,
            created_at: Utc::now(),
        })
    }
}

// ---------------------------------------------------------------------------
// Slugifier
// ---------------------------------------------------------------------------

/// Turn a topic into a keyword/filename slug: lowercase, runs of
/// non-alphanumerics collapsed to single hyphens, edges trimmed.
pub fn slugify(input: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

    let lowered = input.to_lowercase();
    re.replace_all(&lowered, "-").trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_roundtrip() {
        let id = RunId::new();
        let s = id.to_string();
        let parsed: RunId = s.parse().expect("parse RunId");
        assert_eq!(id, parsed);
    }

    #[test]
    fn slugify_topics() {
        assert_eq!(slugify("AI-Powered SEO in 2025"), "ai-powered-seo-in-2025");
        assert_eq!(slugify("  Why 90% Fail?  "), "why-90-fail");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn builder_applies_defaults() {
        let brief = Brief::builder("Enterprise AI Adoption").build().expect("build");
        assert_eq!(brief.primary_keyword, "enterprise-ai-adoption");
        assert_eq!(brief.word_count, 2000);
        assert_eq!(brief.business_goal, BusinessGoal::LeadGeneration);
        assert_eq!(brief.tone, Tone::ExpertGuide);
        assert_eq!(brief.urgency, Urgency::Medium);
        assert!(brief.pain_points.is_empty());
    }

    #[test]
    fn builder_rejects_empty_topic() {
        let err = Brief::builder("   ").build().unwrap_err();
        assert!(err.to_string().contains("topic must not be empty"));
    }

    #[test]
    fn builder_rejects_zero_word_count() {
        let err = Brief::builder("Topic").word_count(0).build().unwrap_err();
        assert!(err.to_string().contains("word count"));
    }

    #[test]
    fn builder_rejects_blank_explicit_keyword() {
        let err = Brief::builder("Topic")
            .primary_keyword("  ")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("primary keyword"));
    }

    #[test]
    fn builder_rejects_unsluggable_topic() {
        // Non-latin topic with an explicit keyword is fine; without one the
        // slug comes up empty and the build must fail.
        let err = Brief::builder("???").build().unwrap_err();
        assert!(err.to_string().contains("primary keyword"));

        let brief = Brief::builder("???")
            .primary_keyword("mystery-topic")
            .build()
            .expect("explicit keyword rescues the brief");
        assert_eq!(brief.primary_keyword, "mystery-topic");
    }

    #[test]
    fn brief_serde_roundtrip() {
        let brief = Brief::builder("ChatGPT Search vs Traditional SEO")
            .content_type(ContentType::ThoughtLeadership)
            .secondary_keywords(["ai search engines", "future of seo"])
            .urgency(Urgency::High)
            .build()
            .expect("build");

        let json = serde_json::to_string(&brief).expect("serialize");
        assert!(json.contains("thought-leadership"));
        let parsed: Brief = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.topic, brief.topic);
        assert_eq!(parsed.secondary_keywords.len(), 2);
        assert_eq!(parsed.urgency, Urgency::High);
    }

    #[test]
    fn knowledge_brief_defaults() {
        let brief = KnowledgeBrief::builder("Transformer architectures")
            .build()
            .expect("build");
        assert_eq!(brief.depth_level, DepthLevel::Advanced);
        assert_eq!(brief.scope, Scope::Comprehensive);
        assert_eq!(brief.primary_sources_required, 10);
    }

    #[test]
    fn knowledge_brief_rejects_empty_topic() {
        assert!(KnowledgeBrief::builder("").build().is_err());
    }

    #[test]
    fn brief_fixture_validates() {
        let fixture = std::fs::read_to_string("../../../fixtures/json/brief.fixture.json")
            .expect("read fixture");
        let parsed: Brief = serde_json::from_str(&fixture).expect("deserialize fixture brief");
        assert_eq!(parsed.content_type, ContentType::CaseStudy);
        assert_eq!(parsed.secondary_keywords.len(), 3);
        assert_eq!(parsed.word_count, 3000);
    }
}
