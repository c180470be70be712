//! Agent role registries.
//!
//! Roles are purely descriptive tags: each names a function in a pipeline,
//! maps to a human-readable title for prompts, and carries the snake_case
//! generation-method tag sent to the collaborator. Behavior lives elsewhere.

/// Roles in the content pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentRole {
    SeoResearcher,
    HeadlineOptimizer,
    NarrativeArchitect,
    DataStoryteller,
    Writer,
    SeoOptimizer,
    ReadabilityEditor,
    FactChecker,
    CtaSpecialist,
    QualityAuditor,
}

impl ContentRole {
    /// Every content role, in pipeline order.
    pub const ALL: [ContentRole; 10] = [
        Self::SeoResearcher,
        Self::HeadlineOptimizer,
        Self::NarrativeArchitect,
        Self::DataStoryteller,
        Self::Writer,
        Self::SeoOptimizer,
        Self::ReadabilityEditor,
        Self::FactChecker,
        Self::CtaSpecialist,
        Self::QualityAuditor,
    ];

    /// Human-readable role title used in prompts.
    pub fn title(&self) -> &'static str {
        match self {
            Self::SeoResearcher => "SEO Research Specialist",
            Self::HeadlineOptimizer => "Headline & Hook Specialist",
            Self::NarrativeArchitect => "Narrative Structure Designer",
            Self::DataStoryteller => "Data Storytelling Expert",
            Self::Writer => "Content Writer",
            Self::SeoOptimizer => "SEO Content Optimizer",
            Self::ReadabilityEditor => "Readability & Flow Editor",
            Self::FactChecker => "Fact Checker & Source Validator",
            Self::CtaSpecialist => "Call-to-Action Optimizer",
            Self::QualityAuditor => "Content Quality Auditor",
        }
    }

    /// Generation-method tag for the collaborator.
    pub fn method(&self) -> &'static str {
        match self {
            Self::SeoResearcher => "seo_research",
            Self::HeadlineOptimizer => "headline_generation",
            Self::NarrativeArchitect => "structure_design",
            Self::DataStoryteller => "evidence_gathering",
            Self::Writer => "writing",
            Self::SeoOptimizer => "seo_optimization",
            Self::ReadabilityEditor => "readability_edit",
            Self::FactChecker => "fact_check",
            Self::CtaSpecialist => "cta_optimization",
            Self::QualityAuditor => "quality_audit",
        }
    }
}

impl std::fmt::Display for ContentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Roles in the knowledge pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnowledgeRole {
    PrimaryResearcher,
    AcademicResearcher,
    DataScientist,
    IndustryAnalyst,
    ContrarianResearcher,
    HistoricalAnalyst,
    ConceptMapper,
    FrameworkBuilder,
    AnalogyMaster,
    ComplexityTranslator,
    FactVerifier,
    VisualExplainer,
    ExampleGenerator,
    QuestionAnticipator,
    SummaryMaster,
}

impl KnowledgeRole {
    /// Every knowledge role, in pipeline order.
    pub const ALL: [KnowledgeRole; 15] = [
        Self::PrimaryResearcher,
        Self::AcademicResearcher,
        Self::DataScientist,
        Self::IndustryAnalyst,
        Self::ContrarianResearcher,
        Self::HistoricalAnalyst,
        Self::ConceptMapper,
        Self::FrameworkBuilder,
        Self::AnalogyMaster,
        Self::ComplexityTranslator,
        Self::FactVerifier,
        Self::VisualExplainer,
        Self::ExampleGenerator,
        Self::QuestionAnticipator,
        Self::SummaryMaster,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::PrimaryResearcher => "Primary Source Researcher",
            Self::AcademicResearcher => "Academic Literature Analyst",
            Self::DataScientist => "Data Analysis & Visualization Expert",
            Self::IndustryAnalyst => "Industry Trends & Patterns Analyst",
            Self::ContrarianResearcher => "Devil's Advocate & Alternative Views",
            Self::HistoricalAnalyst => "Historical Context & Evolution Expert",
            Self::ConceptMapper => "Concept Relationship Mapper",
            Self::FrameworkBuilder => "Mental Model & Framework Designer",
            Self::AnalogyMaster => "Analogy & Metaphor Creator",
            Self::ComplexityTranslator => "Complex Concept Simplifier",
            Self::FactVerifier => "Multi-Source Fact Checker",
            Self::VisualExplainer => "Data Visualization Designer",
            Self::ExampleGenerator => "Concrete Example Creator",
            Self::QuestionAnticipator => "Reader Question Predictor",
            Self::SummaryMaster => "Multi-Level Summary Creator",
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::PrimaryResearcher => "primary_research",
            Self::AcademicResearcher => "academic_research",
            Self::DataScientist => "data_analysis",
            Self::IndustryAnalyst => "industry_trends",
            Self::ContrarianResearcher => "contrarian_views",
            Self::HistoricalAnalyst => "historical_context",
            Self::ConceptMapper => "concept_mapping",
            Self::FrameworkBuilder => "framework_building",
            Self::AnalogyMaster => "analogy_generation",
            Self::ComplexityTranslator => "multi_level_explanation",
            Self::FactVerifier => "fact_verification",
            Self::VisualExplainer => "visualization_design",
            Self::ExampleGenerator => "example_generation",
            Self::QuestionAnticipator => "question_anticipation",
            Self::SummaryMaster => "synthesis",
        }
    }
}

impl std::fmt::Display for KnowledgeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn content_method_tags_are_unique() {
        let tags: HashSet<&str> = ContentRole::ALL.iter().map(|r| r.method()).collect();
        assert_eq!(tags.len(), ContentRole::ALL.len());
    }

    #[test]
    fn knowledge_method_tags_are_unique() {
        let tags: HashSet<&str> = KnowledgeRole::ALL.iter().map(|r| r.method()).collect();
        assert_eq!(tags.len(), KnowledgeRole::ALL.len());
    }

    #[test]
    fn tags_do_not_collide_across_pipelines() {
        let content: HashSet<&str> = ContentRole::ALL.iter().map(|r| r.method()).collect();
        for role in KnowledgeRole::ALL {
            assert!(!content.contains(role.method()), "duplicate tag: {}", role.method());
        }
    }

    #[test]
    fn titles_display() {
        assert_eq!(ContentRole::Writer.to_string(), "Content Writer");
        assert_eq!(
            KnowledgeRole::ConceptMapper.to_string(),
            "Concept Relationship Mapper"
        );
    }
}
