//! Per-role task descriptions.
//!
//! Specialization between agents is exactly this: the task template. The
//! prompt skeleton and the delegation to the collaborator are identical for
//! every role.

use copyforge_shared::{Brief, KnowledgeBrief};

use crate::roles::{ContentRole, KnowledgeRole};

/// Task description for a content role against a brief.
pub fn content_task(role: ContentRole, brief: &Brief) -> String {
    match role {
        ContentRole::SeoResearcher => format!(
            "Research the keyword and competitive landscape for '{}'. Report the primary \
             keyword with intent and difficulty, a set of long-tail keywords, gaps in \
             competitor coverage, the questions searchers ask, and a recommended length.",
            brief.topic
        ),
        ContentRole::HeadlineOptimizer => format!(
            "Write candidate headlines for '{}' that carry the primary keyword naturally \
             and promise a specific outcome. Mix data-driven, contrarian, and how-to \
             angles. Include a meta description, a social variant, and an email subject.",
            brief.topic
        ),
        ContentRole::NarrativeArchitect => String::from(
            "Design the narrative structure: a sectioned outline from hook to payoff, \
             each section with its key message, word budget, and the keywords it should \
             absorb. Keep keyword distribution natural.",
        ),
        ContentRole::DataStoryteller => String::from(
            "Collect the evidence the outline needs: an attention-grabbing opening \
             statistic, supporting statistics with sources, industry benchmarks, and one \
             concrete case study with numbers.",
        ),
        ContentRole::Writer => format!(
            "Write the complete piece at roughly {} words. Follow the outline exactly, \
             work every data point in naturally, keep paragraphs short and voice active, \
             and make the body scannable with subheadings.",
            brief.word_count
        ),
        ContentRole::SeoOptimizer => String::from(
            "Optimize the draft for search without hurting readability. Report every \
             change you make alongside the revised body.",
        ),
        ContentRole::ReadabilityEditor => String::from(
            "Edit the draft for flow, clarity, and engagement. Report every change you \
             make alongside the revised body.",
        ),
        ContentRole::FactChecker => String::from(
            "Check every factual claim in the draft against its cited source and flag \
             anything unverifiable.",
        ),
        ContentRole::CtaSpecialist => format!(
            "Weave calls to action through the piece that serve the '{}' goal, then \
             report the revised body and the CTAs added.",
            brief.business_goal
        ),
        ContentRole::QualityAuditor => String::from(
            "Audit the finished piece: score it out of ten, list remaining issues, and \
             state whether it is approved for publication.",
        ),
    }
}

/// Task description for a knowledge role against a knowledge brief.
pub fn knowledge_task(role: KnowledgeRole, brief: &KnowledgeBrief) -> String {
    match role {
        KnowledgeRole::PrimaryResearcher => format!(
            "Find and assess primary sources on '{}': original studies, datasets, \
             official documentation. For each, note credibility, methodology, key \
             findings, and limitations. Prefer primary over secondary sources.",
            brief.topic
        ),
        KnowledgeRole::AcademicResearcher => format!(
            "Survey the academic literature on '{}' and extract the findings, concepts, \
             and open disputes that matter at the {} level.",
            brief.topic, brief.depth_level
        ),
        KnowledgeRole::DataScientist => format!(
            "Analyze the available data for '{}': trends, correlations versus causes, \
             outliers, and the comparisons worth charting. Note confidence where the \
             data is thin.",
            brief.topic
        ),
        KnowledgeRole::IndustryAnalyst => String::from(
            "Identify the industry trends and recurring patterns the primary research \
             surfaced, and where current practice diverges from the evidence.",
        ),
        KnowledgeRole::ContrarianResearcher => String::from(
            "Find the dissenting opinions and alternative theories. Steelman each one \
             and note what evidence would settle the disagreement.",
        ),
        KnowledgeRole::HistoricalAnalyst => format!(
            "Trace how understanding of '{}' evolved: key milestones, abandoned ideas, \
             and why the field moved on from them.",
            brief.topic
        ),
        KnowledgeRole::ConceptMapper => format!(
            "Map the concepts of '{}': name the core concept, the supporting concepts, \
             and the relationships between them (causal, hierarchical, contradictory) \
             with the evidence behind each link.",
            brief.topic
        ),
        KnowledgeRole::FrameworkBuilder => String::from(
            "Build the mental models a reader can carry away from the concept map: \
             compact frameworks that compress the relationships into usable rules.",
        ),
        KnowledgeRole::AnalogyMaster => String::from(
            "Create analogies and metaphors for the mapped concepts, each with the \
             point where the analogy breaks down.",
        ),
        KnowledgeRole::ComplexityTranslator => format!(
            "Explain the core concept of '{}' at five levels, from child to expert. At \
             each level give the explanation, the key insight, the common misconception, \
             and a question that tests understanding.",
            brief.topic
        ),
        KnowledgeRole::FactVerifier => String::from(
            "Cross-check every extracted claim against independent sources and flag \
             anything that fails verification or rests on a single source.",
        ),
        KnowledgeRole::VisualExplainer => String::from(
            "Design the visualizations the analysis and concept map call for. Maximize \
             the data-ink ratio; note labels and scales for each.",
        ),
        KnowledgeRole::ExampleGenerator => String::from(
            "Generate concrete examples and worked cases that ground the explanations \
             in real situations.",
        ),
        KnowledgeRole::QuestionAnticipator => String::from(
            "Predict the questions and confusions readers will have at each explanation \
             level, with the answers the piece should carry.",
        ),
        KnowledgeRole::SummaryMaster => format!(
            "Synthesize all upstream research on '{}' into key takeaways, a short \
             summary, and a detailed summary that preserves the caveats.",
            brief.topic
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_content_role_has_a_task() {
        let brief = Brief::builder("Test Topic").build().expect("brief");
        for role in ContentRole::ALL {
            let task = content_task(role, &brief);
            assert!(!task.trim().is_empty(), "empty task for {role:?}");
        }
    }

    #[test]
    fn every_knowledge_role_has_a_task() {
        let brief = KnowledgeBrief::builder("Test Topic").build().expect("brief");
        for role in KnowledgeRole::ALL {
            let task = knowledge_task(role, &brief);
            assert!(!task.trim().is_empty(), "empty task for {role:?}");
        }
    }

    #[test]
    fn tasks_reference_brief_fields() {
        let brief = Brief::builder("Quantum Widgets")
            .word_count(3500)
            .build()
            .expect("brief");
        assert!(content_task(ContentRole::SeoResearcher, &brief).contains("Quantum Widgets"));
        assert!(content_task(ContentRole::Writer, &brief).contains("3500"));
    }
}
