//! Built-in expert framework snippets.
//!
//! Each role carries a short list of practitioner frameworks; the first two
//! are folded into the role's prompt to flavor the output. The table is a
//! compact default — the point is the mechanism, not an exhaustive
//! marketing syllabus.

use crate::roles::{ContentRole, KnowledgeRole};

/// One expert framework reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expert {
    pub name: &'static str,
    pub framework: &'static str,
    pub principle: &'static str,
}

const HANDLEY: Expert = Expert {
    name: "Ann Handley",
    framework: "Everybody Writes",
    principle: "put the reader at the center of the story",
};
const DEAN: Expert = Expert {
    name: "Brian Dean",
    framework: "Skyscraper Technique",
    principle: "out-build the best page already ranking",
};
const CRESTODINA: Expert = Expert {
    name: "Andy Crestodina",
    framework: "Content Chemistry",
    principle: "answer real questions with data and evidence",
};
const SCHWARTZ: Expert = Expert {
    name: "Eugene Schwartz",
    framework: "Stages of Awareness",
    principle: "match the message to what the reader already believes",
};
const CIALDINI: Expert = Expert {
    name: "Robert Cialdini",
    framework: "Influence Principles",
    principle: "earn the action with proof, authority, and reciprocity",
};
const GODIN: Expert = Expert {
    name: "Seth Godin",
    framework: "Purple Cow",
    principle: "be remarkable or be invisible",
};

const FEYNMAN: Expert = Expert {
    name: "Richard Feynman",
    framework: "Feynman Technique",
    principle: "a simple explanation is the test of understanding",
};
const TUFTE: Expert = Expert {
    name: "Edward Tufte",
    framework: "Data-Ink Ratio",
    principle: "show the data, strip everything else",
};
const MINTO: Expert = Expert {
    name: "Barbara Minto",
    framework: "Pyramid Principle",
    principle: "lead with the conclusion, support it in layers",
};
const MUNGER: Expert = Expert {
    name: "Charlie Munger",
    framework: "Mental Models",
    principle: "borrow models from many disciplines and connect them",
};
const KAHNEMAN: Expert = Expert {
    name: "Daniel Kahneman",
    framework: "System 1/2 Thinking",
    principle: "design for how readers actually process information",
};
const SHANNON: Expert = Expert {
    name: "Claude Shannon",
    framework: "Information Theory",
    principle: "maximize information gain, minimize redundancy",
};

/// Experts mapped to a content role. Roles without a mapping get none.
pub fn content_experts(role: ContentRole) -> &'static [Expert] {
    match role {
        ContentRole::SeoResearcher => &[DEAN, CRESTODINA],
        ContentRole::HeadlineOptimizer => &[SCHWARTZ, CIALDINI],
        ContentRole::NarrativeArchitect => &[HANDLEY, GODIN],
        ContentRole::DataStoryteller => &[CRESTODINA, TUFTE],
        ContentRole::Writer => &[HANDLEY, SCHWARTZ],
        ContentRole::SeoOptimizer => &[DEAN],
        ContentRole::ReadabilityEditor => &[HANDLEY, GODIN],
        ContentRole::CtaSpecialist => &[CIALDINI],
        _ => &[],
    }
}

/// Experts mapped to a knowledge role. Roles without a mapping get none.
pub fn knowledge_experts(role: KnowledgeRole) -> &'static [Expert] {
    match role {
        KnowledgeRole::PrimaryResearcher => &[SHANNON, MINTO],
        KnowledgeRole::DataScientist => &[TUFTE, SHANNON],
        KnowledgeRole::ConceptMapper => &[MUNGER, MINTO],
        KnowledgeRole::FrameworkBuilder => &[MUNGER, KAHNEMAN],
        KnowledgeRole::ComplexityTranslator => &[FEYNMAN],
        KnowledgeRole::VisualExplainer => &[TUFTE],
        KnowledgeRole::FactVerifier => &[KAHNEMAN],
        KnowledgeRole::SummaryMaster => &[MINTO, FEYNMAN],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_roles_have_experts() {
        assert_eq!(content_experts(ContentRole::SeoResearcher).len(), 2);
        assert_eq!(knowledge_experts(KnowledgeRole::ComplexityTranslator)[0].name, "Richard Feynman");
    }

    #[test]
    fn unmapped_roles_have_none() {
        assert!(content_experts(ContentRole::QualityAuditor).is_empty());
        assert!(knowledge_experts(KnowledgeRole::AnalogyMaster).is_empty());
    }
}
