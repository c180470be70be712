//! Role-tagged agents.
//!
//! An agent turns a task description, a brief, and upstream context into a
//! role-flavored prompt and delegates to the generation collaborator. All
//! specialization lives in the task templates ([`tasks`]); the delegation
//! contract is identical for every role, and collaborator failures
//! propagate to the caller untouched — no retry, no fallback.

pub mod experts;
pub mod prompt;
pub mod roles;
pub mod tasks;

use tracing::debug;

use copyforge_generation::{Generated, GenerationRequest, Generator};
use copyforge_shared::{Brief, KnowledgeBrief, Result};

pub use experts::Expert;
pub use roles::{ContentRole, KnowledgeRole};

/// Upstream phase results, keyed by phase name, passed read-only.
pub type Context = serde_json::Value;

/// An agent in the content pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ContentAgent {
    role: ContentRole,
}

impl ContentAgent {
    pub fn new(role: ContentRole) -> Self {
        Self { role }
    }

    pub fn role(&self) -> ContentRole {
        self.role
    }

    /// Build the prompt for `task` and delegate to the collaborator.
    pub async fn generate(
        &self,
        task: &str,
        brief: &Brief,
        context: &Context,
        generator: &dyn Generator,
    ) -> Result<Generated> {
        let prompt = prompt::compose(
            self.role.title(),
            &prompt::brief_block(brief),
            experts::content_experts(self.role),
            task,
            context,
        );

        debug!(role = %self.role, method = self.role.method(), "agent working");
        generator
            .generate(GenerationRequest::new(self.role.method(), prompt))
            .await
    }
}

/// An agent in the knowledge pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ResearchAgent {
    role: KnowledgeRole,
}

impl ResearchAgent {
    pub fn new(role: KnowledgeRole) -> Self {
        Self { role }
    }

    pub fn role(&self) -> KnowledgeRole {
        self.role
    }

    /// Build the research prompt for `task` and delegate to the collaborator.
    pub async fn generate(
        &self,
        task: &str,
        brief: &KnowledgeBrief,
        context: &Context,
        generator: &dyn Generator,
    ) -> Result<Generated> {
        let prompt = prompt::compose(
            self.role.title(),
            &prompt::knowledge_brief_block(brief),
            experts::knowledge_experts(self.role),
            task,
            context,
        );

        debug!(role = %self.role, method = self.role.method(), "agent researching");
        generator
            .generate(GenerationRequest::new(self.role.method(), prompt))
            .await
    }
}
