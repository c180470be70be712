//! The content pipeline orchestrator.
//!
//! [`EditorInChief`] runs the nine-phase chain from research to audit,
//! registers the finished topic in the shared knowledge graph, and
//! aggregates everything into a [`FinalRecord`]. The orchestrator owns one
//! run at a time; the graph and collaborator are passed in explicitly.

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use serde_json::{Value, json};
use tracing::{info, instrument};

use copyforge_agents::{ContentAgent, ContentRole, tasks};
use copyforge_generation::{Generated, Generator};
use copyforge_graph::SharedKnowledgeGraph;
use copyforge_records::{FinalRecord, PipelineKind};
use copyforge_shared::{Brief, CopyforgeError, Result};

use crate::phases::{
    CONTENT_PHASES, PhaseRunner, PipelineProgress, context_for, execute_phases,
};
use crate::schemas::{AuditReport, ContentPhaseOutput};

/// Maps a content phase to the role that executes it.
fn phase_role(phase: &str) -> Result<ContentRole> {
    Ok(match phase {
        "research" => ContentRole::SeoResearcher,
        "headlines" => ContentRole::HeadlineOptimizer,
        "structure" => ContentRole::NarrativeArchitect,
        "evidence" => ContentRole::DataStoryteller,
        "draft" => ContentRole::Writer,
        "seo" => ContentRole::SeoOptimizer,
        "readability" => ContentRole::ReadabilityEditor,
        "cta" => ContentRole::CtaSpecialist,
        "audit" => ContentRole::QualityAuditor,
        other => {
            return Err(CopyforgeError::schema(format!(
                "no role declared for content phase '{other}'"
            )));
        }
    })
}

/// Collaborator token usage accumulated across a run.
#[derive(Debug, Default)]
pub(crate) struct UsageTotals {
    pub tokens_in: u64,
    pub tokens_out: u64,
    pub model: String,
}

impl UsageTotals {
    pub(crate) fn add(&mut self, generated: &Generated) {
        self.tokens_in += generated.tokens_in;
        self.tokens_out += generated.tokens_out;
        if self.model.is_empty() {
            self.model = generated.model.clone();
        }
    }
}

/// Chief editor orchestrating the content agents.
pub struct EditorInChief {
    generator: Arc<dyn Generator>,
    graph: SharedKnowledgeGraph,
}

impl EditorInChief {
    pub fn new(generator: Arc<dyn Generator>, graph: SharedKnowledgeGraph) -> Self {
        Self { generator, graph }
    }

    /// The shared graph this editor registers completed topics into.
    pub fn graph(&self) -> &SharedKnowledgeGraph {
        &self.graph
    }

    /// Run the full content pipeline for one brief.
    ///
    /// Fail-fast: the first failing phase aborts the run, the error names
    /// that phase, and no record is produced.
    #[instrument(skip_all, fields(topic = %brief.topic))]
    pub async fn create_post(
        &self,
        brief: &Brief,
        progress: &dyn PipelineProgress,
    ) -> Result<FinalRecord> {
        info!(
            audience = %brief.target_audience,
            goal = %brief.business_goal,
            "creating post"
        );

        let run = ContentRun {
            editor: self,
            brief,
            usage: Mutex::new(UsageTotals::default()),
        };
        let phases = execute_phases(&run, &CONTENT_PHASES, progress).await?;

        // The audit score feeds the graph's performance metadata.
        let audit: AuditReport = phases
            .get("audit")
            .cloned()
            .ok_or_else(|| CopyforgeError::schema("audit phase missing from results"))
            .and_then(|v| {
                serde_json::from_value(v)
                    .map_err(|e| CopyforgeError::schema(format!("audit result: {e}")))
            })?;

        let mut keywords = vec![brief.primary_keyword.clone()];
        keywords.extend(brief.secondary_keywords.iter().cloned());
        self.graph
            .register(
                &brief.topic,
                keywords,
                json!({ "status": "completed", "score": audit.score }),
            )
            .await;

        let usage = run.usage.into_inner().unwrap_or_default();
        let agents_used = CONTENT_PHASES
            .iter()
            .filter_map(|spec| phase_role(spec.name).ok())
            .map(|role| role.title().to_string())
            .collect();

        let brief_value = serde_json::to_value(brief)
            .map_err(|e| CopyforgeError::schema(format!("brief not serializable: {e}")))?;

        let record = FinalRecord::new(
            PipelineKind::Content,
            brief_value,
            phases,
            agents_used,
            usage.tokens_in,
            usage.tokens_out,
            usage.model,
        );

        info!(run_id = %record.run_id, score = audit.score, "post complete");
        Ok(record)
    }
}

/// One in-flight content run: the editor, the brief, and usage totals.
struct ContentRun<'a> {
    editor: &'a EditorInChief,
    brief: &'a Brief,
    usage: Mutex<UsageTotals>,
}

#[async_trait::async_trait]
impl PhaseRunner for ContentRun<'_> {
    async fn run_phase(
        &self,
        phase: &'static str,
        completed: &IndexMap<String, Value>,
    ) -> Result<Value> {
        let role = phase_role(phase)?;
        let agent = ContentAgent::new(role);
        let task = tasks::content_task(role, self.brief);
        let context = context_for(&CONTENT_PHASES, phase, completed);

        let generated = agent
            .generate(&task, self.brief, &context, self.editor.generator.as_ref())
            .await?;

        if let Ok(mut usage) = self.usage.lock() {
            usage.add(&generated);
        }

        ContentPhaseOutput::parse(phase, generated.data)?.to_value()
    }
}
