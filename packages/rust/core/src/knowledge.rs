//! The knowledge pipeline orchestrator.
//!
//! [`KnowledgeArchitect`] runs fifteen research and synthesis phases with
//! real fan-out: the three research roots run concurrently, downstream
//! phases start as soon as their declared dependencies complete. Concepts
//! and relationships surfaced along the way are folded into the shared
//! knowledge graph, and the run closes with gap detection.

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, instrument};

use copyforge_agents::{KnowledgeRole, ResearchAgent, tasks};
use copyforge_generation::Generator;
use copyforge_graph::SharedKnowledgeGraph;
use copyforge_records::{FinalRecord, PipelineKind};
use copyforge_shared::{CopyforgeError, KnowledgeBrief, Result};

use crate::content::UsageTotals;
use crate::phases::{
    KNOWLEDGE_PHASES, PhaseRunner, PipelineProgress, context_for, execute_phases,
};
use crate::schemas::KnowledgePhaseOutput;

/// Maps a knowledge phase to the role that executes it.
fn phase_role(phase: &str) -> Result<KnowledgeRole> {
    Ok(match phase {
        "primary_research" => KnowledgeRole::PrimaryResearcher,
        "academic_research" => KnowledgeRole::AcademicResearcher,
        "data_analysis" => KnowledgeRole::DataScientist,
        "industry_trends" => KnowledgeRole::IndustryAnalyst,
        "historical_context" => KnowledgeRole::HistoricalAnalyst,
        "contrarian_views" => KnowledgeRole::ContrarianResearcher,
        "concept_map" => KnowledgeRole::ConceptMapper,
        "frameworks" => KnowledgeRole::FrameworkBuilder,
        "explanations" => KnowledgeRole::ComplexityTranslator,
        "analogies" => KnowledgeRole::AnalogyMaster,
        "examples" => KnowledgeRole::ExampleGenerator,
        "visuals" => KnowledgeRole::VisualExplainer,
        "verification" => KnowledgeRole::FactVerifier,
        "anticipated_questions" => KnowledgeRole::QuestionAnticipator,
        "synthesis" => KnowledgeRole::SummaryMaster,
        other => {
            return Err(CopyforgeError::schema(format!(
                "no role declared for knowledge phase '{other}'"
            )));
        }
    })
}

/// Master orchestrator for knowledge-first content.
pub struct KnowledgeArchitect {
    generator: Arc<dyn Generator>,
    graph: SharedKnowledgeGraph,
}

impl KnowledgeArchitect {
    pub fn new(generator: Arc<dyn Generator>, graph: SharedKnowledgeGraph) -> Self {
        Self { generator, graph }
    }

    /// The shared graph this architect folds concepts into.
    pub fn graph(&self) -> &SharedKnowledgeGraph {
        &self.graph
    }

    /// Run the full knowledge pipeline for one brief.
    #[instrument(skip_all, fields(topic = %brief.topic, depth = %brief.depth_level))]
    pub async fn create_knowledge_content(
        &self,
        brief: &KnowledgeBrief,
        progress: &dyn PipelineProgress,
    ) -> Result<FinalRecord> {
        info!(scope = %brief.scope, "creating knowledge content");

        let run = KnowledgeRun {
            architect: self,
            brief,
            usage: Mutex::new(UsageTotals::default()),
        };
        let phases = execute_phases(&run, &KNOWLEDGE_PHASES, progress).await?;

        let knowledge_gaps = self.graph.find_gaps().await;
        debug!(gaps = knowledge_gaps.len(), "gap detection complete");

        let usage = run.usage.into_inner().unwrap_or_default();
        let agents_used = KNOWLEDGE_PHASES
            .iter()
            .filter_map(|spec| phase_role(spec.name).ok())
            .map(|role| role.title().to_string())
            .collect();

        let brief_value = serde_json::to_value(brief)
            .map_err(|e| CopyforgeError::schema(format!("brief not serializable: {e}")))?;

        let record = FinalRecord::new(
            PipelineKind::Knowledge,
            brief_value,
            phases,
            agents_used,
            usage.tokens_in,
            usage.tokens_out,
            usage.model,
        )
        .with_knowledge_gaps(knowledge_gaps);

        info!(run_id = %record.run_id, gaps = record.knowledge_gaps.len(), "knowledge content complete");
        Ok(record)
    }
}

/// One in-flight knowledge run.
struct KnowledgeRun<'a> {
    architect: &'a KnowledgeArchitect,
    brief: &'a KnowledgeBrief,
    usage: Mutex<UsageTotals>,
}

#[async_trait::async_trait]
impl PhaseRunner for KnowledgeRun<'_> {
    async fn run_phase(
        &self,
        phase: &'static str,
        completed: &IndexMap<String, Value>,
    ) -> Result<Value> {
        let role = phase_role(phase)?;
        let agent = ResearchAgent::new(role);
        let task = tasks::knowledge_task(role, self.brief);
        let context = context_for(&KNOWLEDGE_PHASES, phase, completed);

        let generated = agent
            .generate(&task, self.brief, &context, self.architect.generator.as_ref())
            .await?;

        if let Ok(mut usage) = self.usage.lock() {
            usage.add(&generated);
        }

        let output = KnowledgePhaseOutput::parse(phase, generated.data)?;

        // Fold findings into the shared graph as phases complete. Evidence
        // outside [0, 1] is rejected here and fails the phase.
        for concept in output.concepts() {
            self.architect
                .graph
                .add_concept(
                    &concept.name,
                    &concept.definition,
                    concept.evidence_level,
                    concept.tags.clone(),
                )
                .await?;
        }
        for link in output.relationships() {
            self.architect
                .graph
                .add_relationship(&link.from, &link.to, &link.kind)
                .await;
        }

        output.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::SilentProgress;
    use async_trait::async_trait;
    use copyforge_generation::{Generated, GenerationRequest, PlaceholderGenerator};

    fn architect_with(generator: Arc<dyn Generator>) -> KnowledgeArchitect {
        KnowledgeArchitect::new(generator, SharedKnowledgeGraph::new())
    }

    fn sample_brief() -> KnowledgeBrief {
        KnowledgeBrief::builder("Retrieval-Augmented Generation")
            .knowledge_goals(["understand the retrieval tradeoffs"])
            .build()
            .expect("valid brief")
    }

    #[tokio::test]
    async fn completed_run_has_exactly_the_declared_phase_keys() {
        let architect = architect_with(Arc::new(PlaceholderGenerator::new()));
        let record = architect
            .create_knowledge_content(&sample_brief(), &SilentProgress)
            .await
            .expect("run completes");

        assert_eq!(record.pipeline, PipelineKind::Knowledge);
        let expected: Vec<&str> = KNOWLEDGE_PHASES.iter().map(|s| s.name).collect();
        assert_eq!(record.phase_names(), expected);
        assert_eq!(record.metadata.agents_used.len(), 15);
    }

    #[tokio::test]
    async fn concepts_are_folded_into_the_graph() {
        let architect = architect_with(Arc::new(PlaceholderGenerator::new()));
        let record = architect
            .create_knowledge_content(&sample_brief(), &SilentProgress)
            .await
            .expect("run completes");

        // Placeholder research phases each contribute concepts, and the
        // concept map links two of them.
        assert!(record.knowledge_gaps.iter().any(|g| g.contains("weak evidence")));
        assert!(
            !record
                .knowledge_gaps
                .iter()
                .any(|g| g.contains("isolated concept 'core-concept'")),
            "mapped concepts must not be isolated: {:?}",
            record.knowledge_gaps
        );
    }

    #[tokio::test]
    async fn out_of_range_evidence_fails_the_phase() {
        struct BadEvidence {
            inner: PlaceholderGenerator,
        }

        #[async_trait]
        impl Generator for BadEvidence {
            async fn generate(&self, request: GenerationRequest) -> Result<Generated> {
                if request.method == "primary_research" {
                    return Ok(Generated {
                        data: serde_json::json!({
                            "summary": "s",
                            "concepts": [{
                                "name": "bogus",
                                "definition": "d",
                                "evidence_level": 3.5
                            }]
                        }),
                        tokens_in: 0,
                        tokens_out: 0,
                        model: "bad".into(),
                        latency_ms: 0,
                    });
                }
                self.inner.generate(request).await
            }
        }

        let architect = architect_with(Arc::new(BadEvidence {
            inner: PlaceholderGenerator::new(),
        }));
        let err = architect
            .create_knowledge_content(&sample_brief(), &SilentProgress)
            .await
            .unwrap_err();

        assert_eq!(err.failed_phase(), Some("primary_research"));
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[tokio::test]
    async fn failing_collaborator_yields_no_record() {
        struct AlwaysFails;

        #[async_trait]
        impl Generator for AlwaysFails {
            async fn generate(&self, _request: GenerationRequest) -> Result<Generated> {
                Err(CopyforgeError::Generation("offline".into()))
            }
        }

        let architect = architect_with(Arc::new(AlwaysFails));
        let err = architect
            .create_knowledge_content(&sample_brief(), &SilentProgress)
            .await
            .unwrap_err();
        assert!(err.failed_phase().is_some());
    }
}
