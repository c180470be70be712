//! Phase declarations and the ready-set scheduler.
//!
//! Each pipeline declares its phases as a table of [`PhaseSpec`]s: a name
//! plus the upstream phases it depends on. The scheduler repeatedly takes
//! every phase whose dependencies are complete and runs that set
//! concurrently; results accumulate keyed by phase name, so completion
//! order never affects the aggregate. A failed phase aborts the whole run,
//! wrapped so the error names the phase.

use futures::future::join_all;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use copyforge_shared::{CopyforgeError, Result};

/// One declared pipeline phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseSpec {
    pub name: &'static str,
    /// Phases whose results this phase receives as context.
    pub deps: &'static [&'static str],
}

/// Content pipeline: a pure chain from research to audit.
pub const CONTENT_PHASES: [PhaseSpec; 9] = [
    PhaseSpec { name: "research", deps: &[] },
    PhaseSpec { name: "headlines", deps: &["research"] },
    PhaseSpec { name: "structure", deps: &["research", "headlines"] },
    PhaseSpec { name: "evidence", deps: &["structure"] },
    PhaseSpec { name: "draft", deps: &["headlines", "structure", "evidence"] },
    PhaseSpec { name: "seo", deps: &["draft"] },
    PhaseSpec { name: "readability", deps: &["seo"] },
    PhaseSpec { name: "cta", deps: &["readability"] },
    PhaseSpec { name: "audit", deps: &["cta"] },
];

/// Knowledge pipeline: three independent research roots fanning into
/// mapping, explanation, verification, and synthesis.
pub const KNOWLEDGE_PHASES: [PhaseSpec; 15] = [
    PhaseSpec { name: "primary_research", deps: &[] },
    PhaseSpec { name: "academic_research", deps: &[] },
    PhaseSpec { name: "data_analysis", deps: &[] },
    PhaseSpec { name: "industry_trends", deps: &["primary_research"] },
    PhaseSpec { name: "historical_context", deps: &["data_analysis"] },
    PhaseSpec { name: "contrarian_views", deps: &["academic_research"] },
    PhaseSpec { name: "concept_map", deps: &["primary_research", "academic_research"] },
    PhaseSpec { name: "frameworks", deps: &["concept_map"] },
    PhaseSpec { name: "explanations", deps: &["concept_map"] },
    PhaseSpec { name: "analogies", deps: &["concept_map"] },
    PhaseSpec { name: "examples", deps: &["explanations"] },
    PhaseSpec { name: "visuals", deps: &["data_analysis", "concept_map"] },
    PhaseSpec { name: "verification", deps: &["primary_research", "academic_research"] },
    PhaseSpec { name: "anticipated_questions", deps: &["explanations"] },
    PhaseSpec {
        name: "synthesis",
        deps: &["primary_research", "academic_research", "data_analysis", "concept_map"],
    },
];

/// Executes one phase given the results accumulated so far.
#[async_trait::async_trait]
pub trait PhaseRunner: Sync {
    async fn run_phase(
        &self,
        phase: &'static str,
        completed: &IndexMap<String, Value>,
    ) -> Result<Value>;
}

/// Progress callback for pipeline runs.
pub trait PipelineProgress: Send + Sync {
    /// Called when a phase becomes ready and starts.
    fn phase(&self, name: &str);
    /// Called when a phase completes, with completed/total counts.
    fn phase_done(&self, name: &str, completed: usize, total: usize);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl PipelineProgress for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn phase_done(&self, _name: &str, _completed: usize, _total: usize) {}
}

/// Run every declared phase, honoring dependencies.
///
/// Returns results keyed by phase name in declaration order. The first
/// failing phase (in declaration order within its set) aborts the run.
pub async fn execute_phases<R: PhaseRunner>(
    runner: &R,
    specs: &[PhaseSpec],
    progress: &dyn PipelineProgress,
) -> Result<IndexMap<String, Value>> {
    let mut results: IndexMap<String, Value> = IndexMap::with_capacity(specs.len());

    while results.len() < specs.len() {
        let ready: Vec<&PhaseSpec> = specs
            .iter()
            .filter(|spec| {
                !results.contains_key(spec.name)
                    && spec.deps.iter().all(|dep| results.contains_key(*dep))
            })
            .collect();

        if ready.is_empty() {
            return Err(CopyforgeError::schema(
                "phase dependency cycle: no phase is ready to run",
            ));
        }

        for spec in &ready {
            progress.phase(spec.name);
        }
        debug!(
            ready = ?ready.iter().map(|s| s.name).collect::<Vec<_>>(),
            "running phase set"
        );

        let outcomes = join_all(ready.iter().map(|spec| {
            let name = spec.name;
            let completed = &results;
            async move { (name, runner.run_phase(name, completed).await) }
        }))
        .await;

        for (name, outcome) in outcomes {
            let value = outcome.map_err(|e| CopyforgeError::phase(name, e))?;
            results.insert(name.to_string(), value);
            progress.phase_done(name, results.len(), specs.len());
        }
    }

    // Re-key in declaration order so the aggregate is deterministic.
    let mut ordered = IndexMap::with_capacity(specs.len());
    for spec in specs {
        if let Some(value) = results.shift_remove(spec.name) {
            ordered.insert(spec.name.to_string(), value);
        }
    }
    Ok(ordered)
}

/// The declared dependency list for `phase` within `specs`.
pub fn deps_of(specs: &[PhaseSpec], phase: &str) -> &'static [&'static str] {
    specs
        .iter()
        .find(|spec| spec.name == phase)
        .map(|spec| spec.deps)
        .unwrap_or(&[])
}

/// Build the read-only context object for a phase: its declared upstream
/// results keyed by phase name.
pub fn context_for(
    specs: &[PhaseSpec],
    phase: &str,
    completed: &IndexMap<String, Value>,
) -> Value {
    let mut context = serde_json::Map::new();
    for dep in deps_of(specs, phase) {
        if let Some(value) = completed.get(*dep) {
            context.insert((*dep).to_string(), value.clone());
        }
    }
    Value::Object(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Runner that records execution rounds and echoes the phase name.
    struct EchoRunner {
        calls: Mutex<Vec<&'static str>>,
        fail_on: Option<&'static str>,
    }

    impl EchoRunner {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(phase: &'static str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: Some(phase),
            }
        }
    }

    #[async_trait::async_trait]
    impl PhaseRunner for EchoRunner {
        async fn run_phase(
            &self,
            phase: &'static str,
            _completed: &IndexMap<String, Value>,
        ) -> Result<Value> {
            self.calls.lock().unwrap().push(phase);
            if self.fail_on == Some(phase) {
                return Err(CopyforgeError::Generation("boom".into()));
            }
            Ok(json!({ "phase": phase }))
        }
    }

    #[tokio::test]
    async fn content_phases_run_in_chain_order() {
        let runner = EchoRunner::new();
        let results = execute_phases(&runner, &CONTENT_PHASES, &SilentProgress)
            .await
            .expect("run");

        let keys: Vec<&str> = results.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["research", "headlines", "structure", "evidence", "draft", "seo", "readability", "cta", "audit"]
        );
        // The content chain has no independent siblings, so execution order
        // equals declaration order.
        assert_eq!(*runner.calls.lock().unwrap(), keys);
    }

    #[tokio::test]
    async fn knowledge_roots_run_in_the_first_set() {
        let runner = EchoRunner::new();
        let results = execute_phases(&runner, &KNOWLEDGE_PHASES, &SilentProgress)
            .await
            .expect("run");

        assert_eq!(results.len(), 15);
        let calls = runner.calls.lock().unwrap();
        let first_three: std::collections::HashSet<&str> = calls[..3].iter().copied().collect();
        assert_eq!(
            first_three,
            ["primary_research", "academic_research", "data_analysis"].into_iter().collect()
        );
        // Declaration order in the aggregate regardless of completion order.
        let keys: Vec<&str> = results.keys().map(String::as_str).collect();
        assert_eq!(keys[0], "primary_research");
        assert_eq!(keys[14], "synthesis");
    }

    #[tokio::test]
    async fn dependencies_complete_before_dependents_start() {
        let runner = EchoRunner::new();
        execute_phases(&runner, &KNOWLEDGE_PHASES, &SilentProgress)
            .await
            .expect("run");

        let calls = runner.calls.lock().unwrap();
        let pos = |name: &str| calls.iter().position(|c| *c == name).unwrap();
        for spec in &KNOWLEDGE_PHASES {
            for dep in spec.deps {
                assert!(
                    pos(dep) < pos(spec.name),
                    "{} ran before its dependency {}",
                    spec.name,
                    dep
                );
            }
        }
    }

    #[tokio::test]
    async fn failure_aborts_and_names_the_phase() {
        let runner = EchoRunner::failing_on("structure");
        let err = execute_phases(&runner, &CONTENT_PHASES, &SilentProgress)
            .await
            .unwrap_err();

        assert_eq!(err.failed_phase(), Some("structure"));
        assert!(err.to_string().contains("phase 'structure' failed"));
        // Nothing after the failed phase ran.
        let calls = runner.calls.lock().unwrap();
        assert_eq!(*calls, ["research", "headlines", "structure"]);
    }

    #[tokio::test]
    async fn cycle_detection() {
        const BROKEN: [PhaseSpec; 2] = [
            PhaseSpec { name: "a", deps: &["b"] },
            PhaseSpec { name: "b", deps: &["a"] },
        ];
        let runner = EchoRunner::new();
        let err = execute_phases(&runner, &BROKEN, &SilentProgress)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn context_contains_only_declared_deps() {
        let mut completed = IndexMap::new();
        completed.insert("research".to_string(), json!({ "r": 1 }));
        completed.insert("headlines".to_string(), json!({ "h": 2 }));
        completed.insert("unrelated".to_string(), json!({ "u": 3 }));

        let context = context_for(&CONTENT_PHASES, "structure", &completed);
        let object = context.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("research"));
        assert!(object.contains_key("headlines"));
        assert!(!object.contains_key("unrelated"));
    }
}
