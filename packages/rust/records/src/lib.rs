//! Final records and their persistence.
//!
//! A [`FinalRecord`] is the aggregate of one completed pipeline run: the
//! brief, every phase result keyed by phase name, and run metadata. It is
//! created once per run and never mutated after being returned; a failed run
//! produces no record and persists nothing.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use copyforge_graph::RelatedTopic;
use copyforge_shared::{CopyforgeError, Result, RunId};

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// Which pipeline produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineKind {
    Content,
    Knowledge,
}

impl PipelineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Knowledge => "knowledge",
        }
    }
}

impl std::fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run metadata attached to every record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// Titles of the agents that contributed, in phase order.
    pub agents_used: Vec<String>,
    /// Total collaborator token usage across the run.
    pub tokens_in: u64,
    pub tokens_out: u64,
    /// Model reported by the collaborator.
    pub model: String,
    /// SHA-256 of the serialized phase map.
    pub content_hash: String,
}

/// Aggregate of one completed pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalRecord {
    pub run_id: RunId,
    pub pipeline: PipelineKind,
    /// The brief, flattened to a plain mapping.
    pub brief: serde_json::Value,
    /// Phase results keyed by phase name, in declaration order.
    pub phases: IndexMap<String, serde_json::Value>,
    /// Gap descriptions from the knowledge graph (knowledge runs).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub knowledge_gaps: Vec<String>,
    /// Related-content links (series runs).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub internal_links: Vec<RelatedTopic>,
    pub metadata: RecordMetadata,
}

impl FinalRecord {
    /// Assemble a record from a completed run.
    pub fn new(
        pipeline: PipelineKind,
        brief: serde_json::Value,
        phases: IndexMap<String, serde_json::Value>,
        agents_used: Vec<String>,
        tokens_in: u64,
        tokens_out: u64,
        model: String,
    ) -> Self {
        let content_hash = phase_hash(&phases);
        Self {
            run_id: RunId::new(),
            pipeline,
            brief,
            phases,
            knowledge_gaps: Vec::new(),
            internal_links: Vec::new(),
            metadata: RecordMetadata {
                created_at: Utc::now(),
                agents_used,
                tokens_in,
                tokens_out,
                model,
                content_hash,
            },
        }
    }

    /// Attach knowledge gaps (consuming — records are never mutated in place).
    pub fn with_knowledge_gaps(mut self, gaps: Vec<String>) -> Self {
        self.knowledge_gaps = gaps;
        self
    }

    /// Attach internal links (consuming).
    pub fn with_internal_links(mut self, links: Vec<RelatedTopic>) -> Self {
        self.internal_links = links;
        self
    }

    /// Phase names in declaration order.
    pub fn phase_names(&self) -> Vec<&str> {
        self.phases.keys().map(String::as_str).collect()
    }
}

/// SHA-256 over the canonical JSON of the phase map.
fn phase_hash(phases: &IndexMap<String, serde_json::Value>) -> String {
    let serialized = serde_json::to_string(phases).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Serialize a record to `<dir>/<name>_<timestamp>.json`.
///
/// Returns the path written. The directory is created if missing.
pub fn save_record(record: &FinalRecord, name: &str, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| CopyforgeError::io(dir, e))?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{name}_{timestamp}.json"));

    let json = serde_json::to_string_pretty(record)
        .map_err(|e| CopyforgeError::schema(format!("record not serializable: {e}")))?;
    std::fs::write(&path, json).map_err(|e| CopyforgeError::io(&path, e))?;

    info!(
        run_id = %record.run_id,
        pipeline = %record.pipeline,
        path = %path.display(),
        "record saved"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> FinalRecord {
        let mut phases = IndexMap::new();
        phases.insert("research".to_string(), json!({ "questions": ["q"] }));
        phases.insert("draft".to_string(), json!({ "title": "t" }));
        FinalRecord::new(
            PipelineKind::Content,
            json!({ "topic": "Test" }),
            phases,
            vec!["SEO Research Specialist".into(), "Content Writer".into()],
            100,
            50,
            "test-model".into(),
        )
    }

    #[test]
    fn phase_names_preserve_declaration_order() {
        let record = sample_record();
        assert_eq!(record.phase_names(), ["research", "draft"]);
    }

    #[test]
    fn content_hash_tracks_phase_payloads() {
        let a = sample_record();
        let b = sample_record();
        assert_eq!(a.metadata.content_hash, b.metadata.content_hash);

        let mut phases = a.phases.clone();
        phases.insert("draft".to_string(), json!({ "title": "different" }));
        assert_ne!(phase_hash(&phases), a.metadata.content_hash);
    }

    #[test]
    fn record_serde_roundtrip() {
        let record = sample_record().with_knowledge_gaps(vec!["gap one".into()]);
        let json = serde_json::to_string_pretty(&record).expect("serialize");
        let parsed: FinalRecord = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(parsed.run_id, record.run_id);
        assert_eq!(parsed.phase_names(), ["research", "draft"]);
        assert_eq!(parsed.knowledge_gaps, vec!["gap one".to_string()]);
        assert!(parsed.internal_links.is_empty());
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let record = sample_record();
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(!json.contains("knowledge_gaps"));
        assert!(!json.contains("internal_links"));
    }

    #[test]
    fn save_record_writes_timestamped_file() {
        let dir = std::env::temp_dir().join(format!("copyforge-records-{}", uuid::Uuid::now_v7()));
        let record = sample_record();

        let path = save_record(&record, "custom_post", &dir).expect("save");
        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.starts_with("custom_post_"));
        assert!(file_name.ends_with(".json"));

        let content = std::fs::read_to_string(&path).expect("read back");
        let parsed: FinalRecord = serde_json::from_str(&content).expect("valid JSON record");
        assert_eq!(parsed.run_id, record.run_id);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn record_fixture_validates() {
        let fixture = std::fs::read_to_string("../../../fixtures/json/record.fixture.json")
            .expect("read fixture");
        let parsed: FinalRecord =
            serde_json::from_str(&fixture).expect("deserialize fixture record");
        assert_eq!(parsed.pipeline, PipelineKind::Content);
        assert_eq!(parsed.phase_names(), ["research", "draft", "audit"]);
        assert_eq!(parsed.metadata.agents_used.len(), 3);
    }
}
