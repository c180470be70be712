//! In-memory knowledge graph for content planning.
//!
//! [`KnowledgeGraph`] indexes registered topics by keyword, tracks concepts
//! with evidence scores and relationships, and answers two queries: related
//! topics for internal linking, and knowledge gaps (weak evidence or
//! isolated concepts).
//!
//! **Access rules:**
//! - The graph is an explicitly constructed instance, passed to each
//!   pipeline run — there is no global registry.
//! - Cross-run sharing goes through [`SharedKnowledgeGraph`]: exactly one
//!   writer at a time, readers concurrent with no writer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use copyforge_shared::{CopyforgeError, Result};

/// Evidence score below which a concept counts as a knowledge gap.
const EVIDENCE_GAP_THRESHOLD: f64 = 0.7;

/// Maximum number of related topics returned by [`KnowledgeGraph::related`].
const MAX_RELATED: usize = 5;

// ---------------------------------------------------------------------------
// Entry types
// ---------------------------------------------------------------------------

/// A registered topic and its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicEntry {
    /// Keywords the topic covers, as registered (last write wins).
    pub keywords: Vec<String>,
    /// Free-form performance metadata (status, score, ...).
    pub performance: serde_json::Value,
    /// When the topic was first registered.
    pub registered_at: DateTime<Utc>,
}

/// A concept with evidence strength and relationship bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    /// Short definition or description.
    pub definition: String,
    /// Evidence strength in `[0, 1]`.
    pub evidence: f64,
    /// Names of directly related concepts.
    pub related: IndexSet<String>,
    /// Keyword tags attached to the concept.
    pub tags: IndexSet<String>,
}

/// A directed relationship between two concepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    /// Relationship kind: "causes", "correlates", "contradicts", ...
    pub kind: String,
}

/// One related-topic hit from [`KnowledgeGraph::related`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedTopic {
    /// The other topic.
    pub topic: String,
    /// Keywords shared with the queried topic, in the queried topic's order.
    pub overlap: Vec<String>,
    /// `|overlap| / |queried topic's keywords|`.
    pub relevance: f64,
}

// ---------------------------------------------------------------------------
// KnowledgeGraph
// ---------------------------------------------------------------------------

/// In-memory registry of topics, keywords, and concept relationships.
#[derive(Debug, Default)]
pub struct KnowledgeGraph {
    /// Topics in registration order. Re-registration overwrites the entry
    /// but keeps its original position.
    topics: IndexMap<String, TopicEntry>,
    /// Inverted index keyword → topics. Appends are NOT deduplicated:
    /// re-registering a topic under the same keyword duplicates the entry.
    keyword_index: IndexMap<String, Vec<String>>,
    /// Concepts in insertion order.
    concepts: IndexMap<String, Concept>,
    /// Flat relationship log.
    relationships: Vec<Relationship>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) a topic and append it to each keyword's
    /// inverted-index entry.
    pub fn register(
        &mut self,
        topic: impl Into<String>,
        keywords: Vec<String>,
        performance: serde_json::Value,
    ) {
        let topic = topic.into();

        for keyword in &keywords {
            self.keyword_index
                .entry(keyword.clone())
                .or_default()
                .push(topic.clone());
        }

        tracing::debug!(%topic, keywords = keywords.len(), "registering topic");
        self.topics.insert(
            topic,
            TopicEntry {
                keywords,
                performance,
                registered_at: Utc::now(),
            },
        );
    }

    /// Top related topics for `topic` by keyword overlap.
    ///
    /// Returns at most five entries, relevance descending, ties broken by
    /// registration order. Empty when the topic is unknown or nothing
    /// overlaps. The queried topic itself is never included.
    pub fn related(&self, topic: &str) -> Vec<RelatedTopic> {
        let Some(entry) = self.topics.get(topic) else {
            return Vec::new();
        };

        // Unique keywords, preserving the registered order.
        let own: IndexSet<&str> = entry.keywords.iter().map(String::as_str).collect();
        if own.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<RelatedTopic> = self
            .topics
            .iter()
            .filter(|(name, _)| name.as_str() != topic)
            .filter_map(|(name, other)| {
                let other_set: IndexSet<&str> =
                    other.keywords.iter().map(String::as_str).collect();
                let overlap: Vec<String> = own
                    .iter()
                    .filter(|k| other_set.contains(**k))
                    .map(|k| (*k).to_string())
                    .collect();
                if overlap.is_empty() {
                    return None;
                }
                Some(RelatedTopic {
                    topic: name.clone(),
                    relevance: overlap.len() as f64 / own.len() as f64,
                    overlap,
                })
            })
            .collect();

        // Stable sort keeps registration order within equal relevance.
        hits.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(MAX_RELATED);
        hits
    }

    /// Add (or overwrite) a concept.
    ///
    /// Rejects evidence scores outside `[0, 1]`.
    pub fn add_concept(
        &mut self,
        name: impl Into<String>,
        definition: impl Into<String>,
        evidence: f64,
        tags: Vec<String>,
    ) -> Result<()> {
        if !(0.0..=1.0).contains(&evidence) {
            return Err(CopyforgeError::graph(format!(
                "evidence strength {evidence} is outside [0, 1]"
            )));
        }

        let name = name.into();
        // Preserve relationships accumulated by an earlier insertion.
        let related = self
            .concepts
            .get(&name)
            .map(|c| c.related.clone())
            .unwrap_or_default();

        self.concepts.insert(
            name,
            Concept {
                definition: definition.into(),
                evidence,
                related,
                tags: tags.into_iter().collect(),
            },
        );
        Ok(())
    }

    /// Record a relationship between two concepts and connect both
    /// endpoints' `related` sets (where the endpoint concepts exist).
    pub fn add_relationship(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        kind: impl Into<String>,
    ) {
        let (from, to) = (from.into(), to.into());

        if let Some(c) = self.concepts.get_mut(&from) {
            c.related.insert(to.clone());
        }
        if let Some(c) = self.concepts.get_mut(&to) {
            c.related.insert(from.clone());
        }

        self.relationships.push(Relationship {
            from,
            to,
            kind: kind.into(),
        });
    }

    /// Lazy sequence of human-readable gap descriptions: one per concept
    /// with evidence below the threshold, then one per concept with no
    /// relationships — each group in concept-insertion order.
    pub fn find_gaps(&self) -> impl Iterator<Item = String> + '_ {
        let weak = self
            .concepts
            .iter()
            .filter(|(_, c)| c.evidence < EVIDENCE_GAP_THRESHOLD)
            .map(|(name, c)| {
                format!("weak evidence for concept '{name}' (score {:.2})", c.evidence)
            });

        let isolated = self
            .concepts
            .iter()
            .filter(|(_, c)| c.related.is_empty())
            .map(|(name, _)| format!("isolated concept '{name}' has no relationships"));

        weak.chain(isolated)
    }

    /// Look up a registered topic.
    pub fn topic(&self, name: &str) -> Option<&TopicEntry> {
        self.topics.get(name)
    }

    /// Topics registered under `keyword`, duplicates included.
    pub fn topics_for_keyword(&self, keyword: &str) -> &[String] {
        self.keyword_index
            .get(keyword)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of registered topics.
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Number of registered concepts.
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// All recorded relationships.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }
}

// ---------------------------------------------------------------------------
// SharedKnowledgeGraph
// ---------------------------------------------------------------------------

/// A knowledge graph shared across pipeline runs.
///
/// All mutation goes through the write lock, so concurrent runs observe
/// exactly one writer at a time; reads run concurrently.
#[derive(Debug, Clone, Default)]
pub struct SharedKnowledgeGraph {
    inner: Arc<RwLock<KnowledgeGraph>>,
}

impl SharedKnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing graph for sharing.
    pub fn from_graph(graph: KnowledgeGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    pub async fn register(
        &self,
        topic: impl Into<String>,
        keywords: Vec<String>,
        performance: serde_json::Value,
    ) {
        self.inner.write().await.register(topic, keywords, performance);
    }

    pub async fn related(&self, topic: &str) -> Vec<RelatedTopic> {
        self.inner.read().await.related(topic)
    }

    pub async fn add_concept(
        &self,
        name: impl Into<String>,
        definition: impl Into<String>,
        evidence: f64,
        tags: Vec<String>,
    ) -> Result<()> {
        self.inner
            .write()
            .await
            .add_concept(name, definition, evidence, tags)
    }

    pub async fn add_relationship(
        &self,
        from: impl Into<String>,
        to: impl Into<String>,
        kind: impl Into<String>,
    ) {
        self.inner.write().await.add_relationship(from, to, kind);
    }

    /// Collected gap descriptions (the lazy iterator cannot outlive the
    /// read guard, so the shared view materializes it).
    pub async fn find_gaps(&self) -> Vec<String> {
        self.inner.read().await.find_gaps().collect()
    }

    pub async fn topic_count(&self) -> usize {
        self.inner.read().await.topic_count()
    }

    pub async fn contains_topic(&self, name: &str) -> bool {
        self.inner.read().await.topic(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kw(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn related_overlap_scenario() {
        let mut graph = KnowledgeGraph::new();
        graph.register("A", kw(&["x", "y"]), json!({}));
        graph.register("B", kw(&["y", "z"]), json!({}));

        let related = graph.related("A");
        assert_eq!(
            related,
            vec![RelatedTopic {
                topic: "B".into(),
                overlap: vec!["y".into()],
                relevance: 0.5,
            }]
        );
    }

    #[test]
    fn related_never_includes_self_and_caps_at_five() {
        let mut graph = KnowledgeGraph::new();
        graph.register("hub", kw(&["shared"]), json!({}));
        for i in 0..8 {
            graph.register(format!("spoke-{i}"), kw(&["shared"]), json!({}));
        }

        let related = graph.related("hub");
        assert_eq!(related.len(), 5);
        assert!(related.iter().all(|r| r.topic != "hub"));
        // Equal relevance everywhere: stable sort keeps registration order.
        let names: Vec<&str> = related.iter().map(|r| r.topic.as_str()).collect();
        assert_eq!(names, ["spoke-0", "spoke-1", "spoke-2", "spoke-3", "spoke-4"]);
    }

    #[test]
    fn related_unknown_topic_is_empty() {
        let graph = KnowledgeGraph::new();
        assert!(graph.related("nope").is_empty());
    }

    #[test]
    fn related_sorts_by_relevance_descending() {
        let mut graph = KnowledgeGraph::new();
        graph.register("query", kw(&["a", "b", "c", "d"]), json!({}));
        graph.register("weak", kw(&["a"]), json!({}));
        graph.register("strong", kw(&["a", "b", "c"]), json!({}));

        let related = graph.related("query");
        assert_eq!(related[0].topic, "strong");
        assert_eq!(related[0].relevance, 0.75);
        assert_eq!(related[1].topic, "weak");
        assert_eq!(related[1].relevance, 0.25);
    }

    #[test]
    fn reregistration_overwrites_keywords_but_index_accumulates() {
        let mut graph = KnowledgeGraph::new();
        graph.register("topic", kw(&["x", "y"]), json!({}));
        graph.register("topic", kw(&["x"]), json!({"score": 1}));

        // Last write wins on the entry itself.
        let entry = graph.topic("topic").expect("topic registered");
        assert_eq!(entry.keywords, vec!["x"]);
        assert_eq!(entry.performance, json!({"score": 1}));

        // The inverted index keeps both registrations under "x".
        assert_eq!(graph.topics_for_keyword("x"), ["topic", "topic"]);
        assert_eq!(graph.topics_for_keyword("y"), ["topic"]);
        assert_eq!(graph.topic_count(), 1);
    }

    #[test]
    fn add_concept_validates_evidence_range() {
        let mut graph = KnowledgeGraph::new();
        assert!(graph.add_concept("ok", "fine", 0.5, vec![]).is_ok());
        assert!(graph.add_concept("low", "bad", -0.1, vec![]).is_err());
        assert!(graph.add_concept("high", "bad", 1.1, vec![]).is_err());
        assert!(graph.add_concept("nan", "bad", f64::NAN, vec![]).is_err());
    }

    #[test]
    fn find_gaps_orders_evidence_before_isolation() {
        let mut graph = KnowledgeGraph::new();
        graph.add_concept("alpha", "weak and isolated", 0.4, vec![]).unwrap();
        graph.add_concept("beta", "strong but isolated", 0.9, vec![]).unwrap();
        graph.add_concept("gamma", "weak but connected", 0.6, vec![]).unwrap();
        graph.add_relationship("gamma", "beta", "supports");

        let gaps: Vec<String> = graph.find_gaps().collect();
        assert_eq!(gaps.len(), 3);
        // Evidence gaps first, in insertion order.
        assert!(gaps[0].contains("alpha") && gaps[0].contains("weak evidence"));
        assert!(gaps[1].contains("gamma") && gaps[1].contains("weak evidence"));
        // Then isolation gaps.
        assert!(gaps[2].contains("alpha") && gaps[2].contains("isolated"));
    }

    #[test]
    fn find_gaps_is_idempotent() {
        let mut graph = KnowledgeGraph::new();
        graph.add_concept("a", "d", 0.2, vec![]).unwrap();
        graph.add_concept("b", "d", 0.9, vec![]).unwrap();

        let first: Vec<String> = graph.find_gaps().collect();
        let second: Vec<String> = graph.find_gaps().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn relationships_connect_both_endpoints() {
        let mut graph = KnowledgeGraph::new();
        graph.add_concept("cause", "d", 0.8, vec![]).unwrap();
        graph.add_concept("effect", "d", 0.8, vec![]).unwrap();
        graph.add_relationship("cause", "effect", "causes");

        let gaps: Vec<String> = graph.find_gaps().collect();
        assert!(gaps.is_empty(), "connected concepts are not isolated: {gaps:?}");
        assert_eq!(graph.relationships().len(), 1);
        assert_eq!(graph.relationships()[0].kind, "causes");
    }

    #[test]
    fn reregistering_concept_keeps_relationships() {
        let mut graph = KnowledgeGraph::new();
        graph.add_concept("a", "first", 0.5, vec![]).unwrap();
        graph.add_concept("b", "other", 0.5, vec![]).unwrap();
        graph.add_relationship("a", "b", "relates");
        graph.add_concept("a", "updated", 0.9, vec!["t".into()]).unwrap();

        let gaps: Vec<String> = graph.find_gaps().collect();
        assert!(gaps.iter().all(|g| !g.contains("isolated concept 'a'")));
    }

    #[tokio::test]
    async fn concurrent_registrations_do_not_lose_updates() {
        let graph = SharedKnowledgeGraph::new();

        let mut handles = Vec::new();
        for i in 0..16 {
            let g = graph.clone();
            handles.push(tokio::spawn(async move {
                g.register(format!("topic-{i}"), vec![format!("kw-{i}")], json!({}))
                    .await;
            }));
        }
        for handle in handles {
            handle.await.expect("task completes");
        }

        assert_eq!(graph.topic_count().await, 16);
        for i in 0..16 {
            assert!(graph.contains_topic(&format!("topic-{i}")).await);
        }
    }
}
