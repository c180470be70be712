//! Core pipeline orchestration for copyforge.
//!
//! This crate ties briefs, agents, the knowledge graph, and the generation
//! collaborator into end-to-end runs: the content pipeline
//! ([`EditorInChief`]), the knowledge pipeline ([`KnowledgeArchitect`]), and
//! the series/calendar workflows built on top of them.

pub mod calendar;
pub mod content;
pub mod knowledge;
pub mod phases;
pub mod schemas;

pub use content::EditorInChief;
pub use knowledge::KnowledgeArchitect;
pub use phases::{PipelineProgress, SilentProgress};
