//! Shared types, error model, and configuration for copyforge.
//!
//! This crate is the foundation depended on by all other copyforge crates.
//! It provides:
//! - [`CopyforgeError`] — the unified error type
//! - Brief types ([`Brief`], [`KnowledgeBrief`], [`RunId`])
//! - Configuration ([`AppConfig`], config loading)

pub mod brief;
pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use brief::{
    Brief, BriefBuilder, BusinessGoal, ContentType, DepthLevel, KnowledgeBrief,
    KnowledgeBriefBuilder, RunId, Scope, Tone, Urgency, slugify,
};
pub use config::{
    AppConfig, BridgeConfig, DefaultsConfig, LlmConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from, validate_api_key,
};
pub use error::{CopyforgeError, Result};
