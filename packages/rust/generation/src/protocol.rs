//! Generator trait and request/result types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use copyforge_shared::Result;

/// A single generation call: a prompt plus the method tag identifying what
/// kind of output is expected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Generation-method tag (snake_case, one per agent role).
    pub method: String,
    /// Fully-formed natural-language prompt.
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(method: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            prompt: prompt.into(),
        }
    }
}

/// A generation result with usage metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generated {
    /// The structured (JSON-shaped) payload produced by the collaborator.
    pub data: serde_json::Value,
    pub tokens_in: u64,
    pub tokens_out: u64,
    pub model: String,
    pub latency_ms: u64,
}

/// The external generation collaborator.
///
/// Implementations must treat failures as terminal: the contract is to
/// surface errors to the caller unmodified, never to retry or substitute
/// defaults.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<Generated>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes() {
        let req = GenerationRequest::new("seo_research", "You are an expert...");
        let json = serde_json::to_string(&req).expect("serialize");
        assert!(json.contains(r#""method":"seo_research"#));
    }

    #[test]
    fn generated_roundtrip() {
        let json = r#"{"data":{"score":9.1},"tokens_in":120,"tokens_out":60,"model":"test","latency_ms":250}"#;
        let parsed: Generated = serde_json::from_str(json).expect("deserialize");
        assert_eq!(parsed.tokens_in, 120);
        assert_eq!(parsed.data["score"], 9.1);
    }
}
