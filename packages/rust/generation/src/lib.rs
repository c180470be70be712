//! Generation collaborator clients.
//!
//! The pipelines depend on an external text-generation service exclusively
//! through the [`Generator`] trait: a fully-formed prompt plus a
//! generation-method tag go in, a structured JSON result comes out — or the
//! call fails and the failure propagates uncaught. No retry, no fallback.
//!
//! Three backends:
//! - [`BridgeGenerator`] — JSON-lines stdin/stdout subprocess
//! - [`HttpGenerator`] — OpenRouter-style chat-completions endpoint
//! - [`PlaceholderGenerator`] — offline, schema-valid canned payloads

mod bridge;
mod http;
mod placeholder;
mod protocol;

pub use bridge::BridgeGenerator;
pub use http::HttpGenerator;
pub use placeholder::PlaceholderGenerator;
pub use protocol::{Generated, GenerationRequest, Generator};
