//! Error types for copyforge.
//!
//! Library crates use [`CopyforgeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all copyforge operations.
#[derive(Debug, thiserror::Error)]
pub enum CopyforgeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Malformed brief — rejected at construction time.
    #[error("brief error: {message}")]
    Brief { message: String },

    /// Generation collaborator failure (bridge, API, or transport).
    #[error("generation error: {0}")]
    Generation(String),

    /// A phase result did not match its declared schema.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Knowledge graph invariant violation.
    #[error("graph error: {message}")]
    Graph { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A pipeline phase failed. Wraps the underlying error so callers can
    /// tell which phase aborted the run.
    #[error("phase '{phase}' failed: {source}")]
    Phase {
        phase: String,
        #[source]
        source: Box<CopyforgeError>,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CopyforgeError>;

impl CopyforgeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a brief-validation error from any displayable message.
    pub fn brief(msg: impl Into<String>) -> Self {
        Self::Brief {
            message: msg.into(),
        }
    }

    /// Create a schema error from any displayable message.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema {
            message: msg.into(),
        }
    }

    /// Create a graph error from any displayable message.
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap an error with the name of the phase it aborted.
    pub fn phase(phase: impl Into<String>, source: CopyforgeError) -> Self {
        Self::Phase {
            phase: phase.into(),
            source: Box::new(source),
        }
    }

    /// The name of the failed phase, if this is a phase-wrapped error.
    pub fn failed_phase(&self) -> Option<&str> {
        match self {
            Self::Phase { phase, .. } => Some(phase),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = CopyforgeError::config("missing API key");
        assert_eq!(err.to_string(), "config error: missing API key");

        let err = CopyforgeError::brief("topic must not be empty");
        assert!(err.to_string().contains("topic must not be empty"));
    }

    #[test]
    fn phase_wrapping_names_the_phase() {
        let inner = CopyforgeError::Generation("collaborator timed out".into());
        let err = CopyforgeError::phase("structure", inner);

        assert_eq!(err.failed_phase(), Some("structure"));
        let msg = err.to_string();
        assert!(msg.contains("phase 'structure' failed"));
        assert!(msg.contains("collaborator timed out"));
    }

    #[test]
    fn non_phase_errors_have_no_phase() {
        let err = CopyforgeError::schema("missing field `headlines`");
        assert_eq!(err.failed_phase(), None);
    }
}
