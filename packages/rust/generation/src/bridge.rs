//! Subprocess bridge generator.
//!
//! Spawns an external runtime (e.g. a TypeScript provider script) and talks
//! a JSON-lines request/response protocol over stdin/stdout. The subprocess
//! owns the actual LLM credentials and client; this side only ships prompts
//! and parses envelopes.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};

use copyforge_shared::{BridgeConfig, CopyforgeError, Result};

use crate::protocol::{Generated, GenerationRequest, Generator};

// ---------------------------------------------------------------------------
// Wire protocol
// ---------------------------------------------------------------------------

/// Request message sent to the bridge.
#[derive(Debug, serde::Serialize)]
#[serde(tag = "type")]
enum RequestMessage {
    #[serde(rename = "generate")]
    Generate {
        id: String,
        method: String,
        prompt: String,
    },
    #[serde(rename = "shutdown")]
    Shutdown,
}

/// Response message received from the bridge.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type")]
enum ResponseMessage {
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "result")]
    Result { id: String, result: BridgePayload },
    #[serde(rename = "error")]
    Error {
        #[allow(dead_code)]
        id: String,
        error: String,
    },
}

/// Result body on the wire.
#[derive(Debug, serde::Deserialize)]
struct BridgePayload {
    data: serde_json::Value,
    #[serde(default)]
    tokens_in: u64,
    #[serde(default)]
    tokens_out: u64,
    #[serde(default)]
    model: String,
}

// ---------------------------------------------------------------------------
// Bridge handle
// ---------------------------------------------------------------------------

/// Handle to the spawned bridge subprocess.
struct BridgeHandle {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
    request_counter: u64,
}

impl BridgeHandle {
    /// Spawn the bridge subprocess and wait for its ready signal.
    fn spawn(config: &BridgeConfig) -> Result<Self> {
        info!(cmd = %config.cmd, script = %config.script, "spawning generation bridge");

        let mut command = Command::new(&config.cmd);
        command
            .arg("run")
            .arg(&config.script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit()); // Bridge logs go to parent stderr
        if !config.working_dir.is_empty() {
            command.current_dir(&config.working_dir);
        }

        let mut child = command.spawn().map_err(|e| {
            CopyforgeError::Generation(format!(
                "failed to spawn bridge: {e}. Is `{}` installed?",
                config.cmd
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| CopyforgeError::Generation("failed to capture bridge stdin".into()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| CopyforgeError::Generation("failed to capture bridge stdout".into()))?;

        let mut handle = Self {
            child,
            stdin,
            reader: BufReader::new(stdout),
            request_counter: 0,
        };

        handle.wait_for_ready()?;
        Ok(handle)
    }

    /// Wait for the bridge to send its "ready" message.
    fn wait_for_ready(&mut self) -> Result<()> {
        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| CopyforgeError::Generation(format!("bridge read error: {e}")))?;

        let msg: ResponseMessage = serde_json::from_str(line.trim()).map_err(|e| {
            CopyforgeError::Generation(format!("invalid bridge ready message: {e} (got: {line})"))
        })?;

        match msg {
            ResponseMessage::Ready => {
                info!("bridge is ready");
                Ok(())
            }
            _ => Err(CopyforgeError::Generation(format!(
                "expected ready message, got: {line}"
            ))),
        }
    }

    /// Send a generation request and block on the response line.
    fn send(&mut self, request: &GenerationRequest) -> Result<(BridgePayload, u64)> {
        self.request_counter += 1;
        let id = format!("req-{}", self.request_counter);
        let started = Instant::now();

        let message = RequestMessage::Generate {
            id: id.clone(),
            method: request.method.clone(),
            prompt: request.prompt.clone(),
        };

        let json = serde_json::to_string(&message)
            .map_err(|e| CopyforgeError::Generation(format!("failed to serialize request: {e}")))?;

        writeln!(self.stdin, "{json}").map_err(|e| {
            CopyforgeError::Generation(format!("failed to write to bridge stdin: {e}"))
        })?;
        self.stdin
            .flush()
            .map_err(|e| CopyforgeError::Generation(format!("failed to flush bridge stdin: {e}")))?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| CopyforgeError::Generation(format!("bridge read error: {e}")))?;

        if line.is_empty() {
            return Err(CopyforgeError::Generation(
                "bridge closed stdout unexpectedly".into(),
            ));
        }

        let msg: ResponseMessage = serde_json::from_str(line.trim()).map_err(|e| {
            CopyforgeError::Generation(format!(
                "invalid bridge response: {e} (got: {})",
                &line[..line.len().min(200)]
            ))
        })?;

        match msg {
            ResponseMessage::Result { id: resp_id, result } => {
                debug_assert_eq!(resp_id, id);
                Ok((result, started.elapsed().as_millis() as u64))
            }
            ResponseMessage::Error { id: _, error } => Err(CopyforgeError::Generation(error)),
            ResponseMessage::Ready => Err(CopyforgeError::Generation(
                "unexpected ready message during generation".into(),
            )),
        }
    }

    /// Send shutdown and wait for the bridge to exit.
    fn shutdown(&mut self) {
        if let Ok(json) = serde_json::to_string(&RequestMessage::Shutdown) {
            let _ = writeln!(self.stdin, "{json}");
            let _ = self.stdin.flush();
        }

        match self.child.wait() {
            Ok(status) => info!(?status, "bridge exited"),
            Err(e) => warn!("bridge wait error: {e}"),
        }
    }
}

impl Drop for BridgeHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ---------------------------------------------------------------------------
// Generator impl
// ---------------------------------------------------------------------------

/// Generator backed by the bridge subprocess.
///
/// The pipe pair is a single in-order channel, so requests are serialized
/// through a mutex; concurrent phases queue here rather than interleaving
/// on the wire.
pub struct BridgeGenerator {
    handle: Mutex<BridgeHandle>,
}

impl BridgeGenerator {
    /// Spawn the bridge and wait until it reports ready.
    pub fn spawn(config: &BridgeConfig) -> Result<Self> {
        Ok(Self {
            handle: Mutex::new(BridgeHandle::spawn(config)?),
        })
    }
}

#[async_trait]
impl Generator for BridgeGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<Generated> {
        let mut handle = self.handle.lock().await;
        let (payload, latency_ms) = handle.send(&request)?;

        Ok(Generated {
            data: payload.data,
            tokens_in: payload.tokens_in,
            tokens_out: payload.tokens_out,
            model: payload.model,
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_message_serializes_correctly() {
        let msg = RequestMessage::Generate {
            id: "req-1".into(),
            method: "writing".into(),
            prompt: "draft the post".into(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"generate"#));
        assert!(json.contains(r#""id":"req-1"#));
        assert!(json.contains(r#""method":"writing"#));
    }

    #[test]
    fn shutdown_message_serializes_correctly() {
        let msg = RequestMessage::Shutdown;
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"shutdown"}"#);
    }

    #[test]
    fn response_message_deserializes_ready() {
        let json = r#"{"type":"ready"}"#;
        let msg: ResponseMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ResponseMessage::Ready));
    }

    #[test]
    fn response_message_deserializes_result() {
        let json = r#"{"type":"result","id":"req-1","result":{"data":{"title":"x"},"tokens_in":100,"tokens_out":50,"model":"test"}}"#;
        let msg: ResponseMessage = serde_json::from_str(json).unwrap();
        match msg {
            ResponseMessage::Result { id, result } => {
                assert_eq!(id, "req-1");
                assert_eq!(result.data["title"], "x");
                assert_eq!(result.tokens_out, 50);
            }
            _ => panic!("expected Result"),
        }
    }

    #[test]
    fn response_message_deserializes_error() {
        let json = r#"{"type":"error","id":"req-2","error":"rate limited"}"#;
        let msg: ResponseMessage = serde_json::from_str(json).unwrap();
        match msg {
            ResponseMessage::Error { id, error } => {
                assert_eq!(id, "req-2");
                assert_eq!(error, "rate limited");
            }
            _ => panic!("expected Error"),
        }
    }

    #[test]
    fn payload_defaults_usage_fields() {
        let json = r#"{"data":[1,2,3]}"#;
        let payload: BridgePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.tokens_in, 0);
        assert_eq!(payload.model, "");
    }
}
