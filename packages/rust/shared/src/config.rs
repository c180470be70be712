//! Application configuration for copyforge.
//!
//! User config lives at `~/.copyforge/copyforge.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CopyforgeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "copyforge.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".copyforge";

// ---------------------------------------------------------------------------
// Config structs (matching copyforge.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults for brief construction and output.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// LLM endpoint settings (HTTP generator).
    #[serde(default)]
    pub llm: LlmConfig,

    /// Generation bridge subprocess settings.
    #[serde(default)]
    pub bridge: BridgeConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory where final records are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Default target audience for briefs.
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Default word count target.
    #[serde(default = "default_word_count")]
    pub word_count: u32,

    /// Generator backend: "placeholder", "bridge", or "http".
    #[serde(default = "default_generator")]
    pub generator: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            audience: default_audience(),
            word_count: default_word_count(),
            generator: default_generator(),
        }
    }
}

fn default_output_dir() -> String {
    "generated_content".into()
}
fn default_audience() -> String {
    "Enterprise decision makers".into()
}
fn default_word_count() -> u32 {
    2000
}
fn default_generator() -> String {
    "placeholder".into()
}

/// `[llm]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL of the chat-completions endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default model to use for generation.
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".into()
}
fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".into()
}
fn default_model() -> String {
    "anthropic/claude-sonnet-4.5".into()
}
fn default_timeout_secs() -> u64 {
    120
}

/// `[bridge]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Bridge command (e.g., "bun", "node", "python3").
    #[serde(default = "default_bridge_cmd")]
    pub cmd: String,

    /// Bridge script path.
    #[serde(default)]
    pub script: String,

    /// Working directory for the bridge subprocess. Empty = current dir.
    #[serde(default)]
    pub working_dir: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            cmd: default_bridge_cmd(),
            script: String::new(),
            working_dir: String::new(),
        }
    }
}

fn default_bridge_cmd() -> String {
    "bun".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.copyforge/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CopyforgeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.copyforge/copyforge.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CopyforgeError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| CopyforgeError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CopyforgeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CopyforgeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CopyforgeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that the LLM API key env var is set and non-empty.
///
/// Only required for the HTTP generator backend.
pub fn validate_api_key(config: &AppConfig) -> Result<()> {
    let var_name = &config.llm.api_key_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(()),
        _ => Err(CopyforgeError::config(format!(
            "LLM API key not found. Set the {var_name} environment variable."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("output_dir"));
        assert!(toml_str.contains("OPENROUTER_API_KEY"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.word_count, 2000);
        assert_eq!(parsed.defaults.generator, "placeholder");
        assert_eq!(parsed.llm.api_key_env, "OPENROUTER_API_KEY");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[defaults]
output_dir = "/tmp/records"

[llm]
model = "test-model"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.output_dir, "/tmp/records");
        assert_eq!(config.defaults.word_count, 2000);
        assert_eq!(config.llm.model, "test-model");
        assert_eq!(config.bridge.cmd, "bun");
    }

    #[test]
    fn api_key_validation() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.llm.api_key_env = "CF_TEST_NONEXISTENT_KEY_98765".into();
        let result = validate_api_key(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key not found"));
    }
}
