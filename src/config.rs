//! Configuration management for the workout agent.
//!
//! Handles loading configuration from TOML files and environment variables.
//! The resulting [`Config`] is built once at startup and passed by reference
//! to whatever needs it (plugin constructors, the REPL, the LLM factory).

use crate::error::{AgentError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for the workout agent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// User identity settings.
    #[serde(default)]
    pub user: UserConfig,

    /// LLM provider configuration.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Plugin discovery settings.
    #[serde(default)]
    pub plugins: PluginsConfig,

    /// Interactive prompt settings.
    #[serde(default)]
    pub repl: ReplConfig,
}

/// User identity settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Identifier attached to workout history entries.
    pub id: Option<String>,
}

/// LLM provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// LLM provider: "openai" or "mock".
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model name (e.g., "gpt-3.5-turbo", "gpt-4o").
    #[serde(default = "default_model")]
    pub model: String,

    /// API key (not recommended to store in config, prefer OPENAI_API_KEY).
    pub api_key: Option<String>,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
        }
    }
}

/// Plugin discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginsConfig {
    /// Directory scanned for manifest plugins.
    #[serde(default = "default_plugin_dir")]
    pub dir: PathBuf,

    /// Whether the compiled-in plugins are loaded.
    #[serde(default = "default_true")]
    pub builtin: bool,

    /// Plugin names that are never loaded.
    #[serde(default)]
    pub disabled: Vec<String>,
}

fn default_plugin_dir() -> PathBuf {
    PathBuf::from("plugins")
}

fn default_true() -> bool {
    true
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            dir: default_plugin_dir(),
            builtin: true,
            disabled: Vec::new(),
        }
    }
}

impl PluginsConfig {
    /// Returns true if the named plugin has been disabled.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|d| d == name)
    }
}

/// Interactive prompt settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Prompt printed before each line is read.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Keyword that ends the session (matched case-insensitively).
    #[serde(default = "default_exit_keyword")]
    pub exit_keyword: String,
}

fn default_prompt() -> String {
    ">>> ".to_string()
}

fn default_exit_keyword() -> String {
    "exit".to_string()
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            exit_keyword: default_exit_keyword(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("workout-agent")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AgentError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            AgentError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the REPL cannot act on.
    pub fn validate(&self) -> Result<()> {
        // A blank keyword would turn the empty line into an exit
        if self.repl.exit_keyword.trim().is_empty() {
            return Err(AgentError::config(
                "repl.exit_keyword must not be empty",
            ));
        }
        Ok(())
    }

    /// Applies process environment variables on top of file values.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Applies environment overrides using the given lookup function.
    ///
    /// Recognised variables: `USER_ID`, `OPENAI_API_KEY` (or the legacy
    /// `OPEN_AI_KEY`), `OPENAI_MODEL`, `WORKOUT_AGENT_LLM_PROVIDER` and
    /// `WORKOUT_AGENT_PLUGIN_DIR`. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(id) = get("USER_ID") {
            self.user.id = Some(id);
        }
        if let Some(key) = get("OPENAI_API_KEY").or_else(|| get("OPEN_AI_KEY")) {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = get("OPENAI_MODEL") {
            self.llm.model = model;
        }
        if let Some(provider) = get("WORKOUT_AGENT_LLM_PROVIDER") {
            self.llm.provider = provider;
        }
        if let Some(dir) = get("WORKOUT_AGENT_PLUGIN_DIR") {
            self.plugins.dir = PathBuf::from(dir);
        }
    }
}
