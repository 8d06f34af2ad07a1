//! Manifest-described plugins.
//!
//! A plugin directory entry is a sub-directory holding a `plugin.toml`:
//!
//! ```toml
//! name = "stretching"
//! description = "Stretch routines"
//!
//! [[commands]]
//! kind = "echo"
//! name = "warm_up"
//! description = "Print the warm-up routine"
//! text = "Neck rolls, arm circles, leg swings."
//!
//! [[commands]]
//! kind = "prompt"
//! name = "ask_nutritionist"
//! description = "Ask a nutrition question"
//! system = "You are a sports nutritionist."
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use super::{ConstructionError, Plugin};
use crate::commands::{Command, CommandContext, CommandOutput};
use crate::config::Config;
use crate::error::{AgentError, Result};
use crate::llm::{create_client, LlmClient, Message};

/// File name looked up inside each plugin sub-directory.
pub const MANIFEST_FILE: &str = "plugin.toml";

/// Parsed contents of a `plugin.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    /// Plugin name; defaults to the directory name.
    pub name: Option<String>,
    /// Free-form description of the plugin.
    pub description: Option<String>,
    /// Commands this plugin provides.
    #[serde(default)]
    pub commands: Vec<CommandManifest>,
}

/// One command entry in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CommandManifest {
    /// Prints fixed text.
    Echo {
        name: String,
        description: String,
        text: String,
    },
    /// Sends the arguments to the language model under a system prompt.
    Prompt {
        name: String,
        description: String,
        system: String,
    },
}

impl CommandManifest {
    pub fn name(&self) -> &str {
        match self {
            Self::Echo { name, .. } | Self::Prompt { name, .. } => name,
        }
    }

    fn validate(&self) -> Result<()> {
        let name = self.name();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(AgentError::plugin(format!(
                "Invalid command name '{name}': names must be a single word"
            )));
        }
        Ok(())
    }
}

impl PluginManifest {
    /// Parses a manifest from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AgentError::plugin(format!("Invalid manifest: {e}")))
    }
}

/// A plugin loaded from a manifest on disk.
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    name: String,
    dir: PathBuf,
    manifest: PluginManifest,
}

impl ManifestPlugin {
    /// Reads and parses `<dir>/plugin.toml`.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            AgentError::plugin(format!("Failed to read {}: {e}", path.display()))
        })?;
        let manifest = PluginManifest::parse(&content)?;

        let name = manifest
            .name
            .clone()
            .or_else(|| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
            .ok_or_else(|| AgentError::plugin(format!("Cannot name plugin at {}", dir.display())))?;

        Ok(Self {
            name,
            dir: dir.to_path_buf(),
            manifest,
        })
    }

    /// Directory the manifest was loaded from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn construct(
        &self,
        entry: &CommandManifest,
        config: &Config,
    ) -> Result<Box<dyn Command>> {
        entry.validate()?;
        match entry {
            CommandManifest::Echo {
                name,
                description,
                text,
            } => Ok(Box::new(EchoCommand {
                name: name.clone(),
                description: description.clone(),
                text: text.clone(),
            })),
            CommandManifest::Prompt {
                name,
                description,
                system,
            } => Ok(Box::new(PromptCommand {
                name: name.clone(),
                description: description.clone(),
                system: system.clone(),
                client: create_client(&config.llm)?,
            })),
        }
    }
}

impl Plugin for ManifestPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide_commands(
        &self,
        config: &Config,
    ) -> Vec<std::result::Result<Box<dyn Command>, ConstructionError>> {
        self.manifest
            .commands
            .iter()
            .map(|entry| {
                self.construct(entry, config)
                    .map_err(|e| ConstructionError::new(entry.name(), e))
            })
            .collect()
    }
}

/// Prints the manifest's text, followed by any arguments.
#[derive(Debug, Clone)]
pub struct EchoCommand {
    name: String,
    description: String,
    text: String,
}

#[async_trait]
impl Command for EchoCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(
        &mut self,
        _ctx: &CommandContext<'_>,
        args: &[String],
    ) -> Result<CommandOutput> {
        if args.is_empty() {
            Ok(CommandOutput::text(self.text.clone()))
        } else {
            Ok(CommandOutput::text(format!("{} {}", self.text, args.join(" "))))
        }
    }
}

/// Forwards the arguments to the language model.
pub struct PromptCommand {
    name: String,
    description: String,
    system: String,
    client: Box<dyn LlmClient>,
}

#[async_trait]
impl Command for PromptCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(
        &mut self,
        _ctx: &CommandContext<'_>,
        args: &[String],
    ) -> Result<CommandOutput> {
        if args.is_empty() {
            return Ok(CommandOutput::text(format!("Usage: {} <question>", self.name)));
        }

        let messages = vec![Message::system(self.system.clone()), Message::user(args.join(" "))];
        let response = self.client.complete(&messages).await?;
        Ok(CommandOutput::text(response))
    }
}
