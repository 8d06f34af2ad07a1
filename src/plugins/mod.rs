//! Plugin contract and the plugins shipped with the agent.
//!
//! A [`Plugin`] is a self-contained provider of commands. The core never
//! names a concrete plugin: the [`PluginLoader`] receives compiled-in plugins
//! from the caller and discovers manifest plugins on disk, and every plugin
//! goes through the same `provide_commands(&Config)` entry point.

pub mod history;
pub mod loader;
pub mod manifest;
pub mod trainer;
pub mod workout;

use thiserror::Error;

use crate::commands::Command;
use crate::config::Config;
use crate::error::AgentError;

pub use history::{FitnessHistory, HistoryPlugin, HistorySummary, WorkoutSession};
pub use loader::{LoadFailure, LoadFailureKind, LoadReport, PluginLoader};
pub use manifest::{ManifestPlugin, PluginManifest, MANIFEST_FILE};
pub use trainer::{FitnessTrainerAgent, TrainerPlugin};
pub use workout::{EndWorkoutCommand, StartWorkoutCommand, WorkoutPlugin};

/// A command that could not be built.
#[derive(Error, Debug)]
#[error("failed to instantiate command '{command}': {source}")]
pub struct ConstructionError {
    /// Name of the command that failed.
    pub command: String,
    /// Why it failed.
    #[source]
    pub source: AgentError,
}

impl ConstructionError {
    pub fn new(command: impl Into<String>, source: AgentError) -> Self {
        Self {
            command: command.into(),
            source,
        }
    }
}

/// A provider of commands.
pub trait Plugin: Send {
    /// Plugin name, used in logs and for `plugins.disabled`.
    fn name(&self) -> &str;

    /// Builds the plugin's commands from the configuration.
    ///
    /// Each entry is one construction attempt; a failed entry does not
    /// affect its siblings.
    fn provide_commands(
        &self,
        config: &Config,
    ) -> Vec<std::result::Result<Box<dyn Command>, ConstructionError>>;
}

/// The plugins compiled into the binary.
pub fn builtin_plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(WorkoutPlugin),
        Box::new(HistoryPlugin),
        Box::new(TrainerPlugin),
    ]
}
