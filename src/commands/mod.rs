//! Command contract, registry and dispatch.
//!
//! Every unit of user-invokable behaviour implements [`Command`]. Commands are
//! stored by name in a [`CommandRegistry`], which executes them against the
//! split user input and turns every failure into a [`DispatchOutcome`].

pub mod menu;
pub mod output;
pub mod registry;

use async_trait::async_trait;

use crate::error::Result;

pub use menu::{ShowMenuCommand, SHOW_MENU};
pub use output::CommandOutput;
pub use registry::{CommandRegistry, DispatchOutcome};

/// Name and description of a registered command, used for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    /// Unique command name (the lookup key).
    pub name: String,
    /// Human-readable description shown in the menu.
    pub description: String,
}

impl CommandInfo {
    /// Creates a new command info entry.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Context provided to a command while it executes.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    /// Snapshot of every registered command, in menu order.
    pub commands: &'a [CommandInfo],
}

/// A named, described unit of executable behaviour.
///
/// Name and description are fixed at construction. `execute` may mutate
/// internal state (e.g. accumulated history) and returns what it produced.
#[async_trait]
pub trait Command: Send {
    /// Unique name, also the registry key.
    fn name(&self) -> &str;

    /// Description shown in the menu.
    fn description(&self) -> &str;

    /// Executes the command with the whitespace-split arguments.
    async fn execute(
        &mut self,
        ctx: &CommandContext<'_>,
        args: &[String],
    ) -> Result<CommandOutput>;
}
