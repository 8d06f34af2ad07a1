//! Command registry and dispatch.
//!
//! Owns the name → command mapping. Lookups that miss and commands that fail
//! are logged and reported as a [`DispatchOutcome`]; nothing escapes
//! [`CommandRegistry::execute`].

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use indexmap::IndexMap;
use tracing::{debug, error, info, warn};

use super::{Command, CommandContext, CommandInfo, CommandOutput};

/// Result of dispatching a command by name.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The command ran and produced this output.
    Success(CommandOutput),
    /// No command is registered under the requested name.
    NotFound,
    /// The command returned an error or panicked.
    ExecutionError(String),
}

impl DispatchOutcome {
    /// Returns true if the command ran successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Single-owner, insertion-ordered mapping from command name to command.
#[derive(Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command under its name.
    ///
    /// An existing command with the same name is replaced (last registration
    /// wins) and returned. The replaced entry keeps its menu position.
    pub fn register(&mut self, command: Box<dyn Command>) -> Option<Box<dyn Command>> {
        let name = command.name().to_string();
        if self.commands.contains_key(&name) {
            warn!("Command '{}' is already registered. Overwriting.", name);
        }
        let previous = self.commands.insert(name.clone(), command);
        info!("Command '{}' registered successfully.", name);
        previous
    }

    /// Returns the (name, description) pairs of all commands in menu order.
    pub fn list(&self) -> Vec<CommandInfo> {
        self.commands
            .values()
            .map(|cmd| CommandInfo::new(cmd.name(), cmd.description()))
            .collect()
    }

    /// Returns true if a command is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Executes the named command with the given arguments.
    pub async fn execute(&mut self, name: &str, args: &[String]) -> DispatchOutcome {
        let listing = self.list();

        let Some(command) = self.commands.get_mut(name) else {
            error!("Command '{}' not found.", name);
            return DispatchOutcome::NotFound;
        };

        debug!("Executing command '{}' with {} argument(s)", name, args.len());
        let ctx = CommandContext { commands: &listing };
        let result = AssertUnwindSafe(command.execute(&ctx, args))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(output)) => DispatchOutcome::Success(output),
            Ok(Err(e)) => {
                error!("Error executing command '{}': {}", name, e);
                DispatchOutcome::ExecutionError(e.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Error executing command '{}': panicked: {}", name, message);
                DispatchOutcome::ExecutionError(format!("command panicked: {message}"))
            }
        }
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
