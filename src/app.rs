//! Application wiring.
//!
//! Owns the configuration and the registry, fills the registry from the
//! plugins, adds the menu command and hands control to the REPL.

use std::future::Future;
use std::io::Write;

use tracing::info;

use crate::commands::{CommandRegistry, ShowMenuCommand, SHOW_MENU};
use crate::config::Config;
use crate::plugins::{builtin_plugins, LoadReport, PluginLoader};
use crate::repl::{LineSource, Repl, ReplReport};

/// The workout agent application.
#[derive(Debug)]
pub struct App {
    config: Config,
    registry: CommandRegistry,
}

impl App {
    /// Creates the application with an empty registry.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: CommandRegistry::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Mutable access, e.g. to register extra commands before [`App::start`].
    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// Loads the built-in and directory plugins into the registry.
    pub fn load_plugins(&mut self) -> LoadReport {
        PluginLoader::new(&self.config)
            .with_builtins(builtin_plugins())
            .load_into(&mut self.registry)
    }

    /// Loads plugins, registers `show_menu` and runs the REPL.
    pub async fn start<S, W, F>(
        &mut self,
        input: &mut S,
        output: &mut W,
        interrupt: F,
    ) -> ReplReport
    where
        S: LineSource + ?Sized,
        W: Write,
        F: Future<Output = ()>,
    {
        self.load_plugins();
        self.registry.register(Box::new(ShowMenuCommand::new()));

        info!(
            "Application started. Type '{}' (or press enter) to see the menu or '{}' to exit.",
            SHOW_MENU, self.config.repl.exit_keyword
        );

        Repl::new(&mut self.registry, &self.config.repl)
            .run_until(input, output, interrupt)
            .await
    }
}
