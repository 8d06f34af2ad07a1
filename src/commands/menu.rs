//! The built-in `show_menu` command.

use async_trait::async_trait;

use super::{Command, CommandContext, CommandOutput};
use crate::error::Result;

/// Name of the built-in menu command.
pub const SHOW_MENU: &str = "show_menu";

/// Lists every registered command with its description.
#[derive(Debug, Clone)]
pub struct ShowMenuCommand {
    description: String,
}

impl ShowMenuCommand {
    pub fn new() -> Self {
        Self {
            description: "Show the dynamic menu of all commands.".to_string(),
        }
    }
}

impl Default for ShowMenuCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for ShowMenuCommand {
    fn name(&self) -> &str {
        SHOW_MENU
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(
        &mut self,
        ctx: &CommandContext<'_>,
        _args: &[String],
    ) -> Result<CommandOutput> {
        let mut menu = String::from("Application Menu:");
        for info in ctx.commands {
            menu.push_str(&format!("\n  {}: {}", info.name, info.description));
        }
        Ok(CommandOutput::Text(menu))
    }
}
