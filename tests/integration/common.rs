//! Shared helpers for integration tests.

use std::path::Path;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use workout_agent::commands::{Command, CommandContext, CommandOutput};
use workout_agent::config::Config;
use workout_agent::error::{AgentError, Result};
use workout_agent::plugins::MANIFEST_FILE;

/// Config that never reaches the network or the user's files.
pub fn offline_config(plugin_dir: &Path) -> Config {
    let mut config = Config::default();
    config.plugins.dir = plugin_dir.to_path_buf();
    config.llm.provider = "mock".to_string();
    config
}

/// Feeds the given lines to the REPL, one per read.
pub fn script(lines: &[&str]) -> Lines<BufReader<std::io::Cursor<Vec<u8>>>> {
    let mut text = lines.join("\n");
    text.push('\n');
    BufReader::new(std::io::Cursor::new(text.into_bytes())).lines()
}

/// Writes `<root>/<name>/plugin.toml`.
pub fn write_plugin(root: &Path, name: &str, manifest: &str) {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
}

/// A command that always fails.
pub struct Broken;

#[async_trait]
impl Command for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    async fn execute(
        &mut self,
        _ctx: &CommandContext<'_>,
        _args: &[String],
    ) -> Result<CommandOutput> {
        Err(AgentError::command("equipment missing"))
    }
}

/// A command with a configurable description that counts its calls.
pub struct Counter {
    pub description: String,
    pub calls: usize,
}

impl Counter {
    pub fn boxed(description: &str) -> Box<dyn Command> {
        Box::new(Self {
            description: description.to_string(),
            calls: 0,
        })
    }
}

#[async_trait]
impl Command for Counter {
    fn name(&self) -> &str {
        "counter"
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(
        &mut self,
        _ctx: &CommandContext<'_>,
        _args: &[String],
    ) -> Result<CommandOutput> {
        self.calls += 1;
        Ok(CommandOutput::text(format!("count = {}", self.calls)))
    }
}
