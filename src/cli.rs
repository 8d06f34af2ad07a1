//! Command-line argument parsing for the workout agent.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// A plugin-based command REPL for workout tracking and AI training advice.
#[derive(Parser, Debug)]
#[command(name = "workout-agent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory scanned for manifest plugins
    #[arg(long, value_name = "DIR")]
    pub plugin_dir: Option<PathBuf>,

    /// User identifier attached to workout history
    #[arg(long, value_name = "ID")]
    pub user_id: Option<String>,

    /// LLM provider to use (openai, mock)
    #[arg(long, value_name = "PROVIDER")]
    pub llm: Option<String>,

    /// Do not load the compiled-in plugins
    #[arg(long)]
    pub no_builtin_plugins: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", conflicts_with = "log_to_file")]
    pub log_file: Option<PathBuf>,

    /// Write logs to the default log file instead of stderr
    #[arg(long)]
    pub log_to_file: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Returns the log file to write to, if file logging was requested.
    pub fn log_path(&self) -> Option<PathBuf> {
        match (&self.log_file, self.log_to_file) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(crate::logging::default_log_path()),
            (None, false) => None,
        }
    }

    /// Applies CLI flags on top of file and environment configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(dir) = &self.plugin_dir {
            config.plugins.dir = dir.clone();
        }
        if let Some(id) = &self.user_id {
            config.user.id = Some(id.clone());
        }
        if let Some(provider) = &self.llm {
            config.llm.provider = provider.clone();
        }
        if self.no_builtin_plugins {
            config.plugins.builtin = false;
        }
    }
}
