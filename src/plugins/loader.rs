//! Plugin discovery and registration.
//!
//! Failures are contained per plugin (unreadable manifest) and per command
//! (failed construction); the loader itself never fails.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use super::manifest::{ManifestPlugin, MANIFEST_FILE};
use super::Plugin;
use crate::commands::CommandRegistry;
use crate::config::Config;

/// Which stage of loading failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailureKind {
    /// The plugin itself could not be read or parsed.
    Import,
    /// One of the plugin's commands could not be built.
    Construction,
}

/// A contained loading failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub plugin: String,
    /// Set for construction failures.
    pub command: Option<String>,
    pub kind: LoadFailureKind,
    pub message: String,
}

/// What a load pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Plugins whose commands were offered to the registry, in load order.
    pub loaded_plugins: Vec<String>,
    /// Names of the commands registered, in registration order.
    pub registered: Vec<String>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Failures of the given kind.
    pub fn failures_of(&self, kind: LoadFailureKind) -> impl Iterator<Item = &LoadFailure> {
        self.failures.iter().filter(move |f| f.kind == kind)
    }
}

/// Collects plugins and registers their commands.
pub struct PluginLoader<'a> {
    config: &'a Config,
    builtins: Vec<Box<dyn Plugin>>,
}

impl<'a> PluginLoader<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            builtins: Vec::new(),
        }
    }

    /// Adds compiled-in plugins, loaded ahead of the plugin directory.
    pub fn with_builtins(mut self, plugins: impl IntoIterator<Item = Box<dyn Plugin>>) -> Self {
        self.builtins.extend(plugins);
        self
    }

    /// Loads every enabled plugin into `registry`.
    pub fn load_into(self, registry: &mut CommandRegistry) -> LoadReport {
        let mut report = LoadReport::default();
        let mut plugins: Vec<Box<dyn Plugin>> = Vec::new();

        if self.config.plugins.builtin {
            plugins.extend(self.builtins);
        } else if !self.builtins.is_empty() {
            info!("Built-in plugins disabled by configuration.");
        }

        for plugin in discover(&self.config.plugins.dir, &mut report) {
            plugins.push(Box::new(plugin));
        }

        for plugin in plugins {
            let plugin_name = plugin.name().to_string();
            if self.config.plugins.is_disabled(&plugin_name) {
                info!("Plugin '{}' is disabled, skipping.", plugin_name);
                continue;
            }

            for provided in plugin.provide_commands(self.config) {
                match provided {
                    Ok(command) => {
                        let command_name = command.name().to_string();
                        registry.register(command);
                        info!(
                            "Command '{}' from plugin '{}' registered.",
                            command_name, plugin_name
                        );
                        report.registered.push(command_name);
                    }
                    Err(e) => {
                        error!(
                            "Failed to instantiate command '{}' from plugin '{}': {}",
                            e.command, plugin_name, e.source
                        );
                        report.failures.push(LoadFailure {
                            plugin: plugin_name.clone(),
                            command: Some(e.command),
                            kind: LoadFailureKind::Construction,
                            message: e.source.to_string(),
                        });
                    }
                }
            }
            report.loaded_plugins.push(plugin_name);
        }

        info!(
            "Loaded {} plugin(s), {} command(s), {} failure(s).",
            report.loaded_plugins.len(),
            report.registered.len(),
            report.failures.len()
        );
        report
    }
}

/// Reads every manifest plugin under `dir`, sorted by directory name.
///
/// A missing directory yields no plugins. Sub-directories without a
/// manifest are not plugins and are skipped.
fn discover(dir: &Path, report: &mut LoadReport) -> Vec<ManifestPlugin> {
    if !dir.is_dir() {
        warn!("Plugins directory '{}' not found.", dir.display());
        return Vec::new();
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read plugins directory '{}': {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!("Skipping unreadable entry in '{}': {}", dir.display(), e);
                None
            }
        })
        .filter(|path| path.is_dir())
        .collect();
    candidates.sort();

    let mut plugins = Vec::new();
    for path in candidates {
        let dir_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !path.join(MANIFEST_FILE).is_file() {
            debug!("'{}' has no {}, not a plugin.", path.display(), MANIFEST_FILE);
            continue;
        }

        match ManifestPlugin::load(&path) {
            Ok(plugin) => {
                debug!("Discovered plugin '{}' in '{}'", plugin.name(), path.display());
                plugins.push(plugin);
            }
            Err(e) => {
                error!("Error importing plugin {}: {}", dir_name, e);
                report.failures.push(LoadFailure {
                    plugin: dir_name,
                    command: None,
                    kind: LoadFailureKind::Import,
                    message: e.to_string(),
                });
            }
        }
    }
    plugins
}
