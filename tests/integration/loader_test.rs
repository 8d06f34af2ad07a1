//! Plugin discovery against real directories.

use pretty_assertions::assert_eq;
use workout_agent::commands::{CommandRegistry, DispatchOutcome};
use workout_agent::plugins::{builtin_plugins, LoadFailureKind, PluginLoader};

use super::common::{offline_config, write_plugin};

const COOLDOWN: &str = r#"
name = "cooldown"

[[commands]]
kind = "echo"
name = "cool_down"
description = "Print the cool-down routine"
text = "Walk for five minutes, then stretch."

[[commands]]
kind = "prompt"
name = "ask_physio"
description = "Ask a physiotherapist"
system = "You are a physiotherapist."
"#;

#[tokio::test]
async fn test_one_broken_plugin_does_not_stop_the_other() {
    let root = tempfile::tempdir().unwrap();
    write_plugin(root.path(), "broken", "[[commands]]\nkind = \"echo\"\n");
    write_plugin(root.path(), "cooldown", COOLDOWN);

    let config = offline_config(root.path());
    let mut registry = CommandRegistry::new();
    let report = PluginLoader::new(&config).load_into(&mut registry);

    assert_eq!(report.loaded_plugins, vec!["cooldown"]);
    assert_eq!(report.registered, vec!["cool_down", "ask_physio"]);
    let imports: Vec<_> = report.failures_of(LoadFailureKind::Import).collect();
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].plugin, "broken");

    let outcome = registry.execute("cool_down", &[]).await;
    assert!(outcome.is_success());
}

#[test]
fn test_prompt_command_fails_alone_without_api_key() {
    let root = tempfile::tempdir().unwrap();
    write_plugin(root.path(), "cooldown", COOLDOWN);

    let mut config = offline_config(root.path());
    config.llm.provider = "openai".to_string();
    config.llm.api_key = None;

    let mut registry = CommandRegistry::new();
    let report = PluginLoader::new(&config).load_into(&mut registry);

    assert!(registry.contains("cool_down"));
    assert!(!registry.contains("ask_physio"));
    let failure = &report.failures[0];
    assert_eq!(failure.kind, LoadFailureKind::Construction);
    assert_eq!(failure.command.as_deref(), Some("ask_physio"));
}

#[tokio::test]
async fn test_directory_plugin_overrides_builtin_name() {
    let root = tempfile::tempdir().unwrap();
    write_plugin(
        root.path(),
        "custom_workout",
        r#"
[[commands]]
kind = "echo"
name = "start_workout"
description = "Start a custom workout"
text = "Custom workout started."
"#,
    );

    let config = offline_config(root.path());
    let mut registry = CommandRegistry::new();
    PluginLoader::new(&config)
        .with_builtins(builtin_plugins())
        .load_into(&mut registry);

    let listing = registry.list();
    assert_eq!(listing.iter().filter(|c| c.name == "start_workout").count(), 1);
    assert_eq!(
        registry.execute("start_workout", &[]).await,
        DispatchOutcome::Success(workout_agent::commands::CommandOutput::text(
            "Custom workout started."
        ))
    );
}
