//! Runs the built binary with piped stdin.

use std::io::Write;
use std::process::{Command, Stdio};

/// Runs workout-agent in `dir` with the given stdin, isolated from the
/// caller's environment. Returns (exit code, stdout, stderr).
fn run_binary(dir: &std::path::Path, stdin: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_workout-agent"))
        .current_dir(dir)
        .args(["--config", "missing.toml", "--plugin-dir", "plugins", "--llm", "mock"])
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPEN_AI_KEY")
        .env_remove("WORKOUT_AGENT_PLUGIN_DIR")
        .env_remove("WORKOUT_AGENT_LLM_PROVIDER")
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start workout-agent");

    // The process may exit before reading everything (e.g. on a config error)
    if let Some(mut pipe) = child.stdin.take() {
        let _ = pipe.write_all(stdin.as_bytes());
    }

    let output = child.wait_with_output().expect("Failed to wait for workout-agent");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn test_binary_menu_command_and_exit() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_binary(dir.path(), "\nbogus_cmd\nstart_workout\nexit\n");

    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Application Menu:"));
    assert!(stdout.contains("show_menu: Show the dynamic menu of all commands."));
    assert!(stdout.contains("Workout session has started!"));
    assert!(stderr.contains("Unknown command: bogus_cmd"));
    assert!(stderr.contains("Application shutdown."));
}

#[test]
fn test_binary_exits_cleanly_on_closed_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_binary(dir.path(), "");

    assert_eq!(code, 0);
    assert!(stderr.contains("Plugins directory 'plugins' not found."));
    assert!(stderr.contains("Application shutdown."));
}

#[test]
fn test_binary_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("missing.toml"), "[plugins\n").unwrap();

    let (code, _, stderr) = run_binary(dir.path(), "exit\n");
    assert_eq!(code, 1);
    assert!(stderr.contains("Configuration Error"));
}
