//! Scripted REPL sessions through `App::start`.

use pretty_assertions::assert_eq;
use workout_agent::app::App;
use workout_agent::repl::ExitReason;

use super::common::{offline_config, script, write_plugin, Broken};

async fn run_session(app: &mut App, lines: &[&str]) -> (workout_agent::repl::ReplReport, String) {
    let mut input = script(lines);
    let mut out = Vec::new();
    let report = app
        .start(&mut input, &mut out, std::future::pending())
        .await;
    (report, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_empty_line_shows_menu_then_exit() {
    let root = tempfile::tempdir().unwrap();
    let mut app = App::new(offline_config(root.path()));

    let (report, out) = run_session(&mut app, &["", "exit"]).await;

    assert_eq!(report.exit, ExitReason::ExitKeyword);
    assert_eq!(report.lines, 2);
    assert!(out.contains("Application Menu:"));
    for info in app.registry().list() {
        assert!(
            out.contains(&format!("{}: {}", info.name, info.description)),
            "menu is missing {}",
            info.name
        );
    }
}

#[tokio::test]
async fn test_unknown_command_falls_back_to_menu() {
    let root = tempfile::tempdir().unwrap();
    let mut app = App::new(offline_config(root.path()));

    let (report, out) = run_session(&mut app, &["bogus_cmd", "exit"]).await;

    assert_eq!(report.exit, ExitReason::ExitKeyword);
    assert_eq!(report.unknown_commands, vec!["bogus_cmd"]);
    assert!(out.contains("Application Menu:"));
    assert!(out.contains("start_workout: Start a new workout session"));
}

#[tokio::test]
async fn test_start_workout_prints_confirmation() {
    let root = tempfile::tempdir().unwrap();
    let mut app = App::new(offline_config(root.path()));

    let (report, out) = run_session(&mut app, &["start_workout", "exit"]).await;

    assert_eq!(report.exit, ExitReason::ExitKeyword);
    assert!(out.contains("Workout session has started! Let's do some exercises."));
    assert!(report.unknown_commands.is_empty());
}

#[tokio::test]
async fn test_failing_command_does_not_end_session() {
    let root = tempfile::tempdir().unwrap();
    let mut app = App::new(offline_config(root.path()));
    app.registry_mut().register(Box::new(Broken));

    let (report, out) = run_session(&mut app, &["broken", "end_workout", "exit"]).await;

    assert_eq!(report.failed_commands, vec!["broken"]);
    assert!(out.contains("Workout session has ended. Great job!"));
    assert_eq!(report.exit, ExitReason::ExitKeyword);
}

#[tokio::test]
async fn test_history_session_and_directory_plugin() {
    let root = tempfile::tempdir().unwrap();
    write_plugin(
        root.path(),
        "stretching",
        r#"
[[commands]]
kind = "echo"
name = "warm_up"
description = "Print the warm-up routine"
text = "Arm circles and leg swings."
"#,
    );
    let mut app = App::new(offline_config(root.path()));

    let (report, out) = run_session(
        &mut app,
        &[
            "warm_up",
            "fitness_history add 30 250 run",
            "fitness_history add 15 100",
            "fitness_history summary",
            "fitness_trainer I want to get stronger",
            "EXIT",
        ],
    )
    .await;

    assert_eq!(report.exit, ExitReason::ExitKeyword);
    assert!(report.failed_commands.is_empty());
    assert!(out.contains("Arm circles and leg swings."));
    assert!(out.contains("\"total_sessions\": 2"));
    assert!(out.contains("\"total_time_spent\": 45"));
    assert!(out.contains("\"total_calories_burned\": 350"));
    assert!(out.contains("Fitness Trainer Agent:"));
}

#[tokio::test]
async fn test_end_of_input_is_a_clean_exit() {
    let root = tempfile::tempdir().unwrap();
    let mut app = App::new(offline_config(root.path()));

    let (report, _) = run_session(&mut app, &["start_workout"]).await;
    assert_eq!(report.exit, ExitReason::EndOfInput);
}
