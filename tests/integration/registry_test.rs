//! Registry behaviour through the public API.

use pretty_assertions::assert_eq;
use workout_agent::commands::{CommandOutput, CommandRegistry, DispatchOutcome};
use workout_agent::plugins::{EndWorkoutCommand, StartWorkoutCommand};

use super::common::{Broken, Counter};

#[test]
fn test_reregistering_keeps_one_entry_with_new_description() {
    let mut registry = CommandRegistry::new();
    registry.register(Counter::boxed("first"));
    registry.register(Box::new(StartWorkoutCommand));
    registry.register(Counter::boxed("second"));

    let counters: Vec<_> = registry
        .list()
        .into_iter()
        .filter(|c| c.name == "counter")
        .collect();
    assert_eq!(counters.len(), 1);
    assert_eq!(counters[0].description, "second");
    assert_eq!(registry.len(), 2);
}

#[tokio::test]
async fn test_unknown_name_leaves_registry_unchanged() {
    let mut registry = CommandRegistry::new();
    registry.register(Box::new(StartWorkoutCommand));
    let before = registry.list();

    let outcome = registry.execute("nonexistent", &["x".to_string()]).await;

    assert_eq!(outcome, DispatchOutcome::NotFound);
    assert_eq!(registry.list(), before);
}

#[tokio::test]
async fn test_failure_does_not_poison_other_commands() {
    let mut registry = CommandRegistry::new();
    registry.register(Box::new(Broken));
    registry.register(Box::new(EndWorkoutCommand));
    registry.register(Counter::boxed("counts"));

    let outcome = registry.execute("broken", &[]).await;
    assert!(
        matches!(outcome, DispatchOutcome::ExecutionError(ref msg) if msg.contains("equipment missing"))
    );

    assert_eq!(
        registry.execute("end_workout", &[]).await,
        DispatchOutcome::Success(CommandOutput::text("Workout session has ended. Great job!"))
    );

    // State inside a command survives between dispatches
    registry.execute("counter", &[]).await;
    assert_eq!(
        registry.execute("counter", &[]).await,
        DispatchOutcome::Success(CommandOutput::text("count = 2"))
    );

    // And the failing command can still be dispatched again
    assert!(!registry.execute("broken", &[]).await.is_success());
}
