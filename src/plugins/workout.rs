//! Workout session start/end commands.

use async_trait::async_trait;

use super::{ConstructionError, Plugin};
use crate::commands::{Command, CommandContext, CommandOutput};
use crate::config::Config;
use crate::error::Result;

/// Printed when a workout session starts.
pub const WORKOUT_STARTED: &str = "Workout session has started! Let's do some exercises.";

/// Printed when a workout session ends.
pub const WORKOUT_ENDED: &str = "Workout session has ended. Great job!";

/// `start_workout`: announces the start of a session.
#[derive(Debug, Default)]
pub struct StartWorkoutCommand;

#[async_trait]
impl Command for StartWorkoutCommand {
    fn name(&self) -> &str {
        "start_workout"
    }

    fn description(&self) -> &str {
        "Start a new workout session"
    }

    async fn execute(
        &mut self,
        _ctx: &CommandContext<'_>,
        _args: &[String],
    ) -> Result<CommandOutput> {
        Ok(CommandOutput::text(WORKOUT_STARTED))
    }
}

/// `end_workout`: announces the end of a session.
#[derive(Debug, Default)]
pub struct EndWorkoutCommand;

#[async_trait]
impl Command for EndWorkoutCommand {
    fn name(&self) -> &str {
        "end_workout"
    }

    fn description(&self) -> &str {
        "End the current workout session"
    }

    async fn execute(
        &mut self,
        _ctx: &CommandContext<'_>,
        _args: &[String],
    ) -> Result<CommandOutput> {
        Ok(CommandOutput::text(WORKOUT_ENDED))
    }
}

/// Provides `start_workout` and `end_workout`.
#[derive(Debug, Default)]
pub struct WorkoutPlugin;

impl Plugin for WorkoutPlugin {
    fn name(&self) -> &str {
        "workout"
    }

    fn provide_commands(
        &self,
        _config: &Config,
    ) -> Vec<std::result::Result<Box<dyn Command>, ConstructionError>> {
        vec![
            Ok(Box::new(StartWorkoutCommand)),
            Ok(Box::new(EndWorkoutCommand)),
        ]
    }
}
