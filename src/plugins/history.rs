//! In-memory workout history.
//!
//! `fitness_history` keeps the sessions logged during this process. Nothing
//! is persisted.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use super::{ConstructionError, Plugin};
use crate::commands::{Command, CommandContext, CommandOutput};
use crate::config::Config;
use crate::error::{AgentError, Result};

const USAGE: &str = "Usage: fitness_history [summary | last | add <minutes> <calories> [activity...]]";

/// A single logged workout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutSession {
    /// What was done (e.g. "running"), if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    /// Session length in minutes.
    pub duration_minutes: u32,
    /// Estimated calories burned.
    pub calories_burned: u32,
    /// When the session was recorded.
    pub timestamp: DateTime<Local>,
}

/// Aggregate view over all sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub total_sessions: usize,
    pub total_time_spent: u64,
    pub total_calories_burned: u64,
}

/// `fitness_history`: add to and query the session history.
#[derive(Debug, Default)]
pub struct FitnessHistory {
    user_id: Option<String>,
    history: Vec<WorkoutSession>,
}

impl FitnessHistory {
    /// Creates an empty history, optionally tagged with a user id.
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            user_id,
            history: Vec::new(),
        }
    }

    /// Returns the user this history belongs to.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Appends a session stamped with the current local time.
    pub fn add_workout_session(
        &mut self,
        duration_minutes: u32,
        calories_burned: u32,
        activity: Option<String>,
    ) -> &WorkoutSession {
        let session = WorkoutSession {
            activity,
            duration_minutes,
            calories_burned,
            timestamp: Local::now(),
        };
        info!(
            "User {}: Added workout session to history: {} min, {} kcal",
            self.user_id.as_deref().unwrap_or("anonymous"),
            session.duration_minutes,
            session.calories_burned
        );
        self.history.push(session);
        &self.history[self.history.len() - 1]
    }

    pub fn last_session(&self) -> Option<&WorkoutSession> {
        self.history.last()
    }

    pub fn sessions(&self) -> &[WorkoutSession] {
        &self.history
    }

    /// Totals across every recorded session.
    pub fn summarize(&self) -> HistorySummary {
        HistorySummary {
            total_sessions: self.history.len(),
            total_time_spent: self
                .history
                .iter()
                .map(|s| u64::from(s.duration_minutes))
                .sum(),
            total_calories_burned: self
                .history
                .iter()
                .map(|s| u64::from(s.calories_burned))
                .sum(),
        }
    }

    fn parse_add(args: &[String]) -> Result<(u32, u32, Option<String>)> {
        let (minutes, calories) = match args {
            [minutes, calories, ..] => (minutes, calories),
            _ => {
                return Err(AgentError::command(format!(
                    "No session data provided for 'add'. {USAGE}"
                )))
            }
        };

        let minutes = minutes.parse::<u32>().map_err(|_| {
            AgentError::command(format!("Invalid duration '{minutes}', expected whole minutes"))
        })?;
        let calories = calories.parse::<u32>().map_err(|_| {
            AgentError::command(format!("Invalid calories '{calories}', expected a whole number"))
        })?;
        let activity = if args.len() > 2 {
            Some(args[2..].join(" "))
        } else {
            None
        };

        Ok((minutes, calories, activity))
    }
}

#[async_trait]
impl Command for FitnessHistory {
    fn name(&self) -> &str {
        "fitness_history"
    }

    fn description(&self) -> &str {
        "Interact with your fitness history to track your progress."
    }

    async fn execute(
        &mut self,
        _ctx: &CommandContext<'_>,
        args: &[String],
    ) -> Result<CommandOutput> {
        let action = args.first().map(|s| s.to_lowercase());

        match action.as_deref() {
            None | Some("summary") => Ok(CommandOutput::data(&self.summarize())),
            Some("last") => Ok(match self.last_session() {
                Some(session) => CommandOutput::data(session),
                None => CommandOutput::text("No workout sessions recorded yet."),
            }),
            Some("add") => {
                let (minutes, calories, activity) = Self::parse_add(&args[1..])?;
                let session = self.add_workout_session(minutes, calories, activity);
                Ok(CommandOutput::text(format!(
                    "Logged {} minute session ({} kcal).",
                    session.duration_minutes, session.calories_burned
                )))
            }
            Some(other) => Err(AgentError::command(format!(
                "Invalid input for fitness history: {other}. {USAGE}"
            ))),
        }
    }
}

/// Provides `fitness_history`, tagged with `user.id` when configured.
#[derive(Debug, Default)]
pub struct HistoryPlugin;

impl Plugin for HistoryPlugin {
    fn name(&self) -> &str {
        "history"
    }

    fn provide_commands(
        &self,
        config: &Config,
    ) -> Vec<std::result::Result<Box<dyn Command>, ConstructionError>> {
        vec![Ok(Box::new(FitnessHistory::new(config.user.id.clone())))]
    }
}
