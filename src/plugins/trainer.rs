//! LLM-backed personal trainer agent.

use async_trait::async_trait;
use tracing::info;

use super::{ConstructionError, Plugin};
use crate::commands::{Command, CommandContext, CommandOutput};
use crate::config::Config;
use crate::error::Result;
use crate::llm::{create_client, Conversation, LlmClient, Message};

const TRAINER_PROMPT: &str = "You are a highly knowledgeable personal trainer who creates \
personalized workout plans. Use the person's age, height, weight, goals and physical limitations \
when they are given, and ask for whatever is missing. Keep plans safe, progressive and concise, \
laid out day by day.";

const USAGE: &str = "Usage: fitness_trainer <describe yourself and your goals>\n\
Example: fitness_trainer 34 years, 180cm, 82kg, want to get stronger, bad left knee";

/// Rough token estimate: one token per four characters, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// `fitness_trainer`: asks the language model for a workout plan.
pub struct FitnessTrainerAgent {
    client: Box<dyn LlmClient>,
    history: Conversation,
}

impl FitnessTrainerAgent {
    /// Creates the agent around an already-built client.
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self {
            client,
            history: Conversation::new(),
        }
    }

    /// Prior exchanges sent along as context.
    pub fn history(&self) -> &Conversation {
        &self.history
    }

    fn build_messages(&self, request: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.history.messages().len() + 2);
        messages.push(Message::system(TRAINER_PROMPT));
        messages.extend_from_slice(self.history.messages());
        messages.push(Message::user(request));
        messages
    }
}

#[async_trait]
impl Command for FitnessTrainerAgent {
    fn name(&self) -> &str {
        "fitness_trainer"
    }

    fn description(&self) -> &str {
        "A knowledgeable personal trainer that creates personalized workout plans."
    }

    async fn execute(
        &mut self,
        _ctx: &CommandContext<'_>,
        args: &[String],
    ) -> Result<CommandOutput> {
        if args.is_empty() {
            return Ok(CommandOutput::text(USAGE));
        }

        let request = args.join(" ");
        let messages = self.build_messages(&request);
        let response = self.client.complete(&messages).await?;

        let tokens_used = estimate_tokens(&format!("{TRAINER_PROMPT}{request}{response}"));
        info!("LLM call made. Tokens used: {}", tokens_used);

        self.history.add_exchange(request, response.clone());

        Ok(CommandOutput::multiple(vec![
            CommandOutput::text(format!("Fitness Trainer Agent:\n{response}")),
            CommandOutput::text(format!("This interaction used {tokens_used} tokens.")),
        ]))
    }
}

/// Provides `fitness_trainer` with a client built from `llm.*`.
#[derive(Debug, Default)]
pub struct TrainerPlugin;

impl Plugin for TrainerPlugin {
    fn name(&self) -> &str {
        "trainer"
    }

    fn provide_commands(
        &self,
        config: &Config,
    ) -> Vec<std::result::Result<Box<dyn Command>, ConstructionError>> {
        let command = create_client(&config.llm)
            .map(|client| Box::new(FitnessTrainerAgent::new(client)) as Box<dyn Command>)
            .map_err(|e| ConstructionError::new("fitness_trainer", e));
        vec![command]
    }
}
