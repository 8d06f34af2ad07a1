//! LLM client factory.
//!
//! Centralizes provider-specific logic for creating LLM clients.

use crate::config::LlmConfig;
use crate::error::{AgentError, Result};
use crate::llm::{LlmClient, LlmProvider, MockLlmClient, OpenAiClient, OpenAiConfig};
use tracing::debug;

/// Creates an LLM client for the configured provider.
///
/// Environment overrides have already been folded into `config` by the time
/// this is called, so the API key is read from the config only.
pub fn create_client(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    let provider: LlmProvider = config.provider.parse().map_err(AgentError::config)?;

    match provider {
        LlmProvider::OpenAi => {
            let key = config
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| {
                    AgentError::llm("No API key configured. Set OPENAI_API_KEY or llm.api_key.")
                })?;
            let client = OpenAiClient::new(OpenAiConfig::new(key, config.model.clone()))?;
            debug!("Created OpenAI client for model {}", client.model());
            Ok(Box::new(client))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}
