//! Error types for the workout agent.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for workout agent operations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Configuration errors (invalid config file, bad values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Plugin errors (unreadable manifest, failed construction, etc.)
    #[error("Plugin error: {0}")]
    Plugin(String),

    /// Command errors raised while a command executes.
    #[error("Command error: {0}")]
    Command(String),

    /// LLM API errors (rate limits, auth, timeouts, etc.)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Terminal I/O errors.
    #[error("I/O error: {0}")]
    Io(String),
}

impl AgentError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a plugin error with the given message.
    pub fn plugin(msg: impl Into<String>) -> Self {
        Self::Plugin(msg.into())
    }

    /// Creates a command error with the given message.
    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }

    /// Creates an LLM error with the given message.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Plugin(_) => "Plugin Error",
            Self::Command(_) => "Command Error",
            Self::Llm(_) => "LLM Error",
            Self::Io(_) => "I/O Error",
        }
    }
}

impl From<std::io::Error> for AgentError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias using AgentError.
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let err = AgentError::config("unknown field `promt` in [repl]");
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown field `promt` in [repl]"
        );
        assert_eq!(err.category(), "Configuration Error");
    }

    #[test]
    fn test_error_display_plugin() {
        let err = AgentError::plugin("missing plugin.toml");
        assert_eq!(err.to_string(), "Plugin error: missing plugin.toml");
        assert_eq!(err.category(), "Plugin Error");
    }

    #[test]
    fn test_error_display_command() {
        let err = AgentError::command("Invalid input for fitness history: nap");
        assert_eq!(
            err.to_string(),
            "Command error: Invalid input for fitness history: nap"
        );
        assert_eq!(err.category(), "Command Error");
    }

    #[test]
    fn test_error_display_llm() {
        let err = AgentError::llm("Rate limited. Please wait.");
        assert_eq!(err.to_string(), "LLM error: Rate limited. Please wait.");
        assert_eq!(err.category(), "LLM Error");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: AgentError = io.into();
        assert!(matches!(err, AgentError::Io(ref msg) if msg == "pipe closed"));
        assert_eq!(err.category(), "I/O Error");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AgentError>();
    }
}
