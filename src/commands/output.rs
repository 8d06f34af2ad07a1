//! Transport-agnostic command output types.
//!
//! Commands describe what they produced instead of printing it. The REPL
//! renders these to its writer; tests inspect them directly.

use serde::Serialize;

/// Output from a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// The command produced nothing to display.
    None,

    /// Human-readable text.
    Text(String),

    /// Structured data (e.g., a history summary).
    Data(serde_json::Value),

    /// Multiple outputs (for commands that produce several messages).
    Multiple(Vec<CommandOutput>),
}

impl CommandOutput {
    /// Creates a text output.
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    /// Creates a data output from any serializable value.
    ///
    /// Values that cannot be represented as JSON collapse to `null`.
    pub fn data<T: Serialize>(value: &T) -> Self {
        Self::Data(serde_json::to_value(value).unwrap_or(serde_json::Value::Null))
    }

    /// Creates a multiple output from a vector.
    pub fn multiple(outputs: Vec<CommandOutput>) -> Self {
        Self::Multiple(outputs)
    }

    /// Renders the output as display text, one block per line.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Text(text) => Some(text.clone()),
            Self::Data(value) => {
                Some(serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()))
            }
            Self::Multiple(outputs) => {
                let parts: Vec<String> = outputs.iter().filter_map(Self::render).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("\n"))
                }
            }
        }
    }

    /// Returns the text content if this is a text output.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}
