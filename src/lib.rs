//! Workout agent - a plugin-based command REPL.
//!
//! This library exposes the core modules for use in integration tests.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod plugins;
pub mod repl;
