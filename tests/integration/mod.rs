//! End-to-end tests over the public API and the built binary.

pub mod cli_test;
pub mod common;
pub mod loader_test;
pub mod registry_test;
pub mod repl_test;
