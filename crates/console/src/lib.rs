//! `autocatalog-console`
//!
//! **Responsibility:** the operator-facing command line over the client
//! crate. Argument parsing, guard-gated command execution, output rendering.

pub mod cli;
pub mod commands;
pub mod input;

pub use cli::{Cli, Command};
pub use commands::{Output, execute};
