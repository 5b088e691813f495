//! Tooling
//!
//! Command-line access to the analysis engine.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
