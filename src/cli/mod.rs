//! Command-line interface for album-tagger.
//!
//! This module parses arguments, asks the operator to confirm proposed
//! matches on the console and runs the fetch → match → tag pipeline.

mod commands;
pub mod prompt;

pub use commands::{Cli, run_command};
