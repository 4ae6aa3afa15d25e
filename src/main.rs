//! Album Tagger - match a release's tracklist to local audio files and tag them.
//!
//! Fetches album metadata from a remote catalog, proposes a file for every
//! track by title and duration similarity, asks for confirmation and writes
//! the confirmed metadata into each file's tags, optionally renaming files.

pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod metadata;
pub mod model;
pub mod organizer;
pub mod scanner;
pub mod source;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging; stdout is reserved for prompts and reports
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("album_tagger=info".parse()?))
        .init();

    cli::run_command(&args)
}
