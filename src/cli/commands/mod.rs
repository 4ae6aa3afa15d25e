//! CLI argument definitions and dispatch.
//!
//! The tool has a single job, so there are no subcommands: the positional
//! path and `--resource` are required, everything else tunes the run.
//! The tagging pipeline lives in `tag`.

mod tag;

use clap::Parser;
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};

pub use tag::{TagArgs, cmd_tag};

/// Album Tagger CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory where the album's files are, or a single audio file
    pub directory_or_file: PathBuf,

    /// Resource URI of the release (e.g. https://api.discogs.com/releases/249504)
    #[arg(short, long)]
    pub resource: String,

    /// Rename files from a template; %no is the track position, %track the title
    #[arg(long)]
    pub rename: Option<String>,

    /// Passes over unconfirmed tracks before giving up
    #[arg(long)]
    pub max_passes: Option<u32>,

    /// Accept every proposed match without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Match and show planned changes without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Consider every file in the directory, not only known audio extensions
    #[arg(long)]
    pub all_files: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, env = "ALBUM_TAGGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Discogs personal access token
    #[arg(long, env = "DISCOGS_TOKEN", hide_env_values = true)]
    pub discogs_token: Option<String>,
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load(),
        };

        if let Some(max_passes) = self.max_passes {
            config.matching.max_passes = max_passes;
        }
        if self.all_files {
            config.scan.filter_extensions = false;
        }
        if let Some(token) = &self.discogs_token {
            config.credentials.discogs_token = Some(token.clone());
        }
        Ok(config)
    }
}

/// Run the command described by `cli`.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    let rt = Runtime::new()?;

    let args = TagArgs {
        path: cli.directory_or_file.clone(),
        resource: cli.resource.clone(),
        rename: cli.rename.clone(),
        assume_yes: cli.yes,
        dry_run: cli.dry_run,
    };
    cmd_tag(&rt, &config, &args)
}
