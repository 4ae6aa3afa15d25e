//! The tagging command: fetch a release, match it to files, write tags.

use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::cli::prompt::{ConsolePrompt, format_seconds};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::matching::{AcceptAll, AssignOptions, Assignment, Confirm, assign};
use crate::model::Candidate;
use crate::organizer::{self, ApplyOptions, ApplyReport};
use crate::scanner;
use crate::source::{Release, SourceRegistry};

/// Arguments of one tagging run.
#[derive(Debug, Clone)]
pub struct TagArgs {
    pub path: PathBuf,
    pub resource: String,
    pub rename: Option<String>,
    pub assume_yes: bool,
    pub dry_run: bool,
}

/// Fetch, match, confirm and tag.
pub fn cmd_tag(rt: &Runtime, config: &Config, args: &TagArgs) -> anyhow::Result<()> {
    let registry = SourceRegistry::with_defaults(config)?;

    // Unclaimed resources and missing paths fail before any network traffic
    registry.resolve(&args.resource)?;
    if !args.path.exists() {
        return Err(Error::not_found(&args.path).into());
    }

    let release = rt.block_on(registry.fetch(&args.resource))?;
    print_release(&release);

    let candidates = scanner::candidates(&args.path, &config.scan)?;
    tracing::debug!(candidates = %describe_candidates(&candidates), "Candidate pool");
    let options = AssignOptions {
        max_passes: config.matching.max_passes,
    };

    let assignment = if args.assume_yes {
        match_release(&release, candidates, options, &mut AcceptAll)?
    } else {
        match_release(&release, candidates, options, &mut ConsolePrompt::stdio())?
    };

    if args.dry_run {
        println!("\n[DRY RUN MODE - No files will be changed]\n");
    }

    let apply_options = ApplyOptions {
        rename: args.rename.clone(),
        dry_run: args.dry_run,
    };
    let report = organizer::apply_assignment(&release.album, &assignment, &apply_options);
    print_report(&report, args.dry_run);

    if report.error_count() > 0 {
        anyhow::bail!(
            "{} of {} files could not be updated",
            report.error_count(),
            report.outcomes.len()
        );
    }
    Ok(())
}

/// Pair every track of `release` with one of `candidates`.
pub fn match_release(
    release: &Release,
    candidates: Vec<Candidate>,
    options: AssignOptions,
    confirm: &mut impl Confirm,
) -> Result<Assignment> {
    assign(release.tracks.clone(), candidates, options, confirm)
}

fn print_release(release: &Release) {
    let album = &release.album;
    println!("Album:   {}", album.title);
    println!("Artists: {}", album.artist_string());
    println!("Genres:  {}", album.genre_string());
    println!("Year:    {}", album.year);
    println!("Tracks:  {}", album.tracktotal);
    for track in &release.tracks {
        println!("  {:>4}  {}  ({})", track.position, track.title, track.duration);
    }
}

fn print_report(report: &ApplyReport, dry_run: bool) {
    for outcome in &report.outcomes {
        match &outcome.error {
            None => {
                let verb = if dry_run { "WOULD TAG" } else { "TAGGED" };
                println!("{}: {}", verb, outcome.path.display());
                for change in &outcome.changes {
                    println!(
                        "    {}: {:?} -> {:?}",
                        change.field, change.current_value, change.new_value
                    );
                }
                if let Some(new_path) = &outcome.new_path {
                    let verb = if dry_run { "WOULD MOVE" } else { "MOVED" };
                    println!("  {}: -> {}", verb, new_path.display());
                }
            }
            Some(e) => eprintln!("ERROR tagging {}: {}", outcome.path.display(), e),
        }
    }

    println!(
        "\nCompleted: {} successful, {} errors",
        report.success_count(),
        report.error_count()
    );
}

/// Candidate names with their durations, for logs.
fn describe_candidates(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| format!("{} ({})", c.display_name, format_seconds(c.duration_seconds)))
        .collect::<Vec<_>>()
        .join(", ")
}
