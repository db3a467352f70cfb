//! Main CLI application structure

use anyhow::Result;
use clap::Parser;

use super::output::{Output, OutputFormat};
use crate::config::COMPLETION_MESSAGE;
use crate::domain::VersionStamp;
use crate::storage::{stamp_manifest, Repository};

#[derive(Parser)]
#[command(name = "refresh-package-version")]
#[command(author, version, about = "Stamps the Mile.HyperV NuGet manifest with today's package version")]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Refreshing package version");

    let repository = Repository::discover()?;
    output.verbose_ctx("repository", &format!("Root: {}", repository.root().display()));

    refresh(&output, &repository, &VersionStamp::today())?;

    output.verbose("Command completed successfully");
    Ok(())
}

/// Stamps the repository's manifest with `stamp` and reports the result
pub fn refresh(output: &Output, repository: &Repository, stamp: &VersionStamp) -> Result<()> {
    let manifest_path = repository.manifest_path();
    output.verbose_ctx("manifest", &format!("Path: {}", manifest_path.display()));
    output.verbose_ctx("version", &format!("Computed {} ({} days since epoch)", stamp, stamp.days()));

    let outcome = stamp_manifest(&manifest_path, &stamp.to_string())?;

    match (&outcome.previous_version, outcome.applied) {
        (Some(previous), true) => {
            output.verbose_ctx("manifest", &format!("Version {} -> {}", previous, outcome.version));
        }
        _ => {
            output.verbose_ctx("manifest", "No package/metadata/version element, file left unchanged");
        }
    }

    output.success(COMPLETION_MESSAGE);
    output.data(&outcome);

    Ok(())
}
