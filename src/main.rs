use anyhow::{Context, Result};
use clap::Parser;
use std::io;

use shrinker::cli::args::{Cli, OutputFormat};
use shrinker::cli::output;
use shrinker::common::config::FileConfig;
use shrinker::{CancelToken, Shrinker};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("shrinker=debug")
            .with_writer(io::stderr)
            .init();
    }

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::load_default()?,
    };

    let format = cli.format;
    let config = cli.into_config(file_config);
    let shrinker = Shrinker::new(&config).context("Cannot start cleanup")?;
    let cancel = CancelToken::new();

    if format == OutputFormat::Human {
        output::print_start(shrinker.root(), shrinker.is_dry_run());
    }

    // Only a human-readable run gets the tree listing
    let result = if format == OutputFormat::Human {
        shrinker.run(&cancel, io::stdout().lock())
    } else {
        shrinker.run(&cancel, io::sink())
    };
    let stats =
        result.with_context(|| format!("Cleanup of {} failed", shrinker.root().display()))?;

    tracing::info!("done: {}", output::describe(&stats));

    match format {
        OutputFormat::Human => output::print_summary(&stats, shrinker.is_dry_run()),
        OutputFormat::Json => {
            output::print_summary_json(&stats, shrinker.root(), shrinker.is_dry_run())
        }
        OutputFormat::Quiet => output::print_summary_quiet(&stats),
    }

    Ok(())
}
