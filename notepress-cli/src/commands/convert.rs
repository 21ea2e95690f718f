//! Convert a single note into a post directory

use anyhow::{Context, Result};
use clap::Parser;
use notepress_core::publish_local;
use std::path::PathBuf;
use tracing::info;

use super::{load_note, print_json, GlobalArgs};

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Note path, or note title inside the notes directory
    #[arg(value_name = "NOTE")]
    note: String,

    /// Output root for post directories (default: paths.content)
    #[arg(long = "out", value_name = "DIR")]
    output: Option<PathBuf>,

    /// Preview without writing files
    #[arg(long)]
    dry_run: bool,

    /// Output JSON instead of human-readable format
    #[arg(long)]
    json: bool,
}

pub fn run_convert(args: ConvertArgs, globals: &GlobalArgs) -> Result<()> {
    let mut config = globals.load_config()?;
    if let Some(output) = args.output {
        config.paths.content = output;
    }

    let note = load_note(&args.note, &config)?;
    info!("converting '{}' -> {}", note.id, config.content_dir().display());

    let report = publish_local(&note, &config, args.dry_run)
        .with_context(|| format!("failed to convert '{}'", note.id))?;

    if args.json {
        return print_json(&report);
    }

    let verb = if report.dry_run { "Would write" } else { "Wrote" };
    println!("✓ {} {}", verb, report.index_file.display());
    for asset in &report.assets {
        println!("  {} -> {}", asset.name, asset.destination.display());
    }

    Ok(())
}
