//! Rename legacy post assets containing spaces

use anyhow::{Context, Result};
use clap::Parser;
use notepress_core::migrate_images;
use std::path::PathBuf;

use super::{print_json, GlobalArgs};

#[derive(Parser, Debug)]
pub struct MigrateImagesArgs {
    /// Content directory (default: paths.content)
    #[arg(long, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Preview renames without touching files
    #[arg(long)]
    dry_run: bool,

    /// Output JSON instead of human-readable format
    #[arg(long)]
    json: bool,
}

pub fn run_migrate_images(args: MigrateImagesArgs, globals: &GlobalArgs) -> Result<()> {
    let content_dir = match args.content {
        Some(dir) => dir,
        None => globals.load_config()?.paths.content,
    };

    let report = migrate_images(&content_dir, args.dry_run)
        .with_context(|| format!("failed to migrate images in {}", content_dir.display()))?;

    if args.json {
        return print_json(&report);
    }

    if report.renamed.is_empty() {
        println!("Nothing to rename in {}", content_dir.display());
        return Ok(());
    }

    let verb = if report.dry_run { "would rename" } else { "renamed" };
    for renamed in &report.renamed {
        println!("  {}: {} {} -> {}", renamed.post, verb, renamed.from, renamed.to);
    }
    println!(
        "✓ {} assets across {} posts",
        report.renamed.len(),
        report.posts_updated.len()
    );

    Ok(())
}
