//! Convert every note in the notes directory

use anyhow::{Context, Result};
use clap::Parser;
use notepress_core::sync::note_paths;
use notepress_core::{sync_directory, SyncOptions};
use std::path::PathBuf;

use super::{print_json, GlobalArgs};
use crate::ui;

#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Only convert notes with `published: true`
    #[arg(long)]
    published_only: bool,

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

pub fn run_sync(args: SyncArgs, globals: &GlobalArgs) -> Result<()> {
    let mut config = globals.load_config()?;
    if let Some(output) = args.output {
        config.paths.content = output;
    }

    let total = note_paths(&config.notes_dir())
        .with_context(|| format!("failed to list notes in {}", config.notes_dir().display()))?
        .len();
    let pb = if args.json {
        None
    } else {
        ui::progress_bar(total as u64, "Syncing notes")
    };

    let options = SyncOptions {
        dry_run: args.dry_run,
        published_only: args.published_only,
    };
    let result = sync_directory(&config, options, |path| {
        if let Some(pb) = &pb {
            pb.set_message(
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
            pb.inc(1);
        }
    });

    let report = match result {
        Ok(report) => report,
        Err(err) => {
            ui::finish_clear(pb);
            return Err(err).context("sync aborted");
        }
    };

    if args.json {
        return print_json(&report);
    }

    ui::finish_success(pb, format!("{} notes synced", report.published.len()));
    for published in &report.published {
        println!("✓ {} -> {}", published.note, published.destination.display());
    }
    for skipped in &report.skipped {
        println!("- {} (not published)", skipped);
    }

    Ok(())
}
