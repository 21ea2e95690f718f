//! Static-site output: one directory per post holding `index.md` and the
//! copied assets.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::assets::resolve_assets;
use crate::config::Config;
use crate::error::{NoteError, Result};
use crate::note::Note;
use crate::rewrite::to_local_markdown;

pub const INDEX_FILE: &str = "index.md";

/// What a local publish did (or would do, in dry-run mode)
#[derive(Debug, Clone, Serialize)]
pub struct PublishReport {
    pub note: String,
    pub destination: PathBuf,
    pub index_file: PathBuf,
    pub assets: Vec<CopiedAsset>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopiedAsset {
    pub name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Markdown written to `index.md`: original frontmatter block plus the
/// rewritten body
pub fn render_index(note: &Note, config: &Config) -> String {
    let assets = resolve_assets(note.body(), config);
    let body = to_local_markdown(note.body(), &config.convert.scratchpad_marker, &assets);
    format!("{}{}", note.frontmatter_block(), body)
}

/// Publish `note` under `config.paths.content`.
///
/// Creates the post directory, copies every embedded asset, then writes
/// `index.md`. A missing asset, or two assets sharing an output name, aborts
/// before anything is written.
pub fn publish_local(note: &Note, config: &Config, dry_run: bool) -> Result<PublishReport> {
    let destination = config.content_dir().join(note.slug());
    let index_file = destination.join(INDEX_FILE);
    let assets = resolve_assets(note.body(), config);
    if let Some((first, second)) = assets.find_collision() {
        return Err(NoteError::asset_collision(
            &first.name,
            &second.name,
            &second.output_name,
        ));
    }

    let copied: Vec<CopiedAsset> = assets
        .iter()
        .map(|asset| CopiedAsset {
            name: asset.name.clone(),
            source: asset.source.clone(),
            destination: destination.join(&asset.output_name),
        })
        .collect();

    for asset in &copied {
        if !asset.source.is_file() {
            return Err(NoteError::asset_missing(&asset.name, &asset.source));
        }
    }

    let report = PublishReport {
        note: note.id.clone(),
        destination: destination.clone(),
        index_file: index_file.clone(),
        assets: copied,
        dry_run,
    };

    if dry_run {
        info!(
            "dry run: {} -> {} ({} assets)",
            note.id,
            destination.display(),
            report.assets.len()
        );
        return Ok(report);
    }

    create_dir(&destination)?;

    for asset in &report.assets {
        debug!("copying {} -> {}", asset.source.display(), asset.destination.display());
        if let Some(parent) = asset.destination.parent() {
            create_dir(parent)?;
        }
        fs::copy(&asset.source, &asset.destination)
            .map_err(|e| NoteError::io(&asset.source, e))?;
    }

    let markdown = render_index(note, config);
    fs::write(&index_file, markdown).map_err(|e| NoteError::io(&index_file, e))?;

    info!("published {} -> {}", note.id, destination.display());
    Ok(report)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| NoteError::io(path, e))
}
