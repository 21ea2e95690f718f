//! One-off migration for posts published before asset renaming existed:
//! renames asset files containing spaces and fixes their `(./...)`
//! references in `index.md`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{NoteError, Result};
use crate::publish::INDEX_FILE;
use crate::slug::asset_output_name;

#[derive(Debug, Clone, Serialize)]
pub struct RenamedAsset {
    pub post: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    pub renamed: Vec<RenamedAsset>,
    pub posts_updated: Vec<String>,
    pub dry_run: bool,
}

/// Migrate every post directory under `content_dir`
pub fn migrate_images(content_dir: &Path, dry_run: bool) -> Result<MigrationReport> {
    let mut report = MigrationReport {
        dry_run,
        ..Default::default()
    };

    for post_dir in sorted_entries(content_dir)? {
        if !post_dir.is_dir() {
            continue;
        }
        migrate_post(&post_dir, dry_run, &mut report)?;
    }

    info!(
        "renamed {} assets across {} posts",
        report.renamed.len(),
        report.posts_updated.len()
    );
    Ok(report)
}

fn migrate_post(post_dir: &Path, dry_run: bool, report: &mut MigrationReport) -> Result<()> {
    let entries = sorted_entries(post_dir)?;
    if entries.is_empty() {
        return Ok(());
    }

    let index = post_dir.join(INDEX_FILE);
    if !index.is_file() {
        warn!("skipping {} (no {})", post_dir.display(), INDEX_FILE);
        return Ok(());
    }

    let post = post_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let original = fs::read_to_string(&index).map_err(|e| NoteError::io(&index, e))?;
    let mut markdown = original.clone();

    for path in entries {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if name == INDEX_FILE || !path.is_file() {
            continue;
        }

        let new_name = asset_output_name(&name);
        if new_name == name {
            continue;
        }

        if !dry_run {
            fs::rename(&path, post_dir.join(&new_name)).map_err(|e| NoteError::io(&path, e))?;
        }
        markdown = markdown.replace(&format!("(./{name})"), &format!("(./{new_name})"));
        report.renamed.push(RenamedAsset {
            post: post.clone(),
            from: name,
            to: new_name,
        });
    }

    if markdown != original {
        if !dry_run {
            fs::write(&index, &markdown).map_err(|e| NoteError::io(&index, e))?;
        }
        report.posts_updated.push(post);
    }

    Ok(())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| NoteError::io(dir, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    entries.sort();
    Ok(entries)
}
