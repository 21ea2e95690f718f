//! Batch publishing of every note in the vault's notes directory

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{NoteError, Result};
use crate::note::Note;
use crate::publish::{publish_local, PublishReport};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    pub dry_run: bool,
    /// Skip notes whose frontmatter is not `published: true`
    pub published_only: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub published: Vec<PublishReport>,
    pub skipped: Vec<String>,
}

/// Markdown notes under `dir`, sorted by path
pub fn note_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| NoteError::io(dir, e.into()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            paths.push(path.to_path_buf());
        }
    }

    Ok(paths)
}

/// Publish every note locally, one at a time.
///
/// `on_note` is called before each note is processed. The first failure
/// aborts the run; output already written stays in place.
pub fn sync_directory(
    config: &Config,
    options: SyncOptions,
    mut on_note: impl FnMut(&Path),
) -> Result<SyncReport> {
    let notes_dir = config.notes_dir();
    let paths = note_paths(&notes_dir)?;
    info!("syncing {} notes from {}", paths.len(), notes_dir.display());

    let mut report = SyncReport::default();

    for path in paths {
        on_note(&path);
        let note = Note::from_file(&path)?;

        if options.published_only && !note.frontmatter.published {
            warn!("skipping unpublished note {}", note.id);
            report.skipped.push(note.id);
            continue;
        }

        report
            .published
            .push(publish_local(&note, config, options.dry_run)?);
    }

    Ok(report)
}
