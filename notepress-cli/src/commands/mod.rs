//! Command implementations for notepress CLI

pub mod convert;
pub mod migrate;
pub mod pages;
pub mod push;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notepress_core::{Config, Note};

// Re-export dispatcher functions for flat access from main.rs
pub use convert::run_convert;
pub use migrate::run_migrate_images;
pub use pages::{run_pages, run_related};
pub use push::run_push;
pub use sync::run_sync;

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub vault: Option<PathBuf>,
}

impl GlobalArgs {
    /// Load config and apply the --vault override
    pub fn load_config(&self) -> Result<Config> {
        let mut config =
            Config::load(self.config.as_deref()).context("failed to load configuration")?;
        if let Some(vault) = &self.vault {
            config.paths.vault = vault.clone();
        }
        Ok(config)
    }
}

/// A note argument is either a path or a note title in the notes directory
pub fn resolve_note_path(arg: &str, config: &Config) -> PathBuf {
    let as_path = Path::new(arg);
    if as_path.is_file() {
        return as_path.to_path_buf();
    }
    config.notes_dir().join(format!("{arg}.md"))
}

pub fn load_note(arg: &str, config: &Config) -> Result<Note> {
    let path = resolve_note_path(arg, config);
    Note::from_file(&path).with_context(|| format!("failed to read note {}", path.display()))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("failed to serialize output")?
    );
    Ok(())
}
