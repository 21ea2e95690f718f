/// Structured error types for notepress-core library.
///
/// Uses `thiserror` so library consumers can match on failures.
/// The notepress binary wraps these in `anyhow` at command boundaries.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for notepress-core operations
#[derive(Error, Debug)]
pub enum NoteError {
    /// I/O operation failed on a known path
    #[error("I/O error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// Note has no `---` delimited frontmatter block
    #[error("No frontmatter found in {context} - expected a block delimited by --- lines")]
    MissingFrontmatter { context: String },

    /// Opening `---` found but never closed
    #[error("Unclosed frontmatter in {context} - missing second ---")]
    UnclosedFrontmatter { context: String },

    /// Embedded asset missing from the vault's assets directory
    #[error("Asset '{name}' not found at {path:?}")]
    AssetMissing { name: String, path: PathBuf },

    /// Two embeds would be copied to the same output file
    #[error("Assets '{first}' and '{second}' both publish as '{output_name}'")]
    AssetCollision {
        first: String,
        second: String,
        output_name: String,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote API answered with a non-success status
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// JSON serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },
}

/// Result type alias for notepress-core operations
pub type Result<T> = std::result::Result<T, NoteError>;

impl NoteError {
    /// Create an I/O error tagged with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing_frontmatter(context: impl Into<String>) -> Self {
        Self::MissingFrontmatter {
            context: context.into(),
        }
    }

    pub fn unclosed_frontmatter(context: impl Into<String>) -> Self {
        Self::UnclosedFrontmatter {
            context: context.into(),
        }
    }

    pub fn asset_missing(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::AssetMissing {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn asset_collision(
        first: impl Into<String>,
        second: impl Into<String>,
        output_name: impl Into<String>,
    ) -> Self {
        Self::AssetCollision {
            first: first.into(),
            second: second.into(),
            output_name: output_name.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// True for the two frontmatter failures, which abort a conversion run
    pub fn is_frontmatter(&self) -> bool {
        matches!(
            self,
            Self::MissingFrontmatter { .. } | Self::UnclosedFrontmatter { .. }
        )
    }
}
