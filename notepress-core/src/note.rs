use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NoteError, Result};
use crate::frontmatter::{split_frontmatter, Frontmatter};
use crate::slug::slugify;

/// A vault note with its frontmatter already parsed
#[derive(Debug, Clone)]
pub struct Note {
    /// Filename stem, e.g. `Reading a Ruby gem with VSCode`
    pub id: String,
    pub source: Option<PathBuf>,
    pub frontmatter: Frontmatter,
    frontmatter_block: String,
    body: String,
}

impl Note {
    /// Parse raw note text. Fails when the frontmatter block is absent.
    pub fn parse(id: impl Into<String>, content: &str) -> Result<Self> {
        let id = id.into();
        let block = split_frontmatter(content, &id)?;

        Ok(Self {
            frontmatter: Frontmatter::from_block(block.inner),
            frontmatter_block: block.block.to_string(),
            body: block.body.to_string(),
            source: None,
            id,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| NoteError::io(path, e))?;
        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| NoteError::config(format!("not a note file: {}", path.display())))?;

        let mut note = Self::parse(id, &content)?;
        note.source = Some(path.to_path_buf());
        Ok(note)
    }

    /// Frontmatter block exactly as written, delimiters included
    pub fn frontmatter_block(&self) -> &str {
        &self.frontmatter_block
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Output directory name, derived from the filename
    pub fn slug(&self) -> String {
        slugify(&self.id)
    }

    /// Frontmatter title, or the note id when the title is empty
    pub fn title(&self) -> &str {
        if self.frontmatter.title.is_empty() {
            &self.id
        } else {
            &self.frontmatter.title
        }
    }

    pub fn to_post(&self) -> Post {
        Post {
            slug: post_slug(&self.slug()),
            frontmatter: self.frontmatter.clone(),
        }
    }
}

/// A published post as seen by the site: slug plus frontmatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub slug: String,
    pub frontmatter: Frontmatter,
}

impl Post {
    pub fn new(slug: impl Into<String>, frontmatter: Frontmatter) -> Self {
        Self {
            slug: slug.into(),
            frontmatter,
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.frontmatter.tags
    }
}

/// Site path for a post directory name: `/blog/<dir>/`
pub fn post_slug(dir_name: &str) -> String {
    format!("/blog/{}/", dir_name)
}
