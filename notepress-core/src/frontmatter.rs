//! Frontmatter parsing for vault notes
//!
//! Notes carry a small `key: value` block between two `---` lines:
//! ```markdown
//! ---
//! title: "Reading a Ruby gem with VSCode"
//! date: 2022-02-15
//! published: true
//! tags: ["ruby", "vscode"]
//! ---
//!
//! Body here
//! ```
//!
//! This is not YAML. Each line is split on the first `": "` and the value is
//! coerced by key name; unknown keys are ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{NoteError, Result};

pub const FRONTMATTER_DELIMITER: &str = "---";

const KEY_VALUE_SEPARATOR: &str = ": ";

static QUOTED_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)"|'([^']*)'"#).expect("quoted token regex"));

/// Parsed frontmatter fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    pub title: String,
    pub date: String,
    pub description: String,
    pub published: bool,
    pub tags: Vec<String>,
}

/// A note split around its frontmatter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterBlock<'a> {
    /// Whole block including both delimiter lines
    pub block: &'a str,
    /// Lines between the delimiters
    pub inner: &'a str,
    /// Everything after the closing delimiter line
    pub body: &'a str,
}

impl Frontmatter {
    /// Build from the lines between the delimiters
    pub fn from_block(inner: &str) -> Self {
        let mut frontmatter = Self::default();

        for line in inner.lines().map(str::trim_end) {
            if line.trim().is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once(KEY_VALUE_SEPARATOR) {
                frontmatter.apply(key.trim(), value);
            }
        }

        frontmatter
    }

    fn apply(&mut self, key: &str, raw: &str) {
        match key {
            "title" => self.title = unquote(raw),
            "date" => self.date = unquote(raw),
            "description" => self.description = unquote(raw),
            "published" => self.published = raw == "true",
            "tags" => self.tags = quoted_tokens(raw),
            _ => {}
        }
    }

    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}

/// Locate the `---` delimited block.
///
/// `context` names the note in error messages.
pub fn split_frontmatter<'a>(content: &'a str, context: &str) -> Result<FrontmatterBlock<'a>> {
    let mut offset = 0;
    // (start of opening line, end of opening line)
    let mut opening: Option<(usize, usize)> = None;

    for line in content.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if line.trim_end() != FRONTMATTER_DELIMITER {
            continue;
        }

        match opening {
            None => opening = Some((line_start, offset)),
            Some((block_start, inner_start)) => {
                return Ok(FrontmatterBlock {
                    block: &content[block_start..offset],
                    inner: &content[inner_start..line_start],
                    body: &content[offset..],
                });
            }
        }
    }

    match opening {
        None => Err(NoteError::missing_frontmatter(context)),
        Some(_) => Err(NoteError::unclosed_frontmatter(context)),
    }
}

/// Parse frontmatter and return it with the body that follows
pub fn parse_frontmatter<'a>(content: &'a str, context: &str) -> Result<(Frontmatter, &'a str)> {
    let block = split_frontmatter(content, context)?;
    Ok((Frontmatter::from_block(block.inner), block.body))
}

fn unquote(raw: &str) -> String {
    let value = raw.strip_prefix('"').unwrap_or(raw);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.to_string()
}

fn quoted_tokens(raw: &str) -> Vec<String> {
    QUOTED_TOKEN_RE
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"---
title: "Reading a Ruby gem with VSCode"
date: 2022-02-15
description: "Steps to try when investigating a gem's implementation in VSCode, using mocha's any_instance as an example."
published: true
tags: ["ruby", "vscode"]
---

Body starts here.
"#;

    #[test]
    fn test_parse_example_note() {
        let (fm, body) = parse_frontmatter(EXAMPLE, "example").unwrap();
        assert_eq!(
            fm,
            Frontmatter {
                title: "Reading a Ruby gem with VSCode".to_string(),
                date: "2022-02-15".to_string(),
                description: "Steps to try when investigating a gem's implementation in VSCode, using mocha's any_instance as an example.".to_string(),
                published: true,
                tags: vec!["ruby".to_string(), "vscode".to_string()],
            }
        );
        assert_eq!(body, "\nBody starts here.\n");
    }

    #[test]
    fn test_published_requires_exact_true() {
        for literal in ["false", "True", "yes", "\"true\"", ""] {
            let content = format!("---\npublished: {literal}\n---\n");
            let (fm, _) = parse_frontmatter(&content, "note").unwrap();
            assert!(!fm.published, "{literal:?} should not publish");
        }
    }

    #[test]
    fn test_single_quoted_tags() {
        let (fm, _) = parse_frontmatter("---\ntags: ['rails', \"testing\"]\n---\n", "note").unwrap();
        assert_eq!(fm.tags, vec!["rails", "testing"]);
    }

    #[test]
    fn test_unknown_keys_and_garbage_lines_ignored() {
        let content = "---\nlayout: post\nnot a pair\ntitle: Plain\n\n---\nbody";
        let (fm, body) = parse_frontmatter(content, "note").unwrap();
        assert_eq!(fm.title, "Plain");
        assert!(fm.tags.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_value_split_on_first_separator_only() {
        let (fm, _) = parse_frontmatter("---\ntitle: Rails: the good parts\n---\n", "note").unwrap();
        assert_eq!(fm.title, "Rails: the good parts");
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (fm, body) = parse_frontmatter(content, "note").unwrap();
        assert_eq!(fm.title, "Windows");
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_missing_frontmatter() {
        let result = parse_frontmatter("Just plain text", "plain.md");
        assert!(matches!(result, Err(NoteError::MissingFrontmatter { .. })));
    }

    #[test]
    fn test_unclosed_frontmatter() {
        let result = parse_frontmatter("---\ntitle: Test\n", "open.md");
        assert!(matches!(result, Err(NoteError::UnclosedFrontmatter { .. })));
    }

    #[test]
    fn test_block_spans_both_delimiters() {
        let block = split_frontmatter(EXAMPLE, "example").unwrap();
        assert!(block.block.starts_with("---\ntitle:"));
        assert!(block.block.ends_with("---\n"));
        assert_eq!(format!("{}{}", block.block, block.body), EXAMPLE);
    }
}
