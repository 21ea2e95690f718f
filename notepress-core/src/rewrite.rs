//! Wiki-link and embed rewriting
//!
//! Vault notes use `[[Note title]]` links and `![[file.png]]` embeds. Both
//! target dialects turn links into plain text; they differ in where embeds
//! point:
//!
//! - [`Dialect::Local`]: `![file.png](./file.png)`, next to the output `index.md`
//! - [`Dialect::Remote`]: an absolute URL under the published asset location
//!
//! Everything from the scratchpad marker onward is dropped before rewriting.
//! A target containing `]` is not supported and a target never spans lines.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::assets::AssetMap;
use crate::slug::slugify;

/// Marker that starts the private scratchpad section of a note
pub const SCRATCHPAD_MARKER: &str = "<!--REJECTED IDEAS-->";

/// Group 1 is `!` for embeds, empty for links; group 2 is the target.
pub(crate) static REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!?)\[\[([^\]\n]+)\]\]").expect("reference regex"));

/// Target markdown dialect
#[derive(Debug, Clone, Copy)]
pub enum Dialect<'a> {
    /// Static site: embeds become relative links to the copied asset
    Local { assets: &'a AssetMap },
    /// Publishing API: embeds become absolute URLs
    Remote { base_url: &'a str, title: &'a str },
}

impl Dialect<'_> {
    fn embed(&self, file: &str) -> String {
        match self {
            Dialect::Local { assets } => format!("![{file}](./{})", assets.output_name(file)),
            Dialect::Remote { base_url, title } => format!(
                "![{file}]({}/{}/{})",
                base_url.trim_end_matches('/'),
                slugify(title),
                urlencoding::encode(file)
            ),
        }
    }
}

/// Drop the scratchpad marker and everything after it
pub fn strip_scratchpad<'a>(text: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return text;
    }
    match text.find(marker) {
        Some(index) => &text[..index],
        None => text,
    }
}

/// Rewrite links and embeds in the published part of `text`
pub fn rewrite(text: &str, marker: &str, dialect: Dialect<'_>) -> String {
    let published = strip_scratchpad(text, marker);

    REFERENCE_RE
        .replace_all(published, |caps: &Captures<'_>| {
            let target = &caps[2];
            if caps[1].is_empty() {
                target.to_string()
            } else {
                dialect.embed(target)
            }
        })
        .into_owned()
}

/// Rewrite for the static site, using `assets` for renamed filenames
pub fn to_local_markdown(text: &str, marker: &str, assets: &AssetMap) -> String {
    rewrite(text, marker, Dialect::Local { assets })
}

/// Rewrite for the publishing API
pub fn to_remote_markdown(text: &str, marker: &str, base_url: &str, title: &str) -> String {
    rewrite(text, marker, Dialect::Remote { base_url, title })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const BASE_URL: &str = "https://raw.githubusercontent.com/wasabigeek/blog/main/content/blog";

    #[test]
    fn test_plain_link_loses_brackets() {
        let out = to_local_markdown("See [[Some Link]] for more.", SCRATCHPAD_MARKER, &AssetMap::default());
        assert_eq!(out, "See Some Link for more.");
    }

    #[test]
    fn test_local_embed_without_rename() {
        let out = to_local_markdown("![[diagram.png]]", SCRATCHPAD_MARKER, &AssetMap::default());
        assert_eq!(out, "![diagram.png](./diagram.png)");
    }

    #[test]
    fn test_local_embed_uses_renamed_asset() {
        let body = "Look:\n![[Mocha opened in VSCode.png]]\n";
        let assets = AssetMap::resolve(body, Path::new("/vault/Files"));
        let out = to_local_markdown(body, SCRATCHPAD_MARKER, &assets);
        assert_eq!(
            out,
            "Look:\n![Mocha opened in VSCode.png](./Mocha_opened_in_VSCode.png)\n"
        );
    }

    #[test]
    fn test_remote_embed() {
        let out = to_remote_markdown(
            "![[Mocha opened in VSCode.png]]",
            SCRATCHPAD_MARKER,
            BASE_URL,
            "Reading a Ruby gem with VSCode",
        );
        assert_eq!(
            out,
            "![Mocha opened in VSCode.png](https://raw.githubusercontent.com/wasabigeek/blog/main/content/blog/reading-a-ruby-gem-with-vscode/Mocha%20opened%20in%20VSCode.png)"
        );
    }

    #[test]
    fn test_remote_base_url_trailing_slash() {
        let out = to_remote_markdown("![[a.png]]", SCRATCHPAD_MARKER, "https://cdn.example/", "T");
        assert_eq!(out, "![a.png](https://cdn.example/t/a.png)");
    }

    #[test]
    fn test_multiple_references_on_one_line() {
        let out = to_local_markdown(
            "[[One]] and [[Two]] then ![[x.png]]",
            SCRATCHPAD_MARKER,
            &AssetMap::default(),
        );
        assert_eq!(out, "One and Two then ![x.png](./x.png)");
    }

    #[test]
    fn test_scratchpad_dropped_from_both_dialects() {
        let text = "Kept [[Link]]\n<!--REJECTED IDEAS-->\nSecret [[Draft]] ![[private.png]]";
        let local = to_local_markdown(text, SCRATCHPAD_MARKER, &AssetMap::default());
        let remote = to_remote_markdown(text, SCRATCHPAD_MARKER, BASE_URL, "Title");

        for out in [&local, &remote] {
            assert_eq!(out, "Kept Link\n");
            assert!(!out.contains("Secret"));
        }
    }

    #[test]
    fn test_empty_marker_keeps_everything() {
        assert_eq!(strip_scratchpad("all of it", ""), "all of it");
    }

    #[test]
    fn test_unmatched_brackets_untouched() {
        let text = "an [[open link\nand a ![single](x.png)";
        assert_eq!(to_local_markdown(text, SCRATCHPAD_MARKER, &AssetMap::default()), text);
    }
}
