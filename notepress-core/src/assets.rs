//! Embedded asset resolution
//!
//! Maps every `![[file]]` embed in a note to its location in the vault's
//! assets directory and to the filename it gets when copied next to the
//! published post.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::rewrite::{strip_scratchpad, REFERENCE_RE};
use crate::slug::asset_output_name;

/// One embedded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// Filename as written in the embed
    pub name: String,
    /// Absolute location in the vault
    pub source: PathBuf,
    /// Filename used in the output directory
    pub output_name: String,
}

impl Asset {
    pub fn is_renamed(&self) -> bool {
        self.name != self.output_name
    }
}

/// Ordered, de-duplicated assets of a note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetMap {
    assets: Vec<Asset>,
}

impl AssetMap {
    /// Resolve every embed in `body` against `assets_dir`.
    ///
    /// Distinct embeds may share an output name (`a b.png` and `a_b.png`);
    /// see [`AssetMap::find_collision`]. A target with a folder
    /// (`sub/x.png`) keeps that folder under the post directory.
    pub fn resolve(body: &str, assets_dir: &Path) -> Self {
        let assets = embedded_filenames(body)
            .into_iter()
            .map(|name| Asset {
                source: assets_dir.join(&name),
                output_name: asset_output_name(&name),
                name,
            })
            .collect();

        Self { assets }
    }

    /// Output filename for an embed target, unchanged when unknown
    pub fn output_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.assets
            .iter()
            .find(|asset| asset.name == name)
            .map(|asset| asset.output_name.as_str())
            .unwrap_or(name)
    }

    /// First pair of assets that would be written to the same output file
    pub fn find_collision(&self) -> Option<(&Asset, &Asset)> {
        let mut seen: HashMap<&str, &Asset> = HashMap::new();
        for asset in &self.assets {
            if let Some(first) = seen.insert(asset.output_name.as_str(), asset) {
                return Some((first, asset));
            }
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Embed targets in order of first appearance
pub fn embedded_filenames(body: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    REFERENCE_RE
        .captures_iter(body)
        .filter(|caps| &caps[1] == "!")
        .map(|caps| caps[2].to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Resolve the assets of the published part of `body`
pub fn resolve_assets(body: &str, config: &Config) -> AssetMap {
    let published = strip_scratchpad(body, &config.convert.scratchpad_marker);
    AssetMap::resolve(published, &config.assets_dir())
}
