use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::rewrite::SCRATCHPAD_MARKER;

/// Commented template written by `notepress config init`
pub const CONFIG_TEMPLATE: &str = include_str!("../config.template.toml");

static VARIABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("variable regex"));

/// Configuration passed explicitly into every conversion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub convert: ConvertConfig,
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub vault: PathBuf,
    /// Relative to `vault` unless absolute
    pub notes: PathBuf,
    /// Relative to `vault` unless absolute
    pub assets: PathBuf,
    pub content: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub scratchpad_marker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub asset_base_url: String,
    pub canonical_base_url: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            vault: PathBuf::from("."),
            notes: PathBuf::from("Blog/Published"),
            assets: PathBuf::from("Files"),
            content: PathBuf::from("content/blog"),
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            scratchpad_marker: SCRATCHPAD_MARKER.to_string(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://dev.to".to_string(),
            api_key: None,
            asset_base_url: "https://raw.githubusercontent.com/wasabigeek/blog/main/content/blog"
                .to_string(),
            canonical_base_url: None,
        }
    }
}

impl Config {
    /// Load config from `path`, or from ~/.notepress/config.toml.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config not found at {:?}", path);
                }
                path.to_path_buf()
            }
            None => {
                let default_path = Self::config_path();
                if !default_path.exists() {
                    tracing::debug!("no config at {:?}, using defaults", default_path);
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&config_path)
            .context(format!("Failed to read config file: {:?}", config_path))?;

        Self::from_toml_str(&content)
            .context(format!("Failed to parse config file: {:?}", config_path))
    }

    /// Parse TOML and expand ${VAR} references
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(content).context("Failed to parse config (invalid TOML)")?;
        config.expand_variables();
        Ok(config)
    }

    /// Get config file path: ~/.notepress/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".notepress/config.toml")
    }

    /// Expand ${VAR} references from the environment
    fn expand_variables(&mut self) {
        self.paths.vault = expand_path(&self.paths.vault);
        self.paths.notes = expand_path(&self.paths.notes);
        self.paths.assets = expand_path(&self.paths.assets);
        self.paths.content = expand_path(&self.paths.content);

        self.remote.endpoint = expand_string(&self.remote.endpoint);
        self.remote.asset_base_url = expand_string(&self.remote.asset_base_url);
        if let Some(ref key) = self.remote.api_key {
            self.remote.api_key = Some(expand_string(key));
        }
        if let Some(ref base) = self.remote.canonical_base_url {
            self.remote.canonical_base_url = Some(expand_string(base));
        }
    }

    /// Directory holding the notes to publish
    pub fn notes_dir(&self) -> PathBuf {
        self.paths.vault.join(&self.paths.notes)
    }

    /// Directory holding embedded files
    pub fn assets_dir(&self) -> PathBuf {
        self.paths.vault.join(&self.paths.assets)
    }

    pub fn content_dir(&self) -> &Path {
        &self.paths.content
    }

    /// API key, failing if unset or left as an unresolved variable
    pub fn api_key(&self) -> Result<&str> {
        match self.remote.api_key.as_deref() {
            Some(key) if !key.is_empty() && !key.starts_with("${") => Ok(key),
            _ => anyhow::bail!(
                "remote.api_key is not set.\n\nSet DEV_TO_API_KEY or remote.api_key in {:?}",
                Self::config_path()
            ),
        }
    }

    /// Validate that the vault directories exist
    pub fn validate_paths(&self) -> Result<()> {
        let paths = vec![
            ("vault", self.paths.vault.clone()),
            ("notes", self.notes_dir()),
            ("assets", self.assets_dir()),
        ];

        let mut errors = Vec::new();

        for (name, path) in paths {
            if !path.exists() {
                errors.push(format!("  ✗ {}: {:?} (does not exist)", name, path));
            } else if !path.is_dir() {
                errors.push(format!("  ✗ {}: {:?} (not a directory)", name, path));
            }
        }

        if !errors.is_empty() {
            anyhow::bail!("Path validation failed:\n{}", errors.join("\n"));
        }

        Ok(())
    }
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(expand_string(&path.display().to_string()))
}

/// Unset variables expand to the empty string
fn expand_string(s: &str) -> String {
    VARIABLE_RE
        .replace_all(s, |caps: &Captures<'_>| env::var(&caps[1]).unwrap_or_default())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses() {
        let config = Config::from_toml_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.paths.notes, PathBuf::from("Blog/Published"));
        assert_eq!(config.convert.scratchpad_marker, "<!--REJECTED IDEAS-->");
        assert_eq!(config.remote.endpoint, "https://dev.to");
        assert!(config.remote.canonical_base_url.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml_str("[paths]\nvault = \"/vault\"\n").unwrap();
        assert_eq!(config.notes_dir(), PathBuf::from("/vault/Blog/Published"));
        assert_eq!(config.assets_dir(), PathBuf::from("/vault/Files"));
        assert_eq!(config.content_dir(), Path::new("content/blog"));
        assert_eq!(config.remote.endpoint, "https://dev.to");
    }

    #[test]
    fn test_variable_expansion() {
        env::set_var("NOTEPRESS_TEST_VAULT_ROOT", "/tmp/np-vault");
        let config = Config::from_toml_str(
            "[paths]\nvault = \"${NOTEPRESS_TEST_VAULT_ROOT}/notes\"\n[remote]\napi_key = \"${NOTEPRESS_TEST_UNSET_KEY}\"\n",
        )
        .unwrap();

        assert_eq!(config.paths.vault, PathBuf::from("/tmp/np-vault/notes"));
        assert_eq!(config.remote.api_key.as_deref(), Some(""));
        assert!(config.api_key().is_err());
    }

    #[test]
    fn test_api_key_present() {
        let mut config = Config::default();
        config.remote.api_key = Some("secret".to_string());
        assert_eq!(config.api_key().unwrap(), "secret");
    }

    #[test]
    fn test_explicit_missing_path_errors() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config not found"));
    }

    #[test]
    fn test_validate_paths_reports_missing() {
        let mut config = Config::default();
        config.paths.vault = PathBuf::from("/definitely/not/a/vault");
        let err = config.validate_paths().unwrap_err();
        assert!(err.to_string().contains("vault"));
    }
}
