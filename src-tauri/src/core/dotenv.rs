//! Viewer settings read from `~/.github-profile-viewer/.env`.
//!
//! The file is parsed into a lookup table instead of being copied into the process
//! environment. Only `GITHUB_PROFILE_VIEWER_*` keys are kept; real environment
//! variables still win over the file when the config is built.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::config::ENV_PREFIX;

const APP_DIR: &str = ".github-profile-viewer";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DotenvSettings {
    source: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl DotenvSettings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(APP_DIR).join(".env"))
    }

    /// Settings from the default file. A missing or unreadable file gives an empty
    /// table.
    pub fn load_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.is_file() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|err| {
            log::warn!("[dotenv] ignoring settings file: {:#}", err);
            Self::default()
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        let mut settings = Self::parse(&content);
        settings.source = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Later lines win. Lines that are not `KEY=VALUE` for a viewer key are skipped.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter_map(parse_line)
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self {
            source: None,
            entries,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, unquote(value.trim())))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
#[path = "tests/dotenv.rs"]
mod tests;
