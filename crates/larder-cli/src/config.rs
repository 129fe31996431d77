//! `larder.toml` - optional display preferences.
//!
//! Every section defaults, so an empty file (or no file) is a valid config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::columns::DEFAULT_HIDDEN;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "larder.toml";

// =============================================================================
// ROOT CONFIG
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LarderConfig {
    pub columns: ColumnsConfig,

    pub display: DisplayConfig,
}

impl LarderConfig {
    /// Load the explicit file, or `larder.toml` in the working directory if
    /// present, or the defaults.
    ///
    /// An explicit path must exist and parse; the implicit file only has to
    /// parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::load_from(&path)
                } else {
                    debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    /// Column keys hidden when a session starts.
    pub hidden: Vec<String>,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            hidden: DEFAULT_HIDDEN.iter().map(|key| (*key).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows printed by `browse`; 0 prints every row.
    pub max_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { max_rows: 200 }
    }
}

impl DisplayConfig {
    /// Row limit, `None` meaning unlimited.
    pub fn row_limit(&self) -> Option<usize> {
        (self.max_rows > 0).then_some(self.max_rows)
    }
}
