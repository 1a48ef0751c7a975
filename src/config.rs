//! Configuration loaded from `.refgraph/config.toml`.
//!
//! Every field is optional. A missing file yields `Ok(None)` so the caller
//! can fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RefGraphError, Result};

/// Default location relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".refgraph/config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefGraphConfig {
    /// Directory that receives `<root>.json`.
    pub output_dir: PathBuf,
    /// Indent the JSON output.
    pub pretty: bool,
    /// Resolve each frontier in parallel.
    pub parallel: bool,
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for RefGraphConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            pretty: false,
            parallel: true,
            log_level: "info".to_string(),
        }
    }
}

impl RefGraphConfig {
    /// Load from `path`. `Ok(None)` if the file does not exist.
    pub fn try_load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        toml::from_str(&text)
            .map(Some)
            .map_err(|e| RefGraphError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}
