pub mod align;
pub mod config;
pub mod convert;
pub mod crop;
pub mod equalize;
pub mod info;
pub mod mask_filter;
pub mod match_hist;
pub mod merge;
pub mod split;

use std::path::PathBuf;

use anyhow::{Context, Result};
use terraprep_core::config::ToolConfig;

/// Load a TOML config when a path is given, otherwise fall back to the
/// built-in defaults.
pub fn load_tool_config(path: &Option<PathBuf>) -> Result<ToolConfig> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Invalid config file {}", path.display()))
        }
        None => Ok(ToolConfig::default()),
    }
}
