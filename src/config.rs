use crate::imaging::RemBgOptions;
use crate::registry::MergePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Plugin-wide settings, read once before the registry is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Directory of auxiliary web assets, relative to the plugin root
    pub web_directory: PathBuf,
    pub merge_policy: MergePolicy,
    pub rembg: RemBgOptions,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            web_directory: PathBuf::from("./web"),
            merge_policy: MergePolicy::default(),
            rembg: RemBgOptions::default(),
        }
    }
}

impl PluginConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid plugin configuration")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plugin config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }
}
