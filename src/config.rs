use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Filesystem root that all dataset paths are resolved against.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub datasets: Vec<DatasetConfig>,
}

#[derive(Debug, Deserialize)]
pub struct MatchingConfig {
    /// Accept line numbers that differ by at most this much when the exact
    /// line sets do not intersect. 0 keeps strict overlap only.
    #[serde(default = "default_line_tolerance")]
    pub line_tolerance: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            line_tolerance: default_line_tolerance(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
    /// Ground-truth CSV, relative to `base_dir`.
    pub groundtruth: PathBuf,
    /// Score CSV written at the end of the run, relative to `base_dir`.
    pub output: PathBuf,
    /// Path prefixes removed during location normalization. Tool- and
    /// run-specific roots go here so a new dataset needs no code change.
    #[serde(default)]
    pub strip_prefixes: Vec<String>,
    #[serde(default)]
    pub tools: Vec<ToolConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    pub name: String,
    /// Findings CSV for this tool, relative to `base_dir`.
    pub findings: PathBuf,
}

// Defaults
fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_line_tolerance() -> u32 {
    0
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config {}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| Error::config(format!("Failed to parse config: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.datasets.is_empty() {
            return Err(Error::config("No datasets configured"));
        }
        for dataset in &self.datasets {
            if dataset.name.is_empty() {
                return Err(Error::config("Dataset with empty name"));
            }
            if dataset.tools.is_empty() {
                return Err(Error::config(format!(
                    "Dataset '{}' has no tools configured",
                    dataset.name
                )));
            }
            for tool in &dataset.tools {
                if tool.name.is_empty() {
                    return Err(Error::config(format!(
                        "Dataset '{}' has a tool with an empty name",
                        dataset.name
                    )));
                }
            }
        }
        Ok(())
    }
}
