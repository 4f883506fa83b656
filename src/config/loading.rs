//! Configuration loading functions.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::ConfigError;
use super::types::HarvestConfig;

/// Project-level config file names, in search order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".repoharvester.yaml",
    ".repoharvester.yml",
    ".repoharvester.json",
    ".repoharvester.toml",
];

impl HarvestConfig {
    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseYaml {
                path: path.display().to_string(),
                source: e,
            }),
            "json" => serde_json::from_str(&content).map_err(|e| ConfigError::ParseJson {
                path: path.display().to_string(),
                source: e,
            }),
            "toml" => toml::from_str(&content).map_err(|e| ConfigError::ParseToml {
                path: path.display().to_string(),
                source: e,
            }),
            _ => Err(ConfigError::UnsupportedFormat(
                path.display().to_string(),
                ext,
            )),
        }
    }

    /// Find the config file that applies to `project_root`.
    ///
    /// Search order:
    /// 1. `.repoharvester.{yaml,yml,json,toml}` in `project_root`
    /// 2. `~/.config/repoharvester/config.yaml`
    pub fn find(project_root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| project_root.join(name))
            .find(|path| path.is_file())
            .or_else(|| {
                dirs::config_dir()
                    .map(|dir| dir.join("repoharvester").join("config.yaml"))
                    .filter(|path| path.is_file())
            })
    }

    /// Load `explicit` if given, else the first file [`find`](Self::find)
    /// returns, else defaults.
    pub fn load(explicit: Option<&Path>, project_root: &Path) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find(project_root),
        };

        match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
