//! Configuration type definitions.

use crate::discovery::{DEFAULT_MAX_SIZE_KB, WalkConfig};
use crate::policy::{ExclusionSet, ExtensionTaxonomy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::error::ConfigError;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Everything one harvesting run needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Label written in the header line and used in the output file name.
    /// Derived from the source when unset.
    pub repo_label: Option<String>,
    /// Files strictly larger than this many KB are excluded.
    pub max_size_kb: f64,
    /// Folder names that are never descended into.
    pub excluded_folders: Vec<String>,
    /// Extension categories to exclude. Unknown names are ignored.
    pub skip_categories: Vec<String>,
    /// Extra extension tokens to exclude.
    pub skip_extensions: Vec<String>,
    /// Remove comments using the comment pattern table.
    pub strip_comments: bool,
    /// Where the union document and skip report are written.
    pub output_dir: PathBuf,
    /// Branch or tag to clone for remote sources.
    pub git_ref: Option<String>,
    /// Replacement comment pattern table (YAML).
    pub comment_patterns: Option<PathBuf>,
    /// User-defined categories added to the built-in taxonomy.
    pub extra_categories: BTreeMap<String, Vec<String>>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            repo_label: None,
            max_size_kb: DEFAULT_MAX_SIZE_KB,
            excluded_folders: Vec::new(),
            skip_categories: Vec::new(),
            skip_extensions: Vec::new(),
            strip_comments: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            git_ref: None,
            comment_patterns: None,
            extra_categories: BTreeMap::new(),
        }
    }
}

impl HarvestConfig {
    /// Reject values no run can use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_size_kb.is_finite() || self.max_size_kb < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "max_size_kb",
                message: format!("expected a non-negative number, got {}", self.max_size_kb),
            });
        }
        if self
            .repo_label
            .as_deref()
            .is_some_and(|label| label.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "repo_label",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Built-in taxonomy extended with `extra_categories`.
    pub fn taxonomy(&self) -> ExtensionTaxonomy {
        self.extra_categories
            .iter()
            .fold(ExtensionTaxonomy::builtin(), |taxonomy, (name, tokens)| {
                taxonomy.with_group(name.clone(), tokens.iter().cloned())
            })
    }

    /// Exclusion set for this run.
    pub fn exclusions(&self, taxonomy: &ExtensionTaxonomy) -> ExclusionSet {
        taxonomy.resolve_exclusions(&self.skip_categories, &self.skip_extensions)
    }

    /// Walker configuration for this run.
    pub fn walk_config(&self, taxonomy: &ExtensionTaxonomy) -> WalkConfig {
        WalkConfig::new(self.exclusions(taxonomy))
            .with_max_size_kb(self.max_size_kb)
            .with_excluded_folders(self.excluded_folders.iter().cloned())
    }
}
