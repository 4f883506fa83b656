//! Configuration template generation.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::types::HarvestConfig;

impl HarvestConfig {
    /// Generate a YAML configuration template with comments.
    pub fn generate_template() -> String {
        r#"# repoharvester configuration file
# Place this file as .repoharvester.yaml in the directory you run from.

# Label used in the header line and the output file name.
# Derived from the repository URL or directory name when unset.
# repo_label: my-project

# Files larger than this (in KB) are left out.
max_size_kb: 1000

# Folder names that are never descended into (.git and .github always are).
excluded_folders: []
# excluded_folders: [node_modules, target]

# Extension categories to exclude. Run `repoharvester --list-categories`.
skip_categories:
  - media
  - archive
  - executables

# Extra extension tokens to exclude. A file without a dot is matched
# by its whole name.
skip_extensions: []
# skip_extensions: [md, Makefile]

# Remove comments from files whose extension has a comment pattern.
strip_comments: false

# Where <label>_all_files.txt and skipped_files.txt are written.
output_dir: output

# Branch or tag to clone for remote sources.
# git_ref: main

# Replacement comment pattern table (YAML mapping of extension to regex).
# comment_patterns: patterns/comment_patterns.yaml

# Additional categories, selectable through skip_categories.
extra_categories: {}
# extra_categories:
#   notebooks: [ipynb]
"#
        .to_string()
    }

    /// Write the template to `path`, or to `.repoharvester.yaml` inside it when
    /// it is a directory. Refuses to overwrite.
    pub fn write_template(path: &Path) -> Result<PathBuf, ConfigError> {
        let output_path = if path.is_dir() {
            path.join(".repoharvester.yaml")
        } else {
            path.to_path_buf()
        };

        if output_path.exists() {
            return Err(ConfigError::AlreadyExists(output_path.display().to_string()));
        }

        fs::write(&output_path, Self::generate_template()).map_err(|e| ConfigError::WriteFile {
            path: output_path.display().to_string(),
            source: e,
        })?;
        Ok(output_path)
    }
}
