//! Where the tree to harvest comes from.

use crate::error::Result;
use crate::remote::{ClonedRepo, GitCloner, is_remote_url, repo_label_from_url};
use std::fs;
use std::path::{Path, PathBuf};

/// A harvest input: an existing directory or a git URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Local(PathBuf),
    Remote(String),
}

impl Source {
    /// Anything that looks like a clone URL is remote, the rest is a path.
    pub fn parse(input: &str) -> Self {
        if is_remote_url(input) {
            Source::Remote(input.to_string())
        } else {
            Source::Local(PathBuf::from(input))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Source::Remote(_))
    }

    /// Default repository label for this source.
    pub fn label(&self) -> String {
        match self {
            Source::Remote(url) => repo_label_from_url(url),
            Source::Local(path) => fs::canonicalize(path)
                .ok()
                .as_deref()
                .unwrap_or(path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "repository".to_string()),
        }
    }

    /// Materialize the tree. Remote sources are cloned with `cloner`.
    pub fn acquire(&self, cloner: &GitCloner) -> Result<AcquiredTree> {
        match self {
            Source::Local(path) => Ok(AcquiredTree {
                root: path.clone(),
                _clone: None,
            }),
            Source::Remote(url) => {
                let cloned = cloner.clone(url)?;
                Ok(AcquiredTree {
                    root: cloned.path().to_path_buf(),
                    _clone: Some(cloned),
                })
            }
        }
    }
}

/// A tree ready to walk. A cloned tree is deleted when this is dropped.
pub struct AcquiredTree {
    root: PathBuf,
    _clone: Option<ClonedRepo>,
}

impl AcquiredTree {
    pub fn root(&self) -> &Path {
        &self.root
    }
}
