//! Attributes derived from a discovered file.

use std::path::{Path, PathBuf};

/// Extension token of a file name.
///
/// The text after the last `.`, or the whole name when it has no dot.
/// `Makefile` yields `Makefile`, `.gitignore` yields `gitignore`,
/// `archive.tar.gz` yields `gz`.
pub fn extension_token(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => file_name,
    }
}

/// A file found during the walk, before the size check.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Basename, lossily converted.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn extension_token(&self) -> String {
        extension_token(&self.file_name()).to_string()
    }

    /// Size in KB, fractional.
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}
