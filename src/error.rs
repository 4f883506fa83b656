use crate::config::ConfigError;
use crate::remote::RemoteError;
use std::fmt;
use thiserror::Error;

/// Pipeline stage, used both for error reporting and progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configuration,
    Acquisition,
    Traversal,
    Write,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Configuration => "configuration",
            Stage::Acquisition => "acquisition",
            Stage::Traversal => "traversal",
            Stage::Write => "write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("configuration failed: {0}")]
    Config(#[from] ConfigError),

    #[error("acquisition failed: {0}")]
    Acquisition(#[from] RemoteError),

    #[error("traversal failed: not a directory: {0}")]
    NotADirectory(String),

    #[error("write failed: could not create output directory {path}: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("write failed: could not read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("write failed: could not write {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl HarvestError {
    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            HarvestError::Config(_) => Stage::Configuration,
            HarvestError::Acquisition(_) => Stage::Acquisition,
            HarvestError::NotADirectory(_) => Stage::Traversal,
            HarvestError::OutputDir { .. }
            | HarvestError::ReadFile { .. }
            | HarvestError::WriteFile { .. } => Stage::Write,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
