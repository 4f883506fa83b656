//! Remote repository acquisition.
//!
//! Clones a repository into a temporary directory so the harvest can walk it.
//!
//! # Security Measures
//!
//! - All clones are shallow (depth=1)
//! - Git hooks are disabled during clone to prevent code execution
//! - Temporary directories are automatically cleaned up
//! - Authentication tokens are not logged or exposed

pub mod clone;
pub mod error;

pub use clone::{ClonedRepo, GitCloner, is_remote_url, repo_label_from_url};
pub use error::RemoteError;

/// Environment variable read for HTTPS authentication tokens.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";
