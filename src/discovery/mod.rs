//! Tree walking and candidate file selection.
//!
//! This module handles:
//! - Directory traversal with structural and user folder pruning
//! - Extension token derivation
//! - Extension and size based exclusion

pub mod candidate;
pub mod walker;

pub use candidate::{Candidate, extension_token};
pub use walker::{
    DEFAULT_MAX_SIZE_KB, LARGE_FILE_WATERMARK_KB, RESERVED_FOLDERS, TreeWalker, WalkConfig,
    WalkNotice, WalkReport,
};
