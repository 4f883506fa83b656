//! Configuration layer for repoharvester.
//!
//! ## Layers
//! - `types`: the per-run configuration record
//! - `loading`: file discovery and parsing (YAML, JSON, TOML)
//! - `template`: commented starter file for `--init-config`

mod error;
mod loading;
mod template;
mod types;

pub use error::ConfigError;
pub use loading::CONFIG_FILE_NAMES;
pub use types::{DEFAULT_OUTPUT_DIR, HarvestConfig};
