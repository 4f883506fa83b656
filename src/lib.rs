//! Harvest the text contents of a source tree into one union document.
//!
//! The pipeline resolves an [`ExclusionSet`] from the extension taxonomy,
//! walks the tree with [`TreeWalker`], optionally strips comments with a
//! [`CommentPatternTable`], and serializes everything with [`UnionWriter`].
//! [`Harvester`] ties the stages together.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod pipeline;
pub mod policy;
pub mod remote;
pub mod reporter;
pub mod source;
pub mod strip;
pub mod writer;

pub use cli::Cli;
pub use config::{ConfigError, HarvestConfig};
pub use discovery::{TreeWalker, WalkConfig, WalkNotice, WalkReport, extension_token};
pub use error::{HarvestError, Result, Stage};
pub use pipeline::{HarvestSummary, Harvester};
pub use policy::{Category, ExclusionSet, ExtensionTaxonomy};
pub use remote::{GitCloner, RemoteError};
pub use reporter::{HarvestObserver, NoopObserver, TerminalReporter};
pub use source::Source;
pub use strip::CommentPatternTable;
pub use writer::{FileOutcome, UnionOutput, UnionWriter};
