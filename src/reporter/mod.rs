//! Progress channel between the pipeline and its presentation.

pub mod progress;
pub mod terminal;

pub use progress::HarvestProgress;
pub use terminal::TerminalReporter;

use crate::discovery::WalkNotice;
use crate::error::Stage;
use crate::writer::FileOutcome;
use std::path::Path;

/// Receives progress events from a harvest. Every method defaults to a no-op.
pub trait HarvestObserver {
    fn on_stage(&mut self, _stage: Stage) {}

    fn on_notice(&mut self, _notice: &WalkNotice) {}

    /// Called once the file list is known, before writing starts.
    fn on_walk_complete(&mut self, _selected: usize) {}

    fn on_file(&mut self, _path: &Path, _outcome: FileOutcome) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl HarvestObserver for NoopObserver {}
