//! Progress bar for terminal output while writing the union document.
//!
//! Uses Braille pattern characters for a modern, high-density display.

use indicatif::{ProgressBar, ProgressStyle};

/// Minimum number of files to display progress bar
const MIN_FILES_FOR_PROGRESS: usize = 10;

const TEMPLATE: &str =
    "Harvesting {bar:40} {pos:>4}/{len:4} files ({percent:>3}%) [{elapsed_precise} < {eta_precise}]";

/// Progress bar manager for the write stage.
pub struct HarvestProgress {
    bar: Option<ProgressBar>,
}

impl HarvestProgress {
    /// Create a new progress bar if conditions are met.
    ///
    /// Progress bar is only shown if:
    /// - Total files >= 10
    /// - Running in TTY (interactive terminal)
    /// - Not in CI mode
    pub fn new(total_files: usize, is_tty: bool, is_ci: bool) -> Self {
        let bar = if should_show_progress(total_files, is_tty, is_ci) {
            Some(create_progress_bar(total_files))
        } else {
            None
        };

        Self { bar }
    }

    /// A progress manager that never draws.
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Increment progress by one file.
    pub fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Print a line above the bar without tearing it.
    pub fn println(&self, message: impl AsRef<str>) {
        match &self.bar {
            Some(bar) => bar.println(message),
            None => eprintln!("{}", message.as_ref()),
        }
    }

    /// Finish and clear the progress bar.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Check if progress bar should be displayed.
fn should_show_progress(total_files: usize, is_tty: bool, is_ci: bool) -> bool {
    total_files >= MIN_FILES_FOR_PROGRESS && is_tty && !is_ci
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
        pb.set_style(style.progress_chars("⣿⣀ "));
    }
    pb
}
