use crate::discovery::WalkNotice;
use crate::error::Stage;
use crate::pipeline::HarvestSummary;
use crate::policy::ExtensionTaxonomy;
use crate::reporter::{HarvestObserver, HarvestProgress};
use crate::writer::FileOutcome;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::Path;

/// Terminal presentation: stage lines and notices on stderr, a progress bar
/// while writing, and a summary for stdout.
pub struct TerminalReporter {
    ci: bool,
    is_tty: bool,
    progress: HarvestProgress,
}

impl TerminalReporter {
    pub fn new(ci: bool) -> Self {
        Self {
            ci,
            is_tty: std::io::stderr().is_terminal(),
            progress: HarvestProgress::hidden(),
        }
    }

    fn stage_message(stage: Stage) -> &'static str {
        match stage {
            Stage::Configuration => "Loading configuration...",
            Stage::Acquisition => "Cloning repository...",
            Stage::Traversal => "Getting file list...",
            Stage::Write => "Writing to file...",
        }
    }

    fn notice_line(notice: &WalkNotice) -> String {
        match notice {
            WalkNotice::ExcludedForSize { path, size_kb } => format!(
                "{} {} ({:.1} KB)",
                "[excluded for size]".yellow().bold(),
                path.display(),
                size_kb
            ),
            WalkNotice::LargeFileIncluded { path, size_kb } => format!(
                "{} {} ({:.1} KB)",
                "[large file included]".cyan(),
                path.display(),
                size_kb
            ),
        }
    }

    /// Final report for stdout.
    pub fn summary(&self, summary: &HarvestSummary) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} {}\n",
            "Harvested".green().bold(),
            summary.label.bold()
        ));
        let rows = [
            ("files written", summary.written),
            ("skipped (decoding)", summary.skipped.len()),
            ("excluded (extension)", summary.excluded_by_extension),
            ("excluded (size)", summary.excluded_for_size),
        ];
        for (name, count) in rows {
            out.push_str(&format!("  {:<22}{}\n", format!("{}:", name), count));
        }
        out.push_str(&format!(
            "All files have been written to {}\n",
            summary.union_path.display()
        ));
        out.push_str(&format!(
            "Skipped files are listed in {}",
            summary.skip_report_path.display()
        ));
        out
    }

    /// Listing of the taxonomy for `--list-categories`.
    pub fn categories(&self, taxonomy: &ExtensionTaxonomy) -> String {
        taxonomy
            .names()
            .map(|name| {
                let tokens = taxonomy
                    .group(name)
                    .map(|t| t.iter().cloned().collect::<Vec<_>>().join(", "))
                    .unwrap_or_default();
                format!("{}: {}", name.bold(), tokens)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl HarvestObserver for TerminalReporter {
    fn on_stage(&mut self, stage: Stage) {
        self.progress
            .println(Self::stage_message(stage).dimmed().to_string());
    }

    fn on_notice(&mut self, notice: &WalkNotice) {
        self.progress.println(Self::notice_line(notice));
    }

    fn on_walk_complete(&mut self, selected: usize) {
        self.progress = HarvestProgress::new(selected, self.is_tty, self.ci);
    }

    fn on_file(&mut self, path: &Path, outcome: FileOutcome) {
        if outcome == FileOutcome::Skipped {
            self.progress.println(format!(
                "{} {}",
                "[skipped: not valid UTF-8]".red(),
                path.display()
            ));
        }
        self.progress.inc();
    }
}

impl Drop for TerminalReporter {
    fn drop(&mut self) {
        self.progress.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn summary() -> HarvestSummary {
        HarvestSummary {
            label: "demo".to_string(),
            written: 3,
            skipped: vec!["c.txt".to_string()],
            excluded_by_extension: 2,
            excluded_for_size: 1,
            union_path: PathBuf::from("output/demo_all_files.txt"),
            skip_report_path: PathBuf::from("output/skipped_files.txt"),
        }
    }

    #[test]
    fn test_summary_lists_counts_and_paths() {
        colored::control::set_override(false);
        let reporter = TerminalReporter::new(true);
        let text = reporter.summary(&summary());

        assert!(text.contains("Harvested demo"));
        assert!(text.contains("  files written:        3\n"));
        assert!(text.contains("  skipped (decoding):   1\n"));
        assert!(text.contains("  excluded (extension): 2\n"));
        assert!(text.contains("  excluded (size):      1\n"));
        assert!(text.contains("All files have been written to output/demo_all_files.txt"));
    }

    #[test]
    fn test_notice_lines() {
        colored::control::set_override(false);
        let line = TerminalReporter::notice_line(&WalkNotice::ExcludedForSize {
            path: PathBuf::from("big.bin"),
            size_kb: 11.0,
        });
        assert_eq!(line, "[excluded for size] big.bin (11.0 KB)");
    }

    #[test]
    fn test_categories_listing() {
        colored::control::set_override(false);
        let reporter = TerminalReporter::new(true);
        let text = reporter.categories(&ExtensionTaxonomy::builtin());
        assert!(text.lines().any(|l| l.starts_with("media: ")));
        assert_eq!(text.lines().count(), 19);
    }

    #[test]
    fn test_summary_counts_are_aligned() {
        colored::control::set_override(false);
        let text = TerminalReporter::new(true).summary(&summary());
        let columns: Vec<usize> = text
            .lines()
            .filter(|l| l.starts_with("  "))
            .map(|l| l.rfind(' ').unwrap())
            .collect();
        assert_eq!(columns.len(), 4);
        assert!(columns.iter().all(|c| *c == columns[0]));
    }

    #[test]
    fn test_observer_events_do_not_panic() {
        let mut reporter = TerminalReporter::new(true);
        reporter.on_stage(Stage::Traversal);
        reporter.on_walk_complete(20);
        reporter.on_stage(Stage::Write);
        reporter.on_file(Path::new("a.txt"), FileOutcome::Written);
        reporter.on_file(Path::new("b.bin"), FileOutcome::Skipped);
    }
}
