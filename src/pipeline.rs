//! The harvesting pipeline: walk, strip, write.

use crate::config::HarvestConfig;
use crate::discovery::{TreeWalker, WalkReport};
use crate::error::{Result, Stage};
use crate::policy::ExtensionTaxonomy;
use crate::remote::GitCloner;
use crate::reporter::HarvestObserver;
use crate::source::Source;
use crate::strip::CommentPatternTable;
use crate::writer::{SKIP_REPORT_NAME, UnionWriter, union_file_name};
use std::path::{Path, PathBuf};
use tracing::info;

/// Counts and paths from one completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestSummary {
    pub label: String,
    pub written: usize,
    pub skipped: Vec<String>,
    pub excluded_by_extension: usize,
    pub excluded_for_size: usize,
    pub union_path: PathBuf,
    pub skip_report_path: PathBuf,
}

/// One configured pipeline. The taxonomy and pattern table are fixed at
/// construction and shared by every run.
#[derive(Debug)]
pub struct Harvester {
    config: HarvestConfig,
    taxonomy: ExtensionTaxonomy,
    patterns: Option<CommentPatternTable>,
}

impl Harvester {
    /// Build a harvester, loading the comment pattern table when stripping
    /// is enabled.
    pub fn new(config: HarvestConfig) -> Result<Self> {
        config.validate()?;
        let taxonomy = config.taxonomy();
        let patterns = if config.strip_comments {
            Some(match &config.comment_patterns {
                Some(path) => CommentPatternTable::from_file(path)?,
                None => CommentPatternTable::builtin()?,
            })
        } else {
            None
        };
        Ok(Self {
            config,
            taxonomy,
            patterns,
        })
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    pub fn taxonomy(&self) -> &ExtensionTaxonomy {
        &self.taxonomy
    }

    /// Acquire `source` and harvest it. A cloned tree is removed afterwards.
    pub fn run(
        &self,
        source: &Source,
        cloner: &GitCloner,
        observer: &mut dyn HarvestObserver,
    ) -> Result<HarvestSummary> {
        let label = self
            .config
            .repo_label
            .clone()
            .unwrap_or_else(|| source.label());

        if source.is_remote() {
            observer.on_stage(Stage::Acquisition);
        }
        let tree = source.acquire(cloner)?;

        self.harvest_dir(tree.root(), &label, observer)
    }

    /// Canonical paths of this harvester's own output: the output directory,
    /// the skip report and, given a label, the union document. Empty while
    /// the output directory does not exist yet.
    fn output_paths(&self, label: Option<&str>) -> Vec<PathBuf> {
        let Ok(dir) = self.config.output_dir.canonicalize() else {
            return Vec::new();
        };
        let mut paths = vec![dir.join(SKIP_REPORT_NAME)];
        if let Some(label) = label {
            paths.push(dir.join(union_file_name(label)));
        }
        paths.push(dir);
        paths
    }

    /// Walk the file list of `root`. The output directory is never listed,
    /// even when it lies inside `root`.
    pub fn walk(&self, root: &Path, observer: &mut dyn HarvestObserver) -> Result<WalkReport> {
        self.walk_excluding(root, self.output_paths(None), observer)
    }

    fn walk_excluding(
        &self,
        root: &Path,
        excluded: Vec<PathBuf>,
        observer: &mut dyn HarvestObserver,
    ) -> Result<WalkReport> {
        observer.on_stage(Stage::Traversal);
        let config = self.config.walk_config(&self.taxonomy).with_excluded_paths(excluded);
        let report = TreeWalker::new(config).walk(root)?;
        for notice in &report.notices {
            observer.on_notice(notice);
        }
        observer.on_walk_complete(report.files.len());
        Ok(report)
    }

    /// Harvest an existing directory under `label`.
    pub fn harvest_dir(
        &self,
        root: &Path,
        label: &str,
        observer: &mut dyn HarvestObserver,
    ) -> Result<HarvestSummary> {
        info!(root = %root.display(), label, "Starting harvest");
        let report = self.walk_excluding(root, self.output_paths(Some(label)), observer)?;

        observer.on_stage(Stage::Write);
        let writer = UnionWriter::new(&self.config.output_dir);
        let output = writer.write(&report.files, label, self.patterns.as_ref(), observer)?;

        info!(
            written = output.written,
            skipped = output.skipped.len(),
            union = %output.union_path.display(),
            "Harvest complete"
        );

        Ok(HarvestSummary {
            label: label.to_string(),
            written: output.written,
            skipped: output.skipped,
            excluded_by_extension: report.excluded_by_extension,
            excluded_for_size: report.excluded_for_size,
            union_path: output.union_path,
            skip_report_path: output.skip_report_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::WalkNotice;
    use crate::reporter::NoopObserver;
    use crate::writer::FileOutcome;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Events {
        stages: Vec<Stage>,
        notices: usize,
        selected: Option<usize>,
        files: usize,
    }

    impl HarvestObserver for Events {
        fn on_stage(&mut self, stage: Stage) {
            self.stages.push(stage);
        }
        fn on_notice(&mut self, _notice: &WalkNotice) {
            self.notices += 1;
        }
        fn on_walk_complete(&mut self, selected: usize) {
            self.selected = Some(selected);
        }
        fn on_file(&mut self, _path: &Path, _outcome: FileOutcome) {
            self.files += 1;
        }
    }

    fn config(out: &Path) -> HarvestConfig {
        HarvestConfig {
            output_dir: out.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_harvest_dir_end_to_end() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(src.path().join("a.py"), "# comment\nprint(1)").unwrap();
        fs::write(src.path().join("b.png"), b"\x89PNG\xff").unwrap();

        let harvester = Harvester::new(HarvestConfig {
            skip_categories: vec!["media".to_string()],
            strip_comments: true,
            ..config(out.path())
        })
        .unwrap();
        let summary = harvester
            .harvest_dir(src.path(), "demo", &mut NoopObserver)
            .unwrap();

        let union = fs::read_to_string(&summary.union_path).unwrap();
        assert_eq!(union, "## demo\n### a.py\n\nprint(1)\n### end of file\n");
        assert_eq!(summary.written, 1);
        assert_eq!(summary.excluded_by_extension, 1);
        assert!(summary.skipped.is_empty());
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(src.path().join("x.txt"), "x").unwrap();
        fs::write(src.path().join("big.txt"), vec![b'a'; 2048]).unwrap();

        let harvester = Harvester::new(HarvestConfig {
            max_size_kb: 1.0,
            ..config(out.path())
        })
        .unwrap();
        let mut events = Events::default();
        harvester
            .run(&Source::Local(src.path().to_path_buf()), &GitCloner::new(), &mut events)
            .unwrap();

        assert_eq!(events.stages, [Stage::Traversal, Stage::Write]);
        assert_eq!(events.notices, 1);
        assert_eq!(events.selected, Some(1));
        assert_eq!(events.files, 1);
    }

    #[test]
    fn test_run_uses_config_label() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let harvester = Harvester::new(HarvestConfig {
            repo_label: Some("custom".to_string()),
            ..config(out.path())
        })
        .unwrap();

        let summary = harvester
            .run(&Source::Local(src.path().to_path_buf()), &GitCloner::new(), &mut NoopObserver)
            .unwrap();
        assert_eq!(summary.label, "custom");
        assert!(summary.union_path.ends_with("custom_all_files.txt"));
    }

    #[test]
    fn test_missing_root_writes_nothing() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output_dir = out.path().join("output");
        let harvester = Harvester::new(config(&output_dir)).unwrap();

        let err = harvester
            .harvest_dir(&src.path().join("missing"), "demo", &mut NoopObserver)
            .unwrap_err();
        assert_eq!(err.stage(), Stage::Traversal);
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_rerun_inside_tree_ignores_own_output() {
        let src = TempDir::new().unwrap();
        fs::write(src.path().join("a.txt"), "alpha").unwrap();
        let harvester = Harvester::new(config(&src.path().join("output"))).unwrap();

        let first = harvester
            .harvest_dir(src.path(), "demo", &mut NoopObserver)
            .unwrap();
        let first_bytes = fs::read(&first.union_path).unwrap();
        let second = harvester
            .harvest_dir(src.path(), "demo", &mut NoopObserver)
            .unwrap();

        assert_eq!(fs::read(&second.union_path).unwrap(), first_bytes);
        assert_eq!(first_bytes, b"## demo\n### a.txt\nalpha\n### end of file\n");
        assert_eq!(second.written, 1);
    }

    #[test]
    fn test_output_dir_equal_to_root_skips_output_files() {
        let src = TempDir::new().unwrap();
        fs::write(src.path().join("a.txt"), "alpha").unwrap();
        let harvester = Harvester::new(config(src.path())).unwrap();

        harvester
            .harvest_dir(src.path(), "demo", &mut NoopObserver)
            .unwrap();
        let second = harvester
            .harvest_dir(src.path(), "demo", &mut NoopObserver)
            .unwrap();

        assert_eq!(second.written, 1);
        assert_eq!(
            fs::read_to_string(&second.union_path).unwrap(),
            "## demo\n### a.txt\nalpha\n### end of file\n"
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = Harvester::new(HarvestConfig {
            max_size_kb: f64::NAN,
            ..Default::default()
        });
        assert!(matches!(result, Err(e) if e.stage() == Stage::Configuration));
    }

    #[test]
    fn test_custom_pattern_file() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let patterns = src.path().join("patterns.yaml");
        fs::write(&patterns, "txt: ';.*'\n").unwrap();
        let input = src.path().join("data");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("n.txt"), "keep ; drop").unwrap();

        let harvester = Harvester::new(HarvestConfig {
            strip_comments: true,
            comment_patterns: Some(patterns),
            ..config(out.path())
        })
        .unwrap();
        let summary = harvester
            .harvest_dir(&input, "demo", &mut NoopObserver)
            .unwrap();

        let union = fs::read_to_string(summary.union_path).unwrap();
        assert!(union.contains("### n.txt\nkeep \n### end of file\n"));
    }
}
