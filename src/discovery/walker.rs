//! Directory walking with folder pruning and file exclusion.

use super::candidate::Candidate;
use crate::error::{HarvestError, Result};
use crate::policy::ExclusionSet;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Default maximum file size in KB.
pub const DEFAULT_MAX_SIZE_KB: f64 = 1000.0;

/// Files above this size are still harvested but reported.
pub const LARGE_FILE_WATERMARK_KB: f64 = 500.0;

/// Version-control and CI metadata folders that are never descended into.
pub const RESERVED_FOLDERS: &[&str] = &[".git", ".hg", ".svn", ".github"];

/// Configuration for one walk.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Extension tokens to exclude.
    pub exclusions: ExclusionSet,
    /// Files strictly larger than this are excluded.
    pub max_size_kb: f64,
    /// Folder names pruned in addition to [`RESERVED_FOLDERS`].
    pub excluded_folders: HashSet<String>,
    /// Canonical paths of folders or files never listed, wherever they sit
    /// in the tree.
    pub excluded_paths: Vec<PathBuf>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            exclusions: ExclusionSet::default(),
            max_size_kb: DEFAULT_MAX_SIZE_KB,
            excluded_folders: HashSet::new(),
            excluded_paths: Vec::new(),
        }
    }
}

impl WalkConfig {
    pub fn new(exclusions: ExclusionSet) -> Self {
        Self {
            exclusions,
            ..Default::default()
        }
    }

    /// Set the maximum file size in KB.
    pub fn with_max_size_kb(mut self, max_size_kb: f64) -> Self {
        self.max_size_kb = max_size_kb;
        self
    }

    /// Set folder names to prune.
    pub fn with_excluded_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_folders = folders
            .into_iter()
            .map(Into::into)
            .filter(|f: &String| !f.is_empty())
            .collect();
        self
    }

    /// Set canonical paths to leave out. Paths that do not exist are ignored.
    pub fn with_excluded_paths<I>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.excluded_paths = paths.into_iter().collect();
        self
    }
}

/// Advisory notice raised while walking. Never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum WalkNotice {
    /// File larger than the maximum size, left out.
    ExcludedForSize { path: PathBuf, size_kb: f64 },
    /// File above the watermark but within the maximum size, kept.
    LargeFileIncluded { path: PathBuf, size_kb: f64 },
}

impl WalkNotice {
    pub fn path(&self) -> &Path {
        match self {
            WalkNotice::ExcludedForSize { path, .. } | WalkNotice::LargeFileIncluded { path, .. } => {
                path
            }
        }
    }
}

/// Outcome of a walk.
#[derive(Debug, Clone, Default)]
pub struct WalkReport {
    /// Selected files in walk order.
    pub files: Vec<PathBuf>,
    /// Size notices in walk order.
    pub notices: Vec<WalkNotice>,
    /// Files left out because their extension token was excluded.
    pub excluded_by_extension: usize,
    /// Files left out because they exceeded the size limit.
    pub excluded_for_size: usize,
    /// Folders that were not descended into.
    pub pruned_folders: usize,
}

/// Walks a tree and selects files for harvesting.
pub struct TreeWalker {
    config: WalkConfig,
}

impl TreeWalker {
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Check if a folder name is pruned.
    pub fn is_pruned_folder(&self, name: &str) -> bool {
        RESERVED_FOLDERS.contains(&name) || self.config.excluded_folders.contains(name)
    }

    fn should_descend(&self, entry: &DirEntry, roots: &Roots) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !self.is_pruned_folder(&name) && !self.is_excluded_path(entry.path(), roots)
    }

    fn is_excluded_path(&self, path: &Path, roots: &Roots) -> bool {
        if self.config.excluded_paths.is_empty() {
            return false;
        }
        let Ok(relative) = path.strip_prefix(&roots.walked) else {
            return false;
        };
        let canonical = roots.canonical.join(relative);
        self.config.excluded_paths.iter().any(|p| *p == canonical)
    }

    /// Size of a regular file, following a symlink to its target. `None`
    /// for anything else, including links to directories and broken links.
    fn file_size(entry: &DirEntry) -> Option<u64> {
        let file_type = entry.file_type();
        let metadata = if file_type.is_symlink() {
            fs::metadata(entry.path())
        } else if file_type.is_file() {
            entry.metadata().map_err(Into::into)
        } else {
            return None;
        };

        match metadata {
            Ok(meta) if meta.is_file() => Some(meta.len()),
            Ok(_) => {
                debug!(path = %entry.path().display(), "Skipping link to a non-file");
                None
            }
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "Skipping entry without metadata");
                None
            }
        }
    }

    /// Walk `root` and return the selected files.
    ///
    /// Within each directory files come before subdirectories and entries are
    /// ordered by name, so the result is stable for a fixed tree. Symlinked
    /// directories are not descended into; symlinked files are listed under
    /// the link's own path and sized by their target.
    pub fn walk(&self, root: &Path) -> Result<WalkReport> {
        if !root.is_dir() {
            return Err(HarvestError::NotADirectory(root.display().to_string()));
        }

        let roots = Roots {
            walked: root.to_path_buf(),
            canonical: root.canonicalize().unwrap_or_else(|_| root.to_path_buf()),
        };
        let mut report = WalkReport::default();
        let walker = WalkDir::new(root).follow_links(false).sort_by(files_first);

        let mut entries = walker.into_iter();
        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                if !self.should_descend(&entry, &roots) {
                    debug!(path = %entry.path().display(), "Pruning folder");
                    report.pruned_folders += 1;
                    entries.skip_current_dir();
                }
                continue;
            }
            if self.is_excluded_path(entry.path(), &roots) {
                debug!(path = %entry.path().display(), "Skipping excluded path");
                continue;
            }

            let Some(size_bytes) = Self::file_size(&entry) else {
                continue;
            };
            let candidate = Candidate::new(entry.into_path(), size_bytes);

            if self.config.exclusions.contains(&candidate.extension_token()) {
                debug!(path = %candidate.path().display(), "Excluded by extension");
                report.excluded_by_extension += 1;
                continue;
            }

            let size_kb = candidate.size_kb();
            if size_kb > self.config.max_size_kb {
                info!(
                    path = %candidate.path().display(),
                    size_kb,
                    max_size_kb = self.config.max_size_kb,
                    "File excluded for size"
                );
                report.excluded_for_size += 1;
                report.notices.push(WalkNotice::ExcludedForSize {
                    path: candidate.path,
                    size_kb,
                });
                continue;
            }

            if size_kb > LARGE_FILE_WATERMARK_KB {
                info!(path = %candidate.path().display(), size_kb, "Large file included");
                report.notices.push(WalkNotice::LargeFileIncluded {
                    path: candidate.path.clone(),
                    size_kb,
                });
            }

            report.files.push(candidate.path);
        }

        debug!(
            selected = report.files.len(),
            excluded_by_extension = report.excluded_by_extension,
            excluded_for_size = report.excluded_for_size,
            pruned_folders = report.pruned_folders,
            "Walk complete"
        );
        Ok(report)
    }
}

/// The root as given and its canonical form, for matching excluded paths.
struct Roots {
    walked: PathBuf,
    canonical: PathBuf,
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}
