//! Union document and skip report serialization.
//!
//! Output layout:
//!
//! ```text
//! ## <label>
//! ### <basename>
//! <content>
//! ### end of file
//! ```
//!
//! Files whose bytes are not valid UTF-8 are listed in the skip report, one
//! basename per line, and never appear in the union document.
//!
//! Both files are built as temporaries in the output directory and moved
//! into place only once every file has been written, so a failed run leaves
//! the previous output untouched.

use crate::discovery::extension_token;
use crate::error::{HarvestError, Result};
use crate::reporter::HarvestObserver;
use crate::strip::CommentPatternTable;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Marker that starts every header and delimiter line.
pub const HEADER_PREFIX: &str = "## ";
pub const FILE_START_PREFIX: &str = "### ";
pub const FILE_END_LINE: &str = "### end of file";

/// Name of the skip report inside the output directory.
pub const SKIP_REPORT_NAME: &str = "skipped_files.txt";

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Written,
    Skipped,
}

/// Paths and counts produced by one write.
#[derive(Debug, Clone)]
pub struct UnionOutput {
    pub union_path: PathBuf,
    pub skip_report_path: PathBuf,
    pub written: usize,
    pub skipped: Vec<String>,
}

/// File name of the union document for a label.
pub fn union_file_name(label: &str) -> String {
    let safe: String = label
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("{}_all_files.txt", safe)
}

/// Writes the union document and skip report into one directory.
pub struct UnionWriter {
    output_dir: PathBuf,
}

impl UnionWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Serialize `files` in order. Prior output in the directory is
    /// overwritten. With `stripper` set, comments are removed from each file
    /// before it is written.
    pub fn write(
        &self,
        files: &[PathBuf],
        label: &str,
        stripper: Option<&CommentPatternTable>,
        observer: &mut dyn HarvestObserver,
    ) -> Result<UnionOutput> {
        fs::create_dir_all(&self.output_dir).map_err(|e| HarvestError::OutputDir {
            path: self.output_dir.display().to_string(),
            source: e,
        })?;

        let union_path = self.output_dir.join(union_file_name(label));
        let skip_report_path = self.output_dir.join(SKIP_REPORT_NAME);

        let mut union = create(&self.output_dir, &union_path)?;
        let mut skip_report = create(&self.output_dir, &skip_report_path)?;

        write_to(&mut union, &union_path, format!("{}{}\n", HEADER_PREFIX, label).as_bytes())?;

        let mut written = 0;
        let mut skipped = Vec::new();

        for path in files {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let bytes = fs::read(path).map_err(|e| HarvestError::ReadFile {
                path: path.display().to_string(),
                source: e,
            })?;

            let content = match String::from_utf8(bytes) {
                Ok(content) => content,
                Err(e) => {
                    debug!(path = %path.display(), error = %e.utf8_error(), "Skipping undecodable file");
                    write_to(&mut skip_report, &skip_report_path, format!("{}\n", name).as_bytes())?;
                    skipped.push(name);
                    observer.on_file(path, FileOutcome::Skipped);
                    continue;
                }
            };

            let content = match stripper {
                Some(table) => table.strip_comments(&content, extension_token(&name)),
                None => content.as_str().into(),
            };

            let record = format!(
                "{}{}\n{}\n{}\n",
                FILE_START_PREFIX, name, content, FILE_END_LINE
            );
            write_to(&mut union, &union_path, record.as_bytes())?;
            written += 1;
            debug!(path = %path.display(), "Written");
            observer.on_file(path, FileOutcome::Written);
        }

        persist(union, &union_path)?;
        persist(skip_report, &skip_report_path)?;

        Ok(UnionOutput {
            union_path,
            skip_report_path,
            written,
            skipped,
        })
    }
}

type Staged = BufWriter<NamedTempFile>;

fn write_error(path: &Path, source: std::io::Error) -> HarvestError {
    HarvestError::WriteFile {
        path: path.display().to_string(),
        source,
    }
}

/// Temporary file in `dir` that will later replace `path`.
fn create(dir: &Path, path: &Path) -> Result<Staged> {
    NamedTempFile::new_in(dir)
        .map(BufWriter::new)
        .map_err(|e| write_error(path, e))
}

fn write_to(out: &mut Staged, path: &Path, bytes: &[u8]) -> Result<()> {
    out.write_all(bytes).map_err(|e| write_error(path, e))
}

/// Flush `out` and move it over `path`.
fn persist(out: Staged, path: &Path) -> Result<()> {
    let file = out.into_inner().map_err(|e| write_error(path, e.into_error()))?;
    file.persist(path).map_err(|e| write_error(path, e.error))?;
    Ok(())
}
