use super::error::RemoteError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::{debug, info};

const URL_SCHEMES: &[&str] = &["https://", "http://", "ssh://", "git://", "file://"];

/// Result of a successful clone operation
pub struct ClonedRepo {
    /// Path to the cloned repository
    pub path: PathBuf,
    /// Temporary directory handle (dropped when ClonedRepo is dropped)
    _temp_dir: TempDir,
}

impl ClonedRepo {
    /// Get the path to the cloned repository
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Git repository cloner
#[derive(Default)]
pub struct GitCloner {
    /// Optional authentication token for HTTPS GitHub repositories
    auth_token: Option<String>,
    /// Branch or tag to check out; `None` means the remote HEAD
    git_ref: Option<String>,
}

impl std::fmt::Debug for GitCloner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitCloner")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("git_ref", &self.git_ref)
            .finish()
    }
}

impl GitCloner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set authentication token for private repositories
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Set the branch or tag to clone
    pub fn with_ref(mut self, git_ref: Option<String>) -> Self {
        self.git_ref = git_ref.filter(|r| !r.is_empty() && r != "HEAD");
        self
    }

    /// Clone a repository into a fresh temporary directory.
    ///
    /// The clone is shallow and runs with hooks disabled. git's stderr is
    /// captured and classified when the clone fails.
    pub fn clone(&self, url: &str) -> Result<ClonedRepo, RemoteError> {
        validate_url(url)?;
        check_git_available()?;

        let temp_dir = tempfile::Builder::new()
            .prefix("repoharvester-")
            .tempdir()
            .map_err(|e| RemoteError::TempDir(e.to_string()))?;
        let repo_path = temp_dir.path().join(repo_label_from_url(url));

        let clone_url = self.build_clone_url(url);
        info!(url, "Cloning repository");
        self.execute_clone(url, &clone_url, &repo_path)?;

        debug!(path = %repo_path.display(), "Clone complete");

        Ok(ClonedRepo {
            path: repo_path,
            _temp_dir: temp_dir,
        })
    }

    /// Build clone URL with authentication if needed
    fn build_clone_url(&self, url: &str) -> String {
        if let Some(ref token) = self.auth_token
            && url.starts_with("https://github.com/")
        {
            return url.replace(
                "https://github.com/",
                &format!("https://{}@github.com/", token),
            );
        }
        url.to_string()
    }

    /// Execute git clone command with security measures
    fn execute_clone(&self, url: &str, clone_url: &str, path: &Path) -> Result<(), RemoteError> {
        let mut cmd = Command::new("git");

        // Disable hooks for security
        cmd.env("GIT_TEMPLATE_DIR", "");

        cmd.args([
            "clone",
            "--depth",
            "1",
            "--single-branch",
            "--no-tags",
            "-c",
            "core.hooksPath=/dev/null",
            "-c",
            "advice.detachedHead=false",
        ]);

        if let Some(ref git_ref) = self.git_ref {
            cmd.args(["--branch", git_ref]);
        }

        cmd.arg(clone_url);
        cmd.arg(path);

        let output = cmd.output().map_err(|e| RemoteError::CloneFailed {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if output.status.success() {
            return Ok(());
        }

        Err(classify_failure(
            url,
            &String::from_utf8_lossy(&output.stderr),
        ))
    }
}

/// Map git's stderr to a [`RemoteError`].
fn classify_failure(url: &str, stderr: &str) -> RemoteError {
    if stderr.contains("Repository not found")
        || stderr.contains("404")
        || stderr.contains("does not exist")
    {
        return RemoteError::NotFound(url.to_string());
    }

    if stderr.contains("passphrase")
        || stderr.contains("Authentication failed")
        || stderr.contains("could not read Username")
        || stderr.contains("Permission denied (publickey")
    {
        return RemoteError::AuthRequired(url.to_string());
    }

    RemoteError::CloneFailed {
        url: url.to_string(),
        message: stderr.trim().to_string(),
    }
}

/// Validate the repository URL format
fn validate_url(url: &str) -> Result<(), RemoteError> {
    if is_remote_url(url) {
        Ok(())
    } else {
        Err(RemoteError::InvalidUrl(format!(
            "URL must use one of {} or the git@host:path form: {}",
            URL_SCHEMES.join(", "),
            url
        )))
    }
}

/// Whether `source` looks like something `git clone` accepts.
pub fn is_remote_url(source: &str) -> bool {
    if URL_SCHEMES.iter().any(|s| source.starts_with(s)) {
        return true;
    }
    // scp-like syntax: user@host:path
    match source.split_once(':') {
        Some((host, path)) => host.contains('@') && !host.contains('/') && !path.is_empty(),
        None => false,
    }
}

/// Check if git command is available
fn check_git_available() -> Result<(), RemoteError> {
    Command::new("git")
        .arg("--version")
        .output()
        .map_err(|_| RemoteError::GitNotFound)?;
    Ok(())
}

/// Repository name from a clone URL.
///
/// The last `/` or `:` separated segment, without a trailing `.git`.
pub fn repo_label_from_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed
        .rsplit(&['/', ':'][..])
        .next()
        .unwrap_or(trimmed);
    let label = last.strip_suffix(".git").unwrap_or(last);
    if label.is_empty() {
        "repository".to_string()
    } else {
        label.to_string()
    }
}
