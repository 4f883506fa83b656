use thiserror::Error;

/// Errors raised while acquiring a repository.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Git clone operation failed
    #[error("Git clone failed for {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Invalid repository URL format
    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),

    /// Repository not found (404)
    #[error("Repository not found: {0}")]
    NotFound(String),

    /// Credentials or an SSH passphrase were required and not accepted
    #[error("Authentication required for repository: {0}")]
    AuthRequired(String),

    /// Temporary directory creation failed
    #[error("Temporary directory error: {0}")]
    TempDir(String),

    /// Git command not found
    #[error("Git command not found. Please install git.")]
    GitNotFound,
}

impl RemoteError {
    /// Check if error is due to authentication issues
    pub fn is_auth_error(&self) -> bool {
        matches!(self, RemoteError::AuthRequired(_))
    }
}
