use thiserror::Error;

/// Unified error type for nextver operations
#[derive(Error, Debug)]
pub enum NextverError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("No eligible commits found after tag '{tag}'")]
    NoEligibleCommits { tag: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in nextver
pub type Result<T> = std::result::Result<T, NextverError>;

impl NextverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        NextverError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        NextverError::Version(msg.into())
    }

    /// Create a no-eligible-commits error naming the starting tag
    pub fn no_eligible_commits(tag: impl Into<String>) -> Self {
        NextverError::NoEligibleCommits { tag: tag.into() }
    }
}
