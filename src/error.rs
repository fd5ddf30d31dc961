use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

/// Unified error type for changelog generation
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Git operation failed")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Repository path does not exist: {}", .0.display())]
    RepoPathMissing(PathBuf),

    #[error("Not a git repository: {}", .path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Reference '{0}' does not resolve to a commit")]
    UnresolvableReference(String),

    #[error("Value of argument --{argument} ('{reference}') does not resolve to a valid commit in this repository")]
    InvalidLimit {
        argument: String,
        reference: String,
        #[source]
        source: Box<ChangelogError>,
    },

    #[error("Tag '{0}' not found")]
    MissingTag(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// Create a pattern error for a regex that failed to compile
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        ChangelogError::Pattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Wrap a resolution failure with the name of the argument it came from
    pub fn invalid_limit(
        argument: impl Into<String>,
        reference: impl Into<String>,
        source: ChangelogError,
    ) -> Self {
        ChangelogError::InvalidLimit {
            argument: argument.into(),
            reference: reference.into(),
            source: Box::new(source),
        }
    }

    /// Process exit code reported by the binary for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ChangelogError::Config(_) | ChangelogError::Pattern { .. } => {
                exit_codes::INVALID_INPUT
            }
            ChangelogError::RepoPathMissing(_) => exit_codes::REPO_PATH_INVALID,
            ChangelogError::NotARepository { .. } => exit_codes::REPO_PATH_NOT_REPO,
            ChangelogError::UnresolvableReference(_) | ChangelogError::InvalidLimit { .. } => {
                exit_codes::INVALID_VCS_LIMITS
            }
            ChangelogError::MissingTag(_) | ChangelogError::Git(_) | ChangelogError::Io(_) => {
                exit_codes::PROCESSING_FAILED
            }
        }
    }
}
