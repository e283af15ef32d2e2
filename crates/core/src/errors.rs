//! Error types for the userlint core library.
//!
//! Each subsystem has its own error type derived with `thiserror`.
//!
//! Malformed names and email addresses found in history are never errors;
//! they end up in the invalid set of a [`ScanReport`](crate::scanner::ScanReport).

use thiserror::Error;

// ---------------------------------------------------------------------------
// TLD table errors
// ---------------------------------------------------------------------------

/// Errors from loading the public suffix list.
#[derive(Debug, Error)]
pub enum TldError {
    /// The suffix list file does not exist.
    #[error("public suffix list not found at '{0}'")]
    SourceNotFound(String),

    /// The suffix list contained no usable rules.
    #[error("public suffix list at '{0}' contains no suffix rules")]
    Empty(String),

    /// Generic I/O wrapper.
    #[error("public suffix list I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Git errors
// ---------------------------------------------------------------------------

/// Errors from walking the commit graph (git2).
#[derive(Debug, Error)]
pub enum GitError {
    /// The repository path does not exist or is not a git repo.
    #[error("git repository not found at '{0}'")]
    RepositoryNotFound(String),

    /// The starting revision could not be resolved to a commit.
    #[error("git revision not found: {0}")]
    RevisionNotFound(String),

    /// A `git2` library error.
    #[error("git2 error: {0}")]
    Git2Error(#[from] git2::Error),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue {
        field: String,
        detail: String,
    },

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = GitError::RepositoryNotFound("/tmp/repo".into());
        assert_eq!(err.to_string(), "git repository not found at '/tmp/repo'");

        let err = GitError::RevisionNotFound("no-such-branch".into());
        assert_eq!(err.to_string(), "git revision not found: no-such-branch");

        let err = TldError::SourceNotFound("/nonexistent.dat".into());
        assert!(err.to_string().contains("/nonexistent.dat"));

        let err = ConfigError::InvalidValue {
            field: "scan.revision".into(),
            detail: "must not be empty".into(),
        };
        assert!(err.to_string().contains("scan.revision"));
    }

    #[test]
    fn test_git2_error_converts() {
        let err: GitError = git2::Error::from_str("boom").into();
        assert!(matches!(err, GitError::Git2Error(_)));
        assert!(err.to_string().contains("boom"));
    }
}
