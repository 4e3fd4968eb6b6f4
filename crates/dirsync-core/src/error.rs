use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// Which side of a sync a missing path was configured as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    /// Directory content is copied from
    Source,
    /// Directory content is copied into
    Target,
}

impl fmt::Display for PathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Filesystem operation that failed while applying a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Copying a file or directory tree
    Copy,
    /// Removing a file or directory tree
    Remove,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => f.write_str("copy"),
            Self::Remove => f.write_str("remove"),
        }
    }
}

/// Errors raised by the sync core
///
/// Only [`SyncError::Configuration`] is fatal for a run. The other variants
/// are reported at the granularity they occur at (entry, target, path or
/// directory level) and the run carries on.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Malformed configuration or an invalid combination of options
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A configured source or target directory does not exist
    #[error("{role} directory does not exist: {}", path.display())]
    MissingPath {
        /// Role the path was configured with
        role: PathRole,
        /// The offending path
        path: PathBuf,
    },

    /// A target lies inside its source or the other way round
    #[error("source {} and target {} overlap", source_dir.display(), target_dir.display())]
    OverlappingRoots {
        /// Configured source directory
        source_dir: PathBuf,
        /// Configured target directory
        target_dir: PathBuf,
    },

    /// Copying or removing a single path failed
    #[error("failed to {operation} {}: {source}", path.display())]
    Apply {
        /// Operation that was attempted
        operation: Operation,
        /// Absolute path the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A directory could not be read while computing a diff
    #[error("failed to read directory {}: {source}", path.display())]
    Diff {
        /// Directory that could not be listed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Whether this error must abort the whole run
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
