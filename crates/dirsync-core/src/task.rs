//! Copy and removal tasks
//!
//! A task binds a source root and a target root to one operation. Its diff is
//! computed fresh on every call and applied one relative path at a time.

mod executor;

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

pub use executor::FileOperationExecutor;

use crate::comparison::{DiffIter, DirectoryComparator};
use crate::error::{Operation, SyncError};

/// Operation a task applies to each path of its diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Copy `source/path` to `target/path`
    Copy,
    /// Delete `source/path`
    Removal,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => f.write_str("copy"),
            Self::Removal => f.write_str("removal"),
        }
    }
}

/// One source/target root pair bound to one operation kind
///
/// For a removal task the roles are swapped relative to the sync it
/// belongs to: `source` is the sync target that gets cleaned up and
/// `target` is the sync source it is checked against.
#[derive(Debug, Clone)]
pub struct Task {
    kind: TaskKind,
    source: PathBuf,
    target: PathBuf,
    comparator: DirectoryComparator,
}

impl Task {
    /// Task copying what `target` is missing from `source`
    #[must_use]
    pub fn copy(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            kind: TaskKind::Copy,
            source: source.into(),
            target: target.into(),
            comparator: DirectoryComparator::new(),
        }
    }

    /// Task deleting from `source` whatever `target` does not have
    ///
    /// Entries present on both sides with different content are left alone.
    #[must_use]
    pub fn removal(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            kind: TaskKind::Removal,
            source: source.into(),
            target: target.into(),
            comparator: DirectoryComparator::new().only_missing(),
        }
    }

    /// Skip additional entry names when diffing
    #[must_use]
    pub fn with_ignores<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.comparator = self.comparator.with_ignores(names);
        self
    }

    /// The removal task that mirrors this copy task, `None` for removals
    #[must_use]
    pub fn mirrored(&self) -> Option<Self> {
        match self.kind {
            TaskKind::Copy => Some(Self {
                kind: TaskKind::Removal,
                source: self.target.clone(),
                target: self.source.clone(),
                comparator: self.comparator.clone().only_missing(),
            }),
            TaskKind::Removal => None,
        }
    }

    /// Operation kind
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Root the diff is computed from
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Root the diff is computed against
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Lazily compute the relative paths this task would act on
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MissingPath`] if either root is not a directory.
    pub fn diff(&self) -> Result<DiffIter, SyncError> {
        self.comparator.compare(&self.source, &self.target)
    }

    /// Apply the task to one relative path from [`Task::diff`]
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Apply`] if the filesystem operation fails.
    pub fn apply(&self, path: &Path) -> Result<(), SyncError> {
        match self.kind {
            TaskKind::Copy => {
                let from = self.source.join(path);
                FileOperationExecutor::copy(&from, &self.target.join(path)).map_err(|source| {
                    SyncError::Apply {
                        operation: Operation::Copy,
                        path: from,
                        source,
                    }
                })
            }
            TaskKind::Removal => {
                let victim = self.source.join(path);
                FileOperationExecutor::remove(&victim).map_err(|source| SyncError::Apply {
                    operation: Operation::Remove,
                    path: victim,
                    source,
                })
            }
        }
    }

    /// Question to ask before applying the task to `path`
    #[must_use]
    pub fn question(&self, path: &Path) -> String {
        match self.kind {
            TaskKind::Copy => format!(
                "Copy {} to {}?",
                self.source.join(path).display(),
                self.target.join(path).display()
            ),
            TaskKind::Removal => format!("Remove {}?", self.source.join(path).display()),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TaskKind::Copy => write!(
                f,
                "copy {} -> {}",
                self.source.display(),
                self.target.display()
            ),
            TaskKind::Removal => write!(
                f,
                "remove from {} what {} lacks",
                self.source.display(),
                self.target.display()
            ),
        }
    }
}
