//! File and directory comparison
//!
//! This module provides read-only analysis of two directory trees:
//! - A cheap per-file equality check (stat signature, size, then SHA-256)
//! - Per-level classification of directory entries
//! - A lazy, depth-first sequence of relative paths that a target is missing

mod directory;
mod hash;
mod signature;


use std::path::Path;

pub use directory::{DEFAULT_IGNORES, DiffIter, DirectoryComparator, DirectoryComparison};
pub use hash::{FileHash, FileHasher};
pub use signature::{EntryKind, Signature};

use crate::error::Result;

/// File comparator implementing the shallow equality check
pub struct FileComparator;

impl FileComparator {
    /// Decide whether two files are the same
    ///
    /// Equal signatures mean identical. Otherwise two regular files of the
    /// same size are compared by content digest; anything else differs.
    ///
    /// # Errors
    ///
    /// Returns an error if metadata or content of either file cannot be read.
    pub fn same(source: &Path, destination: &Path) -> Result<bool> {
        let source_sig = Signature::read(source)?;
        let dest_sig = Signature::read(destination)?;

        if source_sig == dest_sig {
            return Ok(true);
        }

        if !source_sig.is_file() || !dest_sig.is_file() || source_sig.len != dest_sig.len {
            return Ok(false);
        }

        Ok(FileHasher::hash(source)? == FileHasher::hash(destination)?)
    }
}
