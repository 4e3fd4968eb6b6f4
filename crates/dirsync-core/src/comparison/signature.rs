//! Stat signatures used for the cheap equality check

use std::fs::{self, Metadata};
use std::path::Path;
use std::time::SystemTime;

use anyhow::Context;

use crate::error::Result;

/// Kind of a filesystem entry, following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Anything else, including entries whose metadata cannot be read
    Other,
}

impl EntryKind {
    /// Kind of the entry at `path`, `Other` when it cannot be inspected
    #[must_use]
    pub fn of(path: &Path) -> Self {
        fs::metadata(path).map_or(Self::Other, |metadata| Self::from_metadata(&metadata))
    }

    fn from_metadata(metadata: &Metadata) -> Self {
        if metadata.is_dir() {
            Self::Directory
        } else if metadata.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Entry kind, size and modification time of a file
///
/// Two entries with equal signatures are treated as identical without
/// looking at their content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Entry kind
    pub kind: EntryKind,
    /// Size in bytes
    pub len: u64,
    /// Last modification time, if the platform reports one
    pub modified: Option<SystemTime>,
}

impl Signature {
    /// Build a signature from already fetched metadata
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            kind: EntryKind::from_metadata(metadata),
            len: metadata.len(),
            modified: metadata.modified().ok(),
        }
    }

    /// Read the signature of the entry at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be read.
    pub fn read(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for: {}", path.display()))?;
        Ok(Self::from_metadata(&metadata))
    }

    /// Whether the signature describes a regular file
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_entry_kinds() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "content").unwrap();

        assert_eq!(EntryKind::of(&file), EntryKind::File);
        assert_eq!(EntryKind::of(tmp.path()), EntryKind::Directory);
        assert_eq!(EntryKind::of(&tmp.path().join("missing")), EntryKind::Other);
    }

    #[test]
    fn test_signature_tracks_size() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "12345").unwrap();

        let signature = Signature::read(&file).unwrap();
        assert!(signature.is_file());
        assert_eq!(signature.len, 5);
    }

    #[test]
    fn test_signature_changes_with_mtime() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "content").unwrap();
        let before = Signature::read(&file).unwrap();

        let handle = File::options().write(true).open(&file).unwrap();
        handle
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000))
            .unwrap();
        let after = Signature::read(&file).unwrap();

        assert_eq!(before.len, after.len);
        assert_ne!(before, after);
    }

    #[test]
    fn test_signature_of_missing_path() {
        let tmp = TempDir::new().unwrap();
        assert!(Signature::read(&tmp.path().join("missing.txt")).is_err());
    }
}
