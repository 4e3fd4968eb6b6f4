//! Directory comparison for one-directional syncing
//!
//! [`DirectoryComparison`] classifies the entries of a single directory level.
//! [`DirectoryComparator`] walks two trees level by level and yields, lazily,
//! the relative paths that exist in the source but are missing or different
//! in the target. Entries that only exist in the target are never yielded;
//! swap the roots to find those.

use std::collections::{BTreeMap, VecDeque};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::FileComparator;
use super::signature::EntryKind;
use crate::error::{PathRole, SyncError};

/// Entry names the comparator skips on both sides unless told otherwise
pub const DEFAULT_IGNORES: &[&str] = &[
    "RCS",
    "CVS",
    "tags",
    ".git",
    ".hg",
    ".bzr",
    "_darcs",
    "__pycache__",
];

/// Classification of the entries of one directory level
///
/// Every non-ignored name present in either directory lands in exactly one
/// list. Lists are sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryComparison {
    /// Present in source only
    pub only_in_source: Vec<OsString>,
    /// Present in target only
    pub only_in_target: Vec<OsString>,
    /// Files present on both sides that compare equal
    pub identical: Vec<OsString>,
    /// Files present on both sides that differ
    pub different: Vec<OsString>,
    /// Directories present on both sides
    pub common_dirs: Vec<OsString>,
    /// Same name on both sides but not a file/file or directory/directory pair
    pub incomparable: Vec<OsString>,
    /// Files present on both sides that could not be compared
    pub unreadable: Vec<OsString>,
}

impl DirectoryComparison {
    /// Classify the entries of `source` against those of `target`
    ///
    /// Names listed in `ignores` are skipped on both sides.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Diff`] if either directory cannot be listed.
    pub fn between(source: &Path, target: &Path, ignores: &[OsString]) -> Result<Self, SyncError> {
        let source_entries = Self::list(source, ignores)?;
        let mut target_entries = Self::list(target, ignores)?;

        let mut comparison = Self::default();

        for (name, source_kind) in source_entries {
            let Some(target_kind) = target_entries.remove(&name) else {
                comparison.only_in_source.push(name);
                continue;
            };

            match (source_kind, target_kind) {
                (EntryKind::Directory, EntryKind::Directory) => comparison.common_dirs.push(name),
                (EntryKind::File, EntryKind::File) => {
                    match FileComparator::same(&source.join(&name), &target.join(&name)) {
                        Ok(true) => comparison.identical.push(name),
                        Ok(false) => comparison.different.push(name),
                        Err(e) => {
                            debug!("file comparison failed: {e:#}");
                            comparison.unreadable.push(name);
                        }
                    }
                }
                _ => comparison.incomparable.push(name),
            }
        }

        comparison.only_in_target = target_entries.into_keys().collect();

        Ok(comparison)
    }

    /// Whether nothing needs to be synced at this level
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.only_in_source.is_empty()
            && self.only_in_target.is_empty()
            && self.different.is_empty()
            && self.incomparable.is_empty()
            && self.unreadable.is_empty()
    }

    /// List a directory as a sorted name to kind map
    fn list(dir: &Path, ignores: &[OsString]) -> Result<BTreeMap<OsString, EntryKind>, SyncError> {
        let to_diff_error = |source| SyncError::Diff {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = BTreeMap::new();
        for entry in fs::read_dir(dir).map_err(to_diff_error)? {
            let entry = entry.map_err(to_diff_error)?;
            let name = entry.file_name();
            if is_ignored(&name, ignores) {
                continue;
            }
            entries.insert(name, EntryKind::of(&entry.path()));
        }
        Ok(entries)
    }
}

fn is_ignored(name: &OsStr, ignores: &[OsString]) -> bool {
    ignores.iter().any(|ignored| ignored == name)
}

/// Recursive directory comparator
#[derive(Debug, Clone)]
pub struct DirectoryComparator {
    ignores: Vec<OsString>,
    include_different: bool,
}

impl Default for DirectoryComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryComparator {
    /// Comparator with [`DEFAULT_IGNORES`] that yields missing and different entries
    #[must_use]
    pub fn new() -> Self {
        Self {
            ignores: DEFAULT_IGNORES.iter().map(OsString::from).collect(),
            include_different: true,
        }
    }

    /// Add entry names to skip on both sides
    #[must_use]
    pub fn with_ignores<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        for name in names {
            let name = name.into();
            if !is_ignored(&name, &self.ignores) {
                self.ignores.push(name);
            }
        }
        self
    }

    /// Only yield entries missing from the target, not entries that differ
    #[must_use]
    pub const fn only_missing(mut self) -> Self {
        self.include_different = false;
        self
    }

    /// Names skipped on both sides
    #[must_use]
    pub fn ignores(&self) -> &[OsString] {
        &self.ignores
    }

    /// Start a lazy comparison of `source` against `target`
    ///
    /// Nothing is read beyond the two roots until the iterator is advanced.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MissingPath`] if either root is not a directory.
    pub fn compare(&self, source: &Path, target: &Path) -> Result<DiffIter, SyncError> {
        for (role, path) in [(PathRole::Source, source), (PathRole::Target, target)] {
            if !path.is_dir() {
                return Err(SyncError::MissingPath {
                    role,
                    path: path.to_path_buf(),
                });
            }
        }

        Ok(DiffIter {
            source_root: source.to_path_buf(),
            target_root: target.to_path_buf(),
            ignores: self.ignores.clone(),
            include_different: self.include_different,
            pending: vec![PathBuf::new()],
            ready: VecDeque::new(),
        })
    }
}

/// Lazy, single-pass sequence of relative paths the target is missing
///
/// Each directory level is read when the previous one is exhausted. Within
/// a level, entries only in the source come first, then entries that differ,
/// then the contents of common subdirectories, depth first, all by name.
///
/// A level that cannot be read yields one `Err` item; the walk then carries
/// on with the remaining levels.
#[derive(Debug)]
pub struct DiffIter {
    source_root: PathBuf,
    target_root: PathBuf,
    ignores: Vec<OsString>,
    include_different: bool,
    pending: Vec<PathBuf>,
    ready: VecDeque<PathBuf>,
}

impl DiffIter {
    fn visit(&mut self, relative: &Path) -> Result<(), SyncError> {
        let source = self.source_root.join(relative);
        let target = self.target_root.join(relative);
        let comparison = DirectoryComparison::between(&source, &target, &self.ignores)?;

        for name in &comparison.incomparable {
            warn!(
                "Skipping {}: entry types differ between {} and {}",
                relative.join(name).display(),
                source.display(),
                target.display()
            );
        }
        for name in &comparison.unreadable {
            warn!(
                "Skipping {}: could not compare file contents",
                source.join(name).display()
            );
        }

        let mut found = comparison.only_in_source;
        if self.include_different {
            found.extend(comparison.different);
        }
        for name in found {
            self.ready.push_back(relative.join(name));
        }

        // Reversed so the first subdirectory is visited first
        for name in comparison.common_dirs.iter().rev() {
            self.pending.push(relative.join(name));
        }

        Ok(())
    }
}

impl Iterator for DiffIter {
    type Item = Result<PathBuf, SyncError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(path) = self.ready.pop_front() {
                return Some(Ok(path));
            }

            let relative = self.pending.pop()?;
            if let Err(e) = self.visit(&relative) {
                return Some(Err(e));
            }
        }
    }
}
