//! Filesystem copy and removal primitives

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Executes the filesystem side of copy and removal tasks
pub struct FileOperationExecutor;

impl FileOperationExecutor {
    /// Copy a file or a whole directory tree
    ///
    /// # Errors
    ///
    /// Returns an error if `source` cannot be read, if it is neither a
    /// regular file nor a directory, or if a directory copy finds `dest`
    /// already present.
    pub fn copy(source: &Path, dest: &Path) -> io::Result<()> {
        if fs::metadata(source)?.is_dir() {
            Self::copy_directory(source, dest)
        } else {
            Self::copy_file(source, dest)
        }
    }

    /// Copy a single file, overwriting `dest`
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is not a regular file or the copy fails.
    pub fn copy_file(source: &Path, dest: &Path) -> io::Result<()> {
        // Reading a FIFO or a device would block or never end
        if !fs::metadata(source)?.is_file() {
            return Err(not_regular(source));
        }

        // Create parent directory if needed
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::copy(source, dest)?;
        Ok(())
    }

    /// Copy a directory tree into a destination that must not exist yet
    ///
    /// Existing destinations are never merged into; the copy fails with
    /// `AlreadyExists` instead.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory or file in the tree cannot be copied,
    /// or if the tree holds anything else.
    pub fn copy_directory(source: &Path, dest: &Path) -> io::Result<()> {
        fs::create_dir(dest)?;

        for entry in WalkDir::new(source).min_depth(1).follow_links(true) {
            let entry = entry?;
            let rel_path = entry
                .path()
                .strip_prefix(source)
                .map_err(io::Error::other)?;
            let dest_path = dest.join(rel_path);

            let file_type = entry.file_type();
            if file_type.is_dir() {
                fs::create_dir(&dest_path)?;
            } else if file_type.is_file() {
                fs::copy(entry.path(), &dest_path)?;
            } else {
                return Err(not_regular(entry.path()));
            }
        }

        Ok(())
    }

    /// Remove a file, a symlink or a whole directory tree
    ///
    /// Symlinks are removed themselves, never followed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or cannot be removed.
    pub fn remove(path: &Path) -> io::Result<()> {
        if fs::symlink_metadata(path)?.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }
}

fn not_regular(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{} is not a regular file or directory", path.display()),
    )
}
