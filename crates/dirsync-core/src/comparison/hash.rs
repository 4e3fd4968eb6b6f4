//! SHA-256 digests for the content fallback of the equality check

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::Context;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// SHA-256 digest of a file's contents
pub type FileHash = [u8; 32];

/// Streams file contents through SHA-256
pub struct FileHasher;

impl FileHasher {
    /// Digest of the file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn hash(path: &Path) -> Result<FileHash> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {} for hashing", path.display()))?;

        Self::hash_reader(BufReader::new(file))
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Digest of everything `reader` yields
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn hash_reader<R: Read>(mut reader: R) -> Result<FileHash> {
        let mut hasher = Sha256::new();
        io::copy(&mut reader, &mut hasher)?;
        Ok(hasher.finalize().into())
    }
}
