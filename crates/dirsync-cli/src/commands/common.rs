//! Common types and utilities for command execution

use std::path::{Path, PathBuf};

use anyhow::Result;
use dirsync_core::config::ConfigManager;
use tracing::warn;

/// Where the jobs of a run come from
#[derive(Debug, PartialEq, Eq)]
pub enum JobSource {
    /// A source directory synced into the given targets
    Directories {
        /// Source directory
        source: PathBuf,
        /// Target directories, in command-line order
        targets: Vec<PathBuf>,
    },
    /// Jobs read from a configuration file
    ConfigFile(PathBuf),
}

impl JobSource {
    /// Decide between directory mode and configuration mode
    ///
    /// Directory mode applies when targets are given or `source` is a
    /// directory. Anything else names a configuration file, or none at all
    /// when discovery should pick one.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no configuration file can be found.
    pub fn from_args(source: Option<&Path>, targets: &[PathBuf]) -> Result<Self> {
        if let Some(source) = source {
            if !targets.is_empty() || source.is_dir() {
                if targets.is_empty() {
                    warn!("No targets given for {}", source.display());
                }
                return Ok(Self::Directories {
                    source: source.to_path_buf(),
                    targets: targets.to_vec(),
                });
            }
        }

        ConfigManager::locate(source).map(Self::ConfigFile)
    }
}
