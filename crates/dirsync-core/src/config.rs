//! Configuration file parsing, discovery and validation
//!
//! The configuration is a JSON object mapping job names to
//! `{"source": ..., "targets": [...], "ignore": [...]}`. Job order is the
//! order of the keys in the file.

mod discovery;
mod types;
mod validation;

#[cfg(test)]
mod integration_tests;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

pub use discovery::{ConfigDiscovery, ConfigFiles, PROJECT_FILE_NAME};
pub use types::{JobConfig, SyncConfig};
pub use validation::ConfigValidator;

use crate::error::{Result, SyncError};

/// Configuration manager that coordinates discovery, parsing and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Pick the configuration file to use
    ///
    /// An explicit path wins; otherwise the discovered project file, then the
    /// global file.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] if no file is given and none is found.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let files = ConfigDiscovery::discover();
        debug!("Discovered config files: {files:?}");

        files.preferred().map(Path::to_path_buf).ok_or_else(|| {
            SyncError::Configuration(format!(
                "no source given and no {PROJECT_FILE_NAME} or global configuration found"
            ))
            .into()
        })
    }

    /// Load and validate configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<SyncConfig> {
        info!("Loading configuration from {}", path.display());

        let bytes = fs::read(path)
            .map_err(|e| SyncError::Configuration(format!("cannot read {}: {e}", path.display())))?;

        Self::parse(&bytes)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse and validate configuration from raw bytes
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] if the bytes are not a valid configuration.
    pub fn parse(bytes: &[u8]) -> Result<SyncConfig> {
        let config = SyncConfig::from_slice(bytes)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
