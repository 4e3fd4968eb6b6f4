//! Configuration validation and error reporting

use tracing::warn;

use super::types::SyncConfig;
use crate::error::SyncError;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration
    ///
    /// Only the shape of the configuration is checked here. Whether the
    /// configured directories exist is decided when task groups are built,
    /// so one bad entry does not prevent the others from running.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] if the configuration is invalid.
    pub fn validate(config: &SyncConfig) -> Result<(), SyncError> {
        for (name, job) in config.jobs() {
            if name.trim().is_empty() {
                return Err(SyncError::Configuration(
                    "Job name cannot be empty".to_string(),
                ));
            }

            if job.source.as_os_str().is_empty() {
                return Err(SyncError::Configuration(format!(
                    "Job '{name}' has an empty source"
                )));
            }

            if job.targets.iter().any(|t| t.as_os_str().is_empty()) {
                return Err(SyncError::Configuration(format!(
                    "Job '{name}' has an empty target"
                )));
            }

            for ignored in &job.ignore {
                if ignored.trim().is_empty() || ignored.contains(['/', '\\']) {
                    return Err(SyncError::Configuration(format!(
                        "Job '{name}' has an invalid ignore entry '{ignored}': not a plain name"
                    )));
                }
            }

            if job.targets.is_empty() {
                warn!("Job '{name}' has no targets");
            }
        }

        Ok(())
    }
}
