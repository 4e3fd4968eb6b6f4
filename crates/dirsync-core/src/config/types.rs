//! Configuration types and structures

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// One named sync job: a source fanned out to any number of targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    /// Directory content is copied from
    pub source: PathBuf,

    /// Directories content is copied into, one task each
    pub targets: Vec<PathBuf>,

    /// Extra entry names to skip, on top of the comparator defaults
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}

impl JobConfig {
    /// Job without extra ignores
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, targets: Vec<PathBuf>) -> Self {
        Self {
            source: source.into(),
            targets,
            ignore: Vec::new(),
        }
    }
}

/// Main configuration: job name to job, in file order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncConfig {
    jobs: IndexMap<String, JobConfig>,
}

impl SyncConfig {
    /// Parse a JSON configuration document
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] if the document is not valid
    /// JSON or does not match the expected shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SyncError> {
        serde_json::from_slice(bytes).map_err(|e| SyncError::Configuration(e.to_string()))
    }

    /// Add or replace a job, keeping the position of an existing name
    pub fn insert(&mut self, name: impl Into<String>, job: JobConfig) {
        self.jobs.insert(name.into(), job);
    }

    /// Ignore `names` in every job, in addition to what each job lists
    pub fn add_ignores(&mut self, names: &[String]) {
        for job in self.jobs.values_mut() {
            for name in names {
                if !job.ignore.contains(name) {
                    job.ignore.push(name.clone());
                }
            }
        }
    }

    /// Jobs in configuration order
    pub fn jobs(&self) -> impl Iterator<Item = (&str, &JobConfig)> {
        self.jobs.iter().map(|(name, job)| (name.as_str(), job))
    }

    /// Number of jobs
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether there are no jobs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl FromIterator<(String, JobConfig)> for SyncConfig {
    fn from_iter<I: IntoIterator<Item = (String, JobConfig)>>(iter: I) -> Self {
        Self {
            jobs: iter.into_iter().collect(),
        }
    }
}
