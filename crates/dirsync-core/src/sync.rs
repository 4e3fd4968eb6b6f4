//! Task groups and the sync engine
//!
//! [`TaskGroups`] turn configuration entries (or a source directory plus
//! targets) into ordered task lists. [`SyncEngine`] runs them one task at a
//! time in a single [`RunMode`].

mod group;
mod orchestrator;
mod reporting;

#[cfg(test)]
mod integration_tests;

pub use group::{TaskGroup, TaskGroups};
pub use orchestrator::{ApprovalCallback, SyncEngine};
pub use reporting::SyncReporter;

use crate::error::SyncError;

/// How every task of a run is processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Print each task's diff without touching the filesystem
    List,
    /// Ask before applying each path
    Confirm,
    /// Apply every path
    #[default]
    Apply,
}

impl RunMode {
    /// Mode selected by the `list` and `confirm` switches
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] if both switches are set.
    pub fn from_flags(list: bool, confirm: bool) -> Result<Self, SyncError> {
        match (list, confirm) {
            (true, true) => Err(SyncError::Configuration(
                "list mode cannot be combined with confirm mode".to_string(),
            )),
            (true, false) => Ok(Self::List),
            (false, true) => Ok(Self::Confirm),
            (false, false) => Ok(Self::Apply),
        }
    }
}

/// Run-wide options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncOptions {
    mode: RunMode,
    mirror: bool,
}

impl SyncOptions {
    /// Combine a run mode with mirror mode
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] for list mode with mirroring.
    pub fn new(mode: RunMode, mirror: bool) -> Result<Self, SyncError> {
        if mode == RunMode::List && mirror {
            return Err(SyncError::Configuration(
                "list mode cannot be combined with removing extra files".to_string(),
            ));
        }
        Ok(Self { mode, mirror })
    }

    /// Options from the three command-line switches
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] if `list` is combined with either
    /// of the other switches.
    pub fn from_flags(list: bool, confirm: bool, mirror: bool) -> Result<Self, SyncError> {
        Self::new(RunMode::from_flags(list, confirm)?, mirror)
    }

    /// Run mode
    #[must_use]
    pub const fn mode(&self) -> RunMode {
        self.mode
    }

    /// Whether removal tasks are appended to every group
    #[must_use]
    pub const fn mirror(&self) -> bool {
        self.mirror
    }
}

/// Synchronization result with statistics
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    /// Paths copied
    pub copied: usize,
    /// Paths removed
    pub removed: usize,
    /// Paths the approver declined
    pub declined: usize,
    /// Paths printed in list mode
    pub listed: usize,
    /// Configuration entries skipped because their source is missing
    pub skipped_groups: usize,
    /// Targets skipped because they are missing or overlap their source
    pub skipped_targets: usize,
    /// Errors encountered, one per failed path or unreadable directory
    pub errors: Vec<String>,
}

impl SyncResult {
    /// Total operations performed
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.copied + self.removed
    }

    /// Whether everything configured ran without errors
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.errors.is_empty() && self.skipped_groups == 0 && self.skipped_targets == 0
    }
}
