//! Sync orchestration - runs task groups in one mode

use std::io::Write;
use std::path::Path;

use tracing::{debug, error, info};

use super::group::TaskGroups;
use super::{RunMode, SyncResult};
use crate::comparison::DiffIter;
use crate::error::{PathRole, Result, SyncError};
use crate::task::{Task, TaskKind};

/// Approval callback for confirm mode
///
/// Receives the question for one path. `Ok(true)` applies it, `Ok(false)`
/// skips it and `Err` aborts the run.
pub type ApprovalCallback<'a> = Box<dyn FnMut(&str) -> Result<bool> + 'a>;

/// Main sync engine
pub struct SyncEngine<'a> {
    mode: RunMode,
    approver: Option<ApprovalCallback<'a>>,
}

impl<'a> SyncEngine<'a> {
    /// Create a new sync engine
    #[must_use]
    pub const fn new(mode: RunMode) -> Self {
        Self {
            mode,
            approver: None,
        }
    }

    /// Use `approver` to answer questions in confirm mode
    #[must_use]
    pub fn with_approver(mut self, approver: ApprovalCallback<'a>) -> Self {
        self.approver = Some(approver);
        self
    }

    /// Run every task of every group in order
    ///
    /// List mode writes each task's diff to `out`. Failures on single paths
    /// or directories are logged, collected in the result and do not stop
    /// the run.
    ///
    /// # Errors
    ///
    /// Returns an error if confirm mode has no approver, the approver fails,
    /// or `out` cannot be written to.
    pub fn run<W: Write>(&mut self, groups: &TaskGroups, out: &mut W) -> Result<SyncResult> {
        if self.mode == RunMode::Confirm && self.approver.is_none() {
            return Err(SyncError::Configuration(
                "confirm mode requires an approver".to_string(),
            )
            .into());
        }

        let mut result = SyncResult::default();
        for skipped in groups.skipped() {
            match skipped {
                SyncError::MissingPath {
                    role: PathRole::Source,
                    ..
                } => result.skipped_groups += 1,
                _ => result.skipped_targets += 1,
            }
        }

        for group in groups {
            info!(job = group.name(), "Running {} task(s)", group.len());
            for task in group.tasks() {
                self.run_task(task, out, &mut result)?;
            }
        }

        Ok(result)
    }

    fn run_task<W: Write>(
        &mut self,
        task: &Task,
        out: &mut W,
        result: &mut SyncResult,
    ) -> Result<()> {
        debug!("Starting task: {task}");

        let diff = match task.diff() {
            Ok(diff) => diff,
            Err(e) => {
                record(result, &e);
                return Ok(());
            }
        };

        match self.mode {
            RunMode::List => list(task, diff, out, result),
            RunMode::Confirm | RunMode::Apply => self.apply(task, diff, result),
        }
    }

    fn apply(&mut self, task: &Task, diff: DiffIter, result: &mut SyncResult) -> Result<()> {
        for item in diff {
            let path = match item {
                Ok(path) => path,
                Err(e) => {
                    record(result, &e);
                    continue;
                }
            };

            if !self.approved(task, &path)? {
                debug!("Declined {}", path.display());
                result.declined += 1;
                continue;
            }

            match task.apply(&path) {
                Ok(()) => {
                    info!(
                        "Applied {} to {}",
                        task.kind(),
                        task.source().join(&path).display()
                    );
                    match task.kind() {
                        TaskKind::Copy => result.copied += 1,
                        TaskKind::Removal => result.removed += 1,
                    }
                }
                Err(e) => record(result, &e),
            }
        }
        Ok(())
    }

    fn approved(&mut self, task: &Task, path: &Path) -> Result<bool> {
        if self.mode != RunMode::Confirm {
            return Ok(true);
        }
        match self.approver.as_mut() {
            Some(approve) => approve(&task.question(path)),
            None => Ok(false),
        }
    }
}

fn list<W: Write>(task: &Task, diff: DiffIter, out: &mut W, result: &mut SyncResult) -> Result<()> {
    let mut header_written = false;
    for item in diff {
        match item {
            Ok(path) => {
                if !header_written {
                    writeln!(
                        out,
                        "Difference between {} and {}:",
                        task.source().display(),
                        task.target().display()
                    )?;
                    header_written = true;
                }
                writeln!(out, "  + {}", path.display())?;
                result.listed += 1;
            }
            Err(e) => record(result, &e),
        }
    }

    if !header_written {
        writeln!(
            out,
            "Difference between {} and {} is empty",
            task.source().display(),
            task.target().display()
        )?;
    }
    Ok(())
}

fn record(result: &mut SyncResult, err: &SyncError) {
    error!("{err}");
    result.errors.push(err.to_string());
}
