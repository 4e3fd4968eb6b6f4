//! Building task groups from configuration

use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::config::SyncConfig;
use crate::error::{PathRole, SyncError};
use crate::task::Task;

/// Named, ordered list of tasks built from one configuration entry
#[derive(Debug, Clone)]
pub struct TaskGroup {
    name: String,
    tasks: Vec<Task>,
}

impl TaskGroup {
    /// Entry name the group was built from
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tasks in execution order
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the group has no tasks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Every task group of a run, plus what had to be skipped while building them
///
/// Copy tasks come first in target order. With mirroring enabled each group
/// then gets one removal task per copy task, in the same order, so every
/// target is filled before anything is deleted from it.
#[derive(Debug, Default)]
pub struct TaskGroups {
    groups: Vec<TaskGroup>,
    skipped: Vec<SyncError>,
}

impl TaskGroups {
    /// Groups for every entry of a configuration, in configuration order
    ///
    /// An entry whose source is missing is skipped entirely; a missing or
    /// overlapping target only drops that target. Neither stops the other
    /// entries from being built.
    #[must_use]
    pub fn from_config(config: &SyncConfig, mirror: bool) -> Self {
        let mut groups = Self::default();
        for (name, job) in config.jobs() {
            groups.add(name, &job.source, &job.targets, &job.ignore, mirror);
        }
        groups
    }

    /// A single group syncing `source` into each of `targets`
    ///
    /// The group is named after the source directory.
    #[must_use]
    pub fn from_directories(
        source: &Path,
        targets: &[PathBuf],
        ignore: &[String],
        mirror: bool,
    ) -> Self {
        let name = dunce::canonicalize(source)
            .ok()
            .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| source.display().to_string());

        let mut groups = Self::default();
        groups.add(&name, source, targets, ignore, mirror);
        groups
    }

    fn add(
        &mut self,
        name: &str,
        source: &Path,
        targets: &[PathBuf],
        ignore: &[String],
        mirror: bool,
    ) {
        let Some(source) = self.resolve(name, PathRole::Source, source) else {
            return;
        };

        let mut tasks = Vec::with_capacity(if mirror { targets.len() * 2 } else { targets.len() });
        for target in targets {
            let Some(target) = self.resolve(name, PathRole::Target, target) else {
                continue;
            };

            if source.starts_with(&target) || target.starts_with(&source) {
                let err = SyncError::OverlappingRoots {
                    source_dir: source.clone(),
                    target_dir: target,
                };
                warn!(job = name, "Skipping target: {err}");
                self.skipped.push(err);
                continue;
            }

            tasks.push(Task::copy(&source, target).with_ignores(ignore.iter().cloned()));
        }

        if mirror {
            let removals: Vec<Task> = tasks.iter().filter_map(Task::mirrored).collect();
            tasks.extend(removals);
        }

        debug!(job = name, "Built {} task(s)", tasks.len());
        self.groups.push(TaskGroup {
            name: name.to_string(),
            tasks,
        });
    }

    /// Canonical form of a configured directory, recording it as skipped if
    /// it does not exist
    fn resolve(&mut self, name: &str, role: PathRole, path: &Path) -> Option<PathBuf> {
        match dunce::canonicalize(path) {
            Ok(resolved) if resolved.is_dir() => Some(resolved),
            _ => {
                let err = SyncError::MissingPath {
                    role,
                    path: path.to_path_buf(),
                };
                error!(job = name, "{err}");
                self.skipped.push(err);
                None
            }
        }
    }

    /// Groups in execution order
    pub fn iter(&self) -> std::slice::Iter<'_, TaskGroup> {
        self.groups.iter()
    }

    /// Group built from the entry called `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TaskGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Entries and targets left out, in the order they were found
    #[must_use]
    pub fn skipped(&self) -> &[SyncError] {
        &self.skipped
    }

    /// Number of groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of tasks across all groups
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.groups.iter().map(TaskGroup::len).sum()
    }
}

impl<'a> IntoIterator for &'a TaskGroups {
    type Item = &'a TaskGroup;
    type IntoIter = std::slice::Iter<'a, TaskGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
