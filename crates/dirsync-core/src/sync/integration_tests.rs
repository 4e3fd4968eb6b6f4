//! Integration tests for running task groups end to end

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tempfile::TempDir;
use walkdir::WalkDir;

use super::{RunMode, SyncEngine, SyncReporter, TaskGroups};
use crate::config::{ConfigManager, JobConfig, SyncConfig};
use crate::error::Result;

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let dst = tmp.path().join("dst");
    fs::create_dir(&src).unwrap();
    fs::create_dir(&dst).unwrap();
    (tmp, src, dst)
}

/// Relative path, length and modification time of every entry under `root`
fn snapshot(root: &Path) -> Vec<(PathBuf, u64, SystemTime)> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let meta = entry.metadata().unwrap();
            (
                entry.path().strip_prefix(root).unwrap().to_path_buf(),
                meta.len(),
                meta.modified().unwrap(),
            )
        })
        .collect()
}

fn apply(groups: &TaskGroups) -> super::SyncResult {
    SyncEngine::new(RunMode::Apply)
        .run(groups, &mut Vec::new())
        .unwrap()
}

#[test]
fn test_copy_into_empty_target() {
    let (_tmp, src, dst) = setup();
    fs::write(src.join("a.txt"), "a").unwrap();
    fs::create_dir(src.join("sub")).unwrap();
    fs::write(src.join("sub/b.txt"), "b").unwrap();

    let groups = TaskGroups::from_directories(&src, &[dst.clone()], &[], false);
    let result = apply(&groups);

    // "sub" is copied as a whole tree
    assert_eq!(result.copied, 2);
    assert!(result.is_success());
    assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "a");
    assert_eq!(fs::read_to_string(dst.join("sub/b.txt")).unwrap(), "b");
}

#[test]
fn test_mirror_removes_extra_files() {
    let (_tmp, src, dst) = setup();
    fs::write(src.join("a.txt"), "a").unwrap();
    fs::write(dst.join("a.txt"), "a").unwrap();
    fs::write(dst.join("extra.txt"), "extra").unwrap();

    let groups = TaskGroups::from_directories(&src, &[dst.clone()], &[], true);
    let result = apply(&groups);

    assert_eq!(result.removed, 1);
    assert!(dst.join("a.txt").exists());
    assert!(!dst.join("extra.txt").exists());
    for task in groups.iter().flat_map(|group| group.tasks()) {
        assert_eq!(task.diff().unwrap().count(), 0, "{task}");
    }
}

#[test]
fn test_mirror_overwrites_changed_files_instead_of_removing() {
    let (_tmp, src, dst) = setup();
    fs::write(src.join("changed.txt"), "new content").unwrap();
    fs::write(dst.join("changed.txt"), "old").unwrap();
    fs::create_dir(dst.join("stale")).unwrap();
    fs::write(dst.join("stale/x.txt"), "x").unwrap();

    let groups = TaskGroups::from_directories(&src, &[dst.clone()], &[], true);
    let result = apply(&groups);

    assert_eq!(result.copied, 1);
    assert_eq!(result.removed, 1);
    assert_eq!(
        fs::read_to_string(dst.join("changed.txt")).unwrap(),
        "new content"
    );
    assert!(!dst.join("stale").exists());
}

#[test]
fn test_missing_source_entry_is_skipped_softly() {
    let tmp = TempDir::new().unwrap();
    let t1 = tmp.path().join("t1");
    fs::create_dir(&t1).unwrap();
    let document = serde_json::json!({
        "job1": {"source": tmp.path().join("missing_dir"), "targets": [t1]}
    });
    let config = ConfigManager::parse(&serde_json::to_vec(&document).unwrap()).unwrap();

    let groups = TaskGroups::from_config(&config, false);
    let result = apply(&groups);

    assert_eq!(groups.task_count(), 0);
    assert_eq!(result.skipped_groups, 1);
    assert!(result.errors.is_empty());
    assert!(SyncReporter::generate_summary(&result).contains("Skipped jobs:    1"));
}

#[test]
fn test_list_mode_is_read_only() {
    let (_tmp, src, dst) = setup();
    for root in [&src, &dst] {
        fs::write(root.join("same.txt"), "same").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/inner.txt"), "inner").unwrap();
    }
    let before = (snapshot(&src), snapshot(&dst));

    let groups = TaskGroups::from_directories(&src, &[dst.clone()], &[], false);
    let mut out = Vec::new();
    let result = SyncEngine::new(RunMode::List)
        .run(&groups, &mut out)
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Difference between "));
    assert!(text.trim_end().ends_with("is empty"));
    assert_eq!(result.listed, 0);
    assert_eq!((snapshot(&src), snapshot(&dst)), before);
}

#[test]
fn test_list_mode_does_not_write_differences() {
    let (_tmp, src, dst) = setup();
    fs::write(src.join("new.txt"), "new").unwrap();
    let before = snapshot(&dst);

    let groups = TaskGroups::from_directories(&src, &[dst.clone()], &[], false);
    let mut out = Vec::new();
    let result = SyncEngine::new(RunMode::List)
        .run(&groups, &mut out)
        .unwrap();

    assert_eq!(result.listed, 1);
    assert!(String::from_utf8(out).unwrap().contains("  + new.txt"));
    assert_eq!(snapshot(&dst), before);
}

#[test]
fn test_confirm_applies_only_approved_paths() {
    let (_tmp, src, dst) = setup();
    fs::write(src.join("a.txt"), "a").unwrap();
    fs::write(src.join("b.txt"), "b").unwrap();
    let questions = RefCell::new(Vec::new());

    let groups = TaskGroups::from_directories(&src, &[dst.clone()], &[], false);
    let result = SyncEngine::new(RunMode::Confirm)
        .with_approver(Box::new(|question: &str| -> Result<bool> {
            questions.borrow_mut().push(question.to_string());
            Ok(question.contains("a.txt"))
        }))
        .run(&groups, &mut Vec::new())
        .unwrap();

    assert_eq!(result.copied, 1);
    assert_eq!(result.declined, 1);
    assert!(dst.join("a.txt").exists());
    assert!(!dst.join("b.txt").exists());

    let questions = questions.into_inner();
    assert_eq!(questions.len(), 2);
    assert!(questions[0].starts_with("Copy "));
    assert!(questions[0].ends_with('?'));
}

#[test]
fn test_missing_target_does_not_stop_siblings() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let good = tmp.path().join("good");
    fs::create_dir(&src).unwrap();
    fs::create_dir(&good).unwrap();
    fs::write(src.join("a.txt"), "a").unwrap();

    let mut config = SyncConfig::default();
    config.insert(
        "job",
        JobConfig::new(&src, vec![tmp.path().join("gone"), good.clone()]),
    );

    let groups = TaskGroups::from_config(&config, false);
    let result = apply(&groups);

    assert_eq!(result.skipped_targets, 1);
    assert_eq!(result.copied, 1);
    assert!(good.join("a.txt").exists());
    assert!(!result.is_success());
}

#[test]
fn test_nested_target_is_never_synced() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir_all(src.join("backup")).unwrap();
    fs::write(src.join("a.txt"), "a").unwrap();

    let groups = TaskGroups::from_directories(&src, &[src.join("backup")], &[], true);
    let result = apply(&groups);

    assert_eq!(result.skipped_targets, 1);
    assert_eq!(result.total_operations(), 0);
    assert!(!src.join("backup/a.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_failed_path_does_not_stop_the_task() {
    let (_tmp, src, dst) = setup();
    fs::write(src.join("a.txt"), "a").unwrap();
    std::os::unix::fs::symlink(src.join("nowhere"), src.join("b-dangling")).unwrap();
    fs::write(src.join("c.txt"), "c").unwrap();

    let groups = TaskGroups::from_directories(&src, &[dst.clone()], &[], false);
    let result = apply(&groups);

    assert_eq!(result.copied, 2);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("b-dangling"));
    assert!(dst.join("a.txt").exists());
    assert!(dst.join("c.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_fifo_in_source_is_reported_not_read() {
    let (_tmp, src, dst) = setup();
    fs::write(src.join("a.txt"), "a").unwrap();
    let status = std::process::Command::new("mkfifo")
        .arg(src.join("b-pipe"))
        .status()
        .unwrap();
    assert!(status.success());
    fs::write(src.join("c.txt"), "c").unwrap();

    let groups = TaskGroups::from_directories(&src, &[dst.clone()], &[], false);
    let result = apply(&groups);

    assert_eq!(result.copied, 2);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("b-pipe"));
    assert!(!dst.join("b-pipe").exists());
    assert!(dst.join("c.txt").exists());
}

#[test]
fn test_second_run_has_nothing_to_do() {
    let (_tmp, src, dst) = setup();
    fs::create_dir_all(src.join("deep/er")).unwrap();
    fs::write(src.join("deep/er/file.txt"), "x").unwrap();
    fs::write(src.join("top.txt"), "t").unwrap();

    let groups = TaskGroups::from_directories(&src, &[dst], &[], true);
    apply(&groups);
    let second = apply(&groups);

    assert_eq!(second.total_operations(), 0);
    assert!(second.is_success());
}
