//! Integration tests for configuration module

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::ConfigManager;
use crate::error::SyncError;

#[test]
fn test_full_config_workflow() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.json");

    fs::write(
        &config_file,
        r#"{
    "photos": {
        "source": "/home/me/Pictures",
        "targets": ["/mnt/backup/Pictures", "/mnt/usb/Pictures"]
    },
    "music": {
        "source": "/home/me/Music",
        "targets": ["/mnt/backup/Music"],
        "ignore": [".DS_Store"]
    }
}"#,
    )
    .unwrap();

    let config = ConfigManager::load(&config_file).unwrap();

    assert_eq!(config.len(), 2);
    let jobs: Vec<_> = config.jobs().collect();
    assert_eq!(jobs[0].0, "photos");
    assert_eq!(jobs[0].1.targets.len(), 2);
    assert_eq!(jobs[1].0, "music");
    assert_eq!(jobs[1].1.source, PathBuf::from("/home/me/Music"));
    assert_eq!(jobs[1].1.ignore, vec![".DS_Store".to_string()]);
}

#[test]
fn test_invalid_config_validation() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.json");
    fs::write(&config_file, r#"{"job": {"source": "", "targets": []}}"#).unwrap();

    let err = ConfigManager::load(&config_file).unwrap_err();

    assert!(format!("{err:#}").contains("empty source"));
    assert!(matches!(
        err.downcast_ref::<SyncError>(),
        Some(SyncError::Configuration(_))
    ));
}

#[test]
fn test_malformed_config_file() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.json");
    fs::write(&config_file, "[1, 2, 3]").unwrap();

    let err = ConfigManager::load(&config_file).unwrap_err();

    assert!(err.to_string().contains("Failed to load config file"));
    assert!(err.downcast_ref::<SyncError>().is_some());
}

#[test]
fn test_unreadable_config_file() {
    let tmp = TempDir::new().unwrap();

    let err = ConfigManager::load(&tmp.path().join("missing.json")).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SyncError>(),
        Some(SyncError::Configuration(_))
    ));
}

#[test]
fn test_locate_prefers_explicit_path() {
    let explicit = PathBuf::from("/explicit/config.json");

    let located = ConfigManager::locate(Some(&explicit)).unwrap();

    assert_eq!(located, explicit);
}

#[test]
fn test_parse_bytes() {
    let config = ConfigManager::parse(br#"{"a": {"source": "/a", "targets": ["/b"]}}"#).unwrap();
    assert_eq!(config.len(), 1);
}
