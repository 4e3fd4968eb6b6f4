//! Configuration file discovery from multiple locations

use std::path::{Path, PathBuf};

/// File name looked up in the working directory and its ancestors
pub const PROJECT_FILE_NAME: &str = "dirsync.json";

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFiles {
    /// Nearest `dirsync.json` at or above the start directory
    pub project: Option<PathBuf>,
    /// Global config in the platform config directory
    pub global: Option<PathBuf>,
}

impl ConfigFiles {
    /// Highest-precedence file found, if any
    #[must_use]
    pub fn preferred(&self) -> Option<&Path> {
        self.project.as_deref().or(self.global.as_deref())
    }
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover configuration files starting from the current directory
    #[must_use]
    pub fn discover() -> ConfigFiles {
        let project = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::find_file(&cwd, PROJECT_FILE_NAME));

        ConfigFiles {
            project,
            global: Self::find_global_config(),
        }
    }

    /// Discover configuration files starting from `start`
    #[must_use]
    pub fn discover_from(start: &Path) -> ConfigFiles {
        ConfigFiles {
            project: Self::find_file(start, PROJECT_FILE_NAME),
            global: Self::find_global_config(),
        }
    }

    /// Find a config file in `start` or one of its parent directories
    fn find_file(start: &Path, name: &str) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Path of the global config file, whether or not it exists
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dirsync").join("config.json"))
    }

    /// Find global config in the platform config directory
    fn find_global_config() -> Option<PathBuf> {
        Self::global_config_path().filter(|path| path.is_file())
    }
}
