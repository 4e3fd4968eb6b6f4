use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// One-directional directory synchronization
///
/// Copy whatever the targets are missing from a source directory, or run
/// every job of a JSON configuration file. With --remove-extra, entries the
/// source lacks are deleted from the targets afterwards.
#[derive(Parser, Debug)]
#[command(name = "dirsync")]
#[command(long_about = None, version)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source directory, or a JSON configuration file
    ///
    /// When omitted, dirsync.json is looked up from the current directory
    /// upwards, then the global configuration file.
    #[arg(value_name = "SOURCE", env = "DIRSYNC_CONFIG")]
    pub source: Option<PathBuf>,

    /// Target directories to sync the source into
    #[arg(value_name = "TARGET")]
    pub targets: Vec<PathBuf>,

    /// Ask before copying or removing each entry
    #[arg(short, long)]
    pub confirm: bool,

    /// Only list what would be copied, without touching anything
    #[arg(short, long, conflicts_with_all = ["confirm", "remove_extra"])]
    pub list: bool,

    /// Also remove entries from the targets that the source does not have
    #[arg(short, long)]
    pub remove_extra: bool,

    /// Entry name to skip on both sides (repeatable)
    #[arg(long, value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Minimum level of log messages written to stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Warning, ignore_case = true)]
    pub log_level: LogLevel,
}

/// Log verbosity accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Every step, including skipped entries
    Trace,
    /// Task and group progress
    Debug,
    /// Each applied entry
    Info,
    /// Skipped and incomparable entries (default)
    #[value(alias = "warn")]
    Warning,
    /// Failures only
    Error,
    /// Same as error
    Critical,
}
