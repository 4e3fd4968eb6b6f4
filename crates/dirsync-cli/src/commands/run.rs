use std::io::{self, Write};

use anyhow::Context;
use dirsync_core::config::ConfigManager;
use dirsync_core::sync::{RunMode, SyncEngine, SyncOptions, SyncReporter, TaskGroups};
use tracing::debug;

use super::common::JobSource;
use crate::cli::Cli;
use crate::interactive::ConsolePrompter;

pub struct Run;

impl Run {
    pub fn execute(cli: &Cli) -> anyhow::Result<()> {
        let options = SyncOptions::from_flags(cli.list, cli.confirm, cli.remove_extra)?;

        let groups = match JobSource::from_args(cli.source.as_deref(), &cli.targets)? {
            JobSource::Directories { source, targets } => {
                debug!("Directory mode: {} -> {targets:?}", source.display());
                TaskGroups::from_directories(&source, &targets, &cli.ignore, options.mirror())
            }
            JobSource::ConfigFile(path) => {
                let mut config = ConfigManager::load(&path)?;
                config.add_ignores(&cli.ignore);
                TaskGroups::from_config(&config, options.mirror())
            }
        };
        debug!(
            "Built {} group(s) with {} task(s)",
            groups.len(),
            groups.task_count()
        );

        let stdout = io::stdout();
        let mut out = stdout.lock();

        let result = if options.mode() == RunMode::Confirm {
            let prompter = ConsolePrompter::new();
            SyncEngine::new(RunMode::Confirm)
                .with_approver(Box::new(move |question: &str| prompter.prompt(question)))
                .run(&groups, &mut out)?
        } else {
            SyncEngine::new(options.mode()).run(&groups, &mut out)?
        };

        if options.mode() != RunMode::List {
            let summary = SyncReporter::generate_summary(&result);
            writeln!(out, "{summary}").context("Failed to write summary")?;
        }

        Ok(())
    }
}
