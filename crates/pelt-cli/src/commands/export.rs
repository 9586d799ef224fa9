//! Export run command
//!
//! No real host binding ships in this repository; the orchestrator runs
//! against the built-in mock session, which stands in for the host's node
//! graph. Embedding environments call `pelt_export::run` with their own
//! `HostSession` instead.

use anyhow::Result;
use pelt_export::hosts::MockHost;
use pelt_export::{
    AutoConfirm, ConsolePrompt, ExportConfig, ExportPrompt, PreselectedShots, RunOutcome,
};
use std::path::{Path, PathBuf};

pub fn run(config_path: &Path, shots: Vec<PathBuf>, yes: bool, mock_host: bool) -> Result<()> {
    if !mock_host {
        anyhow::bail!(
            "no host session is available in this build; pass --mock-host, \
             or embed pelt-export with a real HostSession"
        );
    }

    let config = ExportConfig::load(config_path)?;
    let host = MockHost::new();
    let mut picker = PreselectedShots::new(shots);
    let mut auto = AutoConfirm(true);
    let mut console = ConsolePrompt;
    let prompt: &mut dyn ExportPrompt = if yes { &mut auto } else { &mut console };

    match pelt_export::run(&config, &host, &mut picker, prompt)? {
        RunOutcome::Completed(stats) => {
            println!(
                "\nExported {} fur cache(s) across {} shot(s)",
                stats.exports, stats.shots
            );
        }
        RunOutcome::InvalidProjectRoot | RunOutcome::NothingToExport | RunOutcome::Cancelled => {
            // Already reported through the run log's stdout echo
        }
    }

    Ok(())
}
