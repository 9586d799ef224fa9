//! Run orchestration
//!
//! Drives one export run end to end: open the next run log, validate the
//! project root, let the picker select shots, resolve caches, ask for
//! confirmation, then export serially — one node at a time, created and
//! destroyed around each export. Expected absences exit cleanly with a
//! logged outcome; I/O and host failures are logged and then propagate,
//! leaving already-completed exports and their records on disk.

use crate::config::ExportConfig;
use crate::host::{HostSession, ParamValue, PARM_FILENAME};
use crate::record::ExportRecord;
use crate::runlog::RunLog;
use crate::ui::{ExportPrompt, ShotPicker};
use chrono::Local;
use pelt_asset::{resolve, ExportLedger, ResolvedShots};
use pelt_core::Result;

/// Counts for a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub shots: usize,
    pub exports: usize,
}

/// How a run ended when it did not abort with an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunStats),
    InvalidProjectRoot,
    NothingToExport,
    Cancelled,
}

/// Run one export pass
pub fn run(
    config: &ExportConfig,
    host: &dyn HostSession,
    picker: &mut dyn ShotPicker,
    prompt: &mut dyn ExportPrompt,
) -> Result<RunOutcome> {
    let mut log = RunLog::create(config.log_dir())?;

    if !config.project_root().is_dir() {
        log.log(&format!(
            "Project root is not a valid directory: {}",
            config.project_root().display()
        ))?;
        return Ok(RunOutcome::InvalidProjectRoot);
    }

    let shots = picker.pick_shots(config.project_root())?;
    let resolved = resolve(&shots, config.registry());
    if resolved.is_empty() {
        log.log("No exportable characters found")?;
        return Ok(RunOutcome::NothingToExport);
    }

    if !prompt.confirm(&summary(&resolved))? {
        log.log("Export cancelled")?;
        return Ok(RunOutcome::Cancelled);
    }

    match export_all(&mut log, &resolved, config, host) {
        Ok(stats) => Ok(RunOutcome::Completed(stats)),
        Err(e) => {
            // Best effort: the abort reason belongs in the run log too
            let _ = log.log(&format!("Run aborted: {}", e));
            Err(e)
        }
    }
}

/// Human-readable confirmation summary: one line per shot, one indented
/// `character [version]` line per asset.
fn summary(resolved: &ResolvedShots) -> String {
    let mut text = String::new();
    for shot in resolved {
        text.push_str(&format!("{}\n", shot.shot.display()));
        for asset in &shot.assets {
            text.push_str(&format!("\t{} [{}]\n", asset.character, asset.version));
        }
    }
    text
}

fn export_all(
    log: &mut RunLog,
    resolved: &ResolvedShots,
    config: &ExportConfig,
    host: &dyn HostSession,
) -> Result<RunStats> {
    let mut exports = 0;

    for shot in resolved {
        let header = format!("+----- Exporting from shot : {} -----", shot.shot.display());
        log.log(&header)?;

        let ledger = ExportLedger::new(&shot.shot);
        for asset in &shot.assets {
            let started = Local::now();

            let mut node = host.create_export_node(&asset.template, &asset.source_path)?;
            config
                .options()
                .apply(node.as_mut(), host, &asset.source_path)?;

            let (_, export_path) = ledger.next_export_path(&asset.character)?;
            node.set_parameter(
                PARM_FILENAME,
                ParamValue::Text(export_path.to_string_lossy().to_string()),
            )?;

            log.log(&format!("| Exporting {}", asset.character))?;
            node.trigger_export()?;
            log.log(&format!("|      +---> {}", export_path.display()))?;

            ExportRecord {
                character: asset.character.clone(),
                source_version: asset.version.clone(),
                source_path: asset.source_path.clone(),
                export_path,
                started,
                finished: Local::now(),
            }
            .write()?;

            node.destroy()?;
            exports += 1;
        }

        // Footer matching the header width, plus a separating blank line
        log.log(&format!("+{}\n", "-".repeat(header.chars().count() - 1)))?;
    }

    Ok(RunStats {
        shots: resolved.0.len(),
        exports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::{MockEvent, MockHost};
    use crate::options::ExportOptions;
    use crate::ui::{AutoConfirm, PreselectedShots};
    use pelt_asset::CharacterRegistry;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pelt_run_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn add_cache(shot: &Path, character: &str, version: &str) {
        let dir = shot.join("abc").join(character).join(version);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.abc", character)), b"abc").unwrap();
    }

    fn registry(pairs: &[(&str, &str)]) -> CharacterRegistry {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CharacterRegistry::from_map(map)
    }

    fn config(root: &Path, pairs: &[(&str, &str)]) -> ExportConfig {
        ExportConfig::new(
            root.to_path_buf(),
            root.join("logs"),
            ExportOptions {
                fps: Some(25.0),
                probability: Some(0.65),
                ..Default::default()
            },
            registry(pairs),
        )
        .unwrap()
    }

    #[test]
    fn test_full_run_exports_and_records() {
        let root = temp_dir();
        let shot = root.join("sh010");
        add_cache(&shot, "HERO", "0002");

        let cfg = config(&root, &[("HERO", "template_x")]);
        let host = MockHost::new();
        let mut picker = PreselectedShots::new(vec![shot.clone()]);

        let outcome = run(&cfg, &host, &mut picker, &mut AutoConfirm(true)).unwrap();
        assert_eq!(
            outcome,
            RunOutcome::Completed(RunStats {
                shots: 1,
                exports: 1
            })
        );

        let export = shot.join("abc_fur/HERO/0001/HERO_fur.abc");
        assert!(export.is_file());
        // Per-export record written beside the cache
        let record = fs::read_dir(export.parent().unwrap())
            .unwrap()
            .flatten()
            .find(|e| e.file_name().to_string_lossy().starts_with("export_"));
        assert!(record.is_some());

        // Run log captured the shot header and the export lines in order
        let log = fs::read_to_string(root.join("logs/fur_export_1.log")).unwrap();
        let header_at = log.find("Exporting from shot").unwrap();
        let char_at = log.find("| Exporting HERO").unwrap();
        let path_at = log.find("+---> ").unwrap();
        assert!(header_at < char_at && char_at < path_at);

        // Node lifecycle: created, triggered, destroyed
        assert_eq!(host.nodes_created(), 1);
        assert!(matches!(
            host.events().last(),
            Some(MockEvent::Destroyed { node: 0 })
        ));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_versions_increment_across_runs() {
        let root = temp_dir();
        let shot = root.join("sh010");
        add_cache(&shot, "HERO", "0002");

        let cfg = config(&root, &[("HERO", "template_x")]);
        for _ in 0..2 {
            let host = MockHost::new();
            let mut picker = PreselectedShots::new(vec![shot.clone()]);
            run(&cfg, &host, &mut picker, &mut AutoConfirm(true)).unwrap();
        }

        assert!(shot.join("abc_fur/HERO/0001/HERO_fur.abc").is_file());
        assert!(shot.join("abc_fur/HERO/0002/HERO_fur.abc").is_file());
        assert!(root.join("logs/fur_export_2.log").is_file());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_declined_confirmation_exports_nothing() {
        let root = temp_dir();
        let shot = root.join("sh010");
        add_cache(&shot, "HERO", "0002");

        let cfg = config(&root, &[("HERO", "template_x")]);
        let host = MockHost::new();
        let mut picker = PreselectedShots::new(vec![shot.clone()]);

        let outcome = run(&cfg, &host, &mut picker, &mut AutoConfirm(false)).unwrap();
        assert_eq!(outcome, RunOutcome::Cancelled);
        assert_eq!(host.nodes_created(), 0);
        assert!(!shot.join("abc_fur").exists());
        let log = fs::read_to_string(root.join("logs/fur_export_1.log")).unwrap();
        assert!(log.contains("Export cancelled"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_invalid_project_root_exits_cleanly() {
        let root = temp_dir();
        let cfg = ExportConfig::new(
            root.join("does_not_exist"),
            root.join("logs"),
            ExportOptions::default(),
            registry(&[("HERO", "t")]),
        )
        .unwrap();

        let host = MockHost::new();
        let mut picker = PreselectedShots::new(Vec::new());
        let outcome = run(&cfg, &host, &mut picker, &mut AutoConfirm(true)).unwrap();
        assert_eq!(outcome, RunOutcome::InvalidProjectRoot);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_no_resolvable_characters_exits_cleanly() {
        let root = temp_dir();
        fs::create_dir_all(root.join("sh010")).unwrap();

        let cfg = config(&root, &[("HERO", "template_x")]);
        let host = MockHost::new();
        let mut picker = PreselectedShots::new(Vec::new());

        let outcome = run(&cfg, &host, &mut picker, &mut AutoConfirm(true)).unwrap();
        assert_eq!(outcome, RunOutcome::NothingToExport);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_host_failure_aborts_but_keeps_completed_exports() {
        let root = temp_dir();
        let shot = root.join("sh010");
        add_cache(&shot, "APE", "0001");
        add_cache(&shot, "ZEBRA", "0001");

        let cfg = config(&root, &[("APE", "t_a"), ("ZEBRA", "t_z")]);
        // APE (sorted first) exports fine; ZEBRA's node fails to trigger
        let host = MockHost::new().with_trigger_failure_on(1);
        let mut picker = PreselectedShots::new(vec![shot.clone()]);

        let result = run(&cfg, &host, &mut picker, &mut AutoConfirm(true));
        assert!(result.is_err());

        assert!(shot.join("abc_fur/APE/0001/APE_fur.abc").is_file());
        assert!(!shot.join("abc_fur/ZEBRA/0001/ZEBRA_fur.abc").exists());

        let log = fs::read_to_string(root.join("logs/fur_export_1.log")).unwrap();
        assert!(log.contains("Run aborted"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_summary_lists_shots_and_versions() {
        let root = temp_dir();
        let shot = root.join("sh010");
        add_cache(&shot, "HERO", "0002");

        let resolved = resolve(&[&shot], &registry(&[("HERO", "template_x")]));
        let text = summary(&resolved);
        assert!(text.contains("sh010"));
        assert!(text.contains("\tHERO [0002]"));

        fs::remove_dir_all(&root).ok();
    }
}
