//! Resolver dry run

use anyhow::Result;
use pelt_export::{ExportConfig, PreselectedShots, ShotPicker};
use std::path::{Path, PathBuf};

pub fn run(config_path: &Path, shots: Vec<PathBuf>) -> Result<()> {
    let config = ExportConfig::load(config_path)?;
    if !config.project_root().is_dir() {
        anyhow::bail!(
            "project root is not a valid directory: {}",
            config.project_root().display()
        );
    }

    let shots = PreselectedShots::new(shots).pick_shots(config.project_root())?;
    let resolved = pelt_asset::resolve(&shots, config.registry());

    if resolved.is_empty() {
        println!("No exportable characters found");
        return Ok(());
    }

    for shot in &resolved {
        println!("{}", shot.shot.display());
        for asset in &shot.assets {
            println!(
                "  {} [{}] <- {}",
                asset.character,
                asset.version,
                asset.source_path.display()
            );
        }
    }
    println!(
        "\n{} cache(s) across {} shot(s)",
        resolved.asset_count(),
        resolved.0.len()
    );

    Ok(())
}
