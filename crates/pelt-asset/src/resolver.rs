//! Latest-valid-cache resolution across shot directories
//!
//! Layout scanned: `<shot>/abc/<character>/<version>/<character>.abc`.
//! Version directories are fixed-width zero-padded by the producing
//! pipeline, so a descending lexicographic sort visits newest first.

use crate::types::{CharacterRegistry, ResolvedAsset, ResolvedShots, ShotAssets};
use std::fs;
use std::path::Path;

/// Name of the cache subdirectory under a shot
const ABC_DIR: &str = "abc";

/// Resolve the latest valid cache per known character for each shot.
///
/// Filesystem absence at any level (missing shot, missing `abc/`, empty
/// character directory, cache file deleted out from under its version
/// directory) is routine and silently skipped, never an error. Shots that
/// yield no assets are omitted entirely. Shots keep their input order;
/// characters within a shot are sorted by name.
pub fn resolve(shot_paths: &[impl AsRef<Path>], registry: &CharacterRegistry) -> ResolvedShots {
    let mut resolved = Vec::new();

    for shot_path in shot_paths {
        let shot_path = shot_path.as_ref();
        if !shot_path.is_dir() {
            continue;
        }

        let abc_path = shot_path.join(ABC_DIR);
        if !abc_path.exists() {
            continue;
        }

        let mut characters: Vec<String> = list_entry_names(&abc_path)
            .into_iter()
            .filter(|name| registry.contains(name))
            .collect();
        characters.sort();

        let mut assets = Vec::new();
        for character in characters {
            if let Some(asset) = resolve_character(&abc_path, &character, registry) {
                assets.push(asset);
            }
        }

        if !assets.is_empty() {
            resolved.push(ShotAssets {
                shot: shot_path.to_path_buf(),
                assets,
            });
        }
    }

    ResolvedShots(resolved)
}

/// Pick the highest version of a character's cache that actually exists
/// as a regular file. Once a valid version is found, lower versions are
/// not considered.
fn resolve_character(
    abc_path: &Path,
    character: &str,
    registry: &CharacterRegistry,
) -> Option<ResolvedAsset> {
    let char_path = abc_path.join(character);
    let mut versions = list_entry_names(&char_path);
    versions.sort_by(|a, b| b.cmp(a));

    for version in versions {
        let cache_path = char_path.join(&version).join(format!("{}.abc", character));
        if cache_path.is_file() {
            let template = registry.template(character)?.to_string();
            return Some(ResolvedAsset {
                character: character.to_string(),
                version,
                source_path: cache_path,
                template,
            });
        }
    }

    None
}

/// List entry names under a directory, treating unreadable or missing
/// directories as empty.
fn list_entry_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .flatten()
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect()
}
