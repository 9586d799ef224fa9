//! Asset type definitions

use pelt_core::{PeltError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Mapping from character name to the export-template identifier the host
/// instantiates for it.
///
/// The template id is opaque to this crate; it only travels from the
/// registry to the host collaborator. Loaded once before resolution and
/// immutable for the duration of a run.
#[derive(Debug, Clone, Default)]
pub struct CharacterRegistry {
    characters: BTreeMap<String, String>,
}

impl CharacterRegistry {
    /// Build a registry from an in-memory mapping
    pub fn from_map(characters: BTreeMap<String, String>) -> Self {
        Self { characters }
    }

    /// Load a registry from a TOML file: a flat `name = "template"` table,
    /// optionally nested under a `[characters]` header.
    pub fn load_toml(path: &Path) -> Result<Self> {
        #[derive(Deserialize)]
        struct RegistryFile {
            #[serde(default)]
            characters: BTreeMap<String, String>,
            #[serde(flatten)]
            flat: BTreeMap<String, toml::Value>,
        }

        let content = fs::read_to_string(path)?;
        let file: RegistryFile = toml::from_str(&content).map_err(|e| {
            PeltError::TomlParseError(format!("{}: {}", path.display(), e))
        })?;

        let mut characters = file.characters;
        for (name, value) in file.flat {
            match value {
                toml::Value::String(template) => {
                    characters.insert(name, template);
                }
                other => {
                    return Err(PeltError::RegistryError(format!(
                        "{}: character '{}' maps to {} instead of a template id",
                        path.display(),
                        name,
                        other.type_str()
                    )))
                }
            }
        }

        Self::validated(characters, path)
    }

    /// Load a registry from a JSON file: a flat `{"name": "template"}`
    /// object (the legacy registry format).
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let characters: BTreeMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| PeltError::JsonParseError(format!("{}: {}", path.display(), e)))?;
        Self::validated(characters, path)
    }

    fn validated(characters: BTreeMap<String, String>, path: &Path) -> Result<Self> {
        if characters.is_empty() {
            return Err(PeltError::RegistryError(format!(
                "{}: registry contains no characters",
                path.display()
            )));
        }
        Ok(Self { characters })
    }

    /// Look up the export template for a character
    pub fn template(&self, character: &str) -> Option<&str> {
        self.characters.get(character).map(String::as_str)
    }

    /// Check whether a character is known
    pub fn contains(&self, character: &str) -> bool {
        self.characters.contains_key(character)
    }

    /// Number of known characters
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

/// The latest valid animation cache found for one character in one shot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    /// Character name (a registry key)
    pub character: String,
    /// Version directory name the cache was found under (e.g. `"0002"`)
    pub version: String,
    /// Absolute path to the cache file
    pub source_path: PathBuf,
    /// Export-template identifier from the registry
    pub template: String,
}

/// All resolved assets for one shot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotAssets {
    pub shot: PathBuf,
    pub assets: Vec<ResolvedAsset>,
}

/// Resolution result: one entry per shot that yielded at least one asset,
/// in caller-supplied selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedShots(pub Vec<ShotAssets>);

impl ResolvedShots {
    /// Whether nothing resolved at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of resolved assets across all shots
    pub fn asset_count(&self) -> usize {
        self.0.iter().map(|s| s.assets.len()).sum()
    }

    /// Iterate over the per-shot entries
    pub fn iter(&self) -> std::slice::Iter<'_, ShotAssets> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ResolvedShots {
    type Item = &'a ShotAssets;
    type IntoIter = std::slice::Iter<'a, ShotAssets>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
