//! Run configuration
//!
//! A single TOML file supplies the project root, log directory, export
//! options, and the character registry (inline table or external file).
//! Construction is validating: a malformed file, an empty registry, or an
//! ambiguous registry source fails fast. The project root's *existence*
//! is deliberately not checked here — that is a per-run condition the
//! orchestrator logs and exits cleanly on.

use crate::options::ExportOptions;
use pelt_asset::CharacterRegistry;
use pelt_core::{PeltError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct ConfigFile {
    project: ProjectSection,
    #[serde(default)]
    options: ExportOptions,
    #[serde(default)]
    characters: BTreeMap<String, String>,
    #[serde(default)]
    registry: Option<RegistrySection>,
}

#[derive(Debug, Deserialize)]
struct ProjectSection {
    root: PathBuf,
    #[serde(default)]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RegistrySection {
    path: PathBuf,
}

/// Validated run configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    project_root: PathBuf,
    log_dir: PathBuf,
    options: ExportOptions,
    registry: CharacterRegistry,
}

impl ExportConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| PeltError::TomlParseError(format!("{}: {}", path.display(), e)))?;

        if file.project.root.as_os_str().is_empty() {
            return Err(PeltError::ConfigError(format!(
                "{}: project.root is empty",
                path.display()
            )));
        }

        let registry = match (file.characters.is_empty(), file.registry) {
            (false, None) => CharacterRegistry::from_map(file.characters),
            (true, Some(section)) => {
                // Registry file paths are relative to the config file
                let registry_path = match path.parent() {
                    Some(parent) if section.path.is_relative() => parent.join(&section.path),
                    _ => section.path.clone(),
                };
                load_registry_file(&registry_path)?
            }
            (false, Some(_)) => {
                return Err(PeltError::ConfigError(format!(
                    "{}: give either [characters] or [registry], not both",
                    path.display()
                )))
            }
            (true, None) => {
                return Err(PeltError::ConfigError(format!(
                    "{}: no character registry ([characters] table or [registry] path)",
                    path.display()
                )))
            }
        };

        let log_dir = file
            .project
            .log_dir
            .unwrap_or_else(|| file.project.root.join("pelt_logs"));

        Ok(Self {
            project_root: file.project.root,
            log_dir,
            options: file.options,
            registry,
        })
    }

    /// Build a config in memory (tests and embedding environments)
    pub fn new(
        project_root: PathBuf,
        log_dir: PathBuf,
        options: ExportOptions,
        registry: CharacterRegistry,
    ) -> Result<Self> {
        if registry.is_empty() {
            return Err(PeltError::ConfigError(
                "character registry is empty".to_string(),
            ));
        }
        Ok(Self {
            project_root,
            log_dir,
            options,
            registry,
        })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn registry(&self) -> &CharacterRegistry {
        &self.registry
    }
}

fn load_registry_file(path: &Path) -> Result<CharacterRegistry> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => CharacterRegistry::load_json(path),
        Some("toml") => CharacterRegistry::load_toml(path),
        _ => Err(PeltError::ConfigError(format!(
            "{}: registry file must be .json or .toml",
            path.display()
        ))),
    }
}
