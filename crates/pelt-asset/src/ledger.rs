//! Export version allocation
//!
//! Output layout: `<shot>/abc_fur/<character>/<0-padded-version>/<character>_fur.abc`.
//! The directory listing is the source of truth for the next version;
//! there is no counter file. Versions are never reused, even across runs.

use pelt_core::version::{parse_version_dir, version_dir_name};
use pelt_core::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the fur-export subdirectory under a shot
const ABC_FUR_DIR: &str = "abc_fur";

/// Allocates export versions and paths under a shot directory
#[derive(Debug, Clone)]
pub struct ExportLedger {
    shot_path: PathBuf,
}

impl ExportLedger {
    pub fn new<P: AsRef<Path>>(shot_path: P) -> Self {
        Self {
            shot_path: shot_path.as_ref().to_path_buf(),
        }
    }

    /// The version the next export will get, without touching the disk.
    ///
    /// Existing version is the numeric max over immediate subdirectory
    /// names that parse as decimal versions; names that do not parse are
    /// ignored. Defaults to 1 when no versions exist yet.
    pub fn peek_next_version(&self, character: &str) -> u32 {
        self.latest_version(character) + 1
    }

    /// Allocate the next export version for a character.
    ///
    /// Creates the version directory (and any missing parents) and returns
    /// the version number together with the output cache path. Directory
    /// creation failures propagate as fatal I/O errors.
    pub fn next_export_path(&self, character: &str) -> Result<(u32, PathBuf)> {
        let version = self.peek_next_version(character);
        let export_path = self
            .character_dir(character)
            .join(version_dir_name(version))
            .join(format!("{}_fur.abc", character));

        if let Some(parent) = export_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok((version, export_path))
    }

    fn character_dir(&self, character: &str) -> PathBuf {
        self.shot_path.join(ABC_FUR_DIR).join(character)
    }

    fn latest_version(&self, character: &str) -> u32 {
        let Ok(entries) = fs::read_dir(self.character_dir(character)) else {
            return 0;
        };
        entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| parse_version_dir(&entry.file_name().to_string_lossy()))
            .max()
            .unwrap_or(0)
    }
}
