//! Per-export record files
//!
//! One `export_<DD_MM_YYYY>.log` is written beside each new cache: five
//! fixed-order lines covering the export's time range, output path,
//! character, source version, and source path.

use chrono::{DateTime, Local};
use pelt_core::Result;
use std::fs;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";
const FILE_DATE_FORMAT: &str = "%d_%m_%Y";

/// Everything known about one completed export. Ephemeral: written out as
/// a record file and dropped.
#[derive(Debug, Clone)]
pub struct ExportRecord {
    pub character: String,
    /// Source cache version directory name (e.g. `"0002"`)
    pub source_version: String,
    pub source_path: PathBuf,
    pub export_path: PathBuf,
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
}

impl ExportRecord {
    /// Render the five record lines
    pub fn render(&self) -> String {
        format!(
            "Time        : {} --> {}\n\
             Export Path : {}\n\
             Char        : {}\n\
             Fur Version : {}\n\
             ABC Path    : {}\n",
            self.started.format(TIMESTAMP_FORMAT),
            self.finished.format("%H:%M:%S"),
            self.export_path.display(),
            self.character,
            self.source_version,
            self.source_path.display(),
        )
    }

    /// Write the record file beside the export
    pub fn write(&self) -> Result<PathBuf> {
        let dir = self
            .export_path
            .parent()
            .unwrap_or_else(|| Path::new("."));
        let path = dir.join(format!(
            "export_{}.log",
            self.finished.format(FILE_DATE_FORMAT)
        ));
        fs::write(&path, self.render())?;
        Ok(path)
    }
}
