//! Versioned run log
//!
//! Each run writes `fur_export_<N>.log` in the log directory, N being one
//! past the highest number among existing log files (numeric parse, junk
//! names ignored). Every line is echoed to stdout and flushed to the file
//! immediately, so a crash mid-run leaves a valid-prefix log.

use pelt_core::version::parse_numbered_name;
use pelt_core::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const LOG_PREFIX: &str = "fur_export_";
const LOG_SUFFIX: &str = ".log";

/// Append-only run log with a versioned file name
pub struct RunLog {
    file: File,
    path: PathBuf,
    run: u32,
}

impl RunLog {
    /// Create the next run log in `log_dir`, creating the directory first
    /// if needed. Truncates if the computed name somehow already exists.
    pub fn create(log_dir: &Path) -> Result<Self> {
        fs::create_dir_all(log_dir)?;

        let last_run = fs::read_dir(log_dir)?
            .flatten()
            .filter_map(|entry| {
                parse_numbered_name(&entry.file_name().to_string_lossy(), LOG_PREFIX, LOG_SUFFIX)
            })
            .max()
            .unwrap_or(0);

        let run = last_run + 1;
        let path = log_dir.join(format!("{}{}{}", LOG_PREFIX, run, LOG_SUFFIX));
        let file = File::create(&path)?;

        Ok(Self { file, path, run })
    }

    /// Write one line, echoing it to stdout and flushing the file
    pub fn log(&mut self, msg: &str) -> Result<()> {
        println!("{}", msg);
        writeln!(self.file, "{}", msg)?;
        self.file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run(&self) -> u32 {
        self.run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pelt_runlog_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_first_run_is_one() {
        let dir = temp_dir();
        let log = RunLog::create(&dir).unwrap();
        assert_eq!(log.run(), 1);
        assert!(dir.join("fur_export_1.log").is_file());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_creates_missing_log_dir() {
        let dir = temp_dir().join("nested/logs");
        let log = RunLog::create(&dir).unwrap();
        assert!(log.path().is_file());
        fs::remove_dir_all(dir.parent().unwrap().parent().unwrap()).ok();
    }

    #[test]
    fn test_increments_past_existing_and_ignores_junk() {
        let dir = temp_dir();
        fs::write(dir.join("fur_export_3.log"), b"").unwrap();
        fs::write(dir.join("fur_export_10.log"), b"").unwrap();
        fs::write(dir.join("fur_export_x.log"), b"").unwrap();
        fs::write(dir.join("other.log"), b"").unwrap();

        let log = RunLog::create(&dir).unwrap();
        assert_eq!(log.run(), 11);
        assert!(dir.join("fur_export_11.log").is_file());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_lines_land_in_file() {
        let dir = temp_dir();
        let mut log = RunLog::create(&dir).unwrap();
        log.log("first").unwrap();
        log.log("second").unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, "first\nsecond\n");

        fs::remove_dir_all(&dir).ok();
    }
}
