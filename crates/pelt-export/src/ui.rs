//! UI collaborator traits
//!
//! Shot selection and confirmation are seams: the CLI wires in preselected
//! paths and a console prompt, tests wire in canned answers, and a
//! host-embedded deployment can provide its native dialogs.

use pelt_core::Result;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Chooses which shot directories to export from
pub trait ShotPicker {
    fn pick_shots(&mut self, project_root: &Path) -> Result<Vec<PathBuf>>;
}

/// Asks the operator to confirm the pending export set
pub trait ExportPrompt {
    fn confirm(&mut self, summary: &str) -> Result<bool>;
}

/// A fixed shot selection. Relative paths are resolved against the
/// project root; when the list is empty, every immediate subdirectory of
/// the root is offered (the resolver skips the ones without caches).
pub struct PreselectedShots {
    shots: Vec<PathBuf>,
}

impl PreselectedShots {
    pub fn new(shots: Vec<PathBuf>) -> Self {
        Self { shots }
    }
}

impl ShotPicker for PreselectedShots {
    fn pick_shots(&mut self, project_root: &Path) -> Result<Vec<PathBuf>> {
        if self.shots.is_empty() {
            let mut shots: Vec<PathBuf> = std::fs::read_dir(project_root)?
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .collect();
            shots.sort();
            return Ok(shots);
        }

        Ok(self
            .shots
            .iter()
            .map(|shot| {
                if shot.is_relative() {
                    project_root.join(shot)
                } else {
                    shot.clone()
                }
            })
            .collect())
    }
}

/// Always answers the same way; used by tests and `--yes`
pub struct AutoConfirm(pub bool);

impl ExportPrompt for AutoConfirm {
    fn confirm(&mut self, _summary: &str) -> Result<bool> {
        Ok(self.0)
    }
}

/// Prints the summary and reads a y/n answer from stdin
pub struct ConsolePrompt;

impl ExportPrompt for ConsolePrompt {
    fn confirm(&mut self, summary: &str) -> Result<bool> {
        println!("Export these furs?\n\n{}", summary);
        print!("[y/N] ");
        std::io::stdout().flush()?;

        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pelt_ui_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_relative_shots_resolved_against_root() {
        let mut picker = PreselectedShots::new(vec![PathBuf::from("sh010")]);
        let shots = picker.pick_shots(Path::new("/mnt/show")).unwrap();
        assert_eq!(shots, vec![PathBuf::from("/mnt/show/sh010")]);
    }

    #[test]
    fn test_empty_selection_lists_root_subdirectories() {
        let root = temp_dir();
        fs::create_dir_all(root.join("sh010")).unwrap();
        fs::create_dir_all(root.join("sh020")).unwrap();
        fs::write(root.join("notes.txt"), b"x").unwrap();

        let mut picker = PreselectedShots::new(Vec::new());
        let shots = picker.pick_shots(&root).unwrap();
        assert_eq!(shots, vec![root.join("sh010"), root.join("sh020")]);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_auto_confirm() {
        assert!(AutoConfirm(true).confirm("anything").unwrap());
        assert!(!AutoConfirm(false).confirm("anything").unwrap());
    }
}
