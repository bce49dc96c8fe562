//! Folder creation and conflict-safe file moves.
//!
//! A [`Mover`] is created at the start of an execution run and discarded at
//! the end. It remembers every destination name it has handed out during the
//! run, so conflict resolution can never reuse a suffix, even before the
//! corresponding rename has landed on disk. Move failures are reported
//! through [`MoveOutcome`]; this boundary never panics and never propagates
//! an error, which is what lets the orchestrator continue past failures.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result of attempting to relocate one file.
///
/// Produced per file during execution and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// Whether the move succeeded.
    pub success: bool,
    /// The path the file was moved from.
    pub source: PathBuf,
    /// The resolved destination path, `None` when the move failed.
    pub destination: Option<PathBuf>,
    /// Description of the failure, `None` on success.
    pub error: Option<String>,
}

impl MoveOutcome {
    fn moved(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            success: true,
            source,
            destination: Some(destination),
            error: None,
        }
    }

    fn failed(source: PathBuf, error: String) -> Self {
        Self {
            success: false,
            source,
            destination: None,
            error: Some(error),
        }
    }
}

/// A category folder could not be created.
///
/// Recoverable at the orchestrator level: the category's files are skipped
/// and the run continues.
#[derive(Debug)]
pub struct FolderCreationError {
    /// The folder that could not be created.
    pub path: PathBuf,
    /// The underlying reason.
    pub source: io::Error,
}

impl std::fmt::Display for FolderCreationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to create folder {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for FolderCreationError {}

/// Moves files into category folders, one execution run at a time.
#[derive(Debug, Default)]
pub struct Mover {
    /// Destination paths handed out during this run.
    claimed: HashSet<PathBuf>,
}

impl Mover {
    /// Creates a mover with an empty claim set, scoped to one execution run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a directory named `label` already exists under `root`.
    ///
    /// Used when building the plan to compute which folders would be created.
    pub fn category_folder_exists(root: &Path, label: &str) -> bool {
        root.join(label).is_dir()
    }

    /// Creates the category folder under `root` unless it already exists.
    ///
    /// Repeated calls with the same arguments are no-ops. A non-directory
    /// entry occupying the name, or any other creation failure, is a
    /// [`FolderCreationError`].
    pub fn ensure_category_folder(
        &self,
        root: &Path,
        label: &str,
    ) -> Result<PathBuf, FolderCreationError> {
        let folder = root.join(label);
        if folder.is_dir() {
            return Ok(folder);
        }
        match fs::create_dir(&folder) {
            Ok(()) => Ok(folder),
            Err(source) => Err(FolderCreationError { path: folder, source }),
        }
    }

    /// Returns a destination file name that collides with nothing in
    /// `destination_dir` and with nothing already claimed during this run.
    ///
    /// The original name is returned unchanged when it is free; otherwise
    /// `stem_1.ext`, `stem_2.ext`, … are probed in increasing order. The
    /// extension is preserved byte-for-byte; only the stem is suffixed. The
    /// returned name is claimed immediately.
    pub fn resolve_conflict(&mut self, destination_dir: &Path, file_name: &str) -> String {
        if self.is_free(destination_dir, file_name) {
            self.claimed.insert(destination_dir.join(file_name));
            return file_name.to_string();
        }

        let (stem, extension) = split_name(file_name);
        let mut counter = 1;
        loop {
            let candidate = format!("{}_{}{}", stem, counter, extension);
            if self.is_free(destination_dir, &candidate) {
                self.claimed.insert(destination_dir.join(&candidate));
                return candidate;
            }
            counter += 1;
        }
    }

    fn is_free(&self, dir: &Path, name: &str) -> bool {
        let path = dir.join(name);
        // A dangling link still occupies the name, so probe with
        // symlink_metadata rather than exists().
        !self.claimed.contains(&path) && fs::symlink_metadata(&path).is_err()
    }

    /// Moves `source` into `destination_dir` under a conflict-free name.
    ///
    /// Failures (permissions, vanished source, cross-device renames) are
    /// reported in the returned [`MoveOutcome`]; pre-existing files are never
    /// overwritten.
    pub fn move_file(&mut self, source: &Path, destination_dir: &Path) -> MoveOutcome {
        let file_name = match source.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => {
                return MoveOutcome::failed(
                    source.to_path_buf(),
                    "source has no file name component".to_string(),
                );
            }
        };

        let resolved = self.resolve_conflict(destination_dir, &file_name);
        let destination = destination_dir.join(&resolved);

        match fs::rename(source, &destination) {
            Ok(()) => MoveOutcome::moved(source.to_path_buf(), destination),
            Err(e) => MoveOutcome::failed(source.to_path_buf(), e.to_string()),
        }
    }
}

/// Splits a file name into stem and extension, keeping the dot with the
/// extension. A dot that is the first or last byte does not start an
/// extension, matching the scanner's rules.
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx < name.len() - 1 => name.split_at(idx),
        _ => (name, ""),
    }
}
