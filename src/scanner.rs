//! Directory scanning and exclusion filtering.
//!
//! The scanner enumerates the direct entries of a single directory and turns
//! every eligible file into a [`FileInfo`] descriptor. Directories, hidden
//! entries, links, `desktop.ini`, and anything matched by the user's
//! exclusion rules are skipped silently; excluded entries are not counted and
//! not reported. Subdirectories are never entered.

use crate::config::ExclusionRules;
use std::fs::{self, DirEntry};
use std::io;
use std::path::{Path, PathBuf};

/// Describes one file eligible for organization.
///
/// Created during the scan and immutable afterwards; the extension is the
/// categorization key.
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// Base name of the file.
    pub name: String,
    /// Lower-cased extension including the leading dot (e.g. `.pdf`), or an
    /// empty string when the name has no extension.
    pub extension: String,
    /// File size in bytes.
    pub size: u64,
}

/// Errors that abort a scan.
#[derive(Debug)]
pub enum ScanError {
    /// The target directory is missing or cannot be read. This is a critical
    /// error: no plan is built and nothing is mutated.
    DirectoryAccess {
        path: PathBuf,
        source: io::Error,
    },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryAccess { path, source } => {
                write!(f, "Cannot access directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// Extracts the categorization extension from a file name.
///
/// The extension is the substring starting at the last `.`, lower-cased. A
/// dot that is the first or last byte of the name does not count, so names
/// like `.env`, `name.`, and `README` all yield an empty string.
///
/// # Examples
///
/// ```
/// use desktidy::scanner::extension_of;
///
/// assert_eq!(extension_of("report.PDF"), ".pdf");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of(".env"), "");
/// assert_eq!(extension_of("README"), "");
/// ```
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx < name.len() - 1 => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Scans a directory for files to organize.
pub struct Scanner {
    filters: ExclusionRules,
}

impl Scanner {
    /// Creates a scanner that applies the given user exclusion rules on top
    /// of the fixed ones.
    pub fn new(filters: ExclusionRules) -> Self {
        Self { filters }
    }

    /// Returns the descriptors for every eligible file in `dir`, sorted by
    /// file name.
    ///
    /// Files whose metadata cannot be read are skipped rather than reported.
    /// An unreadable directory is a [`ScanError::DirectoryAccess`].
    pub fn scan(&self, dir: &Path) -> Result<Vec<FileInfo>, ScanError> {
        let entries = fs::read_dir(dir).map_err(|e| ScanError::DirectoryAccess {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if self.is_excluded(&entry, &name) {
                continue;
            }
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(_) => continue,
            };
            files.push(FileInfo {
                extension: extension_of(&name),
                path: entry.path(),
                name,
                size: metadata.len(),
            });
        }

        // readdir order is platform-dependent; sort so plans and conflict
        // suffixes are deterministic.
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Evaluates the exclusion rules for one entry.
    fn is_excluded(&self, entry: &DirEntry, name: &str) -> bool {
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(_) => return true,
        };

        // Links are left in place.
        if file_type.is_symlink() {
            return true;
        }

        // Directories are never organized. This also keeps category folders
        // created by a previous run out of the scan.
        if file_type.is_dir() {
            return true;
        }

        if name.starts_with('.') || has_hidden_attribute(entry) {
            return true;
        }

        if name.eq_ignore_ascii_case("desktop.ini") {
            return true;
        }

        self.filters.excludes(name)
    }
}

#[cfg(windows)]
fn has_hidden_attribute(entry: &DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    entry
        .metadata()
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn has_hidden_attribute(_entry: &DirEntry) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner() -> Scanner {
        Scanner::new(ExclusionRules::none())
    }

    #[test]
    fn test_extension_of_basic() {
        assert_eq!(extension_of("photo.jpg"), ".jpg");
        assert_eq!(extension_of("photo.JPG"), ".jpg");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
    }

    #[test]
    fn test_extension_of_degenerate_names() {
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of(".env"), "");
        assert_eq!(extension_of("name."), "");
        assert_eq!(extension_of("."), "");
        assert_eq!(extension_of(".hidden.txt"), ".txt");
    }

    #[test]
    fn test_scan_returns_descriptors_sorted_by_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("b.txt"), "bb").unwrap();
        fs::write(temp_dir.path().join("a.pdf"), "a").unwrap();
        fs::write(temp_dir.path().join("c"), "ccc").unwrap();

        let files = scanner().scan(temp_dir.path()).expect("scan failed");

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.txt", "c"]);
        assert_eq!(files[0].extension, ".pdf");
        assert_eq!(files[2].extension, "");
        assert_eq!(files[0].size, 1);
        assert_eq!(files[1].size, 2);
    }

    #[test]
    fn test_scan_excludes_directories_and_category_folders() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("Documents")).unwrap();
        fs::create_dir(temp_dir.path().join("random_dir")).unwrap();
        fs::write(temp_dir.path().join("file.txt"), "x").unwrap();

        let files = scanner().scan(temp_dir.path()).expect("scan failed");

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "file.txt");
    }

    #[test]
    fn test_scan_excludes_hidden_and_system_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join(".env"), "secret").unwrap();
        fs::write(temp_dir.path().join("desktop.ini"), "[shell]").unwrap();
        fs::write(temp_dir.path().join("Desktop.INI"), "[shell]").ok();
        fs::write(temp_dir.path().join("visible.txt"), "x").unwrap();

        let files = scanner().scan(temp_dir.path()).expect("scan failed");

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "visible.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_excludes_symlinks() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target = temp_dir.path().join("real.txt");
        fs::write(&target, "x").unwrap();
        std::os::unix::fs::symlink(&target, temp_dir.path().join("link.txt")).unwrap();

        let files = scanner().scan(temp_dir.path()).expect("scan failed");

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "real.txt");
    }

    #[test]
    fn test_scan_missing_directory_is_critical() {
        let result = scanner().scan(Path::new("/definitely/not/here"));
        assert!(matches!(
            result,
            Err(ScanError::DirectoryAccess { .. })
        ));
    }

    #[test]
    fn test_scan_applies_user_filters() {
        use crate::config::{ExcludeRules, FilterConfig};

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("draft.tmp"), "x").unwrap();
        fs::write(temp_dir.path().join("keep.txt"), "x").unwrap();

        let config = FilterConfig {
            exclude: ExcludeRules {
                extensions: vec!["tmp".to_string()],
                ..Default::default()
            },
        };
        let scanner = Scanner::new(config.compile().unwrap());
        let files = scanner.scan(temp_dir.path()).expect("scan failed");

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "keep.txt");
    }
}
