//! Optional exclusion-filter configuration.
//!
//! The fixed scan rules (directories, hidden entries, `desktop.ini`, links)
//! are not configurable. On top of them, users can exclude additional files
//! from organization through a small TOML file:
//!
//! ```toml
//! [exclude]
//! filenames = ["Thumbs.db"]
//! extensions = ["tmp", "part"]
//! patterns = ["~$*"]
//! regex = ['^draft_\d+\.docx$']
//! ```
//!
//! The configuration is compiled once into [`ExclusionRules`] so that
//! matching during the scan does not reparse any patterns. Categories are
//! deliberately not configurable; only exclusions are.

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while loading or compiling the configuration.
///
/// All of these are critical: a broken configuration aborts the run before
/// anything is scanned or mutated.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    NotFound(PathBuf),
    /// The file is not valid TOML for this schema.
    Parse(String),
    /// A glob pattern in `exclude.patterns` does not compile.
    BadGlob(String),
    /// A regex in `exclude.regex` does not compile.
    BadRegex { pattern: String, reason: String },
    /// The file could not be read.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Parse(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::BadGlob(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::BadRegex { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// User-supplied exclusion rules, as deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// The `[exclude]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact file names (e.g. `Thumbs.db`).
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Extensions without the dot (e.g. `tmp`); matched case-insensitively.
    /// A leading dot is tolerated.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Glob patterns matched against the file name (e.g. `~$*`).
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

impl FilterConfig {
    /// Loads the configuration, falling back through the search chain.
    ///
    /// 1. An explicit `config_path`, if given (missing file is an error).
    /// 2. `.desktidy.toml` in the current directory.
    /// 3. `~/.config/desktidy/config.toml`.
    /// 4. Built-in defaults (no extra exclusions).
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".desktidy.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("desktidy")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Compiles the rules into matcher structures.
    ///
    /// Invalid glob or regex patterns are reported here, before any scanning
    /// starts.
    pub fn compile(self) -> Result<ExclusionRules, ConfigError> {
        let patterns = self
            .exclude
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::BadGlob(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let regexes = self
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::BadRegex {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ExclusionRules {
            filenames: self.exclude.filenames.into_iter().collect(),
            extensions: self
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            patterns,
            regexes,
        })
    }
}

/// Compiled exclusion rules, consulted by the scanner for every entry.
#[derive(Debug)]
pub struct ExclusionRules {
    filenames: HashSet<String>,
    extensions: HashSet<String>,
    patterns: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl ExclusionRules {
    /// Rules that exclude nothing.
    pub fn none() -> Self {
        Self {
            filenames: HashSet::new(),
            extensions: HashSet::new(),
            patterns: Vec::new(),
            regexes: Vec::new(),
        }
    }

    /// Returns true if `name` matches any user rule and the file should be
    /// skipped.
    pub fn excludes(&self, name: &str) -> bool {
        if self.filenames.contains(name) {
            return true;
        }

        if let Some((stem, ext)) = name.rsplit_once('.')
            && !stem.is_empty()
            && !ext.is_empty()
            && self.extensions.contains(&ext.to_lowercase())
        {
            return true;
        }

        if self.patterns.iter().any(|pattern| pattern.matches(name)) {
            return true;
        }

        self.regexes.iter().any(|regex| regex.is_match(name))
    }
}
