//! desktidy - organize a flat directory into category subfolders
//!
//! This library scans the direct entries of a single directory, groups
//! eligible files into fixed extension-based categories, presents the
//! resulting plan for confirmation, and executes it with idempotent folder
//! creation, conflict-safe renaming, and per-file error reporting. Nothing
//! is ever deleted or overwritten; a run either executes its plan in full or
//! is cancelled without side effects.

pub mod categorizer;
pub mod cli;
pub mod config;
pub mod mover;
pub mod output;
pub mod scanner;
pub mod service;

pub use categorizer::{Category, CategoryMapper};
pub use config::{ConfigError, ExclusionRules, FilterConfig};
pub use mover::{FolderCreationError, MoveOutcome, Mover};
pub use scanner::{FileInfo, ScanError, Scanner};
pub use service::{
    ConfirmedPlan, Decision, ExecutionError, ExecutionResult, OperationKind, OrganizationPlan,
    OrganizerService,
};

pub use cli::{RunOptions, run_cli, run_cli_with_config};
