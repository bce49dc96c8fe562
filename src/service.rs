//! Orchestration of the scan → plan → confirm → execute workflow.
//!
//! The service turns scanned descriptors into an immutable
//! [`OrganizationPlan`], and executes a plan only once it has been confirmed.
//! Confirmation is encoded in the types: [`OrganizationPlan::into_decision`]
//! yields either a [`ConfirmedPlan`] or [`Decision::Declined`], and
//! [`OrganizerService::execute_plan`] accepts only the former, so executing
//! an unconfirmed plan does not compile, and a declined plan is simply
//! dropped without touching the filesystem.

use crate::categorizer::{Category, CategoryMapper};
use crate::mover::Mover;
use crate::scanner::FileInfo;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// The operation a recoverable execution error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Creating a category folder.
    FolderCreate,
    /// Moving a single file.
    Move,
}

impl OperationKind {
    /// Short machine-readable name, used in the JSON rendering.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::FolderCreate => "folder-create",
            OperationKind::Move => "move",
        }
    }
}

/// One recoverable error recorded during execution.
///
/// Errors are appended in arrival order and never dropped.
#[derive(Debug, Clone)]
pub struct ExecutionError {
    /// Which operation failed.
    pub kind: OperationKind,
    /// The affected path: the folder for [`OperationKind::FolderCreate`],
    /// the source file for [`OperationKind::Move`].
    pub path: PathBuf,
    /// Human-readable reason.
    pub reason: String,
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            OperationKind::FolderCreate => {
                write!(
                    f,
                    "Failed to create folder {}: {}",
                    self.path.display(),
                    self.reason
                )
            }
            OperationKind::Move => {
                write!(f, "Failed to move {}: {}", self.path.display(), self.reason)
            }
        }
    }
}

/// The proposed action set, computed once per run and immutable afterwards.
#[derive(Debug)]
pub struct OrganizationPlan {
    /// Categories in first-seen order, each with its files in scan order.
    files_by_category: Vec<(Category, Vec<FileInfo>)>,
    /// Labels of categories in the plan that have no folder on disk yet.
    folders_to_create: Vec<String>,
    /// Total number of files in the plan.
    total_files: usize,
}

impl OrganizationPlan {
    /// Iterates categories in plan order with their files.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[FileInfo])> {
        self.files_by_category
            .iter()
            .map(|(category, files)| (*category, files.as_slice()))
    }

    /// Per-category file counts, in plan order.
    pub fn category_counts(&self) -> Vec<(&'static str, usize)> {
        self.files_by_category
            .iter()
            .map(|(category, files)| (category.label(), files.len()))
            .collect()
    }

    /// Labels of the folders that would be created by execution.
    pub fn folders_to_create(&self) -> &[String] {
        &self.folders_to_create
    }

    /// Total number of files in the plan.
    pub fn total_files(&self) -> usize {
        self.total_files
    }

    /// Returns true when the plan contains no files.
    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }

    /// Applies the confirmation gate's answer.
    ///
    /// Accepting yields a [`ConfirmedPlan`], the only value
    /// [`OrganizerService::execute_plan`] accepts. Declining discards the
    /// plan: zero folders are created and zero files are moved.
    pub fn into_decision(self, accepted: bool) -> Decision {
        if accepted {
            Decision::Accepted(ConfirmedPlan { plan: self })
        } else {
            Decision::Declined
        }
    }
}

/// The confirmation gate's answer for a plan.
#[derive(Debug)]
pub enum Decision {
    /// The user accepted; the plan may now be executed.
    Accepted(ConfirmedPlan),
    /// The user declined; the plan is gone and nothing was mutated.
    Declined,
}

/// A plan the confirmation gate has accepted.
#[derive(Debug)]
pub struct ConfirmedPlan {
    plan: OrganizationPlan,
}

impl ConfirmedPlan {
    /// Read access to the underlying plan.
    pub fn plan(&self) -> &OrganizationPlan {
        &self.plan
    }
}

/// Final aggregate of one execution run.
#[derive(Debug)]
pub struct ExecutionResult {
    /// Number of files moved successfully.
    pub total_moved: usize,
    /// Successful moves per category label. Sums to `total_moved`.
    pub moved_by_category: HashMap<String, usize>,
    /// Recoverable errors in arrival order.
    pub errors: Vec<ExecutionError>,
    /// Wall-clock time of the whole execution, folder creation included.
    pub duration: Duration,
}

/// Drives the full organization workflow over the leaf components.
#[derive(Debug, Default)]
pub struct OrganizerService {
    mapper: CategoryMapper,
}

impl OrganizerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups descriptors into an [`OrganizationPlan`].
    ///
    /// Category order is first-seen order; files keep their scan order within
    /// each category. `folders_to_create` is pre-checked against `root` so
    /// the preview can tell the user exactly what would change.
    pub fn create_organization_plan(
        &self,
        files: Vec<FileInfo>,
        root: &Path,
    ) -> OrganizationPlan {
        let total_files = files.len();
        let mut files_by_category: Vec<(Category, Vec<FileInfo>)> = Vec::new();

        for file in files {
            let category = self.mapper.category_for(&file.extension);
            match files_by_category.iter_mut().find(|(c, _)| *c == category) {
                Some((_, group)) => group.push(file),
                None => files_by_category.push((category, vec![file])),
            }
        }

        let folders_to_create = files_by_category
            .iter()
            .filter(|(category, _)| !Mover::category_folder_exists(root, category.label()))
            .map(|(category, _)| category.label().to_string())
            .collect();

        OrganizationPlan {
            files_by_category,
            folders_to_create,
            total_files,
        }
    }

    /// Executes a confirmed plan to completion, never retrying and never
    /// stopping early.
    ///
    /// A folder-creation failure records one error and skips that whole
    /// category; its files are neither moved nor reported individually. A
    /// move failure records one error and execution continues with the next
    /// file.
    pub fn execute_plan(&self, plan: ConfirmedPlan, root: &Path) -> ExecutionResult {
        let start = Instant::now();
        let mut mover = Mover::new();
        let mut errors = Vec::new();
        let mut moved_by_category = HashMap::new();
        let mut total_moved = 0;

        for (category, files) in &plan.plan.files_by_category {
            let folder = match mover.ensure_category_folder(root, category.label()) {
                Ok(folder) => folder,
                Err(e) => {
                    errors.push(ExecutionError {
                        kind: OperationKind::FolderCreate,
                        path: e.path,
                        reason: e.source.to_string(),
                    });
                    continue;
                }
            };

            let mut moved = 0;
            for file in files {
                let outcome = mover.move_file(&file.path, &folder);
                if outcome.success {
                    moved += 1;
                    total_moved += 1;
                } else {
                    errors.push(ExecutionError {
                        kind: OperationKind::Move,
                        path: file.path.clone(),
                        reason: outcome
                            .error
                            .unwrap_or_else(|| "unknown error".to_string()),
                    });
                }
            }
            moved_by_category.insert(category.label().to_string(), moved);
        }

        ExecutionResult {
            total_moved,
            moved_by_category,
            errors,
            duration: start.elapsed(),
        }
    }
}
