//! Output formatting and styling.
//!
//! Centralizes all human-facing output: colored status lines, the plan
//! preview, the execution report, a spinner for the execution phase, and the
//! JSON renderings used by `--json`. The core components only produce data;
//! everything user-visible goes through this module.

use crate::service::{ExecutionResult, OrganizationPlan};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value, json};
use std::time::Duration;

/// Renders plans, results, and status messages with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints the plan preview: total, the files grouped by category, and
    /// the folders that would be created.
    pub fn plan_summary(plan: &OrganizationPlan) {
        Self::header("ORGANIZATION PLAN");
        println!(
            "Total files to organize: {}",
            plan.total_files().to_string().green()
        );

        let mut groups: Vec<_> = plan.categories().collect();
        groups.sort_by_key(|(category, _)| category.label());

        for (category, files) in groups {
            let file_word = if files.len() == 1 { "file" } else { "files" };
            println!(
                "\n{} ({} {}):",
                category.label().bold(),
                files.len(),
                file_word
            );
            for file in files {
                println!("  - {}", file.name);
            }
        }

        if plan.folders_to_create().is_empty() {
            println!("\nNo new folders needed.");
        } else {
            println!("\nFolders to be created:");
            let mut folders = plan.folders_to_create().to_vec();
            folders.sort();
            for folder in folders {
                println!("  - {}", folder);
            }
        }
    }

    /// Prints the execution report: totals, duration, per-category counts,
    /// and every recorded error.
    pub fn results(result: &ExecutionResult) {
        Self::header("ORGANIZATION COMPLETE");
        println!(
            "Total files moved: {}",
            result.total_moved.to_string().green().bold()
        );
        println!(
            "Operation duration: {:.2} seconds",
            result.duration.as_secs_f64()
        );

        let mut counts: Vec<(&str, usize)> = result
            .moved_by_category
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();
        counts.sort_by_key(|&(label, _)| label);
        Self::category_table(&counts);

        if result.errors.is_empty() {
            Self::success("No errors encountered.");
        } else {
            Self::header(&format!("Errors encountered ({}):", result.errors.len()));
            for error in &result.errors {
                Self::error(&error.to_string());
            }
        }
    }

    /// Prints an aligned category/count table.
    fn category_table(counts: &[(&str, usize)]) {
        let width = counts
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "\n{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));
        for (label, count) in counts {
            let file_word = if *count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                label,
                count.to_string().green(),
                file_word,
                width = width
            );
        }
    }

    /// Creates the spinner shown while the plan executes.
    pub fn execution_spinner(total_files: usize) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        pb.set_message(format!("Organizing {} file(s)...", total_files));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Renders a plan as pretty-printed JSON.
    pub fn plan_json(plan: &OrganizationPlan) -> String {
        let mut counts = plan.category_counts();
        counts.sort_by_key(|&(label, _)| label);
        let categories: Map<String, Value> = counts
            .into_iter()
            .map(|(label, count)| (label.to_string(), json!(count)))
            .collect();

        let mut folders = plan.folders_to_create().to_vec();
        folders.sort();

        let value = json!({
            "total_files": plan.total_files(),
            "categories": categories,
            "folders_to_create": folders,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Renders an execution result as pretty-printed JSON.
    pub fn result_json(result: &ExecutionResult) -> String {
        let mut counts: Vec<(&String, &usize)> = result.moved_by_category.iter().collect();
        counts.sort_by_key(|&(label, _)| label);
        let moved: Map<String, Value> = counts
            .into_iter()
            .map(|(label, count)| (label.clone(), json!(count)))
            .collect();

        let errors: Vec<Value> = result
            .errors
            .iter()
            .map(|e| {
                json!({
                    "kind": e.kind.as_str(),
                    "path": e.path.to_string_lossy(),
                    "reason": e.reason,
                })
            })
            .collect();

        let value = json!({
            "total_moved": result.total_moved,
            "moved_by_category": moved,
            "errors": errors,
            "duration_secs": result.duration.as_secs_f64(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
