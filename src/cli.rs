//! Command-line interface glue.
//!
//! Everything outside the core pipeline lives here: argument parsing, the
//! target-directory resolver, the interactive confirmation gate, and the
//! wiring that drives scan → plan → preview → confirm → execute → report.
//! Critical errors surface as `Err(String)`; recoverable ones are reported
//! inside the execution result.

use crate::config::FilterConfig;
use crate::output::OutputFormatter;
use crate::scanner::Scanner;
use crate::service::{Decision, OrganizerService};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "desktidy",
    version,
    about = "Organize a cluttered directory into category subfolders."
)]
pub struct Cli {
    /// Directory to organize; defaults to the user's Desktop.
    pub directory: Option<PathBuf>,

    /// Show the plan without prompting or moving anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes")]
    pub assume_yes: bool,

    /// Path to an exclusion-filter configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the plan or result as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// The behavior flags for one run.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.dry_run,
            assume_yes: self.assume_yes,
            json: self.json,
        }
    }
}

/// Behavior flags for a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Preview only: build and show the plan, then stop.
    pub dry_run: bool,
    /// Treat the confirmation gate as accepted without prompting.
    pub assume_yes: bool,
    /// Emit JSON instead of human-readable tables.
    pub json: bool,
}

/// Resolves the directory to organize.
///
/// An explicit argument wins; otherwise the user's Desktop is assumed, like
/// the classic desktop-cleanup use case. A missing or non-directory target
/// is a critical error.
pub fn resolve_target_directory(directory: Option<PathBuf>) -> Result<PathBuf, String> {
    let path = match directory {
        Some(path) => path,
        None => default_desktop_path()?,
    };

    if !path.is_dir() {
        return Err(format!("Target directory not found at {}", path.display()));
    }

    Ok(path)
}

fn default_desktop_path() -> Result<PathBuf, String> {
    let home_var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    let home = std::env::var(home_var)
        .map_err(|_| format!("Cannot locate the Desktop: {} is not set", home_var))?;
    Ok(PathBuf::from(home).join("Desktop"))
}

/// Runs the full workflow against `dir_path` using the default
/// configuration search chain.
pub fn run_cli(dir_path: &Path, options: RunOptions) -> Result<(), String> {
    run_cli_with_config(dir_path, options, None)
}

/// Runs the full workflow with an explicit configuration file.
///
/// # Examples
///
/// ```no_run
/// use desktidy::cli::{RunOptions, run_cli};
/// use std::path::Path;
///
/// let options = RunOptions { dry_run: true, ..Default::default() };
/// if let Err(e) = run_cli(Path::new("/home/user/Desktop"), options) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli_with_config(
    dir_path: &Path,
    options: RunOptions,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let config = FilterConfig::load(config_path)
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let filters = config
        .compile()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    let quiet = options.json;
    if !quiet {
        OutputFormatter::info(&format!("Scanning {}...", dir_path.display()));
    }

    let scanner = Scanner::new(filters);
    let files = scanner
        .scan(dir_path)
        .map_err(|e| format!("Critical error: {}", e))?;

    let service = OrganizerService::new();
    let plan = service.create_organization_plan(files, dir_path);

    if plan.is_empty() {
        if options.json {
            println!("{}", OutputFormatter::plan_json(&plan));
        } else {
            OutputFormatter::success("No files to organize. Directory is already tidy.");
        }
        return Ok(());
    }

    if options.dry_run {
        if options.json {
            println!("{}", OutputFormatter::plan_json(&plan));
        } else {
            OutputFormatter::plan_summary(&plan);
            OutputFormatter::warning(
                "Dry run: no folders were created and no files were moved.",
            );
        }
        return Ok(());
    }

    if !quiet {
        OutputFormatter::plan_summary(&plan);
    }

    let accepted = options.assume_yes || request_confirmation();

    match plan.into_decision(accepted) {
        Decision::Declined => {
            if !quiet {
                OutputFormatter::plain("Operation cancelled. No changes made.");
            }
            Ok(())
        }
        Decision::Accepted(confirmed) => {
            let spinner =
                (!quiet).then(|| OutputFormatter::execution_spinner(confirmed.plan().total_files()));
            let result = service.execute_plan(confirmed, dir_path);
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            if options.json {
                println!("{}", OutputFormatter::result_json(&result));
            } else {
                OutputFormatter::results(&result);
            }
            Ok(())
        }
    }
}

/// Asks the user to accept or reject the plan.
///
/// Re-asks on anything other than yes/y/no/n. End of input declines: no
/// answer means no changes.
fn request_confirmation() -> bool {
    let stdin = io::stdin();
    loop {
        print!("\nProceed with organization? (yes/no): ");
        let _ = io::stdout().flush();

        let mut response = String::new();
        match stdin.lock().read_line(&mut response) {
            Ok(0) | Err(_) => return false,
            Ok(_) => {}
        }

        match response.trim().to_lowercase().as_str() {
            "yes" | "y" => return true,
            "no" | "n" => return false,
            _ => OutputFormatter::warning("Please answer 'yes' or 'no'."),
        }
    }
}
