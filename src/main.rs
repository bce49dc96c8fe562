use clap::Parser;
use desktidy::cli::{self, Cli};
use desktidy::output::OutputFormatter;
use std::process;

fn main() {
    let cli = Cli::parse();
    let options = cli.run_options();

    let dir_path = match cli::resolve_target_directory(cli.directory.clone()) {
        Ok(path) => path,
        Err(e) => {
            OutputFormatter::error(&format!("Critical error: {}", e));
            process::exit(1);
        }
    };

    if let Err(e) = cli::run_cli_with_config(&dir_path, options, cli.config.as_deref()) {
        OutputFormatter::error(&e);
        process::exit(1);
    }
}
