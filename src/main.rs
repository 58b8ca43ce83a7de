use std::process::ExitCode;
use std::sync::Arc;

use circus_cli::cli::{self, CliAction};
use circus_cli::commands::install;
use circus_cli::logging::{Log, Logger};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match cli::parse(&args) {
        Ok(CliAction::Usage) => {
            print!("{}", cli::usage());
            ExitCode::SUCCESS
        }
        Ok(CliAction::Run(config)) => {
            let log: Arc<dyn Log> = Arc::new(Logger::from_config(&config));
            match install::run(&config, Arc::clone(&log)) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    log.error(&e.to_string());
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
