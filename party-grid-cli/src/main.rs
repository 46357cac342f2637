mod app;
mod config;
mod error;
mod paths;

use std::path::PathBuf;
use std::process::ExitCode;

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use crate::config::ViewConfig;
use crate::error::CliError;

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<String, CliError> {
    let mut args = std::env::args_os().skip(1);
    let rows_path = args.next().map(PathBuf::from).ok_or(CliError::Usage)?;
    let view_path = args.next().map(PathBuf::from);
    if args.next().is_some() {
        return Err(CliError::Usage);
    }

    let rows = app::load_rows(&rows_path)?;
    let view = match &view_path {
        Some(path) => ViewConfig::load(path)?,
        None => ViewConfig::default(),
    };

    app::run_view(rows, &view)
}

/// Log to a file, or to stderr (warnings only) when no log file can be
/// opened.
fn init_logging() {
    let result = match paths::open_log() {
        Some(file) => WriteLogger::init(LevelFilter::Debug, Config::default(), file),
        None => TermLogger::init(
            LevelFilter::Warn,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    };

    if let Err(e) = result {
        eprintln!("Failed to initialize logger: {}", e);
    }
}
