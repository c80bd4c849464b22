use crate::error::CheckError;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;

/// Map a level name to a `LevelFilter`. Unknown names fall back to warn
pub fn log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        _ => LevelFilter::Warn,
    }
}

/// Install the logger. Logs go to stderr unless a log file is provided
pub fn setup_logging(level: &str, log_file: Option<&str>) -> Result<(), CheckError> {
    let level_filter = log_level(level);

    if let Some(path) = log_file {
        let file = match File::create(path) {
            Ok(result) => result,
            Err(_err) => return Err(CheckError::LogFile),
        };
        let _ = WriteLogger::init(level_filter, Config::default(), file);
        return Ok(());
    }

    let _ = TermLogger::init(
        level_filter,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
    Ok(())
}
