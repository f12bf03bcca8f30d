/*
 * Logging setup for the demo host and for tests. Output goes to stderr
 * through `simplelog`, optionally mirrored into a log file. Library code only
 * uses the `log` macros and never installs a logger itself.
 */
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Once;

#[derive(Debug)]
pub enum LoggingError {
    Io(io::Error),
    AlreadyInitialized(log::SetLoggerError),
}

impl From<io::Error> for LoggingError {
    fn from(err: io::Error) -> Self {
        LoggingError::Io(err)
    }
}

impl From<log::SetLoggerError> for LoggingError {
    fn from(err: log::SetLoggerError) -> Self {
        LoggingError::AlreadyInitialized(err)
    }
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::Io(e) => write!(f, "Could not open log file: {e}"),
            LoggingError::AlreadyInitialized(e) => write!(f, "Logger already installed: {e}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::Io(e) => Some(e),
            LoggingError::AlreadyInitialized(e) => Some(e),
        }
    }
}

fn log_config() -> Config {
    ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Off)
        .build()
}

/*
 * Installs the global logger at `level`. When `log_file` is given, the same
 * records are also written there (the file is truncated first). Fails if a
 * logger has already been installed in this process.
 */
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<(), LoggingError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        log_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        loggers.push(WriteLogger::new(level, log_config(), File::create(path)?));
    }
    CombinedLogger::init(loggers)?;
    log::debug!("Logging: initialized at level {level}");
    Ok(())
}

static INIT: Once = Once::new();

// Debug-level terminal logging, safe to call from any number of tests.
pub fn initialize_logging() {
    INIT.call_once(|| {
        if let Err(e) = init_logging(LevelFilter::Debug, None) {
            eprintln!("Logging: {e}");
        }
    });
}
