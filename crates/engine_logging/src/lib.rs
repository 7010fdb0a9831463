#![deny(missing_docs)]
//! Shared logging utilities for the webreader workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! the per-thread batch position that prefixes messages while a record is being
//! converted, and the `simplelog` backends used by the binary and the tests.

use std::cell::Cell;
use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

thread_local! {
    /// Thread-local storage for the record currently processed by a batch, 1-based.
    static BATCH_POSITION: Cell<Option<(usize, usize)>> = const { Cell::new(None) };
}

/// Sets the batch position (`index` of `total`, 1-based) for the current thread.
/// Log lines emitted through the `engine_*` macros are prefixed with `[index/total]`.
pub fn set_batch_position(index: usize, total: usize) {
    BATCH_POSITION.with(|v| v.set(Some((index, total))));
}

/// Clears the batch position for the current thread.
pub fn clear_batch_position() {
    BATCH_POSITION.with(|v| v.set(None));
}

/// Retrieves the batch position for the current thread, if a record is in flight.
pub fn batch_position() -> Option<(usize, usize)> {
    BATCH_POSITION.with(|v| v.get())
}

#[doc(hidden)]
#[macro_export]
macro_rules! __engine_log {
    ($level:expr, $($arg:tt)*) => {{
        match $crate::batch_position() {
            Some((index, total)) => {
                log::log!($level, "[{}/{}] {}", index, total, format_args!($($arg)*))
            }
            None => log::log!($level, $($arg)*),
        }
    }};
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {
        $crate::__engine_log!(log::Level::Trace, $($arg)*)
    };
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {
        $crate::__engine_log!(log::Level::Info, $($arg)*)
    };
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {
        $crate::__engine_log!(log::Level::Debug, $($arg)*)
    };
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {
        $crate::__engine_log!(log::Level::Warn, $($arg)*)
    };
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {
        $crate::__engine_log!(log::Level::Error, $($arg)*)
    };
}

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the terminal (stderr for warnings and errors, stdout otherwise).
    Terminal,
    /// Write to the given file, truncating it.
    File(PathBuf),
    /// Write to both the terminal and the given file.
    Both(PathBuf),
}

/// Initialize the global logger with the specified destination and level.
///
/// A log file that cannot be created is reported on stderr and skipped; the
/// terminal logger still works. Calling this twice is a no-op.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    let file_path = match destination {
        LogDestination::Terminal => {
            loggers.push(term_logger(level, config.clone()));
            None
        }
        LogDestination::File(path) => Some(path),
        LogDestination::Both(path) => {
            loggers.push(term_logger(level, config.clone()));
            Some(path)
        }
    };

    if let Some(path) = file_path {
        if let Some(file_logger) = create_file_logger(path, level, config) {
            loggers.push(file_logger);
        }
    }

    if loggers.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn term_logger(level: LevelFilter, config: Config) -> Box<TermLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn create_file_logger(
    path: PathBuf,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(&path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
