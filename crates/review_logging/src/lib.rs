#![deny(missing_docs)]
//! Shared logging utilities for the review workspace.
//!
//! This crate provides the `review_*` logging macros used across the codebase,
//! the console + daily log file initializer used by the binary, and a minimal
//! test initializer for the global logger.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Prefix of the daily log file name, e.g. `lmreview_20240131.log`.
pub const LOG_FILE_PREFIX: &str = "lmreview";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! review_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! review_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! review_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! review_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! review_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Console only.
    Terminal,
    /// Console plus a daily log file inside the given directory.
    Both {
        /// Directory that receives `lmreview_<YYYYMMDD>.log`.
        log_dir: PathBuf,
    },
}

impl LogDestination {
    /// Log file written on `date`, if this destination has one.
    pub fn log_file(&self, date: NaiveDate) -> Option<PathBuf> {
        match self {
            LogDestination::Terminal => None,
            LogDestination::Both { log_dir } => Some(daily_log_path(log_dir, date)),
        }
    }
}

/// Returns the log file path for `date` inside `log_dir`.
///
/// A new file name is produced each calendar day, so a long-running session
/// keeps appending to the file of the day it started on.
pub fn daily_log_path(log_dir: &Path, date: NaiveDate) -> PathBuf {
    log_dir.join(format!("{LOG_FILE_PREFIX}_{}.log", date.format("%Y%m%d")))
}

/// Initializes the global logger.
///
/// Returns the path of the log file when a file sink was installed. A log
/// file that cannot be opened degrades to console-only output with a warning.
pub fn initialize(destination: LogDestination, level: LevelFilter) -> Option<PathBuf> {
    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    let mut file_path = None;
    if let Some(path) = destination.log_file(chrono::Local::now().date_naive()) {
        match open_log_file(&path) {
            Ok(file) => {
                loggers.push(WriteLogger::new(level, config, file));
                file_path = Some(path);
            }
            Err(err) => {
                eprintln!("Warning: could not open log file {:?}: {}", path, err);
            }
        }
    }

    // Ignore the error if a logger was already installed.
    let _ = CombinedLogger::init(loggers);
    file_path
}

fn build_config() -> Config {
    let mut builder = ConfigBuilder::new();
    builder
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off);
    // Local offset lookup can fail on some platforms; UTC is an acceptable fallback.
    let _ = builder.set_time_offset_to_local();
    builder.build()
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(log_dir) = path.parent() {
        fs::create_dir_all(log_dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
