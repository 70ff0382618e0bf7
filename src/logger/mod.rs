//! Structured logging system for creatorscan
//!
//! This module provides a small, ergonomic logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via --debug-<module> flags
//! - Dual output: colored console + daily log file
//!
//! ## Usage
//!
//! ```rust,ignore
//! use creatorscan::logger::{self, LogTag};
//!
//! logger::error(LogTag::Output, "Failed to append row");
//! logger::warning(LogTag::Api, "Rate limited by provider");
//! logger::info(LogTag::Pipeline, "Wallet classified");
//! logger::debug(LogTag::Volume, "Overview response: ..."); // Only with --debug-volume
//! logger::verbose(LogTag::Api, "Raw body: ...");           // Only with --verbose
//! ```
//!
//! ## Initialization
//!
//! ```rust,ignore
//! logger::init();                         // console, flags from command line
//! logger::enable_file_logging(&logs_dir); // once the configuration is known
//! ```

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

use std::path::Path;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use format::print_stdout_safe;
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger from command-line flags
///
/// Until [`enable_file_logging`] is called, lines only go to the console.
pub fn init() {
    config::init_from_args();
}

/// Start mirroring log lines into `<logs_dir>/creatorscan_<date>.log`
pub fn enable_file_logging(logs_dir: &Path) -> std::io::Result<()> {
    file::init_file_logging(logs_dir)
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (still shown with --quiet)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the matching --debug-<module> flag is provided.
///
/// ```rust,ignore
/// // Only shown with --debug-discovery
/// logger::debug(LogTag::Discovery, "Primary returned 0 items");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (only with --verbose or --verbose-<module>)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush pending log file writes
///
/// Call this during shutdown to ensure all logs are written to disk.
pub fn flush() {
    file::flush_file_logging();
}
