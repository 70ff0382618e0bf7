//! Log formatting and output with ANSI colors
//!
//! Handles:
//! - Colorized console output with aligned tag and level columns
//! - Continuation lines for multi-line messages
//! - Dual output (console + file)
//! - Broken pipe handling for piped commands

use super::file::{flush_file_logging, write_to_file};
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 7;

pub fn format_and_log(tag: &LogTag, level: LogLevel, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();
    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();

    let tag_str = format_tag(tag);
    let level_str = format_level(level);
    let prefix = format!("{} [{}] [{}] ", time.dimmed(), tag_str, level_str);
    let continuation = " ".repeat(time.len() + TAG_WIDTH + LEVEL_WIDTH + 7);

    let tag_plain = tag.to_plain_string();
    for (idx, line) in message.split('\n').enumerate() {
        if idx == 0 {
            print_stdout_safe(&format!("{}{}", prefix, line));
        } else {
            print_stdout_safe(&format!("{}{}", continuation, line));
        }
        write_to_file(&format!(
            "{} [{}] [{}] {}",
            timestamp,
            tag_plain,
            level.as_str(),
            line
        ));
    }

    if level == LogLevel::Error {
        flush_file_logging();
    }
}

fn format_tag(tag: &LogTag) -> ColoredString {
    let label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => label.bright_yellow().bold(),
        LogTag::Config => label.bright_white().bold(),
        LogTag::Pipeline => label.bright_green().bold(),
        LogTag::Discovery => label.bright_cyan().bold(),
        LogTag::Volume => label.bright_magenta().bold(),
        LogTag::Api => label.bright_purple().bold(),
        LogTag::Checkpoint => label.bright_blue().bold(),
        LogTag::Output => label.green().bold(),
        LogTag::Summary => label.cyan().bold(),
        LogTag::Other(_) => label.white().bold(),
    }
}

fn format_level(level: LogLevel) -> ColoredString {
    let label = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => label.bright_red().bold(),
        LogLevel::Warning => label.bright_yellow().bold(),
        LogLevel::Info => label.white().bold(),
        LogLevel::Debug | LogLevel::Verbose => label.dimmed(),
    }
}

/// Print to stdout but ignore broken pipe errors
pub fn print_stdout_safe(message: &str) {
    if let Err(e) = writeln!(stdout(), "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        let _ = writeln!(std::io::stderr(), "Logger stdout error: {}", e);
    }
    if let Err(e) = stdout().flush() {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
}
