/// Logger configuration derived from command-line flags
use std::collections::HashSet;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments::get_cmd_args;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Lines above this level are dropped (Debug/Verbose have extra gating)
    pub min_level: LogLevel,
    /// --verbose: every tag logs at Debug and Verbose
    pub verbose_all: bool,
    /// Tags with --debug-<key>
    pub debug_tags: HashSet<String>,
    /// Tags with --verbose-<key>
    pub verbose_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Verbose,
            verbose_all: false,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(cfg) => cfg.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn set_logger_config(config: LoggerConfig) {
    match LOGGER_CONFIG.write() {
        Ok(mut cfg) => *cfg = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Build the logger configuration from the stored command-line arguments
pub fn init_from_args() {
    set_logger_config(config_from_args(&get_cmd_args()));
}

fn config_from_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    for arg in args {
        if let Some(key) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(key.to_lowercase());
        } else if let Some(key) = arg.strip_prefix("--verbose-") {
            config.verbose_tags.insert(key.to_lowercase());
        }
    }

    let has = |flag: &str| args.iter().any(|a| a == flag);

    if has("--quiet") || has("-q") {
        config.min_level = LogLevel::Warning;
    }
    config.verbose_all = has("--verbose") || has("-v");

    config
}

pub(super) fn is_debug_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.verbose_all || config.debug_tags.contains(&tag.to_debug_key())
}

pub(super) fn is_verbose_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.verbose_all || config.verbose_tags.contains(&tag.to_debug_key())
}
