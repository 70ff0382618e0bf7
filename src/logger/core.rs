/// Core logging implementation with automatic filtering
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Anything above the minimum level is dropped (--quiet raises it to Warning)
/// 3. Debug requires --debug-<module> (or --verbose) for that tag
/// 4. Verbose requires --verbose or --verbose-<module> for that tag
use super::config::{get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    let config = get_logger_config();

    if level > config.min_level {
        return false;
    }

    match level {
        LogLevel::Debug => is_debug_enabled_for_tag(&config, tag),
        LogLevel::Verbose => is_verbose_enabled_for_tag(&config, tag),
        _ => true,
    }
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(&tag, level, message);
}
