/// Centralized argument handling for creatorscan
///
/// Features:
/// - CMD_ARGS storage with thread-safe access
/// - Flag and flag-value lookup helpers
/// - Debug flag checks for the logger
/// - Help and version output
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::logger::LogTag;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .filter(|value| !value.starts_with("--"))
        .cloned()
}

// =============================================================================
// RUN OPTIONS
// =============================================================================

/// Explicit configuration file (--config <path>)
pub fn get_config_path_override() -> Option<PathBuf> {
    get_arg_value("--config").map(PathBuf::from)
}

/// Input wallet list override (--input <path>)
pub fn get_input_path_override() -> Option<PathBuf> {
    get_arg_value("--input").map(PathBuf::from)
}

/// Debug modes enabled through --debug-<tag>
pub fn get_enabled_debug_modes() -> Vec<String> {
    get_cmd_args()
        .iter()
        .filter_map(|a| a.strip_prefix("--debug-"))
        .map(|s| s.to_string())
        .collect()
}

pub fn is_any_debug_enabled() -> bool {
    !get_enabled_debug_modes().is_empty() || patterns::is_verbose_mode()
}

/// Print help information
pub fn print_help() {
    println!("creatorscan - token creator volume classifier");
    println!();
    println!("USAGE:");
    println!("    creatorscan [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --config <PATH>           Configuration file (TOML)");
    println!("    --input <PATH>            Wallet list, one address per line");
    println!("    --quiet, -q               Only warnings and errors on the console");
    println!("    --verbose, -v             Enable debug and verbose output for every module");
    println!("    --help, -h                Show this help message");
    println!("    --version, -V             Show version");
    println!();
    println!("DEBUG FLAGS:");
    for tag in LogTag::all() {
        println!(
            "    --debug-{:<18}{} module debug mode",
            tag.to_debug_key(),
            tag.to_plain_string()
        );
    }
    println!();
    println!("ENVIRONMENT:");
    println!("    HELIUS_API_KEY            Overrides helius.api_key");
    println!("    BIRDEYE_API_KEY           Overrides birdeye.api_key");
    println!();
    println!("EXAMPLES:");
    println!("    creatorscan                                   # Use ./creatorscan.toml and ./wallets.txt");
    println!("    creatorscan --input creators.txt --debug-volume");
}

pub fn print_version() {
    println!("creatorscan {}", env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// COMMON ARGUMENT PATTERNS
// =============================================================================

pub mod patterns {
    use super::*;

    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }

    pub fn is_version_requested() -> bool {
        has_arg("--version") || has_arg("-V")
    }

    pub fn is_verbose_mode() -> bool {
        has_arg("--verbose") || has_arg("-v")
    }
}
