use anyhow::{Context, Result};

use creatorscan::{
    arguments::{
        get_config_path_override, get_enabled_debug_modes, get_input_path_override,
        is_any_debug_enabled, patterns, print_help, print_version,
    },
    config::load_config,
    logger::{self, LogTag},
    paths::RunPaths,
    run::run_scan,
    shutdown::{install_shutdown_handler, ShutdownSignal},
};

/// Main entry point for creatorscan
///
/// One batch pass over the wallet list, then exit. Exit status 1 on any fatal
/// error (configuration, input, checkpoint or output files).
#[tokio::main]
async fn main() {
    if patterns::is_help_requested() {
        print_help();
        return;
    }
    if patterns::is_version_requested() {
        print_version();
        return;
    }

    logger::init();

    if let Err(e) = run().await {
        logger::error(LogTag::System, &format!("{:#}", e));
        logger::flush();
        std::process::exit(1);
    }

    logger::flush();
}

async fn run() -> Result<()> {
    logger::info(LogTag::System, "creatorscan starting up...");

    if is_any_debug_enabled() {
        logger::info(
            LogTag::System,
            &format!("Debug modes: {}", get_enabled_debug_modes().join(", ")),
        );
    }

    let config_override = get_config_path_override();
    let config =
        load_config(config_override.as_deref()).context("Failed to load configuration")?;

    let mut paths =
        RunPaths::from_working_dir(&config.paths).context("Failed to resolve file paths")?;
    if let Some(input) = get_input_path_override() {
        paths = paths.with_input(input);
    }

    paths
        .ensure_output_directories()
        .context("Failed to create output directories")?;
    logger::enable_file_logging(&paths.logs_dir).with_context(|| {
        format!("Failed to open log file in {}", paths.logs_dir.display())
    })?;

    let shutdown = ShutdownSignal::new();
    install_shutdown_handler(shutdown.clone()).context("Failed to install Ctrl+C handler")?;

    run_scan(config, paths, shutdown).await?;
    Ok(())
}
