/// Run wiring - configuration -> provider clients -> pipeline -> report
use std::sync::Arc;
use std::time::Duration;

use crate::apis::{BirdeyeClient, DexScreenerClient, HeliusClient};
use crate::checkpoint::CheckpointStore;
use crate::classifier::WalletClassifier;
use crate::config::Config;
use crate::discovery::TokenDiscovery;
use crate::errors::{ApiError, ScanError, ScanResult};
use crate::logger::{self, LogTag};
use crate::output::CsvResultSink;
use crate::paths::RunPaths;
use crate::pipeline::{load_wallets, RunOutcome, ScanPipeline};
use crate::retry::RetryPolicies;
use crate::shutdown::ShutdownSignal;
use crate::summary;
use crate::volume::VolumeResolver;

/// Execute one batch pass over the input file
///
/// Input and checkpoint problems surface here before any wallet is touched.
pub async fn run_scan(
    config: Config,
    paths: RunPaths,
    shutdown: ShutdownSignal,
) -> ScanResult<RunOutcome> {
    let pipeline_cfg = &config.pipeline;

    logger::info(
        LogTag::System,
        &format!(
            "creatorscan v{} | cascade={} | workers={} | cap={}",
            env!("CARGO_PKG_VERSION"),
            pipeline_cfg.volume_cascade,
            pipeline_cfg.max_workers,
            pipeline_cfg.analyzed_token_cap
        ),
    );

    let wallets = load_wallets(&paths.input_file)?;

    let timeout = pipeline_cfg.request_timeout_secs;
    let workers = pipeline_cfg.max_workers;

    let helius = HeliusClient::new(&config.helius, timeout, 1, pipeline_cfg.discovery_page_limit)
        .map_err(client_error("Helius"))?;
    let birdeye =
        BirdeyeClient::new(&config.birdeye, timeout, workers).map_err(client_error("Birdeye"))?;
    let dexscreener = Arc::new(
        DexScreenerClient::new(&config.dexscreener, timeout, workers)
            .map_err(client_error("DexScreener"))?,
    );

    let discovery = TokenDiscovery::new(
        Arc::new(helius),
        dexscreener.clone(),
        RetryPolicies::from_config(pipeline_cfg),
    );
    let resolver = VolumeResolver::new(
        Arc::new(birdeye),
        dexscreener,
        pipeline_cfg.volume_cascade,
    );
    let classifier = WalletClassifier::new(
        Arc::new(resolver),
        workers,
        pipeline_cfg.analyzed_token_cap,
        pipeline_cfg.top_summary_count,
    );

    let mut pipeline = ScanPipeline::new(
        discovery,
        classifier,
        CheckpointStore::new(&paths.processed_log, &paths.failed_log),
        Box::new(CsvResultSink::new(
            &paths.high_volume_csv,
            &paths.low_volume_csv,
        )),
        shutdown,
        Duration::from_millis(pipeline_cfg.wallet_delay_ms),
    );

    let outcome = pipeline.run(&wallets).await?;

    match &outcome {
        RunOutcome::Completed { stats, tables, .. } => {
            summary::write_report(stats, tables, &paths, &paths.summary_file)?;
        }
        RunOutcome::AllProcessed { .. } => {
            logger::info(LogTag::System, "Nothing to do - all wallets already processed");
        }
        RunOutcome::Interrupted { stats } => {
            logger::warning(
                LogTag::System,
                &format!(
                    "Interrupted after {} wallets - progress saved. Run again to resume.",
                    stats.successful + stats.failed
                ),
            );
        }
    }

    Ok(outcome)
}

fn client_error(provider: &'static str) -> impl Fn(ApiError) -> ScanError {
    move |e| ScanError::Config(format!("Failed to create {} client: {}", provider, e))
}
