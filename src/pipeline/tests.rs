use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::apis::testing::{overview_with_total, token, FakeAssetSource, FakeMarketData, FakePairs};
use crate::config::VolumeCascade;
use crate::output::CsvResultSink;
use crate::retry::RetryPolicies;
use crate::types::WalletAnalysis;
use crate::volume::VolumeResolver;

/// Delegates to the CSV sink and counts finalize calls
struct CountingSink {
    inner: CsvResultSink,
    finalized: Arc<AtomicUsize>,
}

impl ResultSink for CountingSink {
    fn initialize(&mut self) -> ScanResult<()> {
        self.inner.initialize()
    }

    fn append(&mut self, analysis: &WalletAnalysis) -> ScanResult<()> {
        self.inner.append(analysis)
    }

    fn finalize(&mut self) -> ScanResult<FinalizeReport> {
        self.finalized.fetch_add(1, Ordering::SeqCst);
        self.inner.finalize()
    }
}

struct Harness {
    assets: Arc<FakeAssetSource>,
    finalized: Arc<AtomicUsize>,
    shutdown: ShutdownSignal,
    pipeline: ScanPipeline,
}

fn assets() -> FakeAssetSource {
    FakeAssetSource::new()
        .with_tokens(
            "WalletHigh",
            vec![token("OldMint", "OLD", 100), token("NewMint", "NEW", 200)],
        )
        .with_tokens(
            "WalletLow",
            vec![token("BigMint", "BIG", 100), token("TinyMint", "TINY", 300)],
        )
}

fn market() -> FakeMarketData {
    FakeMarketData::new()
        .with_overview("OldMint", overview_with_total(50.0))
        .with_overview("NewMint", overview_with_total(80.0))
        .with_overview("BigMint", overview_with_total(5_000.0))
        .with_overview("TinyMint", overview_with_total(1.0))
}

fn harness(dir: &Path) -> Harness {
    harness_with(dir, ShutdownSignal::new(), assets())
}

fn harness_with(dir: &Path, shutdown: ShutdownSignal, assets: FakeAssetSource) -> Harness {
    let assets = Arc::new(assets);
    let pairs = Arc::new(FakePairs::new());
    let resolver = VolumeResolver::new(Arc::new(market()), pairs.clone(), VolumeCascade::AllTime);

    let discovery = TokenDiscovery::new(assets.clone(), pairs, RetryPolicies::immediate(3));
    let classifier = WalletClassifier::new(Arc::new(resolver), 12, 10, 5);
    let checkpoint = CheckpointStore::new(dir.join("processed.log"), dir.join("failed.log"));

    let finalized = Arc::new(AtomicUsize::new(0));
    let sink = CountingSink {
        inner: CsvResultSink::new(dir.join("high.csv"), dir.join("low.csv")),
        finalized: finalized.clone(),
    };

    let pipeline = ScanPipeline::new(
        discovery,
        classifier,
        checkpoint,
        Box::new(sink),
        shutdown.clone(),
        Duration::ZERO,
    );

    Harness {
        assets,
        finalized,
        shutdown,
        pipeline,
    }
}

fn wallets(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

#[tokio::test]
async fn test_completed_run_classifies_and_finalizes_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path());

    let outcome = h
        .pipeline
        .run(&wallets(&["WalletHigh", "WalletLow", "WalletEmpty"]))
        .await
        .unwrap();

    let RunOutcome::Completed { stats, tables, .. } = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(stats.total, 3);
    assert_eq!(stats.skipped, 0);
    assert_eq!(stats.successful, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!((stats.high, stats.low), (1, 1));
    assert!(stats.is_consistent());
    assert_eq!(tables.high.wallets, 1);
    assert_eq!(tables.low.wallets, 1);
    assert_eq!(h.finalized.load(Ordering::SeqCst), 1);

    let failed = std::fs::read_to_string(dir.path().join("failed.log")).unwrap();
    assert!(failed.starts_with("WalletEmpty|No tokens found|"));
}

#[tokio::test]
async fn test_resume_processes_each_wallet_once() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = harness(dir.path());
    first
        .pipeline
        .run(&wallets(&["WalletHigh", "WalletEmpty"]))
        .await
        .unwrap();
    assert_eq!(first.assets.calls(), 2);

    let mut second = harness(dir.path());
    let outcome = second
        .pipeline
        .run(&wallets(&["WalletHigh", "WalletEmpty", "WalletLow"]))
        .await
        .unwrap();
    assert_eq!(second.assets.calls(), 1);

    let RunOutcome::Completed { stats, tables, .. } = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.successful + stats.failed, 1);
    assert!(stats.is_consistent());
    assert_eq!(tables.high.wallets, 1);
    assert_eq!(tables.low.wallets, 1);

    let processed = std::fs::read_to_string(dir.path().join("processed.log")).unwrap();
    let mut lines: Vec<&str> = processed.lines().collect();
    lines.sort_unstable();
    assert_eq!(lines, vec!["WalletEmpty", "WalletHigh", "WalletLow"]);
}

#[tokio::test]
async fn test_all_processed_skips_finalize() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = harness(dir.path());
    first.pipeline.run(&wallets(&["WalletHigh"])).await.unwrap();

    let mut second = harness(dir.path());
    let outcome = second.pipeline.run(&wallets(&["WalletHigh"])).await.unwrap();

    assert!(matches!(outcome, RunOutcome::AllProcessed { .. }));
    assert_eq!(second.finalized.load(Ordering::SeqCst), 0);
    assert_eq!(second.assets.calls(), 0);
}

#[tokio::test]
async fn test_interrupt_before_start_persists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path());
    h.shutdown.request();

    let outcome = h.pipeline.run(&wallets(&["WalletHigh", "WalletLow"])).await.unwrap();

    assert!(matches!(outcome, RunOutcome::Interrupted { .. }));
    assert_eq!(h.finalized.load(Ordering::SeqCst), 0);
    assert!(!dir.path().join("processed.log").exists());
}

#[tokio::test]
async fn test_interrupt_mid_run_keeps_finished_wallets_only() {
    let dir = tempfile::tempdir().unwrap();
    let shutdown = ShutdownSignal::new();
    let assets = assets().interrupt_on("WalletLow", shutdown.clone());
    let mut h = harness_with(dir.path(), shutdown, assets);

    let outcome = h
        .pipeline
        .run(&wallets(&["WalletHigh", "WalletLow"]))
        .await
        .unwrap();

    let RunOutcome::Interrupted { stats } = outcome else {
        panic!("expected an interrupted run");
    };
    assert_eq!(stats.successful, 1);
    assert_eq!(stats.failed, 0);
    assert_eq!(h.assets.calls(), 2);
    assert_eq!(h.finalized.load(Ordering::SeqCst), 0);

    let processed = std::fs::read_to_string(dir.path().join("processed.log")).unwrap();
    assert_eq!(processed.lines().collect::<Vec<_>>(), vec!["WalletHigh"]);

    let high = std::fs::read_to_string(dir.path().join("high.csv")).unwrap();
    assert!(high.contains("WalletHigh"));
    let low = std::fs::read_to_string(dir.path().join("low.csv")).unwrap();
    assert!(!low.contains("WalletLow"));
    assert!(!dir.path().join("failed.log").exists());
}

#[test]
fn test_parse_wallets_filters_and_dedupes() {
    let input = "  WalletA  \n\n<html>\nWalletB\nWalletA\n   \nWalletC\n";
    assert_eq!(parse_wallets(input), vec!["WalletA", "WalletB", "WalletC"]);
}

#[test]
fn test_load_wallets_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    assert!(matches!(load_wallets(&missing), Err(ScanError::InputNotFound(_))));

    let empty = dir.path().join("empty.txt");
    std::fs::write(&empty, "\n<header>\n").unwrap();
    assert!(matches!(load_wallets(&empty), Err(ScanError::EmptyInput(_))));
}

#[test]
fn test_shorten_address() {
    assert_eq!(
        shorten_address("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"),
        "7xKXtg2C...osgAsU"
    );
    assert_eq!(shorten_address("short"), "short");
}
