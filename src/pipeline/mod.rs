/// Sequential batch driver
///
/// For each wallet not yet checkpointed: discovery -> classification ->
/// result sink -> checkpoint, with a fixed pause between wallets. Wallets run
/// one at a time; only the per-wallet volume fan-out is concurrent.
///
/// An interrupt abandons the wallet whose network phase is in flight. Its
/// results were never persisted, so the next run picks it up again. A
/// persistence step (row + checkpoint) always runs to completion.
use std::collections::HashSet;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::checkpoint::CheckpointStore;
use crate::classifier::{format_usd_whole, WalletClassifier};
use crate::discovery::TokenDiscovery;
use crate::errors::{ScanError, ScanResult};
use crate::logger::{self, LogTag};
use crate::output::{FinalizeReport, ResultSink};
use crate::shutdown::ShutdownSignal;
use crate::summary::RunStats;
use crate::types::{Classification, WalletOutcome};

#[cfg(test)]
mod tests;

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Every remaining wallet handled and tables finalized
    Completed {
        stats: RunStats,
        tables: FinalizeReport,
        elapsed: Duration,
    },
    /// Nothing left to do; tables untouched
    AllProcessed { stats: RunStats },
    /// Stopped by Ctrl+C; progress so far is checkpointed
    Interrupted { stats: RunStats },
}

pub struct ScanPipeline {
    discovery: TokenDiscovery,
    classifier: WalletClassifier,
    checkpoint: CheckpointStore,
    sink: Box<dyn ResultSink>,
    shutdown: ShutdownSignal,
    wallet_delay: Duration,
}

impl ScanPipeline {
    pub fn new(
        discovery: TokenDiscovery,
        classifier: WalletClassifier,
        checkpoint: CheckpointStore,
        sink: Box<dyn ResultSink>,
        shutdown: ShutdownSignal,
        wallet_delay: Duration,
    ) -> Self {
        Self {
            discovery,
            classifier,
            checkpoint,
            sink,
            shutdown,
            wallet_delay,
        }
    }

    pub async fn run(&mut self, wallets: &[String]) -> ScanResult<RunOutcome> {
        let processed = self.checkpoint.load()?;
        let remaining: Vec<&String> = wallets
            .iter()
            .filter(|wallet| !processed.contains(wallet.as_str()))
            .collect();

        let mut stats = RunStats {
            total: wallets.len(),
            skipped: wallets.len() - remaining.len(),
            ..Default::default()
        };

        logger::info(
            LogTag::Pipeline,
            &format!(
                "Total wallets: {} | Already done: {} | Remaining: {}",
                stats.total,
                stats.skipped,
                remaining.len()
            ),
        );

        if remaining.is_empty() {
            logger::info(LogTag::Pipeline, "All wallets already processed");
            return Ok(RunOutcome::AllProcessed { stats });
        }

        self.sink.initialize()?;

        let start = Instant::now();
        let count = remaining.len();

        for (idx, wallet) in remaining.into_iter().enumerate() {
            if self.shutdown.is_requested() {
                return Ok(RunOutcome::Interrupted { stats });
            }

            log_progress(idx, count, wallet, start.elapsed());

            let outcome = tokio::select! {
                biased;
                _ = self.shutdown.wait() => None,
                outcome = self.analyze(wallet) => Some(outcome),
            };
            let Some(outcome) = outcome else {
                logger::warning(
                    LogTag::Pipeline,
                    &format!("Interrupted while analyzing {}, it will be retried", wallet),
                );
                return Ok(RunOutcome::Interrupted { stats });
            };

            self.persist(wallet, outcome, &mut stats)?;

            if idx + 1 < count && !self.wallet_delay.is_zero() {
                tokio::select! {
                    _ = self.shutdown.wait() => {}
                    _ = tokio::time::sleep(self.wallet_delay) => {}
                }
            }
        }

        let elapsed = start.elapsed();
        logger::info(
            LogTag::Pipeline,
            &format!(
                "Done in {:.1}s | Speed: {:.2} wallets/second | Successful: {} | Failed: {}",
                elapsed.as_secs_f64(),
                rate(count, elapsed),
                stats.successful,
                stats.failed
            ),
        );

        logger::info(LogTag::Output, "Finalizing output tables...");
        let tables = self.sink.finalize()?;

        Ok(RunOutcome::Completed {
            stats,
            tables,
            elapsed,
        })
    }

    async fn analyze(&self, wallet: &str) -> WalletOutcome {
        let tokens = self.discovery.discover(wallet).await;
        self.classifier.classify(wallet, tokens).await
    }

    fn persist(
        &mut self,
        wallet: &str,
        outcome: WalletOutcome,
        stats: &mut RunStats,
    ) -> ScanResult<()> {
        match outcome {
            WalletOutcome::Analyzed(analysis) => {
                self.sink.append(&analysis)?;
                self.checkpoint.mark_done(wallet)?;

                stats.successful += 1;
                match analysis.classification {
                    Classification::High => stats.high += 1,
                    Classification::Low => stats.low += 1,
                }

                logger::info(
                    LogTag::Pipeline,
                    &format!(
                        "  [{}] | Tokens: {} | Recent Vol: ${} | Highest: ${}",
                        analysis.classification,
                        analysis.total_tokens_created,
                        format_usd_whole(analysis.most_recent_token_volume),
                        format_usd_whole(analysis.highest_volume_amount)
                    ),
                );
            }
            WalletOutcome::NoData(reason) => {
                self.checkpoint.mark_failed(wallet, reason.as_str())?;
                self.checkpoint.mark_done(wallet)?;
                stats.failed += 1;

                logger::info(LogTag::Pipeline, &format!("  [FAIL] {}", reason));
            }
        }
        Ok(())
    }
}

fn rate(done: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        done as f64 / secs
    } else {
        0.0
    }
}

fn log_progress(idx: usize, count: usize, wallet: &str, elapsed: Duration) {
    let speed = rate(idx, elapsed);
    let eta = if speed > 0.0 {
        ((count - idx) as f64 / speed) as u64
    } else {
        0
    };

    logger::info(
        LogTag::Pipeline,
        &format!(
            "[{}/{}] {} | Speed: {:.1} wallets/sec | ETA: {}s",
            idx + 1,
            count,
            shorten_address(wallet),
            speed,
            eta
        ),
    );
}

/// `first8...last6`, or the address itself when it is too short to shorten
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 14 {
        return address.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Wallet list from input text
///
/// One address per line, trimmed. Blank lines and lines starting with `<` are
/// skipped; repeated addresses keep their first position.
pub fn parse_wallets(contents: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('<'))
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}

pub fn load_wallets(path: &Path) -> ScanResult<Vec<String>> {
    if !path.exists() {
        return Err(ScanError::InputNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
    let wallets = parse_wallets(&contents);
    if wallets.is_empty() {
        return Err(ScanError::EmptyInput(path.to_path_buf()));
    }

    logger::info(
        LogTag::Pipeline,
        &format!("Loaded {} wallet addresses from {}", wallets.len(), path.display()),
    );
    Ok(wallets)
}
