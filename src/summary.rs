/// End-of-run summary report
///
/// Rendered once after finalization, written to the summary file and echoed
/// to stdout.
use std::path::Path;

use chrono::Local;

use crate::errors::{ScanError, ScanResult};
use crate::logger::{self, LogTag};
use crate::output::FinalizeReport;
use crate::paths::RunPaths;

const RULE_WIDTH: usize = 60;

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunStats {
    /// Distinct wallets in the input file
    pub total: usize,
    /// Input wallets already in the checkpoint log at start
    pub skipped: usize,
    pub successful: usize,
    /// No-data wallets
    pub failed: usize,
    pub high: usize,
    pub low: usize,
}

impl RunStats {
    pub fn processed_this_run(&self) -> usize {
        self.total.saturating_sub(self.skipped)
    }

    pub fn success_rate(&self) -> f64 {
        let attempted = self.successful + self.failed;
        if attempted == 0 {
            0.0
        } else {
            self.successful as f64 / attempted as f64 * 100.0
        }
    }

    /// Every wallet that was not skipped ended as either success or failure
    pub fn is_consistent(&self) -> bool {
        self.successful + self.failed == self.processed_this_run()
    }
}

pub fn render_report(
    stats: &RunStats,
    tables: &FinalizeReport,
    paths: &RunPaths,
    generated_at: &str,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let status = if stats.is_consistent() { "PASS" } else { "FAIL" };

    let mut lines: Vec<String> = Vec::new();
    lines.push(rule.clone());
    lines.push("CREATOR WALLET ANALYSIS SUMMARY REPORT".to_string());
    lines.push(rule.clone());
    lines.push(format!("Generated: {}", generated_at));
    lines.push(String::new());

    lines.push("INPUT STATISTICS:".to_string());
    lines.push(format!("- Total wallet addresses in input file: {}", stats.total));
    lines.push(format!("- Already processed (skipped): {}", stats.skipped));
    lines.push(format!(
        "- Wallets processed in this run: {}",
        stats.processed_this_run()
    ));
    lines.push(String::new());

    lines.push("PROCESSING RESULTS:".to_string());
    lines.push(format!("- Successfully analyzed: {}", stats.successful));
    lines.push(format!("- Failed to process: {}", stats.failed));
    lines.push(format!("- Success rate: {:.2}%", stats.success_rate()));
    lines.push(String::new());

    lines.push("CATEGORIZATION:".to_string());
    lines.push(format!(
        "- Wallets with highest recent volume: {} ({} this run)",
        tables.high.wallets, stats.high
    ));
    lines.push(format!(
        "- Wallets without highest recent volume: {} ({} this run)",
        tables.low.wallets, stats.low
    ));
    lines.push(String::new());

    lines.push("VALIDATION CHECK:".to_string());
    lines.push(format!(
        "- Successful + Failed = {}",
        stats.successful + stats.failed
    ));
    lines.push(format!(
        "- Should equal total processed = {}",
        stats.processed_this_run()
    ));
    lines.push(format!("- Status: {}", status));
    lines.push(String::new());

    lines.push("OUTPUT FILES:".to_string());
    lines.push(format!("- High volume wallets: {}", paths.high_volume_csv.display()));
    lines.push(format!("- Low volume wallets: {}", paths.low_volume_csv.display()));
    lines.push(format!("- Processed log: {}", paths.processed_log.display()));
    lines.push(format!("- Failed log: {}", paths.failed_log.display()));
    lines.push(String::new());
    lines.push(rule);

    lines.join("\n") + "\n"
}

/// Render with the current local time, write to `path` and print
pub fn write_report(
    stats: &RunStats,
    tables: &FinalizeReport,
    paths: &RunPaths,
    path: &Path,
) -> ScanResult<String> {
    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let report = render_report(stats, tables, paths, &generated_at);

    std::fs::write(path, &report).map_err(|e| ScanError::io(path, e))?;
    logger::print_stdout_safe(&format!("\n{}", report));

    if !stats.is_consistent() {
        logger::warning(
            LogTag::Summary,
            &format!(
                "Validation failed: {} successful + {} failed != {} processed",
                stats.successful,
                stats.failed,
                stats.processed_this_run()
            ),
        );
    }
    logger::info(
        LogTag::Summary,
        &format!("Summary report written to {}", path.display()),
    );
    Ok(report)
}
