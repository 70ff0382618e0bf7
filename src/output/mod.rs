/// Result persistence
///
/// Analyses go to one of two tables by classification. `finalize` runs once at
/// the end of a completed run and prepends per-table summary rows.
pub mod csv_sink;

pub use csv_sink::CsvResultSink;

use std::path::PathBuf;

use crate::errors::ScanResult;
use crate::types::WalletAnalysis;

pub const TABLE_HEADERS: [&str; 8] = [
    "wallet_address",
    "total_tokens_created",
    "most_recent_token",
    "most_recent_token_symbol",
    "recent_token_volume",
    "highest_volume_token",
    "highest_volume_amount",
    "all_tokens_summary",
];

pub trait ResultSink: Send {
    /// Create missing tables with their header; existing data is left alone
    fn initialize(&mut self) -> ScanResult<()>;

    /// Append one row to the table matching the classification
    fn append(&mut self, analysis: &WalletAnalysis) -> ScanResult<()>;

    /// Rewrite each non-empty table with summary rows ahead of the data
    fn finalize(&mut self) -> ScanResult<FinalizeReport>;
}

/// Data-row statistics for one table
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub path: PathBuf,
    pub wallets: usize,
    pub total_tokens: u64,
}

impl TableSummary {
    pub fn average_tokens(&self) -> f64 {
        if self.wallets == 0 {
            0.0
        } else {
            self.total_tokens as f64 / self.wallets as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinalizeReport {
    pub high: TableSummary,
    pub low: TableSummary,
}
