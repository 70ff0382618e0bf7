/// CSV implementation of [`ResultSink`]
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use super::{FinalizeReport, ResultSink, TableSummary, TABLE_HEADERS};
use crate::errors::{ScanError, ScanResult};
use crate::logger::{self, LogTag};
use crate::types::{Classification, WalletAnalysis};

const SUMMARY_PREFIX: &str = "SUMMARY:";
const SEPARATOR_CELL: &str = "---";

pub struct CsvResultSink {
    high_path: PathBuf,
    low_path: PathBuf,
}

impl CsvResultSink {
    pub fn new(high_path: impl Into<PathBuf>, low_path: impl Into<PathBuf>) -> Self {
        Self {
            high_path: high_path.into(),
            low_path: low_path.into(),
        }
    }

    pub fn high_path(&self) -> &Path {
        &self.high_path
    }

    pub fn low_path(&self) -> &Path {
        &self.low_path
    }

    fn path_for(&self, classification: Classification) -> &Path {
        match classification {
            Classification::High => &self.high_path,
            Classification::Low => &self.low_path,
        }
    }
}

impl ResultSink for CsvResultSink {
    fn initialize(&mut self) -> ScanResult<()> {
        for path in [&self.high_path, &self.low_path] {
            let has_content = std::fs::metadata(path)
                .map(|meta| meta.len() > 0)
                .unwrap_or(false);
            if has_content {
                continue;
            }

            let mut writer = WriterBuilder::new()
                .from_path(path)
                .map_err(|e| ScanError::csv(path, e))?;
            writer
                .write_record(TABLE_HEADERS)
                .map_err(|e| ScanError::csv(path, e))?;
            writer.flush().map_err(|e| ScanError::io(path, e))?;

            logger::debug(
                LogTag::Output,
                &format!("Created table {}", path.display()),
            );
        }
        Ok(())
    }

    fn append(&mut self, analysis: &WalletAnalysis) -> ScanResult<()> {
        let path = self.path_for(analysis.classification);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ScanError::io(path, e))?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer
            .write_record(analysis_row(analysis))
            .map_err(|e| ScanError::csv(path, e))?;
        writer.flush().map_err(|e| ScanError::io(path, e))?;
        Ok(())
    }

    fn finalize(&mut self) -> ScanResult<FinalizeReport> {
        let high = finalize_table(&self.high_path)?;
        let low = finalize_table(&self.low_path)?;
        Ok(FinalizeReport { high, low })
    }
}

pub fn analysis_row(analysis: &WalletAnalysis) -> Vec<String> {
    vec![
        analysis.wallet_address.clone(),
        analysis.total_tokens_created.to_string(),
        analysis.most_recent_token.clone(),
        analysis.most_recent_token_symbol.clone(),
        format!("{:.2}", analysis.most_recent_token_volume),
        analysis.highest_volume_token.clone(),
        format!("{:.2}", analysis.highest_volume_amount),
        analysis.top5_summary.clone(),
    ]
}

fn is_summary_row(record: &StringRecord) -> bool {
    let first = record.get(0).unwrap_or("");
    let separator = !record.is_empty() && record.iter().all(|cell| cell == SEPARATOR_CELL);
    first.starts_with(SUMMARY_PREFIX) || separator
}

fn summary_rows(table: &TableSummary) -> [Vec<String>; 2] {
    let mut summary = vec![String::new(); TABLE_HEADERS.len()];
    summary[0] = format!("{} {} wallets", SUMMARY_PREFIX, table.wallets);
    summary[1] = format!("{} total tokens", table.total_tokens);
    summary[2] = format!("Avg: {:.1} tokens/wallet", table.average_tokens());

    let separator = vec![SEPARATOR_CELL.to_string(); TABLE_HEADERS.len()];
    [summary, separator]
}

/// Strip old summary rows, recount, rewrite through a temp file
fn finalize_table(path: &Path) -> ScanResult<TableSummary> {
    let mut summary = TableSummary {
        path: path.to_path_buf(),
        wallets: 0,
        total_tokens: 0,
    };

    if !path.exists() {
        return Ok(summary);
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| ScanError::csv(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| ScanError::csv(path, e))?
        .clone();

    let mut rows: Vec<StringRecord> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ScanError::csv(path, e))?;
        if !is_summary_row(&record) {
            rows.push(record);
        }
    }

    if rows.is_empty() {
        logger::debug(
            LogTag::Output,
            &format!("{} has no data rows, left unchanged", path.display()),
        );
        return Ok(summary);
    }

    summary.wallets = rows.len();
    summary.total_tokens = rows
        .iter()
        .filter_map(|r| r.get(1))
        .filter_map(|cell| cell.trim().parse::<u64>().ok())
        .sum();

    let temp_path = temp_path_for(path);
    {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_path(&temp_path)
            .map_err(|e| ScanError::csv(&temp_path, e))?;
        writer
            .write_record(&headers)
            .map_err(|e| ScanError::csv(&temp_path, e))?;
        for row in summary_rows(&summary) {
            writer
                .write_record(&row)
                .map_err(|e| ScanError::csv(&temp_path, e))?;
        }
        for row in &rows {
            writer
                .write_record(row)
                .map_err(|e| ScanError::csv(&temp_path, e))?;
        }
        writer.flush().map_err(|e| ScanError::io(&temp_path, e))?;
    }
    std::fs::rename(&temp_path, path).map_err(|e| ScanError::io(path, e))?;

    logger::info(
        LogTag::Output,
        &format!(
            "Summary added to {}: {} wallets, {} tokens",
            path.display(),
            summary.wallets,
            summary.total_tokens
        ),
    );
    Ok(summary)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
