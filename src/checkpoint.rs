/// Durable record of handled wallets
///
/// Two append-only text files:
/// - processed log: one wallet address per line
/// - failure log: `address|reason|YYYY-mm-dd HH:MM:SS`
///
/// Every append is flushed before returning so a crash after `mark_done`
/// never re-processes that wallet.
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::errors::{ScanError, ScanResult};
use crate::logger::{self, LogTag};

pub struct CheckpointStore {
    processed_log: PathBuf,
    failed_log: PathBuf,
}

impl CheckpointStore {
    pub fn new(processed_log: impl Into<PathBuf>, failed_log: impl Into<PathBuf>) -> Self {
        Self {
            processed_log: processed_log.into(),
            failed_log: failed_log.into(),
        }
    }

    /// Wallets handled by earlier runs; a missing log is an empty set
    pub fn load(&self) -> ScanResult<HashSet<String>> {
        let contents = match std::fs::read_to_string(&self.processed_log) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                logger::debug(
                    LogTag::Checkpoint,
                    &format!(
                        "No checkpoint log at {}, starting fresh",
                        self.processed_log.display()
                    ),
                );
                return Ok(HashSet::new());
            }
            Err(e) => return Err(ScanError::io(&self.processed_log, e)),
        };

        let processed: HashSet<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        logger::info(
            LogTag::Checkpoint,
            &format!("Loaded {} processed wallets", processed.len()),
        );
        Ok(processed)
    }

    pub fn mark_done(&self, address: &str) -> ScanResult<()> {
        append_line(&self.processed_log, address)
    }

    pub fn mark_failed(&self, address: &str, reason: &str) -> ScanResult<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        append_line(&self.failed_log, &format_failure(address, reason, &timestamp))
    }

    pub fn processed_log(&self) -> &Path {
        &self.processed_log
    }

    pub fn failed_log(&self) -> &Path {
        &self.failed_log
    }
}

fn format_failure(address: &str, reason: &str, timestamp: &str) -> String {
    // '|' separates fields and a newline would split the record
    let reason = reason.replace(['|', '\n', '\r'], " ");
    format!("{}|{}|{}", address, reason, timestamp)
}

fn append_line(path: &Path, line: &str) -> ScanResult<()> {
    let mut file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ScanError::io(path, e))?;

    writeln!(file, "{}", line).map_err(|e| ScanError::io(path, e))?;
    file.flush().map_err(|e| ScanError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> CheckpointStore {
        CheckpointStore::new(dir.join("processed.log"), dir.join("failed.log"))
    }

    #[test]
    fn test_missing_log_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store(dir.path()).load().unwrap().is_empty());
    }

    #[test]
    fn test_mark_done_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let first = store(dir.path());
        first.mark_done("W1").unwrap();
        first.mark_done("W2").unwrap();

        std::fs::OpenOptions::new()
            .append(true)
            .open(dir.path().join("processed.log"))
            .unwrap()
            .write_all(b"\n  \n")
            .unwrap();

        let loaded = store(dir.path()).load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.contains("W1") && loaded.contains("W2"));
    }

    #[test]
    fn test_failure_line_format() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        store.mark_failed("W9", "No tokens found").unwrap();

        let contents = std::fs::read_to_string(store.failed_log()).unwrap();
        let fields: Vec<&str> = contents.trim_end().split('|').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], "W9");
        assert_eq!(fields[1], "No tokens found");
        assert!(chrono::NaiveDateTime::parse_from_str(fields[2], "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_reason_separators_replaced() {
        assert_eq!(format_failure("W", "a|b\nc", "t"), "W|a b c|t");
    }

    #[test]
    fn test_unreadable_log_is_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the log file should be
        let store = CheckpointStore::new(dir.path(), dir.path().join("failed.log"));
        assert!(matches!(store.load(), Err(ScanError::Io { .. })));
    }
}
