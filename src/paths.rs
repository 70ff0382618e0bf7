//! Centralized path resolution for creatorscan
//!
//! Every file the run reads or writes is resolved here from [`PathsConfig`].
//! Relative entries resolve against a base directory (the working directory
//! for the binary, a temp dir in tests); absolute entries are kept as-is.
//!
//! ```text
//! <base>/
//! ├── wallets.txt
//! ├── processed_wallets.log
//! ├── failed_wallets.log
//! ├── wallets_with_highest_recent_volume.csv
//! ├── wallets_without_highest_recent_volume.csv
//! ├── summary_report.txt
//! └── logs/
//!     └── creatorscan_*.log
//! ```

use std::path::{Path, PathBuf};

use crate::config::PathsConfig;
use crate::errors::{ScanError, ScanResult};

/// Resolved locations for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunPaths {
    pub input_file: PathBuf,
    pub processed_log: PathBuf,
    pub failed_log: PathBuf,
    pub high_volume_csv: PathBuf,
    pub low_volume_csv: PathBuf,
    pub summary_file: PathBuf,
    pub logs_dir: PathBuf,
}

impl RunPaths {
    pub fn resolve(config: &PathsConfig, base: &Path) -> Self {
        let join = |value: &str| resolve_path(base, value);
        Self {
            input_file: join(&config.input_file),
            processed_log: join(&config.processed_log),
            failed_log: join(&config.failed_log),
            high_volume_csv: join(&config.high_volume_csv),
            low_volume_csv: join(&config.low_volume_csv),
            summary_file: join(&config.summary_file),
            logs_dir: join(&config.logs_dir),
        }
    }

    /// Resolve against the current working directory
    pub fn from_working_dir(config: &PathsConfig) -> ScanResult<Self> {
        let cwd = std::env::current_dir().map_err(|e| ScanError::io(Path::new("."), e))?;
        Ok(Self::resolve(config, &cwd))
    }

    /// Replace the input file (for --input)
    pub fn with_input(mut self, input: PathBuf) -> Self {
        self.input_file = input;
        self
    }

    /// Create parent directories for every output so the first write cannot fail on them
    pub fn ensure_output_directories(&self) -> ScanResult<()> {
        for path in [
            &self.processed_log,
            &self.failed_log,
            &self.high_volume_csv,
            &self.low_volume_csv,
            &self.summary_file,
        ] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| ScanError::io(parent, e))?;
            }
        }
        std::fs::create_dir_all(&self.logs_dir).map_err(|e| ScanError::io(&self.logs_dir, e))?;
        Ok(())
    }
}

fn resolve_path(base: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_join_base() {
        let paths = RunPaths::resolve(&PathsConfig::default(), Path::new("/data/run"));
        assert_eq!(paths.input_file, PathBuf::from("/data/run/wallets.txt"));
        assert_eq!(paths.logs_dir, PathBuf::from("/data/run/logs"));
    }

    #[test]
    fn test_absolute_paths_kept() {
        let config = PathsConfig {
            summary_file: "/tmp/report.txt".to_string(),
            ..Default::default()
        };
        let paths = RunPaths::resolve(&config, Path::new("/data/run"));
        assert_eq!(paths.summary_file, PathBuf::from("/tmp/report.txt"));
    }

    #[test]
    fn test_ensure_output_directories_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let config = PathsConfig {
            high_volume_csv: "out/high.csv".to_string(),
            ..Default::default()
        };
        let paths = RunPaths::resolve(&config, dir.path());
        paths.ensure_output_directories().unwrap();

        assert!(dir.path().join("out").is_dir());
        assert!(dir.path().join("logs").is_dir());
    }
}
