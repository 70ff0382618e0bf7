/// Error types for creatorscan
///
/// `ApiError` stays inside the provider layer: discovery and volume resolution
/// reduce it to "no result" / zero. `ScanError` is what can reach the driver
/// and the binary entry point.
use std::path::{Path, PathBuf};

use thiserror::Error;

// =============================================================================
// PROVIDER ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    NetworkError(String),
    RateLimitExceeded,
    HttpStatus(u16),
    InvalidResponse(String),
    Timeout,
    Disabled,
}

impl ApiError {
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, ApiError::RateLimitExceeded)
    }

    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ApiError::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            ApiError::HttpStatus(status) => write!(f, "HTTP status {}", status),
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ApiError::Timeout => write!(f, "Request timeout"),
            ApiError::Disabled => write!(f, "API disabled"),
        }
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// RUN ERRORS
// =============================================================================

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("No wallet addresses found in {}", .0.display())]
    EmptyInput(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ScanError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ScanError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        ScanError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
