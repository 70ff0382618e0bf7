/// Domain types shared by discovery, volume resolution and classification
use serde::{Deserialize, Serialize};

pub type WalletAddress = String;

pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";
pub const UNKNOWN_NAME: &str = "Unknown";

// ============================================================================
// TOKENS
// ============================================================================

/// A fungible token created by a wallet
///
/// `volume` stays 0.0 until the volume resolver fills it in. Tokens found by
/// the pairs-search fallback arrive with a provisional volume that the
/// resolver overwrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub address: String,
    pub symbol: String,
    pub name: String,
    /// Epoch seconds, 0 when unknown
    pub created_at: i64,
    pub volume: f64,
}

impl TokenRecord {
    pub fn new(address: impl Into<String>, symbol: impl Into<String>, created_at: i64) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            name: UNKNOWN_NAME.to_string(),
            created_at,
            volume: 0.0,
        }
    }

    pub fn has_address(&self) -> bool {
        !self.address.trim().is_empty()
    }
}

// ============================================================================
// VOLUMES
// ============================================================================

/// Outcome of a volume lookup before it is flattened for output
///
/// `Resolved(0.0)` is a provider that answered "zero"; `Unknown` is a provider
/// that could not answer at all. Both persist as 0.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeLookup {
    Resolved(f64),
    Unknown,
}

impl VolumeLookup {
    /// Build from a raw provider figure; negative or non-finite values are unusable
    pub fn from_figure(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() && v >= 0.0 => VolumeLookup::Resolved(v),
            _ => VolumeLookup::Unknown,
        }
    }

    /// Collapse to the persisted figure
    pub fn value(&self) -> f64 {
        match self {
            VolumeLookup::Resolved(v) => *v,
            VolumeLookup::Unknown => 0.0,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, VolumeLookup::Resolved(_))
    }

    /// True when a fallback provider should be consulted
    pub fn is_zero_or_unknown(&self) -> bool {
        self.value() <= 0.0
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Most recent token is also the highest-volume token
    High,
    Low,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::High => "HIGH",
            Classification::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One wallet's classification record, written once to the result sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletAnalysis {
    pub wallet_address: WalletAddress,
    /// Every discovered token, not only the analyzed subset
    pub total_tokens_created: usize,
    pub most_recent_token: String,
    pub most_recent_token_symbol: String,
    pub most_recent_token_volume: f64,
    pub highest_volume_token: String,
    pub highest_volume_amount: f64,
    pub top5_summary: String,
    pub classification: Classification,
}

/// Why a wallet produced no analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDataReason {
    /// Neither discovery source returned a token
    NoTokensFound,
    /// Tokens were discovered but none of the analyzed ones carries an address
    NoAddressableTokens,
}

impl NoDataReason {
    /// Text written to the failure log
    pub fn as_str(&self) -> &'static str {
        match self {
            NoDataReason::NoTokensFound => "No tokens found",
            NoDataReason::NoAddressableTokens => "No valid tokens",
        }
    }
}

impl std::fmt::Display for NoDataReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the driver sees for each wallet
#[derive(Debug, Clone, PartialEq)]
pub enum WalletOutcome {
    Analyzed(WalletAnalysis),
    NoData(NoDataReason),
}
