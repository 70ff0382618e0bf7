/// Configuration schemas - every config structure defined once with defaults
use crate::config_struct;
use serde::{Deserialize, Serialize};

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration, passed explicitly into each component
    pub struct Config {
        paths: PathsConfig = PathsConfig::default(),
        pipeline: PipelineConfig = PipelineConfig::default(),
        helius: HeliusConfig = HeliusConfig::default(),
        birdeye: BirdeyeConfig = BirdeyeConfig::default(),
        dexscreener: DexScreenerConfig = DexScreenerConfig::default(),
    }
}

// ============================================================================
// FILE LOCATIONS
// ============================================================================

config_struct! {
    /// Input, checkpoint and output files (relative paths resolve against the working directory)
    pub struct PathsConfig {
        input_file: String = "wallets.txt".to_string(),
        processed_log: String = "processed_wallets.log".to_string(),
        failed_log: String = "failed_wallets.log".to_string(),
        high_volume_csv: String = "wallets_with_highest_recent_volume.csv".to_string(),
        low_volume_csv: String = "wallets_without_highest_recent_volume.csv".to_string(),
        summary_file: String = "summary_report.txt".to_string(),
        logs_dir: String = "logs".to_string(),
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Which volume figure the resolver prefers and which providers it walks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeCascade {
    /// Overview (all-time extension volume first) -> trade data -> pairs fallback
    AllTime,
    /// Overview 24h volume -> pairs fallback
    Daily,
}

impl Default for VolumeCascade {
    fn default() -> Self {
        VolumeCascade::AllTime
    }
}

impl std::fmt::Display for VolumeCascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolumeCascade::AllTime => write!(f, "all_time"),
            VolumeCascade::Daily => write!(f, "daily"),
        }
    }
}

config_struct! {
    /// Batch pipeline tuning
    pub struct PipelineConfig {
        /// Pause between wallets
        wallet_delay_ms: u64 = 150,
        /// In-flight volume lookups per wallet
        max_workers: usize = 12,
        /// Attempts per discovery call, first attempt included
        max_retries: u32 = 3,
        request_timeout_secs: u64 = 12,
        /// Most recent tokens that get volume-resolved per wallet
        analyzed_token_cap: usize = 10,
        top_summary_count: usize = 5,
        discovery_page_limit: u32 = 1000,
        /// First 429 backoff, doubled per attempt
        rate_limit_backoff_base_ms: u64 = 2000,
        /// Delay between attempts after non-429 failures
        transient_backoff_ms: u64 = 1000,
        volume_cascade: VolumeCascade = VolumeCascade::AllTime,
    }
}

// ============================================================================
// PROVIDERS
// ============================================================================

config_struct! {
    /// Helius DAS API (token discovery primary)
    pub struct HeliusConfig {
        api_key: String = String::new(),
        rpc_url: String = "https://mainnet.helius-rpc.com".to_string(),
        /// 0 = unlimited
        rate_limit_per_minute: usize = 0,
    }
}

config_struct! {
    /// Birdeye public API (volume primary)
    pub struct BirdeyeConfig {
        api_key: String = String::new(),
        base_url: String = "https://public-api.birdeye.so".to_string(),
        chain: String = "solana".to_string(),
        rate_limit_per_minute: usize = 0,
    }
}

config_struct! {
    /// DexScreener public API (discovery + volume fallback)
    pub struct DexScreenerConfig {
        base_url: String = "https://api.dexscreener.com".to_string(),
        rate_limit_per_minute: usize = 300,
    }
}
