/// External data providers
///
/// Each provider is an HTTP JSON client behind a narrow trait so discovery and
/// volume resolution can run against in-crate fakes in tests.
///
/// - `helius`: creator-indexed asset search (token discovery primary)
/// - `birdeye`: token overview and trade data (volume primary)
/// - `dexscreener`: pair search and pairs-by-token (discovery and volume fallback)
pub mod birdeye;
pub mod client;
pub mod deser;
pub mod dexscreener;
pub mod helius;

#[cfg(test)]
pub mod testing;

pub use birdeye::{BirdeyeClient, TokenOverview, TradeVolume};
pub use client::{HttpClient, RateLimitGuard, RateLimiter};
pub use dexscreener::{DexScreenerClient, PairSummary};
pub use helius::HeliusClient;

use async_trait::async_trait;

use crate::errors::ApiError;
use crate::types::TokenRecord;

/// Lists fungible tokens created by a wallet
#[async_trait]
pub trait AssetSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fungible assets only, with `volume` left at 0
    async fn assets_by_creator(&self, creator: &str) -> Result<Vec<TokenRecord>, ApiError>;
}

/// Per-token market statistics
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn token_overview(&self, address: &str) -> Result<TokenOverview, ApiError>;

    async fn trade_data(&self, address: &str) -> Result<TradeVolume, ApiError>;
}

/// Market-pairs index
#[async_trait]
pub trait PairsSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Free-text pair search
    async fn search_pairs(&self, query: &str) -> Result<Vec<PairSummary>, ApiError>;

    /// Every pair whose base or quote is `address`
    async fn token_pairs(&self, address: &str) -> Result<Vec<PairSummary>, ApiError>;
}
