/// DexScreener API client
///
/// API Documentation: https://docs.dexscreener.com/api/reference
///
/// Endpoints implemented:
/// 1. /latest/dex/search?q={query} - Search pairs (discovery fallback)
/// 2. /latest/dex/tokens/{tokenAddress} - All pairs for a token (volume fallback)
pub mod types;

pub use self::types::{DexScreenerPairRaw, PairSummary, PairToken, PairVolume, PairsResponse};

use async_trait::async_trait;

use crate::apis::client::{HttpClient, RateLimiter};
use crate::apis::PairsSource;
use crate::config::DexScreenerConfig;
use crate::errors::ApiError;
use crate::logger::{self, LogTag};

/// Complete DexScreener API client
pub struct DexScreenerClient {
    http_client: HttpClient,
    limiter_search: RateLimiter,
    limiter_token_pairs: RateLimiter,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(
        config: &DexScreenerConfig,
        timeout_secs: u64,
        max_concurrent: usize,
    ) -> Result<Self, ApiError> {
        if timeout_secs == 0 {
            return Err(ApiError::NetworkError(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            http_client: HttpClient::new(timeout_secs)?,
            limiter_search: RateLimiter::new(config.rate_limit_per_minute, 1),
            limiter_token_pairs: RateLimiter::new(config.rate_limit_per_minute, max_concurrent),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_pairs(
        &self,
        endpoint: &str,
        builder: reqwest::RequestBuilder,
        limiter: &RateLimiter,
    ) -> Result<Vec<PairSummary>, ApiError> {
        let response: PairsResponse = self
            .http_client
            .send_json("DEXSCREENER", endpoint, builder, limiter)
            .await?;

        Ok(response
            .pairs
            .unwrap_or_default()
            .into_iter()
            .map(|pair| pair.to_summary())
            .collect())
    }
}

#[async_trait]
impl PairsSource for DexScreenerClient {
    fn name(&self) -> &'static str {
        "DexScreener"
    }

    async fn search_pairs(&self, query: &str) -> Result<Vec<PairSummary>, ApiError> {
        if query.trim().is_empty() {
            return Err(ApiError::InvalidResponse("Query cannot be empty".to_string()));
        }

        let endpoint = "latest/dex/search";
        let url = format!("{}/{}", self.base_url, endpoint);

        logger::debug(
            LogTag::Api,
            &format!("[DEXSCREENER] Searching pairs: query={}", query),
        );
        let builder = self.http_client.client().get(&url).query(&[("q", query)]);

        self.get_pairs(endpoint, builder, &self.limiter_search).await
    }

    async fn token_pairs(&self, address: &str) -> Result<Vec<PairSummary>, ApiError> {
        let endpoint = format!("latest/dex/tokens/{}", address);
        let url = format!("{}/{}", self.base_url, endpoint);

        logger::debug(
            LogTag::Api,
            &format!("[DEXSCREENER] Fetching token pairs: token={}", address),
        );
        let builder = self.http_client.client().get(&url);

        self.get_pairs(&endpoint, builder, &self.limiter_token_pairs)
            .await
    }
}
