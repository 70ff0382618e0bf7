/// Birdeye public API client
///
/// API Documentation: https://docs.birdeye.so/
///
/// Endpoints implemented:
/// 1. /defi/token_overview - token statistics including 24h and total volume
/// 2. /defi/v3/token/trade-data/single - buy/sell volume breakdown
pub mod types;

pub use self::types::{BirdeyeEnvelope, OverviewExtensions, TokenOverview, TradeVolume};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::apis::client::{HttpClient, RateLimiter};
use crate::apis::MarketDataSource;
use crate::config::BirdeyeConfig;
use crate::errors::ApiError;

const ENDPOINT_TOKEN_OVERVIEW: &str = "defi/token_overview";
const ENDPOINT_TRADE_DATA: &str = "defi/v3/token/trade-data/single";

pub struct BirdeyeClient {
    http_client: HttpClient,
    rate_limiter: RateLimiter,
    base_url: String,
    api_key: String,
    chain: String,
    enabled: bool,
}

impl BirdeyeClient {
    pub fn new(
        config: &BirdeyeConfig,
        timeout_secs: u64,
        max_concurrent: usize,
    ) -> Result<Self, ApiError> {
        let api_key = config.api_key.trim().to_string();
        Ok(Self {
            http_client: HttpClient::new(timeout_secs)?,
            rate_limiter: RateLimiter::new(config.rate_limit_per_minute, max_concurrent),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            chain: config.chain.clone(),
            enabled: !api_key.is_empty(),
            api_key,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// GET `endpoint?address=..` and unwrap the `{ success, data }` envelope
    ///
    /// `success=false` or a missing `data` is an invalid response.
    async fn get_data<T>(&self, endpoint: &str, address: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        let builder = self
            .http_client
            .client()
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .header("x-chain", &self.chain)
            .query(&[("address", address)]);

        let envelope: BirdeyeEnvelope<T> = self
            .http_client
            .send_json("BIRDEYE", endpoint, builder, &self.rate_limiter)
            .await?;

        if !envelope.success {
            return Err(ApiError::InvalidResponse(format!(
                "{} reported success=false for {}",
                endpoint, address
            )));
        }

        envelope
            .data
            .ok_or_else(|| ApiError::InvalidResponse(format!("{} returned no data", endpoint)))
    }
}

#[async_trait]
impl MarketDataSource for BirdeyeClient {
    fn name(&self) -> &'static str {
        "Birdeye"
    }

    async fn token_overview(&self, address: &str) -> Result<TokenOverview, ApiError> {
        self.get_data(ENDPOINT_TOKEN_OVERVIEW, address).await
    }

    async fn trade_data(&self, address: &str) -> Result<TradeVolume, ApiError> {
        self.get_data(ENDPOINT_TRADE_DATA, address).await
    }
}
