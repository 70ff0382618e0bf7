/// Helius DAS API client
///
/// API Documentation: https://docs.helius.dev/compression-and-das-api/digital-asset-standard-das-api
///
/// Endpoints implemented:
/// 1. getAssetsByCreator (JSON-RPC) - assets whose creator list contains a wallet
pub mod types;

pub use self::types::{AssetList, AssetsByCreatorParams, DasAsset, RpcRequest, RpcResponse};

use async_trait::async_trait;

use crate::apis::client::{HttpClient, RateLimiter};
use crate::apis::AssetSource;
use crate::config::HeliusConfig;
use crate::errors::ApiError;
use crate::logger::{self, LogTag};
use crate::types::TokenRecord;

const RPC_ID: &str = "creatorscan";

pub struct HeliusClient {
    http_client: HttpClient,
    rate_limiter: RateLimiter,
    rpc_url: String,
    api_key: String,
    page_limit: u32,
    enabled: bool,
}

impl HeliusClient {
    pub fn new(
        config: &HeliusConfig,
        timeout_secs: u64,
        max_concurrent: usize,
        page_limit: u32,
    ) -> Result<Self, ApiError> {
        let api_key = config.api_key.trim().to_string();
        Ok(Self {
            http_client: HttpClient::new(timeout_secs)?,
            rate_limiter: RateLimiter::new(config.rate_limit_per_minute, max_concurrent),
            rpc_url: config.rpc_url.trim_end_matches('/').to_string(),
            enabled: !api_key.is_empty(),
            api_key,
            page_limit,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// First page of assets created by `creator`, unfiltered
    pub async fn get_assets_by_creator(&self, creator: &str) -> Result<AssetList, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        let request = RpcRequest {
            jsonrpc: "2.0",
            id: RPC_ID,
            method: "getAssetsByCreator",
            params: AssetsByCreatorParams {
                creator_address: creator.to_string(),
                only_verified: false,
                page: 1,
                limit: self.page_limit,
            },
        };

        let builder = self
            .http_client
            .client()
            .post(format!("{}/", self.rpc_url))
            .query(&[("api-key", self.api_key.as_str())])
            .json(&request);

        let response: RpcResponse<AssetList> = self
            .http_client
            .send_json("HELIUS", "getAssetsByCreator", builder, &self.rate_limiter)
            .await?;

        if let Some(error) = response.error {
            return Err(ApiError::InvalidResponse(format!(
                "RPC error {}: {}",
                error.code, error.message
            )));
        }

        Ok(response.result.unwrap_or(AssetList {
            total: None,
            items: Vec::new(),
        }))
    }
}

#[async_trait]
impl AssetSource for HeliusClient {
    fn name(&self) -> &'static str {
        "Helius"
    }

    async fn assets_by_creator(&self, creator: &str) -> Result<Vec<TokenRecord>, ApiError> {
        let assets = self.get_assets_by_creator(creator).await?;
        let total = assets.items.len();

        let tokens: Vec<TokenRecord> = assets
            .items
            .iter()
            .filter(|asset| asset.is_fungible())
            .map(|asset| asset.to_token_record())
            .collect();

        logger::debug(
            LogTag::Api,
            &format!(
                "[HELIUS] {} assets for creator {}, {} fungible",
                total,
                creator,
                tokens.len()
            ),
        );

        Ok(tokens)
    }
}
