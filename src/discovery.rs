/// Token discovery - wallet -> tokens it created
///
/// Primary source is the creator-indexed asset search. When it yields nothing
/// (empty, exhausted retries or disabled) the market-pairs search runs with the
/// wallet address as the query. Neither path ever surfaces an error: the
/// worst case is an empty list.
use std::collections::HashMap;
use std::sync::Arc;

use crate::apis::{AssetSource, PairSummary, PairsSource};
use crate::logger::{self, LogTag};
use crate::retry::{retry_api_call, RetryPolicies};
use crate::types::{TokenRecord, UNKNOWN_NAME, UNKNOWN_SYMBOL};

pub struct TokenDiscovery {
    assets: Arc<dyn AssetSource>,
    pairs: Arc<dyn PairsSource>,
    retry: RetryPolicies,
}

impl TokenDiscovery {
    pub fn new(
        assets: Arc<dyn AssetSource>,
        pairs: Arc<dyn PairsSource>,
        retry: RetryPolicies,
    ) -> Self {
        Self {
            assets,
            pairs,
            retry,
        }
    }

    pub async fn discover(&self, wallet: &str) -> Vec<TokenRecord> {
        let primary = self.discover_primary(wallet).await;
        if !primary.is_empty() {
            logger::debug(
                LogTag::Discovery,
                &format!(
                    "{} returned {} tokens for {}",
                    self.assets.name(),
                    primary.len(),
                    wallet
                ),
            );
            return primary;
        }

        let fallback = self.discover_fallback(wallet).await;
        if fallback.is_empty() {
            logger::debug(
                LogTag::Discovery,
                &format!("No tokens from any source for {}", wallet),
            );
        } else {
            logger::debug(
                LogTag::Discovery,
                &format!(
                    "{} fallback found {} tokens for {}",
                    self.pairs.name(),
                    fallback.len(),
                    wallet
                ),
            );
        }
        fallback
    }

    async fn discover_primary(&self, wallet: &str) -> Vec<TokenRecord> {
        let label = format!("{} assets_by_creator({})", self.assets.name(), wallet);
        retry_api_call(&self.retry, &label, || self.assets.assets_by_creator(wallet))
            .await
            .unwrap_or_default()
    }

    async fn discover_fallback(&self, wallet: &str) -> Vec<TokenRecord> {
        let label = format!("{} search_pairs({})", self.pairs.name(), wallet);
        let pairs = retry_api_call(&self.retry, &label, || self.pairs.search_pairs(wallet))
            .await
            .unwrap_or_default();
        tokens_from_pairs(pairs)
    }
}

/// Collapse pairs to one token per base address, in first-seen order
///
/// The first pair supplies symbol, name and creation time; every pair adds its
/// 24h volume to the token's provisional volume.
pub fn tokens_from_pairs(pairs: Vec<PairSummary>) -> Vec<TokenRecord> {
    let mut tokens: Vec<TokenRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for pair in pairs {
        let address = pair.base_token_address.trim();
        if address.is_empty() {
            continue;
        }
        let volume = pair.volume_h24.filter(|v| *v > 0.0).unwrap_or(0.0);

        if let Some(&position) = index.get(address) {
            tokens[position].volume += volume;
            continue;
        }

        index.insert(address.to_string(), tokens.len());
        tokens.push(TokenRecord {
            address: address.to_string(),
            symbol: pair
                .base_token_symbol
                .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string()),
            name: pair
                .base_token_name
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            created_at: pair.pair_created_at_ms.map(|ms| ms / 1000).unwrap_or(0),
            volume,
        });
    }

    tokens
}
