/// Birdeye API response types
use serde::Deserialize;

use crate::apis::deser::lenient_f64;

/// Birdeye wraps every payload in `{ success, data }`
#[derive(Debug, Clone, Deserialize)]
pub struct BirdeyeEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
}

/// Volume fields of `/defi/token_overview`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenOverview {
    #[serde(rename = "trade24hUSD", default, deserialize_with = "lenient_f64")]
    pub trade_24h_usd: Option<f64>,
    #[serde(rename = "v24hUSD", default, deserialize_with = "lenient_f64")]
    pub v24h_usd: Option<f64>,
    #[serde(default)]
    pub extensions: Option<OverviewExtensions>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OverviewExtensions {
    #[serde(rename = "totalVolume", default, deserialize_with = "lenient_f64")]
    pub total_volume: Option<f64>,
}

impl TokenOverview {
    pub fn total_volume(&self) -> Option<f64> {
        self.extensions.as_ref().and_then(|e| e.total_volume)
    }
}

/// Volume fields of `/defi/v3/token/trade-data/single`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TradeVolume {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub buy_volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sell_volume: Option<f64>,
}

impl TradeVolume {
    /// buy + sell; `None` when neither side is reported
    pub fn total(&self) -> Option<f64> {
        match (self.buy_volume, self.sell_volume) {
            (None, None) => None,
            (buy, sell) => Some(buy.unwrap_or(0.0) + sell.unwrap_or(0.0)),
        }
    }
}
