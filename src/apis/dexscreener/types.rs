/// DexScreener API response types
use serde::Deserialize;

use crate::apis::deser::{lenient_f64, lenient_string, lenient_timestamp};

/// Shape shared by `/latest/dex/search` and `/latest/dex/tokens/{address}`
#[derive(Debug, Clone, Deserialize)]
pub struct PairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<DexScreenerPairRaw>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexScreenerPairRaw {
    #[serde(rename = "baseToken", default)]
    pub base_token: Option<PairToken>,
    #[serde(default)]
    pub volume: Option<PairVolume>,
    #[serde(rename = "pairCreatedAt", default, deserialize_with = "lenient_timestamp")]
    pub pair_created_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairToken {
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairVolume {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub h24: Option<f64>,
}

/// The pair fields discovery and volume resolution read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairSummary {
    pub base_token_address: String,
    pub base_token_symbol: Option<String>,
    pub base_token_name: Option<String>,
    /// Milliseconds since epoch, as DexScreener reports it
    pub pair_created_at_ms: Option<i64>,
    pub volume_h24: Option<f64>,
}

impl DexScreenerPairRaw {
    pub fn to_summary(self) -> PairSummary {
        let (address, symbol, name) = match self.base_token {
            Some(token) => (token.address.unwrap_or_default(), token.symbol, token.name),
            None => (String::new(), None, None),
        };

        PairSummary {
            base_token_address: address,
            base_token_symbol: symbol,
            base_token_name: name,
            pair_created_at_ms: self.pair_created_at,
            volume_h24: self.volume.and_then(|v| v.h24),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_to_summaries() {
        let body = json!({
            "schemaVersion": "1.0.0",
            "pairs": [
                {
                    "chainId": "solana",
                    "pairAddress": "Pair1",
                    "baseToken": {"address": "Mint111", "name": "Bonk", "symbol": "BONK"},
                    "volume": {"h24": 1234.5, "h6": 10},
                    "pairCreatedAt": 1700000000000i64
                },
                {"pairAddress": "Pair2", "volume": {"h24": null}}
            ]
        });

        let response: PairsResponse = serde_json::from_value(body).unwrap();
        let summaries: Vec<PairSummary> = response
            .pairs
            .unwrap()
            .into_iter()
            .map(|p| p.to_summary())
            .collect();

        assert_eq!(summaries[0].base_token_address, "Mint111");
        assert_eq!(summaries[0].base_token_symbol.as_deref(), Some("BONK"));
        assert_eq!(summaries[0].volume_h24, Some(1234.5));
        assert_eq!(summaries[0].pair_created_at_ms, Some(1_700_000_000_000));
        assert!(summaries[1].base_token_address.is_empty());
        assert_eq!(summaries[1].volume_h24, None);
    }

    #[test]
    fn test_null_base_token_fields_keep_other_pairs() {
        let body = json!({
            "pairs": [
                {"baseToken": {"address": "Mint111", "symbol": "BONK"}},
                {"baseToken": {"address": null, "symbol": 7, "name": null}},
                {"baseToken": null}
            ]
        });

        let response: PairsResponse = serde_json::from_value(body).unwrap();
        let summaries: Vec<PairSummary> = response
            .pairs
            .unwrap()
            .into_iter()
            .map(|p| p.to_summary())
            .collect();

        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].base_token_address, "Mint111");
        assert!(summaries[1].base_token_address.is_empty());
        assert_eq!(summaries[1].base_token_symbol, None);
        assert!(summaries[2].base_token_address.is_empty());
    }

    #[test]
    fn test_null_pairs() {
        let response: PairsResponse = serde_json::from_value(json!({"pairs": null})).unwrap();
        assert!(response.pairs.is_none());
    }
}
