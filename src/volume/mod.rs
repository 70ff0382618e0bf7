/// Volume resolution - token address -> trading volume
///
/// Primary: market-data overview, then (all-time cascade only) trade data.
/// Fallback: summed 24h volume across the token's pairs, consulted only when
/// the primary result is zero or unknown. Provider errors never escape; they
/// reduce to `VolumeLookup::Unknown`, which persists as 0.0.
pub mod fanout;

pub use fanout::fetch_volumes;

use std::sync::Arc;

use crate::apis::{MarketDataSource, PairsSource, TokenOverview};
use crate::config::VolumeCascade;
use crate::logger::{self, LogTag};
use crate::types::VolumeLookup;

pub struct VolumeResolver {
    market: Arc<dyn MarketDataSource>,
    pairs: Arc<dyn PairsSource>,
    cascade: VolumeCascade,
}

impl VolumeResolver {
    pub fn new(
        market: Arc<dyn MarketDataSource>,
        pairs: Arc<dyn PairsSource>,
        cascade: VolumeCascade,
    ) -> Self {
        Self {
            market,
            pairs,
            cascade,
        }
    }

    /// Full cascade for one token, flattened to the persisted figure
    pub async fn resolve(&self, address: &str) -> f64 {
        self.resolve_lookup(address).await.value()
    }

    pub async fn resolve_lookup(&self, address: &str) -> VolumeLookup {
        let primary = self.resolve_primary(address).await;
        if !primary.is_zero_or_unknown() {
            return primary;
        }
        prefer_positive(primary, self.resolve_fallback(address).await)
    }

    /// Market-data provider steps only
    pub async fn resolve_primary(&self, address: &str) -> VolumeLookup {
        match self.market.token_overview(address).await {
            Ok(overview) => {
                let lookup = VolumeLookup::from_figure(overview_volume(&overview, self.cascade));
                if lookup.is_resolved() {
                    return lookup;
                }
                logger::verbose(
                    LogTag::Volume,
                    &format!("{} overview for {} has no volume fields", self.market.name(), address),
                );
            }
            Err(e) => {
                logger::verbose(
                    LogTag::Volume,
                    &format!("{} overview failed for {}: {}", self.market.name(), address, e),
                );
            }
        }

        if self.cascade != VolumeCascade::AllTime {
            return VolumeLookup::Unknown;
        }

        match self.market.trade_data(address).await {
            Ok(trade) => VolumeLookup::from_figure(trade.total()),
            Err(e) => {
                logger::verbose(
                    LogTag::Volume,
                    &format!("{} trade data failed for {}: {}", self.market.name(), address, e),
                );
                VolumeLookup::Unknown
            }
        }
    }

    /// Pairs provider: sum of 24h volume over every pair of the token
    pub async fn resolve_fallback(&self, address: &str) -> VolumeLookup {
        match self.pairs.token_pairs(address).await {
            Ok(pairs) => {
                let reported: Vec<f64> = pairs
                    .iter()
                    .filter_map(|p| p.volume_h24)
                    .filter(|v| *v > 0.0)
                    .collect();
                if pairs.is_empty() {
                    VolumeLookup::Unknown
                } else {
                    VolumeLookup::Resolved(reported.iter().sum())
                }
            }
            Err(e) => {
                logger::verbose(
                    LogTag::Volume,
                    &format!("{} pairs failed for {}: {}", self.pairs.name(), address, e),
                );
                VolumeLookup::Unknown
            }
        }
    }
}

/// A positive fallback figure replaces the primary one
pub fn prefer_positive(primary: VolumeLookup, fallback: VolumeLookup) -> VolumeLookup {
    if fallback.value() > 0.0 {
        fallback
    } else {
        primary
    }
}

/// Pick the overview figure by cascade priority
///
/// The first positive field wins. If every present field is zero the result is
/// `Some(0.0)`; `None` means no field was present at all.
pub fn overview_volume(overview: &TokenOverview, cascade: VolumeCascade) -> Option<f64> {
    let candidates: Vec<Option<f64>> = match cascade {
        VolumeCascade::AllTime => vec![
            overview.total_volume(),
            overview.trade_24h_usd,
            overview.v24h_usd,
        ],
        VolumeCascade::Daily => vec![overview.trade_24h_usd, overview.v24h_usd],
    };

    let present: Vec<f64> = candidates
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .collect();

    present
        .iter()
        .copied()
        .find(|v| *v > 0.0)
        .or_else(|| present.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::testing::{overview_with_total, FakeMarketData, FakePairs};

    fn overview(total: Option<f64>, trade: Option<f64>, v24h: Option<f64>) -> TokenOverview {
        TokenOverview {
            trade_24h_usd: trade,
            v24h_usd: v24h,
            extensions: total.map(|t| crate::apis::birdeye::OverviewExtensions {
                total_volume: Some(t),
            }),
        }
    }

    #[test]
    fn test_overview_priority_all_time() {
        let o = overview(Some(900.0), Some(50.0), Some(20.0));
        assert_eq!(overview_volume(&o, VolumeCascade::AllTime), Some(900.0));
        assert_eq!(overview_volume(&o, VolumeCascade::Daily), Some(50.0));

        let zero_total = overview(Some(0.0), None, Some(20.0));
        assert_eq!(overview_volume(&zero_total, VolumeCascade::AllTime), Some(20.0));

        let all_zero = overview(Some(0.0), Some(0.0), None);
        assert_eq!(overview_volume(&all_zero, VolumeCascade::AllTime), Some(0.0));

        assert_eq!(overview_volume(&TokenOverview::default(), VolumeCascade::AllTime), None);
    }

    #[tokio::test]
    async fn test_overview_hit_skips_other_providers() {
        let market = Arc::new(FakeMarketData::new().with_overview("A", overview_with_total(500.0)));
        let pairs = Arc::new(FakePairs::new().with_token_volume("A", 9999.0));
        let resolver = VolumeResolver::new(market.clone(), pairs.clone(), VolumeCascade::AllTime);

        assert_eq!(resolver.resolve("A").await, 500.0);
        assert_eq!(market.trade_calls(), 0);
        assert_eq!(pairs.token_pair_calls(), 0);
    }

    #[tokio::test]
    async fn test_trade_data_when_overview_missing() {
        let market = Arc::new(FakeMarketData::new().with_trade("A", 30.0, 12.5));
        let pairs = Arc::new(FakePairs::new());
        let resolver = VolumeResolver::new(market.clone(), pairs, VolumeCascade::AllTime);

        assert_eq!(resolver.resolve("A").await, 42.5);
        assert_eq!(market.trade_calls(), 1);
    }

    #[tokio::test]
    async fn test_daily_cascade_skips_trade_data() {
        let market = Arc::new(FakeMarketData::new().with_trade("A", 30.0, 12.5));
        let pairs = Arc::new(FakePairs::new().with_token_volume("A", 7.0));
        let resolver = VolumeResolver::new(market.clone(), pairs, VolumeCascade::Daily);

        assert_eq!(resolver.resolve("A").await, 7.0);
        assert_eq!(market.trade_calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_primary_replaced_by_positive_fallback() {
        let market = Arc::new(FakeMarketData::new().with_overview("A", overview_with_total(0.0)));
        let pairs = Arc::new(
            FakePairs::new()
                .with_token_volume("A", 100.0)
                .with_token_volume("A", 23.0),
        );
        let resolver = VolumeResolver::new(market, pairs, VolumeCascade::AllTime);

        assert_eq!(resolver.resolve_lookup("A").await, VolumeLookup::Resolved(123.0));
    }

    #[tokio::test]
    async fn test_all_providers_fail_gives_zero() {
        let market = Arc::new(FakeMarketData::failing());
        let pairs = Arc::new(FakePairs::failing());
        let resolver = VolumeResolver::new(market, pairs, VolumeCascade::AllTime);

        assert_eq!(resolver.resolve_lookup("A").await, VolumeLookup::Unknown);
        assert_eq!(resolver.resolve("A").await, 0.0);
    }
}
