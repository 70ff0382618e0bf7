//! In-memory providers for tests
//!
//! Each fake answers from fixed tables, optionally preceded by a script of
//! queued results, and counts its calls.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{AssetSource, MarketDataSource, PairSummary, PairsSource, TokenOverview, TradeVolume};
use crate::errors::ApiError;
use crate::shutdown::ShutdownSignal;
use crate::types::TokenRecord;

pub fn token(address: &str, symbol: &str, created_at: i64) -> TokenRecord {
    TokenRecord::new(address, symbol, created_at)
}

pub fn pair(address: &str, symbol: &str, created_at_ms: i64, volume_h24: f64) -> PairSummary {
    PairSummary {
        base_token_address: address.to_string(),
        base_token_symbol: Some(symbol.to_string()),
        base_token_name: Some(format!("{} Token", symbol)),
        pair_created_at_ms: Some(created_at_ms),
        volume_h24: Some(volume_h24),
    }
}

pub fn overview_with_total(total: f64) -> TokenOverview {
    TokenOverview {
        trade_24h_usd: None,
        v24h_usd: None,
        extensions: Some(super::birdeye::OverviewExtensions {
            total_volume: Some(total),
        }),
    }
}

// ============================================================================
// ASSETS
// ============================================================================

#[derive(Default)]
pub struct FakeAssetSource {
    by_creator: HashMap<String, Vec<TokenRecord>>,
    script: Mutex<VecDeque<Result<Vec<TokenRecord>, ApiError>>>,
    interrupt: Option<(String, ShutdownSignal)>,
    calls: AtomicUsize,
}

impl FakeAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(mut self, creator: &str, tokens: Vec<TokenRecord>) -> Self {
        self.by_creator.insert(creator.to_string(), tokens);
        self
    }

    /// Queue a result returned before the table is consulted
    pub fn then(self, result: Result<Vec<TokenRecord>, ApiError>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(result);
        }
        self
    }

    /// Request shutdown when `creator` is queried, then never answer
    pub fn interrupt_on(mut self, creator: &str, signal: ShutdownSignal) -> Self {
        self.interrupt = Some((creator.to_string(), signal));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetSource for FakeAssetSource {
    fn name(&self) -> &'static str {
        "FakeAssets"
    }

    async fn assets_by_creator(&self, creator: &str) -> Result<Vec<TokenRecord>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((target, signal)) = &self.interrupt {
            if target == creator {
                signal.request();
                std::future::pending::<()>().await;
            }
        }
        let scripted = self.script.lock().unwrap().pop_front();
        if let Some(result) = scripted {
            return result;
        }
        Ok(self.by_creator.get(creator).cloned().unwrap_or_default())
    }
}

// ============================================================================
// MARKET DATA
// ============================================================================

#[derive(Default)]
pub struct FakeMarketData {
    overviews: HashMap<String, TokenOverview>,
    trades: HashMap<String, TradeVolume>,
    fail_all: bool,
    latency: Option<Duration>,
    overview_calls: AtomicUsize,
    trade_calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a 500
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn with_overview(mut self, address: &str, overview: TokenOverview) -> Self {
        self.overviews.insert(address.to_string(), overview);
        self
    }

    pub fn with_trade(mut self, address: &str, buy: f64, sell: f64) -> Self {
        self.trades.insert(
            address.to_string(),
            TradeVolume {
                buy_volume: Some(buy),
                sell_volume: Some(sell),
            },
        );
        self
    }

    /// Every overview call sleeps for `latency` before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Highest number of overview calls observed in flight at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn overview_calls(&self) -> usize {
        self.overview_calls.load(Ordering::SeqCst)
    }

    pub fn trade_calls(&self) -> usize {
        self.trade_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataSource for FakeMarketData {
    fn name(&self) -> &'static str {
        "FakeMarketData"
    }

    async fn token_overview(&self, address: &str) -> Result<TokenOverview, ApiError> {
        self.overview_calls.fetch_add(1, Ordering::SeqCst);

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_all {
            return Err(ApiError::HttpStatus(500));
        }
        self.overviews
            .get(address)
            .cloned()
            .ok_or_else(|| ApiError::InvalidResponse("no data".to_string()))
    }

    async fn trade_data(&self, address: &str) -> Result<TradeVolume, ApiError> {
        self.trade_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(ApiError::HttpStatus(500));
        }
        self.trades
            .get(address)
            .cloned()
            .ok_or_else(|| ApiError::InvalidResponse("no data".to_string()))
    }
}

// ============================================================================
// PAIRS
// ============================================================================

#[derive(Default)]
pub struct FakePairs {
    search: HashMap<String, Vec<PairSummary>>,
    token_pairs: HashMap<String, Vec<PairSummary>>,
    search_script: Mutex<VecDeque<Result<Vec<PairSummary>, ApiError>>>,
    fail_all: bool,
    search_calls: AtomicUsize,
    token_pair_calls: AtomicUsize,
}

impl FakePairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, query: &str, pairs: Vec<PairSummary>) -> Self {
        self.search.insert(query.to_string(), pairs);
        self
    }

    pub fn then_search(self, result: Result<Vec<PairSummary>, ApiError>) -> Self {
        if let Ok(mut script) = self.search_script.lock() {
            script.push_back(result);
        }
        self
    }

    /// One pair for `address` carrying `volume_h24`
    pub fn with_token_volume(mut self, address: &str, volume_h24: f64) -> Self {
        self.token_pairs
            .entry(address.to_string())
            .or_default()
            .push(pair(address, "PAIR", 0, volume_h24));
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn token_pair_calls(&self) -> usize {
        self.token_pair_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PairsSource for FakePairs {
    fn name(&self) -> &'static str {
        "FakePairs"
    }

    async fn search_pairs(&self, query: &str) -> Result<Vec<PairSummary>, ApiError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.search_script.lock().unwrap().pop_front();
        if let Some(result) = scripted {
            return result;
        }
        if self.fail_all {
            return Err(ApiError::Timeout);
        }
        Ok(self.search.get(query).cloned().unwrap_or_default())
    }

    async fn token_pairs(&self, address: &str) -> Result<Vec<PairSummary>, ApiError> {
        self.token_pair_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(ApiError::Timeout);
        }
        Ok(self.token_pairs.get(address).cloned().unwrap_or_default())
    }
}
