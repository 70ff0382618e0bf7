/// Wallet classification
///
/// A wallet is HIGH when its most recently created token is also its
/// highest-volume token. Only the `analyzed_token_cap` most recent tokens are
/// volume-resolved; `total_tokens_created` still counts every discovered token.
use std::cmp::Ordering;
use std::sync::Arc;

use crate::logger::{self, LogTag};
use crate::types::{Classification, NoDataReason, TokenRecord, WalletAnalysis, WalletOutcome};
use crate::volume::{fetch_volumes, VolumeResolver};

pub struct WalletClassifier {
    resolver: Arc<VolumeResolver>,
    max_workers: usize,
    analyzed_token_cap: usize,
    top_summary_count: usize,
}

impl WalletClassifier {
    pub fn new(
        resolver: Arc<VolumeResolver>,
        max_workers: usize,
        analyzed_token_cap: usize,
        top_summary_count: usize,
    ) -> Self {
        Self {
            resolver,
            max_workers,
            analyzed_token_cap,
            top_summary_count,
        }
    }

    pub async fn classify(&self, wallet: &str, tokens: Vec<TokenRecord>) -> WalletOutcome {
        if tokens.is_empty() {
            return WalletOutcome::NoData(NoDataReason::NoTokensFound);
        }

        let total = tokens.len();
        let mut analyzed = select_analyzed(tokens, self.analyzed_token_cap);
        if analyzed.is_empty() {
            return WalletOutcome::NoData(NoDataReason::NoAddressableTokens);
        }

        let volumes = fetch_volumes(&self.resolver, &analyzed, self.max_workers).await;
        for token in analyzed.iter_mut() {
            token.volume = volumes.get(&token.address).copied().unwrap_or(0.0);
        }

        logger::debug(
            LogTag::Pipeline,
            &format!(
                "{}: {} tokens discovered, {} analyzed",
                wallet,
                total,
                analyzed.len()
            ),
        );

        match build_analysis(wallet, total, &analyzed, self.top_summary_count) {
            Some(analysis) => WalletOutcome::Analyzed(analysis),
            None => WalletOutcome::NoData(NoDataReason::NoAddressableTokens),
        }
    }
}

/// Newest first; equal creation times order by descending address
pub fn sort_by_recency(tokens: &mut [TokenRecord]) {
    tokens.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.address.cmp(&a.address))
    });
}

/// Sort, cap, then drop entries without an address
pub fn select_analyzed(mut tokens: Vec<TokenRecord>, cap: usize) -> Vec<TokenRecord> {
    sort_by_recency(&mut tokens);
    tokens.truncate(cap);
    tokens.retain(TokenRecord::has_address);
    tokens
}

/// Classify tokens that already carry their volumes, in recency order
///
/// Returns `None` for an empty slice.
pub fn build_analysis(
    wallet: &str,
    total_tokens_created: usize,
    analyzed: &[TokenRecord],
    top_summary_count: usize,
) -> Option<WalletAnalysis> {
    let most_recent = analyzed.first()?;

    // Strict comparison keeps the earliest (most recent) token on ties
    let mut highest = most_recent;
    for token in analyzed.iter().skip(1) {
        if token.volume > highest.volume {
            highest = token;
        }
    }

    let classification = if most_recent.address == highest.address {
        Classification::High
    } else {
        Classification::Low
    };

    Some(WalletAnalysis {
        wallet_address: wallet.to_string(),
        total_tokens_created,
        most_recent_token: most_recent.address.clone(),
        most_recent_token_symbol: most_recent.symbol.clone(),
        most_recent_token_volume: most_recent.volume,
        highest_volume_token: highest.address.clone(),
        highest_volume_amount: highest.volume,
        top5_summary: top_summary(analyzed, top_summary_count),
        classification,
    })
}

/// `SYMBOL($1,234); SYMBOL($56)` for the highest-volume tokens
pub fn top_summary(analyzed: &[TokenRecord], count: usize) -> String {
    let mut ranked: Vec<&TokenRecord> = analyzed.iter().collect();
    // sort_by is stable: ties keep recency order
    ranked.sort_by(|a, b| b.volume.partial_cmp(&a.volume).unwrap_or(Ordering::Equal));

    ranked
        .into_iter()
        .take(count)
        .map(|t| format!("{}(${})", t.symbol, format_usd_whole(t.volume)))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Round to a whole number and group thousands with commas
pub fn format_usd_whole(value: f64) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
