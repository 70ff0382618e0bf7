/// Bounded concurrent volume lookups for one wallet's tokens
///
/// Wave 1 runs the primary provider for every distinct address. Wave 2 runs the
/// pairs fallback only for addresses still at zero. Both waves keep at most
/// `max_workers` lookups in flight and the result map does not depend on
/// completion order.
use std::collections::{HashMap, HashSet};

use futures::stream::{self, StreamExt};

use super::{prefer_positive, VolumeResolver};
use crate::logger::{self, LogTag};
use crate::types::{TokenRecord, VolumeLookup};

pub async fn fetch_volumes(
    resolver: &VolumeResolver,
    tokens: &[TokenRecord],
    max_workers: usize,
) -> HashMap<String, f64> {
    let workers = max_workers.max(1);

    let mut seen: HashSet<&str> = HashSet::new();
    let addresses: Vec<String> = tokens
        .iter()
        .map(|t| t.address.as_str())
        .filter(|a| !a.trim().is_empty() && seen.insert(*a))
        .map(str::to_string)
        .collect();

    if addresses.is_empty() {
        return HashMap::new();
    }

    let mut lookups: HashMap<String, VolumeLookup> = stream::iter(addresses.into_iter().map(
        |address| async move {
            let lookup = resolver.resolve_primary(&address).await;
            (address, lookup)
        },
    ))
    .buffer_unordered(workers)
    .collect()
    .await;

    let pending: Vec<String> = lookups
        .iter()
        .filter(|(_, lookup)| lookup.is_zero_or_unknown())
        .map(|(address, _)| address.clone())
        .collect();

    logger::debug(
        LogTag::Volume,
        &format!(
            "Primary wave resolved {}/{} tokens, {} go to fallback",
            lookups.len() - pending.len(),
            lookups.len(),
            pending.len()
        ),
    );

    if !pending.is_empty() {
        let fallbacks: Vec<(String, VolumeLookup)> = stream::iter(pending.into_iter().map(
            |address| async move {
                let lookup = resolver.resolve_fallback(&address).await;
                (address, lookup)
            },
        ))
        .buffer_unordered(workers)
        .collect()
        .await;

        for (address, fallback) in fallbacks {
            if let Some(primary) = lookups.get_mut(&address) {
                *primary = prefer_positive(*primary, fallback);
            }
        }
    }

    lookups
        .into_iter()
        .map(|(address, lookup)| (address, lookup.value()))
        .collect()
}
