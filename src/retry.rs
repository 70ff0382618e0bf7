//! Bounded retry policies for provider calls
//!
//! A policy only computes delays. `retry_api_call` runs the bounded attempt
//! loop and picks the policy from the error kind.

use std::future::Future;
use std::time::Duration;

use crate::config::PipelineConfig;
use crate::errors::ApiError;
use crate::logger::{self, LogTag};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Attempts in total, first attempt included
    pub max_attempts: u32,
    pub base_delay: Duration,
    /// 1.0 for a fixed delay, 2.0 for doubling
    pub multiplier: f64,
}

impl RetryPolicy {
    pub fn exponential(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            multiplier: 2.0,
        }
    }

    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay: delay,
            multiplier: 1.0,
        }
    }

    /// Delay after the failed attempt `attempt` (0-based): base * multiplier^attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.powi(attempt as i32);
        let millis = self.base_delay.as_millis() as f64 * factor;
        Duration::from_millis(millis.min(u64::MAX as f64) as u64)
    }

    /// Whether another attempt follows the failed attempt `attempt`
    pub fn has_next(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }
}

/// The two policies discovery runs with: one for 429s, one for everything else
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicies {
    pub rate_limited: RetryPolicy,
    pub transient: RetryPolicy,
}

impl RetryPolicies {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            rate_limited: RetryPolicy::exponential(
                config.max_retries,
                Duration::from_millis(config.rate_limit_backoff_base_ms),
            ),
            transient: RetryPolicy::fixed(
                config.max_retries,
                Duration::from_millis(config.transient_backoff_ms),
            ),
        }
    }

    /// Same attempt budget, no waiting
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            rate_limited: RetryPolicy::exponential(max_attempts, Duration::ZERO),
            transient: RetryPolicy::fixed(max_attempts, Duration::ZERO),
        }
    }
}

/// Run `operation` until it succeeds or the matching policy runs out of attempts
///
/// 429s back off on the `rate_limited` policy, every other error on `transient`.
/// `Disabled` is never retried. Exhaustion yields `None`.
pub async fn retry_api_call<T, F, Fut>(
    policies: &RetryPolicies,
    label: &str,
    mut operation: F,
) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt: u32 = 0;
    loop {
        let error = match operation().await {
            Ok(value) => return Some(value),
            Err(ApiError::Disabled) => return None,
            Err(error) => error,
        };

        let policy = if error.is_rate_limit() {
            &policies.rate_limited
        } else {
            &policies.transient
        };

        if !policy.has_next(attempt) {
            logger::warning(
                LogTag::Api,
                &format!(
                    "{} failed after {} attempts: {}",
                    label,
                    attempt + 1,
                    error
                ),
            );
            return None;
        }

        let delay = policy.delay_for(attempt);
        logger::debug(
            LogTag::Api,
            &format!(
                "{} attempt {} failed ({}), retrying in {}ms",
                label,
                attempt + 1,
                error,
                delay.as_millis()
            ),
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        attempt += 1;
    }
}
