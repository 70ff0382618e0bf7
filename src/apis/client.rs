/// Base HTTP client with rate limiting
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};

use crate::errors::ApiError;
use crate::logger::{self, LogTag};

/// Rate limiter for API clients
///
/// Spaces request starts by `60 / max_per_minute` seconds and bounds the number
/// of requests in flight. `max_per_minute == 0` disables spacing.
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    last_request: Arc<Mutex<Option<Instant>>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(max_per_minute: usize, max_concurrent: usize) -> Self {
        let min_interval = if max_per_minute > 0 {
            Duration::from_secs_f64(60.0 / max_per_minute as f64)
        } else {
            Duration::ZERO
        };

        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            last_request: Arc::new(Mutex::new(None)),
            min_interval,
        }
    }

    /// Wait until we can make a request (respects rate limits)
    pub async fn acquire(&self) -> Result<RateLimitGuard, ApiError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ApiError::RateLimitExceeded)?;

        if !self.min_interval.is_zero() {
            // Reserve the next start slot under the lock, sleep outside it
            let wait = {
                let mut last = self.last_request.lock().await;
                let now = Instant::now();
                let slot = match *last {
                    Some(previous) if previous + self.min_interval > now => {
                        previous + self.min_interval
                    }
                    _ => now,
                };
                *last = Some(slot);
                slot.saturating_duration_since(now)
            };

            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
        }

        Ok(RateLimitGuard { _permit: permit })
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// RAII guard returned by [`RateLimiter::acquire`]
pub struct RateLimitGuard {
    _permit: OwnedSemaphorePermit,
}

/// HTTP client wrapper with timeout and status mapping
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Send under the limiter and decode a JSON body
    ///
    /// 429 maps to `RateLimitExceeded`, any other non-success status to
    /// `HttpStatus`, decode failures to `InvalidResponse`.
    pub async fn send_json<T>(
        &self,
        provider: &str,
        endpoint: &str,
        builder: RequestBuilder,
        limiter: &RateLimiter,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let guard = limiter.acquire().await?;

        let start = Instant::now();
        let response_result = builder.timeout(self.timeout).send().await;
        drop(guard);
        let elapsed = start.elapsed().as_millis();

        let response = response_result.map_err(|err| {
            let mapped = ApiError::from_reqwest(err);
            logger::debug(
                LogTag::Api,
                &format!("[{}] {} failed after {}ms: {}", provider, endpoint, elapsed, mapped),
            );
            mapped
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            logger::debug(
                LogTag::Api,
                &format!("[{}] {} rate limited (429)", provider, endpoint),
            );
            return Err(ApiError::RateLimitExceeded);
        }
        if !status.is_success() {
            logger::debug(
                LogTag::Api,
                &format!("[{}] {} returned HTTP {}", provider, endpoint, status),
            );
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        let value = response.json::<T>().await.map_err(ApiError::from_reqwest)?;

        logger::verbose(
            LogTag::Api,
            &format!("[{}] {} ok in {}ms", provider, endpoint, elapsed),
        );
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_interval_from_rate() {
        assert_eq!(
            RateLimiter::new(300, 4).min_interval(),
            Duration::from_millis(200)
        );
        assert!(RateLimiter::new(0, 4).min_interval().is_zero());
    }

    #[tokio::test]
    async fn test_concurrent_permits() {
        let limiter = RateLimiter::new(0, 2);
        let first = limiter.acquire().await.unwrap();
        let _second = limiter.acquire().await.unwrap();

        let third = tokio::time::timeout(Duration::from_millis(20), limiter.acquire()).await;
        assert!(third.is_err());

        drop(first);
        let third = tokio::time::timeout(Duration::from_millis(200), limiter.acquire()).await;
        assert!(third.is_ok());
    }
}
