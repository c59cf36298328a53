/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! HTTP transport shared by the catalog and explorer providers.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use seed_core::{Error, HttpSettings, Result};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use crate::error::{SeedError, SeedResult};

/// Pooled connections kept per host
const POOL_SIZE: usize = 5;

/// Rate limited, retrying JSON-over-HTTP transport.
pub struct Transport {
  client: Client,
  rate_limiter: Arc<DefaultDirectRateLimiter>,
  source: &'static str,
  max_retries: u32,
  retry_delay: Duration,
}

impl Transport {
  pub fn new(source: &'static str, http: &HttpSettings, requests_per_minute: u32) -> SeedResult<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(http.timeout_secs))
      .pool_idle_timeout(Duration::from_secs(http.idle_timeout_secs))
      .pool_max_idle_per_host(POOL_SIZE)
      .user_agent(concat!("currency-seed/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| SeedError::ClientBuild(e.to_string()))?;

    // Ensure the quota is non-zero, fallback to one request per minute
    let per_minute = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);
    let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

    Ok(Self {
      client,
      rate_limiter,
      source,
      max_retries: http.max_retries,
      retry_delay: Duration::from_millis(http.retry_delay_ms),
    })
  }

  /// GET `url` and deserialize the JSON body.
  ///
  /// Connection failures, timeouts and 5xx responses are retried with
  /// exponential backoff. HTTP 429 is returned immediately as
  /// [`Error::RateLimit`].
  #[instrument(skip(self, query, headers), fields(source = self.source))]
  pub async fn get_json<T>(
    &self,
    url: &str,
    query: &[(&str, String)],
    headers: &[(&'static str, String)],
  ) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let mut attempt = 0;

    loop {
      self.rate_limiter.until_ready().await;

      match self.fetch_text(url, query, headers).await {
        Ok(text) => {
          debug!("Response body length: {} bytes", text.len());
          return serde_json::from_str::<T>(&text).map_err(|e| {
            error!("Failed to parse {} response: {}", self.source, e);
            Error::Parse(format!("{} response: {}. Body: {}", self.source, e, snippet(&text)))
          });
        }
        Err(Error::Http(message)) if attempt < self.max_retries => {
          attempt += 1;
          let delay = backoff_delay(self.retry_delay, attempt);
          warn!(
            "{} request failed ({}), retrying in {}ms (attempt {})",
            self.source,
            message,
            delay.as_millis(),
            attempt + 1
          );
          tokio::time::sleep(delay).await;
        }
        Err(e) => return Err(e),
      }
    }
  }

  async fn fetch_text(
    &self,
    url: &str,
    query: &[(&str, String)],
    headers: &[(&'static str, String)],
  ) -> Result<String> {
    let mut request = self.client.get(url).query(query).header("accept", "application/json");
    for (name, value) in headers {
      request = request.header(*name, value);
    }

    let response = request.send().await.map_err(|e| {
      if e.is_timeout() {
        Error::Http(format!("Request timed out: {}", e))
      } else {
        Error::Http(format!("Request failed: {}", e))
      }
    })?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
      warn!("{} returned HTTP 429", self.source);
      return Err(Error::RateLimit(format!("{} returned HTTP 429", self.source)));
    }

    if status.is_server_error() {
      return Err(Error::Http(format!("{} returned HTTP {}", self.source, status)));
    }

    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(Error::Api(format!("{} returned HTTP {}: {}", self.source, status, snippet(&body))));
    }

    response.text().await.map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))
  }
}

/// `base * 2^(attempt - 1)`, saturating instead of overflowing
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
  base.saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
}

/// First 200 characters of a response body, for error messages
fn snippet(text: &str) -> String {
  text.chars().take(200).collect()
}
