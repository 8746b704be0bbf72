//! CryptoCompare price lookups.
//!
//! One HTTP GET per call, no retries and no caching. The endpoint returns
//! either `{"<TSYM>": <rate>}` or an error object carrying a `"Response"`
//! marker plus a human-readable `"Message"`; the marker is a domain failure
//! (unsupported pair), not a transport failure.

use crate::error::{BotError, Result};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::time::Duration;
use url::Url;

#[async_trait]
pub trait PriceClient: Send + Sync {
    /// Returns how many units of `to` one unit of `from` is worth.
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64>;
}

pub struct CryptoCompareClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CryptoCompareClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::ConfigError(format!("failed to build HTTP client: {e}")))?;
        let base_url = Url::parse(base_url)
            .map_err(|e| BotError::ConfigError(format!("invalid price API base URL: {e}")))?;
        Ok(Self { http, base_url })
    }

    fn price_url(&self, from: &str, to: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join("/data/price")
            .map_err(|e| BotError::ConfigError(format!("invalid price API base URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("fsym", from)
            .append_pair("tsyms", to);
        Ok(url)
    }
}

#[async_trait]
impl PriceClient for CryptoCompareClient {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let url = self.price_url(from, to)?;
        debug!("Fetching rate {from} -> {to}");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BotError::ServiceUnavailable(format!(
                "price API returned HTTP {status}"
            )));
        }

        let body = response.text().await?;
        parse_rate_body(&body, to)
    }
}

/// Extracts the destination-keyed rate from a CryptoCompare response body.
fn parse_rate_body(body: &str, to: &str) -> Result<f64> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| BotError::InvalidPair(format!("malformed price response: {e}")))?;

    if value.get("Response").is_some() {
        let message = value
            .get("Message")
            .and_then(Value::as_str)
            .unwrap_or("price API reported an error");
        return Err(BotError::InvalidPair(message.to_string()));
    }

    value
        .get(to)
        .and_then(Value::as_f64)
        .ok_or_else(|| BotError::InvalidPair(format!("no rate for {to} in price response")))
}
