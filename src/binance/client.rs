//! Binance REST client
//!
//! Wraps `reqwest::Client` with timeout, user-agent and base-URL selection
//! for the spot and USD-M futures APIs. Only the two public market-data
//! endpoints the analyzer needs are exposed.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::binance::types::{DepthSnapshot, RawTrade};
use crate::error::FetchError;

/// Which market the client talks to. Spot and futures serve the same
/// response shapes from different hosts and path prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketKind {
    Spot,
    Futures,
}

impl MarketKind {
    fn base_url(&self) -> &'static str {
        match self {
            MarketKind::Spot => "https://api.binance.com",
            MarketKind::Futures => "https://fapi.binance.com",
        }
    }

    fn path_prefix(&self) -> &'static str {
        match self {
            MarketKind::Spot => "/api/v3",
            MarketKind::Futures => "/fapi/v1",
        }
    }
}

/// Binance market-data HTTP client.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    client: Client,
    base_url: String,
    prefix: &'static str,
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RETRIES: u32 = 3;

impl MarketDataClient {
    /// Client for the spot API with default settings.
    pub fn spot() -> Self {
        Self::with_timeout(MarketKind::Spot, DEFAULT_TIMEOUT)
    }

    /// Client for the USD-M futures API with default settings.
    pub fn futures() -> Self {
        Self::with_timeout(MarketKind::Futures, DEFAULT_TIMEOUT)
    }

    /// Client for `kind` with a custom request timeout.
    pub fn with_timeout(kind: MarketKind, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("market-pulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: kind.base_url().to_string(),
            prefix: kind.path_prefix(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch an order book depth snapshot.
    ///
    /// # Arguments
    /// * `symbol` - Trading pair symbol (e.g., "BTCUSDT")
    /// * `limit` - Number of levels per side (exchange default when `None`)
    pub async fn get_depth(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<DepthSnapshot, FetchError> {
        self.get_json("depth", symbol, limit).await
    }

    /// Fetch the most recent trades in exchange-reported execution order.
    ///
    /// # Arguments
    /// * `symbol` - Trading pair symbol (e.g., "BTCUSDT")
    /// * `limit` - Number of trades (exchange default when `None`)
    pub async fn get_recent_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RawTrade>, FetchError> {
        self.get_json("trades", symbol, limit).await
    }

    /// GET an endpoint and decode its JSON body, retrying rate-limit
    /// responses with exponential backoff (1s, 2s, 4s, honoring a
    /// Retry-After header when present).
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<T, FetchError> {
        let mut url = format!(
            "{}{}/{}?symbol={}",
            self.base_url,
            self.prefix,
            endpoint,
            symbol.to_uppercase()
        );
        if let Some(lim) = limit {
            url.push_str(&format!("&limit={}", lim));
        }

        let mut retry_count = 0;
        loop {
            let response = self.client.get(&url).send().await?;
            let status = response.status();

            if status.as_u16() == 429 {
                if retry_count >= MAX_RETRIES {
                    return Err(FetchError::RateLimitError(format!(
                        "Rate limit exceeded after {} retries",
                        MAX_RETRIES
                    )));
                }

                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or_else(|| 2_u64.pow(retry_count));

                tracing::warn!(
                    endpoint,
                    retry = retry_count + 1,
                    wait_secs = retry_after,
                    "Rate limit hit (429), backing off"
                );

                tokio::time::sleep(Duration::from_secs(retry_after)).await;
                retry_count += 1;
                continue;
            }

            if !status.is_success() {
                return Err(FetchError::from(response.error_for_status().unwrap_err()));
            }

            return Ok(response.json().await?);
        }
    }
}
