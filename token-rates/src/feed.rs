//! HTTP client for the price-feed API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

/// A fetch must resolve (or fail over) within this window.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Response shape of the simple-price endpoint:
/// `feed id -> currency code -> rate`.
pub type FeedResponse = HashMap<String, HashMap<String, f64>>;

/// Error type for feed operations.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed returned status {0}")]
    Status(u16),

    #[error("Malformed feed response: {0}")]
    Malformed(String),
}

/// Abstraction over the live price feed, so the provider can be tested
/// without the network.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// One batched lookup: rates for every feed id in `ids`, quoted in the
    /// fiat currency `vs` (lowercase ISO code).
    async fn simple_price(&self, ids: &[&str], vs: &str) -> Result<FeedResponse, FeedError>;
}

/// CoinGecko simple-price client.
pub struct CoinGeckoClient {
    base_url: String,
    http: Client,
}

impl CoinGeckoClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.coingecko.com/api/v3";

    /// Creates a client against the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoClient {
    async fn simple_price(&self, ids: &[&str], vs: &str) -> Result<FeedResponse, FeedError> {
        let url = format!("{}/simple/price", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("ids", ids.join(",")), ("vs_currencies", vs.to_string())])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        response
            .json::<FeedResponse>()
            .await
            .map_err(|e| FeedError::Malformed(e.to_string()))
    }
}
