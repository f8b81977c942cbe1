//! Configuration loading from environment.

use std::env;

use token_rates::CoinGeckoClient;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub coingecko_url: String,
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        let coingecko_url = env::var("COINGECKO_URL")
            .unwrap_or_else(|_| CoinGeckoClient::DEFAULT_BASE_URL.to_string());

        let rate_limit_per_minute = env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()?;

        Ok(Self {
            port,
            coingecko_url,
            rate_limit_per_minute,
        })
    }
}
