//! Exchange rate provider port.
//!
//! This trait defines the interface for rate lookup services.
//! Implementations can be HTTP price-feed clients, cached wrappers,
//! mock providers, etc.

use crate::domain::{FiatCurrency, RateSnapshot};

/// Error type for rate operations.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("No live or fallback rate for {token} in {currency}")]
    RateUnavailable {
        token: String,
        currency: FiatCurrency,
    },
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Resolves a rate snapshot for the given tokens in the given fiat
    /// currency. Rates are fiat units per 1 whole token.
    ///
    /// Implementations must degrade to fallback data on feed failure and
    /// only error when a token has neither a live nor a fallback rate.
    async fn get_rates(
        &self,
        fiat: FiatCurrency,
        symbols: &[&str],
    ) -> Result<RateSnapshot, RateError>;
}
