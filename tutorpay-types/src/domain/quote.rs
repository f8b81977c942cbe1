//! Payment quote domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::fiat::FiatCurrency;
use super::rates::RateSource;

/// Unique identifier for a PaymentQuote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct QuoteId(Uuid);

impl QuoteId {
    /// Creates a new random QuoteId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a QuoteId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for QuoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QuoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for QuoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A point-in-time conversion of a fiat amount into a token amount.
///
/// Quotes are immutable once built - a change of amount, currency, or token
/// produces a new quote. A quote is consumed by at most one payment attempt.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentQuote {
    /// Unique identifier
    pub id: QuoteId,
    /// The fiat amount being paid
    pub fiat_amount: f64,
    /// Billing currency
    pub fiat_currency: FiatCurrency,
    /// Token selected for payment
    pub token_symbol: String,
    /// Human-readable token amount (fiat_amount / rate_used)
    pub token_amount: f64,
    /// Integer base units, truncated from token_amount
    pub token_base_units: u64,
    /// Rate applied, fiat units per 1 whole token
    pub rate_used: f64,
    /// Whether the rate came from the live feed or the fallback table
    pub rate_source: RateSource,
    /// When the quote was built
    pub created_at: DateTime<Utc>,
}

impl PaymentQuote {
    /// Seconds elapsed since the quote was built.
    pub fn age_secs(&self) -> i64 {
        (Utc::now() - self.created_at).num_seconds()
    }

    /// A quote older than the rate-cache validity window must be rebuilt
    /// before it is used in a payment.
    pub fn is_stale(&self, ttl_secs: i64) -> bool {
        self.age_secs() >= ttl_secs
    }
}
