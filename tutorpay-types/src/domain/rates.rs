//! Exchange-rate snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use super::fiat::FiatCurrency;

/// Where a rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    /// Fetched from the live price-feed API
    Live,
    /// Taken from the static fallback table
    Fallback,
}

/// A single token's rate within a snapshot.
///
/// `rate` is fiat units per 1 whole token and is always positive and finite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct RateEntry {
    pub rate: f64,
    pub source: RateSource,
}

/// An immutable point-in-time set of rates for one fiat currency.
///
/// A refresh produces a new snapshot; existing snapshots are never mutated.
/// A snapshot may mix live and fallback entries after a partial feed outage.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RateSnapshot {
    pub fiat: FiatCurrency,
    pub rates: HashMap<String, RateEntry>,
    pub fetched_at: DateTime<Utc>,
}

impl RateSnapshot {
    pub fn new(fiat: FiatCurrency, rates: HashMap<String, RateEntry>) -> Self {
        Self {
            fiat,
            rates,
            fetched_at: Utc::now(),
        }
    }

    /// The rate entry for a token symbol, if present.
    pub fn entry(&self, symbol: &str) -> Option<&RateEntry> {
        self.rates.get(symbol)
    }

    /// Seconds elapsed since this snapshot was fetched.
    pub fn age_secs(&self) -> i64 {
        (Utc::now() - self.fetched_at).num_seconds()
    }

    /// True while the snapshot is younger than `ttl_secs`.
    pub fn is_fresh(&self, ttl_secs: i64) -> bool {
        self.age_secs() < ttl_secs
    }

    /// True if every entry came from the live feed.
    pub fn is_fully_live(&self) -> bool {
        self.rates.values().all(|e| e.source == RateSource::Live)
    }
}
