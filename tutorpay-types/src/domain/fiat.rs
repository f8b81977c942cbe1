//! Fiat currencies accepted for billing.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::DomainError;

/// Fiat currencies supported for quoting and billing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum FiatCurrency {
    USD,
    ZAR,
    EUR,
    GBP,
}

impl FiatCurrency {
    /// Returns the currency symbol used for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            FiatCurrency::USD => "$",
            FiatCurrency::ZAR => "R",
            FiatCurrency::EUR => "€",
            FiatCurrency::GBP => "£",
        }
    }

    /// Lowercase ISO code as expected by the price-feed API.
    pub fn feed_code(&self) -> &'static str {
        match self {
            FiatCurrency::USD => "usd",
            FiatCurrency::ZAR => "zar",
            FiatCurrency::EUR => "eur",
            FiatCurrency::GBP => "gbp",
        }
    }

    /// Approximate USD value of 1 unit of this currency.
    ///
    /// Only used for the min/max payment bounds check, which is specified
    /// in USD-equivalent terms. Not a substitute for live token rates.
    pub fn usd_rate(&self) -> f64 {
        match self {
            FiatCurrency::USD => 1.0,
            FiatCurrency::ZAR => 0.054,
            FiatCurrency::EUR => 1.08,
            FiatCurrency::GBP => 1.27,
        }
    }

    /// All supported currencies.
    pub fn all() -> &'static [FiatCurrency] {
        &[
            FiatCurrency::USD,
            FiatCurrency::ZAR,
            FiatCurrency::EUR,
            FiatCurrency::GBP,
        ]
    }
}

impl fmt::Display for FiatCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::str::FromStr for FiatCurrency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(FiatCurrency::USD),
            "ZAR" => Ok(FiatCurrency::ZAR),
            "EUR" => Ok(FiatCurrency::EUR),
            "GBP" => Ok(FiatCurrency::GBP),
            other => Err(DomainError::UnknownCurrency(other.to_string())),
        }
    }
}
