//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FiatCurrency, PaymentQuote};

// ─────────────────────────────────────────────────────────────────────────────
// Quote DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to build a payment quote.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteRequest {
    /// Fiat amount being paid
    #[schema(example = 350.0)]
    pub fiat_amount: f64,
    #[serde(default = "default_currency")]
    pub fiat_currency: FiatCurrency,
    /// Token symbol to pay with
    #[schema(example = "USDC")]
    pub token: String,
}

fn default_currency() -> FiatCurrency {
    FiatCurrency::ZAR
}

/// A built quote plus its rendered display amount.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub quote: PaymentQuote,
    /// Token amount rendered at the token's display precision
    #[schema(example = "18.91 USDC")]
    pub display_amount: String,
}

/// Request to validate a quote against bounds and an optional balance.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidateQuoteRequest {
    pub quote: PaymentQuote,
    /// Wallet balance in base units, when the caller tracks one
    pub wallet_balance_base_units: Option<u64>,
}

/// Validation outcome.
///
/// `error_kind` is a stable machine-readable discriminator so the UI can
/// show a specific message per failure cause.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    pub valid: bool,
    #[schema(example = "unsupported_token")]
    pub error_kind: Option<String>,
    pub message: Option<String>,
}

impl ValidationResponse {
    /// A passing validation.
    pub fn ok() -> Self {
        Self {
            valid: true,
            error_kind: None,
            message: None,
        }
    }
}
