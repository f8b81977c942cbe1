//! Error types for the payment conversion service.

use crate::ports::RateError;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Duplicate token symbol in registry: {0}")]
    DuplicateToken(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid payment state transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

/// Quote validation failures.
///
/// Each variant maps to a distinct user-facing message - an unsupported
/// token payment must never be reported as insufficient funds.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "Payment of {usd_equivalent:.2} USD-equivalent is outside the allowed range [{min_usd}, {max_usd}]"
    )]
    AmountOutOfBounds {
        usd_equivalent: f64,
        min_usd: f64,
        max_usd: f64,
    },

    #[error("Insufficient balance: available {available} base units, requested {requested}")]
    InsufficientBalance { available: u64, requested: u64 },

    #[error("Payments in {0} are not supported yet")]
    UnsupportedTokenPayment(String),

    #[error("Quote is stale ({age_secs}s old); request a fresh quote")]
    StaleQuote { age_secs: i64 },
}

impl ValidationError {
    /// Stable machine-readable discriminator for API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::AmountOutOfBounds { .. } => "amount_out_of_bounds",
            ValidationError::InsufficientBalance { .. } => "insufficient_balance",
            ValidationError::UnsupportedTokenPayment(_) => "unsupported_token",
            ValidationError::StaleQuote { .. } => "stale_quote",
        }
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Unprocessable(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownToken(symbol) => {
                AppError::NotFound(format!("Unknown token: {}", symbol))
            }
            DomainError::UnknownCurrency(code) => {
                AppError::BadRequest(format!("Unknown currency: {}", code))
            }
            DomainError::InvalidAmount(msg) => AppError::BadRequest(msg),
            e => AppError::Internal(e.to_string()),
        }
    }
}

impl From<RateError> for AppError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::UnknownToken(symbol) => {
                AppError::NotFound(format!("Unknown token: {}", symbol))
            }
            RateError::RateUnavailable { token, currency } => AppError::ServiceUnavailable(
                format!("{} is temporarily unavailable in {}", token, currency),
            ),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Unprocessable(err.to_string())
    }
}
