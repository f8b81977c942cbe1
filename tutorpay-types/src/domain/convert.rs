//! Fiat <-> token conversion arithmetic.
//!
//! Pure, stateless functions. Base-unit conversion truncates toward zero so
//! a quote never overstates the amount actually transferable on-chain.

use super::token::Token;
use crate::error::DomainError;

/// Converts a fiat amount into a whole-token amount at the given rate.
///
/// `rate` is fiat units per 1 whole token.
pub fn to_token_amount(fiat_amount: f64, rate: f64) -> Result<f64, DomainError> {
    if !fiat_amount.is_finite() || fiat_amount < 0.0 {
        return Err(DomainError::InvalidAmount(format!(
            "fiat amount must be a non-negative finite number, got {}",
            fiat_amount
        )));
    }
    if !rate.is_finite() || rate <= 0.0 {
        return Err(DomainError::InvalidAmount(format!(
            "rate must be a positive finite number, got {}",
            rate
        )));
    }
    Ok(fiat_amount / rate)
}

/// Converts a whole-token amount into integer base units.
///
/// Truncates (never rounds up): the result is always <= the mathematically
/// exact product `amount * 10^decimals`.
pub fn to_base_units(token_amount: f64, token: &Token) -> Result<u64, DomainError> {
    if !token_amount.is_finite() || token_amount < 0.0 {
        return Err(DomainError::InvalidAmount(format!(
            "token amount must be a non-negative finite number, got {}",
            token_amount
        )));
    }
    Ok((token_amount * token.base_units_per_token() as f64).floor() as u64)
}

/// Converts integer base units back into a whole-token amount.
pub fn from_base_units(base_units: u64, token: &Token) -> f64 {
    base_units as f64 / token.base_units_per_token() as f64
}

/// Renders a token amount at the token's display precision.
///
/// Truncates at `display_decimals` rather than rounding, matching the
/// base-unit conversion direction.
pub fn format_display(token_amount: f64, token: &Token, include_symbol: bool) -> String {
    let precision = token.display_decimals as usize;
    let factor = 10f64.powi(token.display_decimals as i32);
    let truncated = (token_amount * factor).floor() / factor;

    if include_symbol {
        format!("{:.*} {}", precision, truncated, token.symbol)
    } else {
        format!("{:.*}", precision, truncated)
    }
}
