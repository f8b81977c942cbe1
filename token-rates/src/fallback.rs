//! Static fallback rate table.
//!
//! Used whenever the live feed cannot answer for a token. Values are
//! maintained by hand and only need to be in the right neighbourhood -
//! a payment quoted from a fallback rate is tagged `source: fallback`
//! so the caller can tell degraded pricing apart from live pricing.

use tutorpay_types::FiatCurrency;

/// Fallback rate for a `(token, fiat)` pair: fiat units per 1 whole token.
///
/// Returns `None` when the pair has no hardcoded entry; the provider turns
/// that into a `RateUnavailable` error rather than inventing a rate.
pub fn fallback_rate(symbol: &str, fiat: FiatCurrency) -> Option<f64> {
    use FiatCurrency::*;

    let rate = match (symbol, fiat) {
        ("SOL", USD) => 150.0,
        ("SOL", ZAR) => 2_775.0,
        ("SOL", EUR) => 138.0,
        ("SOL", GBP) => 118.0,

        ("USDC", USD) => 1.0,
        ("USDC", ZAR) => 18.5,
        ("USDC", EUR) => 0.92,
        ("USDC", GBP) => 0.79,

        ("USDT", USD) => 1.0,
        ("USDT", ZAR) => 18.5,
        ("USDT", EUR) => 0.92,
        ("USDT", GBP) => 0.79,

        ("BONK", USD) => 0.000_025,
        ("BONK", ZAR) => 0.000_47,
        ("BONK", EUR) => 0.000_023,
        ("BONK", GBP) => 0.000_02,

        _ => return None,
    };

    Some(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pairs() {
        assert_eq!(fallback_rate("USDC", FiatCurrency::ZAR), Some(18.5));
        assert_eq!(fallback_rate("BONK", FiatCurrency::ZAR), Some(0.000_47));
    }

    #[test]
    fn test_unknown_pair_is_none() {
        assert_eq!(fallback_rate("WEN", FiatCurrency::ZAR), None);
    }

    #[test]
    fn test_every_registry_token_covered_for_all_currencies() {
        let registry = tutorpay_types::TokenRegistry::with_defaults();
        for token in registry.list() {
            for &fiat in FiatCurrency::all() {
                let rate = fallback_rate(&token.symbol, fiat);
                assert!(
                    rate.is_some_and(|r| r.is_finite() && r > 0.0),
                    "missing or invalid fallback for {} in {}",
                    token.symbol,
                    fiat
                );
            }
        }
    }
}
