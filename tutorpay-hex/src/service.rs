//! Payment Application Service
//!
//! Orchestrates quote building, validation, and submission through the
//! rate-provider and wallet ports. Contains NO infrastructure logic - pure
//! business orchestration.

use std::sync::Arc;

use token_rates::RATE_CACHE_TTL_SECS;
use tutorpay_types::{
    AppError, FiatCurrency, PaymentAttempt, PaymentQuote, QuoteId, QuoteRequest, RateProvider,
    RateSnapshot, Token, TokenRegistry, ValidationError, WalletGateway,
    domain::convert,
};

/// Allowed payment size, expressed in USD-equivalent terms so the same
/// bounds apply to every billing currency.
#[derive(Debug, Clone, Copy)]
pub struct PaymentBounds {
    pub min_usd: f64,
    pub max_usd: f64,
}

impl Default for PaymentBounds {
    fn default() -> Self {
        Self {
            min_usd: 1.0,
            max_usd: 10_000.0,
        }
    }
}

/// Application service for payment quoting.
///
/// Generic over `P: RateProvider` - the adapter is injected at compile time.
/// This enables:
/// - Swapping rate sources without code changes
/// - Testing with a fixed-rate provider
/// - Compile-time checks for port implementation
pub struct PaymentService<P: RateProvider> {
    registry: Arc<TokenRegistry>,
    rates: P,
    bounds: PaymentBounds,
    quote_ttl_secs: i64,
}

impl<P: RateProvider> PaymentService<P> {
    /// Creates a new payment service with default bounds and quote window.
    pub fn new(registry: Arc<TokenRegistry>, rates: P) -> Self {
        Self::with_bounds(registry, rates, PaymentBounds::default())
    }

    /// Creates a payment service with custom bounds.
    ///
    /// Quotes expire together with the rate cache window.
    pub fn with_bounds(registry: Arc<TokenRegistry>, rates: P, bounds: PaymentBounds) -> Self {
        Self {
            registry,
            rates,
            bounds,
            quote_ttl_secs: RATE_CACHE_TTL_SECS,
        }
    }

    /// Returns the token registry.
    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Token and Rate Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// All supported tokens in display order.
    pub fn list_tokens(&self) -> &[Token] {
        self.registry.list()
    }

    /// Current rate snapshot for every registered token.
    pub async fn get_rates(&self, fiat: FiatCurrency) -> Result<RateSnapshot, AppError> {
        let symbols: Vec<&str> = self.registry.list().iter().map(|t| t.symbol.as_str()).collect();
        self.rates
            .get_rates(fiat, &symbols)
            .await
            .map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Quote Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Builds a quote for paying `fiat_amount` in the selected token.
    ///
    /// Fails with the first error encountered: unknown token, invalid
    /// amount, or no rate available.
    pub async fn build_quote(&self, req: QuoteRequest) -> Result<PaymentQuote, AppError> {
        let token = self.registry.get(&req.token)?;

        if !req.fiat_amount.is_finite() || req.fiat_amount < 0.0 {
            return Err(AppError::BadRequest(format!(
                "fiat amount must be a non-negative finite number, got {}",
                req.fiat_amount
            )));
        }

        let snapshot = self
            .rates
            .get_rates(req.fiat_currency, &[token.symbol.as_str()])
            .await?;
        let entry = snapshot.entry(&token.symbol).copied().ok_or_else(|| {
            AppError::Internal(format!("snapshot missing rate for {}", token.symbol))
        })?;

        let token_amount = convert::to_token_amount(req.fiat_amount, entry.rate)?;
        let token_base_units = convert::to_base_units(token_amount, token)?;

        let quote = PaymentQuote {
            id: QuoteId::new(),
            fiat_amount: req.fiat_amount,
            fiat_currency: req.fiat_currency,
            token_symbol: token.symbol.clone(),
            token_amount,
            token_base_units,
            rate_used: entry.rate,
            rate_source: entry.source,
            created_at: chrono::Utc::now(),
        };

        tracing::debug!(
            quote_id = %quote.id,
            token = %quote.token_symbol,
            rate = quote.rate_used,
            source = ?quote.rate_source,
            "quote built"
        );

        Ok(quote)
    }

    /// Renders a quote's token amount at the token's display precision.
    pub fn display_amount(&self, quote: &PaymentQuote) -> Result<String, AppError> {
        let token = self.registry.get(&quote.token_symbol)?;
        Ok(convert::format_display(quote.token_amount, token, true))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Validation and Submission
    // ─────────────────────────────────────────────────────────────────────────────

    /// Validates a quote against payment bounds and, when supplied, the
    /// wallet balance.
    ///
    /// Returns `Ok(None)` when the quote is payable, `Ok(Some(err))` with
    /// the first failed check otherwise. `Err` is reserved for lookup
    /// failures that indicate a malformed quote.
    pub fn validate_quote(
        &self,
        quote: &PaymentQuote,
        wallet_balance_base_units: Option<u64>,
    ) -> Result<Option<ValidationError>, AppError> {
        let token = self.registry.get(&quote.token_symbol)?;

        let usd_equivalent = quote.fiat_amount * quote.fiat_currency.usd_rate();
        if usd_equivalent < self.bounds.min_usd || usd_equivalent > self.bounds.max_usd {
            return Ok(Some(ValidationError::AmountOutOfBounds {
                usd_equivalent,
                min_usd: self.bounds.min_usd,
                max_usd: self.bounds.max_usd,
            }));
        }

        if !token.is_native {
            // Balance tracking and the transfer path only exist for the
            // native token; report this distinctly, never as a balance
            // failure.
            return Ok(Some(ValidationError::UnsupportedTokenPayment(
                token.symbol.clone(),
            )));
        }

        if let Some(available) = wallet_balance_base_units {
            if quote.token_base_units > available {
                return Ok(Some(ValidationError::InsufficientBalance {
                    available,
                    requested: quote.token_base_units,
                }));
            }
        }

        Ok(None)
    }

    /// Validates and submits a payment through the wallet collaborator,
    /// driving the attempt state machine.
    ///
    /// A stale quote is rejected outright. Wallet failures do not surface
    /// as errors: the returned attempt ends in `Failed` with the reason
    /// recorded.
    pub async fn submit_payment<W: WalletGateway>(
        &self,
        quote: PaymentQuote,
        wallet_balance_base_units: Option<u64>,
        wallet: &W,
        recipient: &str,
        memo: Option<&str>,
    ) -> Result<PaymentAttempt, AppError> {
        if quote.is_stale(self.quote_ttl_secs) {
            return Err(ValidationError::StaleQuote {
                age_secs: quote.age_secs(),
            }
            .into());
        }

        if let Some(err) = self.validate_quote(&quote, wallet_balance_base_units)? {
            return Err(err.into());
        }

        let token = self.registry.get(&quote.token_symbol)?.clone();

        let mut attempt = PaymentAttempt::new(quote);
        attempt.mark_validated()?;
        attempt.begin_wallet_confirmation()?;

        match wallet
            .send_transfer(recipient, &token, attempt.quote.token_base_units, memo)
            .await
        {
            Ok(receipt) => {
                attempt.mark_submitted(receipt.signature)?;
                attempt.mark_confirmed()?;
                tracing::info!(
                    payment_id = %attempt.id,
                    signature = attempt.signature.as_deref().unwrap_or(""),
                    "payment confirmed"
                );
            }
            Err(err) => {
                tracing::warn!(payment_id = %attempt.id, error = %err, "wallet transfer failed");
                attempt.mark_failed(err.to_string())?;
            }
        }

        Ok(attempt)
    }
}
