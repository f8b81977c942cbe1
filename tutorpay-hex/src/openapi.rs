//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use tutorpay_types::domain::{FiatCurrency, PaymentQuote, QuoteId, RateEntry, RateSnapshot, RateSource, Token};
use tutorpay_types::dto::{QuoteRequest, QuoteResponse, ValidateQuoteRequest, ValidationResponse};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List supported tokens
#[utoipa::path(
    get,
    path = "/api/tokens",
    tag = "tokens",
    responses(
        (status = 200, description = "Supported tokens in display order", body = Vec<Token>)
    )
)]
async fn list_tokens() {}

/// Get a rate snapshot
#[utoipa::path(
    get,
    path = "/api/rates/{currency}",
    tag = "rates",
    params(
        ("currency" = String, Path, description = "Fiat currency code (USD, ZAR, EUR, GBP)")
    ),
    responses(
        (status = 200, description = "Rates for all tokens, tagged live or fallback", body = RateSnapshot),
        (status = 400, description = "Unknown currency"),
        (status = 503, description = "A token has neither a live nor a fallback rate")
    )
)]
async fn get_rates() {}

/// Build a payment quote
#[utoipa::path(
    post,
    path = "/api/quotes",
    tag = "quotes",
    request_body = QuoteRequest,
    responses(
        (status = 201, description = "Quote built", body = QuoteResponse),
        (status = 400, description = "Invalid amount or currency"),
        (status = 404, description = "Unknown token"),
        (status = 503, description = "Rate temporarily unavailable")
    )
)]
async fn create_quote() {}

/// Validate a quote
#[utoipa::path(
    post,
    path = "/api/quotes/validate",
    tag = "quotes",
    request_body = ValidateQuoteRequest,
    responses(
        (status = 200, description = "Validation outcome with a stable error_kind on failure", body = ValidationResponse),
        (status = 404, description = "Quote references an unknown token")
    )
)]
async fn validate_quote() {}

/// OpenAPI documentation for the Tutorpay API.
#[derive(OpenApi)]
#[openapi(
    paths(health, list_tokens, get_rates, create_quote, validate_quote),
    components(schemas(
        FiatCurrency,
        Token,
        RateSource,
        RateEntry,
        RateSnapshot,
        QuoteId,
        PaymentQuote,
        QuoteRequest,
        QuoteResponse,
        ValidateQuoteRequest,
        ValidationResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "tokens", description = "Token registry"),
        (name = "rates", description = "Exchange rates"),
        (name = "quotes", description = "Payment quotes and validation")
    ),
    info(
        title = "Tutorpay API",
        description = "Fiat-to-token payment quoting for the tutoring billing front-end",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
