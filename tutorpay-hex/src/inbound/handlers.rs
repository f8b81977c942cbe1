//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use tutorpay_types::{
    AppError, FiatCurrency, QuoteRequest, QuoteResponse, RateProvider, ValidateQuoteRequest,
    ValidationResponse,
};

use crate::PaymentService;

/// Application state shared across handlers.
pub struct AppState<P: RateProvider> {
    pub service: PaymentService<P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// List supported tokens in display order.
#[tracing::instrument(skip(state))]
pub async fn list_tokens<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Result<impl IntoResponse, ApiError> {
    let tokens = state.service.list_tokens().to_vec();
    Ok(Json(tokens))
}

/// Current rate snapshot for all tokens in the given currency.
#[tracing::instrument(skip(state), fields(currency = %currency))]
pub async fn get_rates<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(currency): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let fiat: FiatCurrency = currency
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Unknown currency: {}", currency)))?;

    let snapshot = state.service.get_rates(fiat).await?;
    Ok(Json(snapshot))
}

/// Build a payment quote.
#[tracing::instrument(skip(state), fields(token = %req.token, amount = req.fiat_amount))]
pub async fn create_quote<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<QuoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = state.service.build_quote(req).await?;
    let display_amount = state.service.display_amount(&quote)?;

    Ok((
        StatusCode::CREATED,
        Json(QuoteResponse {
            quote,
            display_amount,
        }),
    ))
}

/// Validate a quote against bounds and an optional wallet balance.
///
/// Validation failures are a 200 with `valid: false` and a stable
/// `error_kind`, so the UI can render a specific message without parsing
/// error strings.
#[tracing::instrument(skip(state, req), fields(quote_id = %req.quote.id))]
pub async fn validate_quote<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<ValidateQuoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .service
        .validate_quote(&req.quote, req.wallet_balance_base_units)?;

    let response = match outcome {
        None => ValidationResponse::ok(),
        Some(err) => ValidationResponse {
            valid: false,
            error_kind: Some(err.kind().to_string()),
            message: Some(err.to_string()),
        },
    };

    Ok(Json(response))
}
