//! # Tutorpay Client SDK
//!
//! A typed Rust client for the Tutorpay API.

use reqwest::Client;
use serde::de::DeserializeOwned;

use tutorpay_types::{
    FiatCurrency, PaymentQuote, QuoteRequest, QuoteResponse, RateSnapshot, Token,
    ValidateQuoteRequest, ValidationResponse,
};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tutorpay API client.
pub struct TutorpayClient {
    base_url: String,
    client_token: Option<String>,
    http: Client,
}

impl TutorpayClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_token: None,
            http: Client::new(),
        }
    }

    /// Sets the client token used for rate-limit bucketing.
    pub fn with_client_token(mut self, token: impl Into<String>) -> Self {
        self.client_token = Some(token.into());
        self
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists supported tokens in display order.
    pub async fn list_tokens(&self) -> Result<Vec<Token>, ClientError> {
        self.get("/api/tokens").await
    }

    /// Gets the current rate snapshot for a fiat currency.
    pub async fn get_rates(&self, fiat: FiatCurrency) -> Result<RateSnapshot, ClientError> {
        self.get(&format!("/api/rates/{}", fiat)).await
    }

    /// Builds a payment quote.
    pub async fn create_quote(
        &self,
        fiat_amount: f64,
        fiat_currency: FiatCurrency,
        token: &str,
    ) -> Result<QuoteResponse, ClientError> {
        let req = QuoteRequest {
            fiat_amount,
            fiat_currency,
            token: token.to_string(),
        };
        self.post("/api/quotes", &req).await
    }

    /// Validates a quote against bounds and an optional wallet balance.
    pub async fn validate_quote(
        &self,
        quote: PaymentQuote,
        wallet_balance_base_units: Option<u64>,
    ) -> Result<ValidationResponse, ClientError> {
        let req = ValidateQuoteRequest {
            quote,
            wallet_balance_base_units,
        };
        self.post("/api/quotes/validate", &req).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // HTTP helpers
    // ─────────────────────────────────────────────────────────────────────────────

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.client_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let req = self.http.get(format!("{}{}", self.base_url, path));
        let resp = self.authorize(req).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let req = self.http.post(format!("{}{}", self.base_url, path)).json(body);
        let resp = self.authorize(req).send().await?;
        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        // Error responses carry an { "error": ..., "code": ... } envelope
        let message = match resp.json::<serde_json::Value>().await {
            Ok(body) => body["error"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string(),
            Err(_) => "unknown error".to_string(),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
