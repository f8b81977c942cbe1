//! # Tutorpay Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the token registry and the cached rate provider
//! - Create the payment service
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use token_rates::{CachedRateProvider, CoinGeckoClient};
use tutorpay_hex::{PaymentService, inbound::HttpServer};
use tutorpay_types::TokenRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tutorpay_app=debug,tutorpay_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting tutorpay server on port {}", config.port);
    tracing::info!("Using price feed: {}", config.coingecko_url);

    // Build the token registry and the rate pipeline
    let registry = Arc::new(TokenRegistry::with_defaults());
    let feed = CoinGeckoClient::new(&config.coingecko_url);
    let rates = CachedRateProvider::new(feed, registry.clone());

    // Create the payment service
    let service = PaymentService::new(registry, rates);

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(service, config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
