//! Tutorpay CLI
//!
//! Command-line interface for the Tutorpay API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use tutorpay_client::TutorpayClient;
use tutorpay_types::FiatCurrency;

#[derive(Parser)]
#[command(name = "tutorpay")]
#[command(author, version, about = "Tutorpay API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Tutorpay API
    #[arg(
        long,
        env = "TUTORPAY_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    /// Client token for rate-limit bucketing
    #[arg(long, env = "TUTORPAY_CLIENT_TOKEN")]
    client_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported tokens in display order
    Tokens,
    /// Show the current rate snapshot
    Rates {
        /// Fiat currency (USD, ZAR, EUR, GBP)
        #[arg(long, default_value = "ZAR")]
        currency: String,
    },
    /// Build a payment quote
    Quote {
        /// Fiat amount to pay
        #[arg(long)]
        amount: f64,
        /// Fiat currency (USD, ZAR, EUR, GBP)
        #[arg(long, default_value = "ZAR")]
        currency: String,
        /// Token symbol to pay with
        #[arg(long)]
        token: String,
    },
    /// Build a quote and validate it against bounds and balance
    Validate {
        /// Fiat amount to pay
        #[arg(long)]
        amount: f64,
        /// Fiat currency (USD, ZAR, EUR, GBP)
        #[arg(long, default_value = "ZAR")]
        currency: String,
        /// Token symbol to pay with
        #[arg(long)]
        token: String,
        /// Wallet balance in base units, if tracked
        #[arg(long)]
        balance: Option<u64>,
    },
    /// Check API health
    Health,
}

fn parse_currency(s: &str) -> Result<FiatCurrency> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Unknown currency: {}. Supported: USD, ZAR, EUR, GBP", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut client = TutorpayClient::new(&cli.api_url);
    if let Some(token) = cli.client_token {
        client = client.with_client_token(token);
    }

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Tokens => {
            let tokens = client.list_tokens().await?;
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        }

        Commands::Rates { currency } => {
            let fiat = parse_currency(&currency)?;
            let snapshot = client.get_rates(fiat).await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }

        Commands::Quote {
            amount,
            currency,
            token,
        } => {
            let fiat = parse_currency(&currency)?;
            let quote = client.create_quote(amount, fiat, &token).await?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }

        Commands::Validate {
            amount,
            currency,
            token,
            balance,
        } => {
            let fiat = parse_currency(&currency)?;
            let quoted = client.create_quote(amount, fiat, &token).await?;
            let outcome = client.validate_quote(quoted.quote, balance).await?;

            if outcome.valid {
                println!("✓ {} is payable", quoted.display_amount);
            } else {
                println!(
                    "✗ {} ({})",
                    outcome.message.unwrap_or_else(|| "validation failed".into()),
                    outcome.error_kind.unwrap_or_else(|| "unknown".into())
                );
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
