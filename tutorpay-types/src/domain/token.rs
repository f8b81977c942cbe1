//! Token registry.
//!
//! Static metadata for every token the payment flow can quote. The registry
//! is built once at startup and handed to consumers by reference - there is
//! no runtime mutation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Metadata for a supported token.
///
/// `mint_address` is opaque to this crate - it is passed through to the
/// wallet collaborator and never interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Token {
    /// Unique uppercase symbol (e.g. "SOL", "BONK")
    pub symbol: String,
    /// Human-readable token name
    pub name: String,
    /// On-chain decimal places (base units per whole token = 10^decimals)
    pub decimals: u8,
    /// Decimal places used when rendering amounts for display
    pub display_decimals: u8,
    /// True for the chain's native asset
    pub is_native: bool,
    /// Price-feed identifier; None means fallback rates only
    pub price_feed_id: Option<String>,
    /// Mint address, forwarded untouched to the wallet collaborator
    pub mint_address: String,
    /// Gradient stops for the token picker UI
    pub icon_gradient: Vec<String>,
}

impl Token {
    /// Base units per whole token.
    pub fn base_units_per_token(&self) -> u64 {
        10u64.pow(self.decimals as u32)
    }
}

/// Immutable registry of supported tokens.
///
/// Tokens are stored in display-priority order so that `list()` is stable
/// and token pickers render deterministically.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
}

impl TokenRegistry {
    /// Creates a registry from an explicit token list.
    ///
    /// The order of `tokens` is the display order. Fails if two entries
    /// share a symbol.
    pub fn new(tokens: Vec<Token>) -> Result<Self, DomainError> {
        for (i, token) in tokens.iter().enumerate() {
            if tokens[..i]
                .iter()
                .any(|t| t.symbol.eq_ignore_ascii_case(&token.symbol))
            {
                return Err(DomainError::DuplicateToken(token.symbol.clone()));
            }
        }
        Ok(Self { tokens })
    }

    /// The production registry: SOL, USDC, USDT, BONK in display order.
    pub fn with_defaults() -> Self {
        let tokens = vec![
            Token {
                symbol: "SOL".into(),
                name: "Solana".into(),
                decimals: 9,
                display_decimals: 4,
                is_native: true,
                price_feed_id: Some("solana".into()),
                mint_address: "So11111111111111111111111111111111111111112".into(),
                icon_gradient: vec!["#9945FF".into(), "#14F195".into()],
            },
            Token {
                symbol: "USDC".into(),
                name: "USD Coin".into(),
                decimals: 6,
                display_decimals: 2,
                is_native: false,
                price_feed_id: Some("usd-coin".into()),
                mint_address: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".into(),
                icon_gradient: vec!["#2775CA".into(), "#5A9DE8".into()],
            },
            Token {
                symbol: "USDT".into(),
                name: "Tether".into(),
                decimals: 6,
                display_decimals: 2,
                is_native: false,
                price_feed_id: Some("tether".into()),
                mint_address: "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB".into(),
                icon_gradient: vec!["#26A17B".into(), "#53C9A7".into()],
            },
            Token {
                symbol: "BONK".into(),
                name: "Bonk".into(),
                decimals: 5,
                display_decimals: 0,
                is_native: false,
                price_feed_id: Some("bonk".into()),
                mint_address: "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263".into(),
                icon_gradient: vec!["#F5A623".into(), "#FF6B35".into()],
            },
        ];

        // Symbols above are distinct by construction
        Self { tokens }
    }

    /// Looks up a token by symbol (case-insensitive).
    pub fn get(&self, symbol: &str) -> Result<&Token, DomainError> {
        self.tokens
            .iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| DomainError::UnknownToken(symbol.to_string()))
    }

    /// All registered tokens in display-priority order.
    pub fn list(&self) -> &[Token] {
        &self.tokens
    }

    /// The chain's native token.
    pub fn native(&self) -> &Token {
        self.tokens
            .iter()
            .find(|t| t.is_native)
            .expect("registry always contains the native token")
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
