//! # Tutorpay Types
//!
//! Domain types and port traits for the tutorpay payment conversion service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (tokens, rates, quotes, conversion math)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    FiatCurrency, PaymentAttempt, PaymentId, PaymentQuote, PaymentState, QuoteId, RateEntry,
    RateSnapshot, RateSource, Token, TokenRegistry,
};
pub use dto::*;
pub use error::{AppError, DomainError, ValidationError};
pub use ports::{RateError, RateProvider, TransferReceipt, WalletError, WalletGateway};
