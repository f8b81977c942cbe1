//! Domain models for the payment conversion service.

pub mod convert;
pub mod fiat;
pub mod payment;
pub mod quote;
pub mod rates;
pub mod token;

pub use fiat::FiatCurrency;
pub use payment::{PaymentAttempt, PaymentId, PaymentState};
pub use quote::{PaymentQuote, QuoteId};
pub use rates::{RateEntry, RateSnapshot, RateSource};
pub use token::{Token, TokenRegistry};
