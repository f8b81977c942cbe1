//! # Token Rates
//!
//! Outbound adapter implementing the `RateProvider` port from
//! `tutorpay-types`:
//!
//! - `feed` - thin HTTP client for the CoinGecko simple-price endpoint
//! - `fallback` - static rate table used when the feed cannot answer
//! - `provider` - `CachedRateProvider`, the cache + degrade-to-fallback
//!   pipeline that the application service consumes
//!
//! The provider never fails because of a network problem alone: a token's
//! rate request only errors when both the live feed and the fallback table
//! come up empty.

mod fallback;
mod feed;
mod provider;

pub use fallback::fallback_rate;
pub use feed::{CoinGeckoClient, FeedError, FeedResponse, PriceFeed};
pub use provider::{CachedRateProvider, RATE_CACHE_TTL_SECS};
