//! Cached rate provider.
//!
//! Resolution order per request: fresh cache entry -> one batched live
//! fetch -> fallback table. The cache is the only shared mutable state in
//! the conversion core; it is keyed by `(fiat, token set)` and guarded by a
//! monotonic fetch sequence so an older in-flight fetch cannot overwrite a
//! newer snapshot.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use tutorpay_types::{
    FiatCurrency, RateEntry, RateError, RateProvider, RateSnapshot, RateSource, Token,
    TokenRegistry,
};

use crate::fallback::fallback_rate;
use crate::feed::PriceFeed;

/// How long a cached snapshot (and any quote built from it) stays valid.
pub const RATE_CACHE_TTL_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    fiat: FiatCurrency,
    symbols: Vec<String>,
}

impl CacheKey {
    fn new(fiat: FiatCurrency, tokens: &[&Token]) -> Self {
        let mut symbols: Vec<String> = tokens.iter().map(|t| t.symbol.clone()).collect();
        symbols.sort_unstable();
        Self { fiat, symbols }
    }
}

struct CacheEntry {
    snapshot: RateSnapshot,
    seq: u64,
}

/// `RateProvider` implementation backed by a live feed, the fallback table,
/// and a per-process snapshot cache.
pub struct CachedRateProvider<F: PriceFeed> {
    feed: F,
    registry: Arc<TokenRegistry>,
    cache: DashMap<CacheKey, CacheEntry>,
    ttl_secs: i64,
    fetch_seq: AtomicU64,
}

impl<F: PriceFeed> CachedRateProvider<F> {
    /// Creates a provider with the default cache validity window.
    pub fn new(feed: F, registry: Arc<TokenRegistry>) -> Self {
        Self::with_ttl(feed, registry, RATE_CACHE_TTL_SECS)
    }

    /// Creates a provider with a custom cache validity window (seconds).
    pub fn with_ttl(feed: F, registry: Arc<TokenRegistry>, ttl_secs: i64) -> Self {
        Self {
            feed,
            registry,
            cache: DashMap::new(),
            ttl_secs,
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// The configured cache validity window in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Builds a snapshot: live feed where possible, fallback for the rest.
    async fn fetch_snapshot(
        &self,
        fiat: FiatCurrency,
        tokens: &[&Token],
    ) -> Result<RateSnapshot, RateError> {
        let ids: Vec<&str> = tokens
            .iter()
            .filter_map(|t| t.price_feed_id.as_deref())
            .collect();

        let live = if ids.is_empty() {
            HashMap::new()
        } else {
            match self.feed.simple_price(&ids, fiat.feed_code()).await {
                Ok(response) => response,
                Err(err) => {
                    tracing::warn!(error = %err, %fiat, "price feed fetch failed, degrading to fallback rates");
                    HashMap::new()
                }
            }
        };

        let mut rates = HashMap::new();
        for token in tokens {
            let live_rate = token
                .price_feed_id
                .as_deref()
                .and_then(|id| live.get(id))
                .and_then(|per_currency| per_currency.get(fiat.feed_code()))
                .copied()
                .filter(|r| r.is_finite() && *r > 0.0);

            let entry = match live_rate {
                Some(rate) => RateEntry {
                    rate,
                    source: RateSource::Live,
                },
                None => match fallback_rate(&token.symbol, fiat) {
                    Some(rate) => RateEntry {
                        rate,
                        source: RateSource::Fallback,
                    },
                    None => {
                        return Err(RateError::RateUnavailable {
                            token: token.symbol.clone(),
                            currency: fiat,
                        });
                    }
                },
            };
            rates.insert(token.symbol.clone(), entry);
        }

        Ok(RateSnapshot::new(fiat, rates))
    }

    /// Commits a fetched snapshot unless a newer fetch already landed.
    fn commit(&self, key: CacheKey, snapshot: RateSnapshot, seq: u64) {
        use dashmap::mapref::entry::Entry;

        match self.cache.entry(key) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().seq < seq {
                    occupied.insert(CacheEntry { snapshot, seq });
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CacheEntry { snapshot, seq });
            }
        }
    }
}

#[async_trait]
impl<F: PriceFeed> RateProvider for CachedRateProvider<F> {
    async fn get_rates(
        &self,
        fiat: FiatCurrency,
        symbols: &[&str],
    ) -> Result<RateSnapshot, RateError> {
        // Resolve against the registry first; unknown symbols fail
        // explicitly instead of defaulting.
        let tokens = symbols
            .iter()
            .map(|s| {
                self.registry
                    .get(s)
                    .map_err(|_| RateError::UnknownToken(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let key = CacheKey::new(fiat, &tokens);

        if let Some(entry) = self.cache.get(&key) {
            if entry.snapshot.is_fresh(self.ttl_secs) {
                return Ok(entry.snapshot.clone());
            }
        }

        // Take the ticket before the fetch starts: commit order is decided
        // by fetch start order, not completion order.
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let snapshot = self.fetch_snapshot(fiat, &tokens).await?;
        self.commit(key, snapshot.clone(), seq);

        tracing::debug!(
            %fiat,
            tokens = snapshot.rates.len(),
            fully_live = snapshot.is_fully_live(),
            "rate snapshot refreshed"
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedError, FeedResponse};
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use tutorpay_types::TokenRegistry;

    /// Scripted feed: pops one canned result per call and counts calls.
    struct MockFeed {
        results: Mutex<Vec<Result<FeedResponse, FeedError>>>,
        calls: AtomicUsize,
    }

    impl MockFeed {
        fn new(results: Vec<Result<FeedResponse, FeedError>>) -> Self {
            Self {
                results: Mutex::new(results),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PriceFeed for MockFeed {
        async fn simple_price(&self, _ids: &[&str], _vs: &str) -> Result<FeedResponse, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut results = self.results.lock().unwrap();
            if results.is_empty() {
                return Err(FeedError::Status(500));
            }
            results.remove(0)
        }
    }

    fn feed_response(entries: &[(&str, &str, f64)]) -> FeedResponse {
        let mut response: FeedResponse = HashMap::new();
        for (id, vs, rate) in entries {
            response
                .entry(id.to_string())
                .or_default()
                .insert(vs.to_string(), *rate);
        }
        response
    }

    fn provider_with(
        results: Vec<Result<FeedResponse, FeedError>>,
    ) -> CachedRateProvider<MockFeed> {
        CachedRateProvider::new(
            MockFeed::new(results),
            Arc::new(TokenRegistry::with_defaults()),
        )
    }

    #[tokio::test]
    async fn test_live_rates_tagged_live() {
        let provider = provider_with(vec![Ok(feed_response(&[
            ("solana", "zar", 2_900.0),
            ("usd-coin", "zar", 18.2),
        ]))]);

        let snap = provider
            .get_rates(FiatCurrency::ZAR, &["SOL", "USDC"])
            .await
            .unwrap();

        let sol = snap.entry("SOL").unwrap();
        assert_eq!(sol.rate, 2_900.0);
        assert_eq!(sol.source, RateSource::Live);
        assert!(snap.is_fully_live());
    }

    #[tokio::test]
    async fn test_feed_failure_degrades_to_fallback() {
        let provider = provider_with(vec![Err(FeedError::Status(503))]);

        let snap = provider
            .get_rates(FiatCurrency::ZAR, &["SOL", "USDC", "BONK"])
            .await
            .unwrap();

        for symbol in ["SOL", "USDC", "BONK"] {
            assert_eq!(snap.entry(symbol).unwrap().source, RateSource::Fallback);
        }
        assert_eq!(snap.entry("USDC").unwrap().rate, 18.5);
    }

    #[tokio::test]
    async fn test_partial_feed_response_mixes_sources() {
        // Feed only knows about SOL; USDC falls back.
        let provider = provider_with(vec![Ok(feed_response(&[("solana", "zar", 2_900.0)]))]);

        let snap = provider
            .get_rates(FiatCurrency::ZAR, &["SOL", "USDC"])
            .await
            .unwrap();

        assert_eq!(snap.entry("SOL").unwrap().source, RateSource::Live);
        assert_eq!(snap.entry("USDC").unwrap().source, RateSource::Fallback);
        assert!(!snap.is_fully_live());
    }

    #[tokio::test]
    async fn test_non_positive_live_rate_is_rejected() {
        let provider = provider_with(vec![Ok(feed_response(&[("solana", "zar", 0.0)]))]);

        let snap = provider.get_rates(FiatCurrency::ZAR, &["SOL"]).await.unwrap();

        let sol = snap.entry("SOL").unwrap();
        assert_eq!(sol.source, RateSource::Fallback);
        assert_eq!(sol.rate, 2_775.0);
    }

    #[tokio::test]
    async fn test_unknown_symbol_fails_explicitly() {
        let provider = provider_with(vec![]);
        let result = provider.get_rates(FiatCurrency::ZAR, &["DOGE"]).await;
        assert!(matches!(result, Err(RateError::UnknownToken(_))));
        // Never reached the feed
        assert_eq!(provider.feed.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_live_and_no_fallback_is_rate_unavailable() {
        // A registry with a token the fallback table does not know.
        let mut tokens = TokenRegistry::with_defaults().list().to_vec();
        tokens.push(Token {
            symbol: "WEN".into(),
            name: "Wen".into(),
            decimals: 5,
            display_decimals: 0,
            is_native: false,
            price_feed_id: None,
            mint_address: "WENWENvqqNya429ubCdR81ZmD69brwQaaBYY6p3LCpk".into(),
            icon_gradient: vec!["#888888".into(), "#AAAAAA".into()],
        });
        let registry = Arc::new(TokenRegistry::new(tokens).unwrap());
        let provider = CachedRateProvider::new(MockFeed::new(vec![]), registry);

        let result = provider.get_rates(FiatCurrency::ZAR, &["WEN"]).await;
        assert!(matches!(
            result,
            Err(RateError::RateUnavailable { token, currency: FiatCurrency::ZAR }) if token == "WEN"
        ));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_fetch() {
        let provider = provider_with(vec![Ok(feed_response(&[("solana", "zar", 2_900.0)]))]);

        let first = provider.get_rates(FiatCurrency::ZAR, &["SOL"]).await.unwrap();
        let second = provider.get_rates(FiatCurrency::ZAR, &["SOL"]).await.unwrap();

        assert_eq!(provider.feed.call_count(), 1);
        assert_eq!(first.fetched_at, second.fetched_at);
    }

    #[tokio::test]
    async fn test_cache_key_ignores_symbol_order() {
        let provider = provider_with(vec![Ok(feed_response(&[
            ("solana", "zar", 2_900.0),
            ("usd-coin", "zar", 18.2),
        ]))]);

        provider
            .get_rates(FiatCurrency::ZAR, &["USDC", "SOL"])
            .await
            .unwrap();
        provider
            .get_rates(FiatCurrency::ZAR, &["SOL", "USDC"])
            .await
            .unwrap();

        assert_eq!(provider.feed.call_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let provider = CachedRateProvider::with_ttl(
            MockFeed::new(vec![
                Ok(feed_response(&[("solana", "zar", 2_900.0)])),
                Ok(feed_response(&[("solana", "zar", 3_000.0)])),
            ]),
            Arc::new(TokenRegistry::with_defaults()),
            0,
        );

        provider.get_rates(FiatCurrency::ZAR, &["SOL"]).await.unwrap();
        let second = provider.get_rates(FiatCurrency::ZAR, &["SOL"]).await.unwrap();

        assert_eq!(provider.feed.call_count(), 2);
        assert_eq!(second.entry("SOL").unwrap().rate, 3_000.0);
    }

    #[tokio::test]
    async fn test_stale_fetch_cannot_clobber_newer_snapshot() {
        let provider = provider_with(vec![]);
        let registry = TokenRegistry::with_defaults();
        let sol = registry.get("SOL").unwrap();
        let key = CacheKey::new(FiatCurrency::ZAR, &[sol]);

        let newer = RateSnapshot::new(
            FiatCurrency::ZAR,
            HashMap::from([(
                "SOL".to_string(),
                RateEntry {
                    rate: 3_000.0,
                    source: RateSource::Live,
                },
            )]),
        );
        let older = RateSnapshot::new(
            FiatCurrency::ZAR,
            HashMap::from([(
                "SOL".to_string(),
                RateEntry {
                    rate: 2_000.0,
                    source: RateSource::Live,
                },
            )]),
        );

        // Fetch 7 committed first; the slower fetch 3 finishes afterwards.
        provider.commit(key.clone(), newer, 7);
        provider.commit(key.clone(), older, 3);

        let entry = provider.cache.get(&key).unwrap();
        assert_eq!(entry.snapshot.entry("SOL").unwrap().rate, 3_000.0);
        assert_eq!(entry.seq, 7);
    }
}
