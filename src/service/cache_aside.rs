//! Generic cache-aside read with TTL gating and stale fallback.
//!
//! One instance serves fixture listings (keyed by league/season), another
//! serves annotations (keyed by fixture id). The state machine per request:
//!
//! ```text
//! cached ──fresh──▶ serve cache
//!    │
//!  stale/empty ──▶ refresh ──ok──▶ serve refreshed
//!                     │
//!                 upstream unavailable ──cache non-empty──▶ serve stale cache
//!                     │                └─cache empty─────▶ error
//!                 any other error ────────────────────────▶ error
//! ```
//!
//! A response is never a mix of refreshed and stale records.

use std::fmt::Display;
use std::future::Future;

use chrono::{DateTime, Utc};

use crate::domain::{FreshnessGate, Timestamped};
use crate::error::GatewayError;

/// Where the records of a [`Served`] response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServedFrom {
    /// Cache was within TTL; no upstream call was made.
    Cache,
    /// Upstream refresh succeeded and was persisted.
    Upstream,
    /// Upstream was unavailable; the previous cache was served unchanged.
    StaleCache,
}

/// Records returned by [`CacheAside::load`] with their provenance.
#[derive(Debug, Clone)]
pub struct Served<T> {
    /// The records, in the order produced by the cache or the refresh.
    pub records: Vec<T>,
    /// Provenance.
    pub from: ServedFrom,
}

/// Cache-aside policy over any [`Timestamped`] record type.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheAside {
    gate: FreshnessGate,
}

impl CacheAside {
    /// Creates a policy using `gate` for freshness decisions.
    #[must_use]
    pub const fn new(gate: FreshnessGate) -> Self {
        Self { gate }
    }

    /// Serves `cached` if fresh, otherwise runs `refresh`.
    ///
    /// Only [`GatewayError::UpstreamUnavailable`] is masked, and only when
    /// `cached` is non-empty. Storage errors from `refresh` always propagate.
    ///
    /// # Errors
    ///
    /// Returns the refresh error when it cannot be masked.
    pub async fn load<T, K, F, Fut>(
        &self,
        key: &K,
        cached: Vec<T>,
        now: DateTime<Utc>,
        refresh: F,
    ) -> Result<Served<T>, GatewayError>
    where
        T: Timestamped,
        K: Display + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, GatewayError>>,
    {
        if self.gate.check_records(&cached, now).is_fresh() {
            tracing::info!(%key, count = cached.len(), "serving fresh cache");
            return Ok(Served {
                records: cached,
                from: ServedFrom::Cache,
            });
        }

        match refresh().await {
            Ok(records) => Ok(Served {
                records,
                from: ServedFrom::Upstream,
            }),
            Err(err) if err.is_upstream_unavailable() && !cached.is_empty() => {
                tracing::warn!(
                    %key,
                    error = %err,
                    count = cached.len(),
                    "upstream unavailable, serving stale cache"
                );
                Ok(Served {
                    records: cached,
                    from: ServedFrom::StaleCache,
                })
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Duration;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Stamp(DateTime<Utc>);

    impl Timestamped for Stamp {
        fn timestamp(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_780_000_000, 0).unwrap_or_default()
    }

    fn unavailable() -> GatewayError {
        GatewayError::UpstreamUnavailable {
            key: "k".to_string(),
            failed_sources: vec!["season".to_string()],
        }
    }

    #[test]
    fn fresh_cache_skips_refresh() {
        let calls = AtomicUsize::new(0);
        let cache = CacheAside::default();
        let cached = vec![Stamp(now() - Duration::minutes(5))];

        let served = tokio_test::block_on(cache.load("k", cached.clone(), now(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }));

        let Ok(served) = served else {
            panic!("expected cache hit");
        };
        assert_eq!(served.from, ServedFrom::Cache);
        assert_eq!(served.records, cached);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stale_cache_is_refreshed() {
        let cache = CacheAside::default();
        let cached = vec![Stamp(now() - Duration::hours(2))];
        let fresh = vec![Stamp(now())];

        let served =
            tokio_test::block_on(cache.load("k", cached, now(), || async { Ok(fresh.clone()) }));

        let Ok(served) = served else {
            panic!("expected refresh");
        };
        assert_eq!(served.from, ServedFrom::Upstream);
        assert_eq!(served.records, fresh);
    }

    #[test]
    fn empty_cache_always_refreshes() {
        let cache = CacheAside::default();
        let served = tokio_test::block_on(cache.load("k", Vec::<Stamp>::new(), now(), || async {
            Ok(vec![Stamp(now())])
        }));
        assert!(matches!(served, Ok(ref s) if s.from == ServedFrom::Upstream));
    }

    #[test]
    fn upstream_failure_with_cache_serves_stale() {
        let cache = CacheAside::default();
        let cached = vec![Stamp(now() - Duration::hours(3)); 5];

        let served =
            tokio_test::block_on(cache.load("k", cached.clone(), now(), || async { Err(unavailable()) }));

        let Ok(served) = served else {
            panic!("expected stale fallback");
        };
        assert_eq!(served.from, ServedFrom::StaleCache);
        assert_eq!(served.records, cached);
    }

    #[test]
    fn upstream_failure_without_cache_propagates() {
        let cache = CacheAside::default();
        let served = tokio_test::block_on(cache.load("k", Vec::<Stamp>::new(), now(), || async {
            Err(unavailable())
        }));
        assert!(matches!(served, Err(GatewayError::UpstreamUnavailable { .. })));
    }

    #[test]
    fn storage_failure_is_never_masked() {
        let cache = CacheAside::default();
        let cached = vec![Stamp(now() - Duration::hours(3))];
        let served = tokio_test::block_on(cache.load("k", cached, now(), || async {
            Err(GatewayError::PersistenceError("disk full".to_string()))
        }));
        assert!(matches!(served, Err(GatewayError::PersistenceError(_))));
    }
}
