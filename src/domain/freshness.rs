//! TTL gate deciding whether cached records can be served without a refetch.

use chrono::{DateTime, Duration, Utc};

/// Default time-to-live for both fixture listings and annotations.
pub const DEFAULT_TTL: Duration = Duration::hours(1);

/// A record carrying the timestamp that drives its freshness.
pub trait Timestamped {
    /// Timestamp compared against the TTL.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Outcome of a freshness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The newest record is younger than the TTL.
    Fresh,
    /// The collection is empty or its newest record has reached the TTL.
    Stale,
}

impl Freshness {
    /// Returns `true` for [`Freshness::Fresh`].
    #[must_use]
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }
}

/// Pure TTL check over a collection of timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessGate {
    ttl: Duration,
}

impl FreshnessGate {
    /// Creates a gate with the given TTL.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Returns the configured TTL.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh iff `now - max(timestamps) < ttl`. Empty input is stale.
    #[must_use]
    pub fn check<I>(&self, timestamps: I, now: DateTime<Utc>) -> Freshness
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        match timestamps.into_iter().max() {
            Some(newest) if now - newest < self.ttl => Freshness::Fresh,
            _ => Freshness::Stale,
        }
    }

    /// Convenience wrapper over [`FreshnessGate::check`] for records.
    #[must_use]
    pub fn check_records<T: Timestamped>(&self, records: &[T], now: DateTime<Utc>) -> Freshness {
        self.check(records.iter().map(Timestamped::timestamp), now)
    }
}

impl Default for FreshnessGate {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
