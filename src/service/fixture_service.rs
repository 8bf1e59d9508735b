//! Fixture listings: cache-aside over the multi-source upstream pipeline.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures_util::future::join_all;

use super::{CacheAside, CacheUpsertEngine, Served};
use crate::domain::{
    CityResolver, FixtureId, FixtureKey, FixtureRecord, FreshnessGate, League, SourceOutcome,
    reconcile,
};
use crate::error::GatewayError;
use crate::persistence::Store;
use crate::upstream::FixtureSource;

/// Serves fixtures per league/season, refreshing from upstream when stale.
///
/// Holds no mutable state: concurrent requests for the same stale key may
/// each refresh, which is harmless because upserts are idempotent.
#[derive(Debug)]
pub struct FixtureService {
    store: Arc<dyn Store>,
    sources: Vec<Arc<dyn FixtureSource>>,
    resolver: CityResolver,
    cache: CacheAside,
    upsert: CacheUpsertEngine,
}

impl FixtureService {
    /// Creates a service. `sources` are in priority order, highest first.
    #[must_use]
    pub fn new(
        store: Arc<dyn Store>,
        sources: Vec<Arc<dyn FixtureSource>>,
        resolver: CityResolver,
        ttl: Duration,
    ) -> Self {
        Self {
            upsert: CacheUpsertEngine::new(Arc::clone(&store)),
            store,
            sources,
            resolver,
            cache: CacheAside::new(FreshnessGate::new(ttl)),
        }
    }

    /// Fixtures for `league`, kickoff descending.
    ///
    /// A missing or blank `season` selects the league's current season.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::UpstreamUnavailable`] if every source failed and
    ///   nothing is cached for the key.
    /// - [`GatewayError::PersistenceError`] if the store fails.
    pub async fn get_fixtures(
        &self,
        league: League,
        season: Option<&str>,
    ) -> Result<Vec<FixtureRecord>, GatewayError> {
        let now = Utc::now();
        let season = season
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(|| league.current_season(now), str::to_string);

        let served = self.load(&FixtureKey::new(league, season), now).await?;
        Ok(served.records)
    }

    /// Cache-aside read for one key at a given instant.
    ///
    /// # Errors
    ///
    /// See [`Self::get_fixtures`].
    pub async fn load(
        &self,
        key: &FixtureKey,
        now: DateTime<Utc>,
    ) -> Result<Served<FixtureRecord>, GatewayError> {
        let cached = self.store.find_by_key(key).await?;
        self.cache
            .load(key, cached, now, || self.refresh(key, now))
            .await
    }

    /// One persisted fixture by internal id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::FixtureNotFound`] if no such fixture exists.
    pub async fn get_fixture(&self, id: FixtureId) -> Result<FixtureRecord, GatewayError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| GatewayError::FixtureNotFound(*id.as_uuid()))
    }

    async fn refresh(
        &self,
        key: &FixtureKey,
        now: DateTime<Utc>,
    ) -> Result<Vec<FixtureRecord>, GatewayError> {
        let fetches = self.sources.iter().map(|source| async move {
            SourceOutcome {
                source: source.name().to_string(),
                result: source.fetch(key.league, &key.season).await,
            }
        });
        let merged = reconcile(join_all(fetches).await);

        for failed in &merged.failed {
            tracing::debug!(
                %key,
                source = %failed.source,
                error = %failed.error,
                "upstream source failed"
            );
        }
        if merged.all_failed() {
            return Err(GatewayError::UpstreamUnavailable {
                key: key.to_string(),
                failed_sources: merged.failed_names(),
            });
        }
        if merged.is_partial() {
            tracing::warn!(
                %key,
                failed = ?merged.failed_names(),
                "partial upstream failure, continuing with remaining sources"
            );
        }

        let succeeded = merged.succeeded;
        let fetched = merged.fixtures.len();
        let drafts: Vec<_> = merged
            .fixtures
            .into_iter()
            .filter(|draft| draft.belongs_to(key))
            .map(|draft| self.resolver.resolve(draft))
            .collect();
        if drafts.len() < fetched {
            tracing::warn!(
                %key,
                dropped = fetched - drafts.len(),
                "ignored upstream fixtures labelled with another league or season"
            );
        }

        let persisted = self
            .upsert
            .apply(drafts, now)
            .await
            .inspect_err(|e| tracing::error!(%key, error = %e, "fixture refresh aborted"))?;

        tracing::info!(
            %key,
            count = persisted.len(),
            sources = succeeded,
            "fixtures refreshed"
        );
        Ok(persisted)
    }
}
