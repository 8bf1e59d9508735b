//! Persists reconciled fixture drafts, keeping internal identity stable.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{FixtureDraft, FixtureId, FixtureRecord};
use crate::error::GatewayError;
use crate::persistence::Store;

/// Record-by-record upsert of reconciled drafts.
///
/// Writes are not transactional: if one write fails the cycle stops and the
/// records already written stay written. Re-applying the same drafts yields
/// the same rows apart from `updated_at`.
#[derive(Debug, Clone)]
pub struct CacheUpsertEngine {
    store: Arc<dyn Store>,
}

impl CacheUpsertEngine {
    /// Creates an engine writing to `store`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Upserts every draft in order and returns the persisted records in the
    /// same order.
    ///
    /// # Errors
    ///
    /// Returns the first [`GatewayError`] raised by the store.
    pub async fn apply(
        &self,
        drafts: Vec<FixtureDraft>,
        now: DateTime<Utc>,
    ) -> Result<Vec<FixtureRecord>, GatewayError> {
        let mut persisted = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let record = match self.store.find_by_external_id(&draft.external_id).await? {
                Some(mut existing) => {
                    existing.apply_draft(draft, now);
                    existing
                }
                None => FixtureRecord::from_draft(draft, FixtureId::new(), now),
            };

            let stored = self.store.upsert(record).await?;
            tracing::debug!(
                fixture_id = %stored.id,
                external_id = %stored.external_id,
                "fixture upserted"
            );
            persisted.push(stored);
        }

        Ok(persisted)
    }
}
