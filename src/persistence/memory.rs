//! In-process store backed by a `tokio::sync::RwLock`.
//!
//! Used when `PERSISTENCE_ENABLED=false` and as the store for service tests.
//! It counts successful writes so callers can assert that a request did not
//! touch storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::Store;
use crate::domain::{AnnotationRecord, Conditions, FixtureId, FixtureKey, FixtureRecord};
use crate::error::GatewayError;

#[derive(Debug, Default)]
struct Tables {
    fixtures: HashMap<FixtureId, FixtureRecord>,
    by_external_id: HashMap<String, FixtureId>,
    annotations: Vec<AnnotationRecord>,
}

/// Volatile [`Store`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    writes: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful write operations since creation.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Number of stored fixtures.
    pub async fn fixture_count(&self) -> usize {
        self.tables.read().await.fixtures.len()
    }

    /// Number of stored annotations.
    pub async fn annotation_count(&self) -> usize {
        self.tables.read().await.annotations.len()
    }

    fn bump(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_by_key(&self, key: &FixtureKey) -> Result<Vec<FixtureRecord>, GatewayError> {
        let tables = self.tables.read().await;
        let mut records: Vec<FixtureRecord> = tables
            .fixtures
            .values()
            .filter(|r| r.league == key.league && r.season == key.season)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.kickoff
                .cmp(&a.kickoff)
                .then_with(|| a.external_id.cmp(&b.external_id))
        });
        Ok(records)
    }

    async fn find_by_id(&self, id: FixtureId) -> Result<Option<FixtureRecord>, GatewayError> {
        Ok(self.tables.read().await.fixtures.get(&id).cloned())
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<FixtureRecord>, GatewayError> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_external_id
            .get(external_id)
            .and_then(|id| tables.fixtures.get(id))
            .cloned())
    }

    async fn upsert(&self, mut record: FixtureRecord) -> Result<FixtureRecord, GatewayError> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables
            .by_external_id
            .get(&record.external_id)
            .and_then(|id| tables.fixtures.get(id))
        {
            record.id = existing.id;
            record.created_at = existing.created_at;
            record.weather.clone_from(&existing.weather);
            record.analysis.clone_from(&existing.analysis);
            record.analyzed_at = existing.analyzed_at;
        }
        tables
            .by_external_id
            .insert(record.external_id.clone(), record.id);
        tables.fixtures.insert(record.id, record.clone());
        drop(tables);
        self.bump();
        Ok(record)
    }

    async fn insert_annotation(&self, record: &AnnotationRecord) -> Result<(), GatewayError> {
        self.tables.write().await.annotations.push(record.clone());
        self.bump();
        Ok(())
    }

    async fn find_latest_annotation(
        &self,
        fixture_id: FixtureId,
    ) -> Result<Option<AnnotationRecord>, GatewayError> {
        let tables = self.tables.read().await;
        Ok(tables
            .annotations
            .iter()
            .filter(|a| a.fixture_id == fixture_id)
            .max_by_key(|a| a.created_at)
            .cloned())
    }

    async fn record_analysis(
        &self,
        fixture_id: FixtureId,
        analysis: &str,
        weather: &Conditions,
        analyzed_at: DateTime<Utc>,
    ) -> Result<(), GatewayError> {
        let mut tables = self.tables.write().await;
        let record = tables
            .fixtures
            .get_mut(&fixture_id)
            .ok_or(GatewayError::FixtureNotFound(*fixture_id.as_uuid()))?;
        record.analysis = Some(analysis.to_string());
        record.weather = Some(weather.clone());
        record.analyzed_at = Some(analyzed_at);
        drop(tables);
        self.bump();
        Ok(())
    }
}
