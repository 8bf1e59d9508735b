//! Persistence layer: the store of record for fixtures and annotations.
//!
//! [`Store`] is the seam between the cache-aside core and storage. Two
//! implementations exist: [`PostgresStore`] over `sqlx::PgPool`, and
//! [`MemoryStore`] for running without a database and for tests.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AnnotationRecord, Conditions, FixtureId, FixtureKey, FixtureRecord};
use crate::error::GatewayError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Read/write access to persisted fixtures and annotations.
///
/// Every method may fail with [`GatewayError::PersistenceError`].
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug {
    /// All fixtures for a league/season, kickoff descending then external
    /// id ascending.
    async fn find_by_key(&self, key: &FixtureKey) -> Result<Vec<FixtureRecord>, GatewayError>;

    /// One fixture by internal id.
    async fn find_by_id(&self, id: FixtureId) -> Result<Option<FixtureRecord>, GatewayError>;

    /// One fixture by upstream external id.
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<FixtureRecord>, GatewayError>;

    /// Writes `record` keyed by its external id.
    ///
    /// If a row with the same external id exists, its internal id,
    /// `created_at` and analysis fields are kept; every descriptive column
    /// and `updated_at` is overwritten.
    async fn upsert(&self, record: FixtureRecord) -> Result<FixtureRecord, GatewayError>;

    /// Appends a new annotation.
    async fn insert_annotation(&self, record: &AnnotationRecord) -> Result<(), GatewayError>;

    /// Most recent annotation for a fixture.
    async fn find_latest_annotation(
        &self,
        fixture_id: FixtureId,
    ) -> Result<Option<AnnotationRecord>, GatewayError>;

    /// Copies the latest analysis onto the fixture without advancing its
    /// `updated_at`.
    async fn record_analysis(
        &self,
        fixture_id: FixtureId,
        analysis: &str,
        weather: &Conditions,
        analyzed_at: DateTime<Utc>,
    ) -> Result<(), GatewayError>;
}
