//! PostgreSQL implementation of [`Store`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::Store;
use super::models::{AnnotationRow, FixtureRow};
use crate::config::GatewayConfig;
use crate::domain::{AnnotationRecord, Conditions, FixtureId, FixtureKey, FixtureRecord};
use crate::error::GatewayError;

const FIXTURE_COLUMNS: &str = "id, external_id, home_team, away_team, home_team_badge, \
     away_team_badge, league, season, kickoff, venue, city, country, home_score, away_score, \
     status, weather, analysis, analyzed_at, created_at, updated_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects using the pool settings from `config` and applies pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] if the database is
    /// unreachable or a migration fails.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(std::time::Duration::from_secs(
                config.database_connect_timeout_secs,
            ))
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        tracing::info!("database migrations applied");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn find_by_key(&self, key: &FixtureKey) -> Result<Vec<FixtureRecord>, GatewayError> {
        let rows = sqlx::query_as::<_, FixtureRow>(&format!(
            "SELECT {FIXTURE_COLUMNS} FROM fixtures WHERE league = $1 AND season = $2 \
             ORDER BY kickoff DESC, external_id ASC"
        ))
        .bind(key.league.as_str())
        .bind(&key.season)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(FixtureRecord::try_from).collect()
    }

    async fn find_by_id(&self, id: FixtureId) -> Result<Option<FixtureRecord>, GatewayError> {
        let row = sqlx::query_as::<_, FixtureRow>(&format!(
            "SELECT {FIXTURE_COLUMNS} FROM fixtures WHERE id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(FixtureRecord::try_from).transpose()
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<FixtureRecord>, GatewayError> {
        let row = sqlx::query_as::<_, FixtureRow>(&format!(
            "SELECT {FIXTURE_COLUMNS} FROM fixtures WHERE external_id = $1"
        ))
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(FixtureRecord::try_from).transpose()
    }

    async fn upsert(&self, record: FixtureRecord) -> Result<FixtureRecord, GatewayError> {
        let weather = record
            .weather
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        // `id`, `created_at` and the analysis columns stay as stored.
        let row = sqlx::query_as::<_, FixtureRow>(&format!(
            "INSERT INTO fixtures ({FIXTURE_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20) \
             ON CONFLICT (external_id) DO UPDATE SET \
               home_team = EXCLUDED.home_team, \
               away_team = EXCLUDED.away_team, \
               home_team_badge = EXCLUDED.home_team_badge, \
               away_team_badge = EXCLUDED.away_team_badge, \
               league = EXCLUDED.league, \
               season = EXCLUDED.season, \
               kickoff = EXCLUDED.kickoff, \
               venue = EXCLUDED.venue, \
               city = EXCLUDED.city, \
               country = EXCLUDED.country, \
               home_score = EXCLUDED.home_score, \
               away_score = EXCLUDED.away_score, \
               status = EXCLUDED.status, \
               updated_at = EXCLUDED.updated_at \
             RETURNING {FIXTURE_COLUMNS}"
        ))
        .bind(*record.id.as_uuid())
        .bind(&record.external_id)
        .bind(&record.home_team)
        .bind(&record.away_team)
        .bind(&record.home_team_badge)
        .bind(&record.away_team_badge)
        .bind(record.league.as_str())
        .bind(&record.season)
        .bind(record.kickoff)
        .bind(&record.venue)
        .bind(&record.city)
        .bind(&record.country)
        .bind(&record.home_score)
        .bind(&record.away_score)
        .bind(&record.status)
        .bind(weather)
        .bind(&record.analysis)
        .bind(record.analyzed_at)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        FixtureRecord::try_from(row)
    }

    async fn insert_annotation(&self, record: &AnnotationRecord) -> Result<(), GatewayError> {
        let conditions = serde_json::to_value(&record.conditions)
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        sqlx::query(
            "INSERT INTO annotations \
             (id, fixture_id, content, model, temperature, wind_speed, condition, conditions, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(*record.id.as_uuid())
        .bind(*record.fixture_id.as_uuid())
        .bind(&record.content)
        .bind(&record.model)
        .bind(record.temperature)
        .bind(record.wind_speed)
        .bind(&record.condition)
        .bind(conditions)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_latest_annotation(
        &self,
        fixture_id: FixtureId,
    ) -> Result<Option<AnnotationRecord>, GatewayError> {
        let row = sqlx::query_as::<_, AnnotationRow>(
            "SELECT id, fixture_id, content, model, temperature, wind_speed, condition, \
             conditions, created_at FROM annotations WHERE fixture_id = $1 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(*fixture_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AnnotationRecord::from))
    }

    async fn record_analysis(
        &self,
        fixture_id: FixtureId,
        analysis: &str,
        weather: &Conditions,
        analyzed_at: DateTime<Utc>,
    ) -> Result<(), GatewayError> {
        let weather =
            serde_json::to_value(weather).map_err(|e| GatewayError::Internal(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE fixtures SET analysis = $2, weather = $3, analyzed_at = $4 WHERE id = $1",
        )
        .bind(*fixture_id.as_uuid())
        .bind(analysis)
        .bind(weather)
        .bind(analyzed_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(GatewayError::FixtureNotFound(*fixture_id.as_uuid()));
        }
        Ok(())
    }
}
