//! Database rows for the `fixtures` and `annotations` tables.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    AnnotationId, AnnotationRecord, Conditions, FixtureId, FixtureRecord, League,
};
use crate::error::GatewayError;

/// A row of the `fixtures` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FixtureRow {
    /// Internal identity.
    pub id: Uuid,
    /// Upstream identifier (`UNIQUE`).
    pub external_id: String,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Home badge URL.
    pub home_team_badge: Option<String>,
    /// Away badge URL.
    pub away_team_badge: Option<String>,
    /// League tag.
    pub league: String,
    /// Season label.
    pub season: String,
    /// Kickoff time.
    pub kickoff: DateTime<Utc>,
    /// Venue name.
    pub venue: Option<String>,
    /// Resolved city.
    pub city: String,
    /// Country.
    pub country: Option<String>,
    /// Home score.
    pub home_score: Option<String>,
    /// Away score.
    pub away_score: Option<String>,
    /// Status text.
    pub status: Option<String>,
    /// Weather snapshot as JSONB.
    pub weather: Option<serde_json::Value>,
    /// Latest analysis text.
    pub analysis: Option<String>,
    /// When `analysis` was written.
    pub analyzed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last upsert timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<FixtureRow> for FixtureRecord {
    type Error = GatewayError;

    fn try_from(row: FixtureRow) -> Result<Self, Self::Error> {
        let league: League = row.league.parse().map_err(|_| {
            GatewayError::PersistenceError(format!(
                "fixture {} has unknown league {:?}",
                row.id, row.league
            ))
        })?;
        // A malformed snapshot only loses the weather, not the fixture.
        let weather = row
            .weather
            .and_then(|value| serde_json::from_value::<Conditions>(value).ok());
        Ok(Self {
            id: FixtureId::from_uuid(row.id),
            external_id: row.external_id,
            home_team: row.home_team,
            away_team: row.away_team,
            home_team_badge: row.home_team_badge,
            away_team_badge: row.away_team_badge,
            league,
            season: row.season,
            kickoff: row.kickoff,
            venue: row.venue,
            city: row.city,
            country: row.country,
            home_score: row.home_score,
            away_score: row.away_score,
            status: row.status,
            weather,
            analysis: row.analysis,
            analyzed_at: row.analyzed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A row of the `annotations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnnotationRow {
    /// Annotation identity.
    pub id: Uuid,
    /// Owning fixture.
    pub fixture_id: Uuid,
    /// Generated text.
    pub content: String,
    /// Generator name.
    pub model: String,
    /// Input temperature.
    pub temperature: f64,
    /// Input wind speed.
    pub wind_speed: f64,
    /// Input condition label.
    pub condition: String,
    /// Full conditions snapshot as JSONB.
    pub conditions: serde_json::Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<AnnotationRow> for AnnotationRecord {
    fn from(row: AnnotationRow) -> Self {
        Self {
            id: AnnotationId::from_uuid(row.id),
            fixture_id: FixtureId::from_uuid(row.fixture_id),
            content: row.content,
            model: row.model,
            temperature: row.temperature,
            wind_speed: row.wind_speed,
            condition: row.condition,
            conditions: serde_json::from_value(row.conditions).unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}
