//! Fixture DTOs for list and detail endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Conditions, FixtureRecord};

/// Query string for `GET /fixtures`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FixtureQuery {
    /// League tag: `spanish` or `mls`.
    pub league: String,
    /// Season label, e.g. `2025-2026` or `2026`. Defaults to the current
    /// season of the league.
    #[serde(default)]
    pub season: Option<String>,
}

/// One fixture as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FixtureDto {
    /// Internal fixture id.
    pub id: uuid::Uuid,
    /// Provider event id.
    pub external_id: String,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Home team badge URL.
    pub home_team_badge: Option<String>,
    /// Away team badge URL.
    pub away_team_badge: Option<String>,
    /// League tag.
    pub league: String,
    /// Season label.
    pub season: String,
    /// Kickoff time (UTC).
    pub kickoff: DateTime<Utc>,
    /// Venue name.
    pub venue: Option<String>,
    /// Resolved city; empty when unknown.
    pub city: String,
    /// Country name.
    pub country: Option<String>,
    /// Home score, absent before kickoff.
    pub home_score: Option<String>,
    /// Away score, absent before kickoff.
    pub away_score: Option<String>,
    /// Provider status text.
    pub status: Option<String>,
    /// Conditions used by the latest analysis.
    pub weather: Option<Conditions>,
    /// Latest analysis text.
    pub analysis: Option<String>,
    /// When the latest analysis was generated.
    pub analyzed_at: Option<DateTime<Utc>>,
    /// First time this fixture was stored.
    pub created_at: DateTime<Utc>,
    /// Last refresh from upstream.
    pub updated_at: DateTime<Utc>,
}

impl From<FixtureRecord> for FixtureDto {
    fn from(record: FixtureRecord) -> Self {
        Self {
            id: record.id.into(),
            external_id: record.external_id,
            home_team: record.home_team,
            away_team: record.away_team,
            home_team_badge: record.home_team_badge,
            away_team_badge: record.away_team_badge,
            league: record.league.as_str().to_string(),
            season: record.season,
            kickoff: record.kickoff,
            venue: record.venue,
            city: record.city,
            country: record.country,
            home_score: record.home_score,
            away_score: record.away_score,
            status: record.status,
            weather: record.weather,
            analysis: record.analysis,
            analyzed_at: record.analyzed_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Response body for `GET /fixtures`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FixtureListResponse {
    /// Fixtures, most recent kickoff first.
    pub data: Vec<FixtureDto>,
    /// Number of fixtures in `data`.
    pub count: usize,
}

impl From<Vec<FixtureRecord>> for FixtureListResponse {
    fn from(records: Vec<FixtureRecord>) -> Self {
        let data: Vec<FixtureDto> = records.into_iter().map(FixtureDto::from).collect();
        Self {
            count: data.len(),
            data,
        }
    }
}
