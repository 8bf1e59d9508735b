//! Reqwest-backed adapters for the TheSportsDB v1 JSON API.
//!
//! This module owns transport details only: URL construction, timeout and
//! HTTP error mapping, and decoding of event payloads into fixture drafts.
//! City resolution and merging happen in the domain layer.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::FixtureSource;
use crate::domain::{FixtureDraft, League};
use crate::error::SourceError;

const SEASON_ENDPOINT: &str = "eventsseason.php";
const UPCOMING_ENDPOINT: &str = "eventsnextleague.php";

/// Shared HTTP client for the provider.
#[derive(Debug, Clone)]
pub struct SportsDbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SportsDbClient {
    /// Builds a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{endpoint}",
            self.base_url.trim_end_matches('/'),
            self.api_key
        )
    }

    async fn fetch_events(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        league: League,
        season: &str,
    ) -> Result<Vec<FixtureDraft>, SourceError> {
        let response = self
            .client
            .get(self.endpoint_url(endpoint))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_events(body.as_ref(), league, season)
    }
}

/// Full season listing; highest-priority source.
#[derive(Debug, Clone)]
pub struct SeasonListing {
    client: SportsDbClient,
}

impl SeasonListing {
    /// Wraps a provider client.
    #[must_use]
    pub const fn new(client: SportsDbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FixtureSource for SeasonListing {
    fn name(&self) -> &str {
        "season"
    }

    async fn fetch(&self, league: League, season: &str) -> Result<Vec<FixtureDraft>, SourceError> {
        self.client
            .fetch_events(
                SEASON_ENDPOINT,
                &[("id", league.upstream_id()), ("s", season)],
                league,
                season,
            )
            .await
    }
}

/// Upcoming fixtures of a league; fills ids the season listing lacks.
///
/// The endpoint ignores the season, so it may return fixtures of another
/// season than the one requested. Those are dropped here and never reach the
/// requested key.
#[derive(Debug, Clone)]
pub struct UpcomingListing {
    client: SportsDbClient,
}

impl UpcomingListing {
    /// Wraps a provider client.
    #[must_use]
    pub const fn new(client: SportsDbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FixtureSource for UpcomingListing {
    fn name(&self) -> &str {
        "upcoming"
    }

    async fn fetch(&self, league: League, season: &str) -> Result<Vec<FixtureDraft>, SourceError> {
        let drafts = self
            .client
            .fetch_events(
                UPCOMING_ENDPOINT,
                &[("id", league.upstream_id())],
                league,
                season,
            )
            .await?;
        Ok(only_season(drafts, season))
    }
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    events: Option<Vec<EventDto>>,
}

#[derive(Debug, Deserialize)]
struct EventDto {
    #[serde(rename = "idEvent")]
    id: Option<String>,
    #[serde(rename = "strHomeTeam")]
    home_team: Option<String>,
    #[serde(rename = "strAwayTeam")]
    away_team: Option<String>,
    #[serde(rename = "strHomeTeamBadge")]
    home_team_badge: Option<String>,
    #[serde(rename = "strAwayTeamBadge")]
    away_team_badge: Option<String>,
    #[serde(rename = "strSeason")]
    season: Option<String>,
    #[serde(rename = "dateEvent")]
    date: Option<String>,
    #[serde(rename = "strTime")]
    time: Option<String>,
    #[serde(rename = "strTimestamp")]
    timestamp: Option<String>,
    #[serde(rename = "strVenue")]
    venue: Option<String>,
    #[serde(rename = "strCity")]
    city: Option<String>,
    #[serde(rename = "strCountry")]
    country: Option<String>,
    #[serde(rename = "intHomeScore")]
    home_score: Option<serde_json::Value>,
    #[serde(rename = "intAwayScore")]
    away_score: Option<serde_json::Value>,
    #[serde(rename = "strStatus")]
    status: Option<String>,
}

impl EventDto {
    /// Events carry their own season label; `requested` is used only when
    /// the provider omits it.
    fn into_draft(self, league: League, requested: &str) -> Option<FixtureDraft> {
        let external_id = non_empty(self.id)?;
        let kickoff = parse_kickoff(
            self.timestamp.as_deref(),
            self.date.as_deref(),
            self.time.as_deref(),
        )?;
        Some(FixtureDraft {
            external_id,
            home_team: self.home_team.unwrap_or_default(),
            away_team: self.away_team.unwrap_or_default(),
            home_team_badge: non_empty(self.home_team_badge),
            away_team_badge: non_empty(self.away_team_badge),
            league,
            season: non_empty(self.season).unwrap_or_else(|| requested.to_string()),
            kickoff,
            venue: non_empty(self.venue),
            city: non_empty(self.city).unwrap_or_default(),
            country: non_empty(self.country),
            home_score: score_text(self.home_score),
            away_score: score_text(self.away_score),
            status: non_empty(self.status),
        })
    }
}

/// Decodes a provider payload. A `null` event list is an empty listing.
fn parse_events(
    body: &[u8],
    league: League,
    season: &str,
) -> Result<Vec<FixtureDraft>, SourceError> {
    let decoded: EventsResponse = serde_json::from_slice(body)
        .map_err(|e| SourceError::Decode(format!("invalid events payload: {e}")))?;

    let events = decoded.events.unwrap_or_default();
    let total = events.len();
    let drafts: Vec<FixtureDraft> = events
        .into_iter()
        .filter_map(|event| event.into_draft(league, season))
        .collect();

    if drafts.len() < total {
        tracing::debug!(
            skipped = total - drafts.len(),
            %league,
            "skipped events without id or kickoff"
        );
    }
    Ok(drafts)
}

/// Keeps the drafts labelled with `season`.
fn only_season(drafts: Vec<FixtureDraft>, season: &str) -> Vec<FixtureDraft> {
    let total = drafts.len();
    let kept: Vec<FixtureDraft> = drafts.into_iter().filter(|d| d.season == season).collect();
    if kept.len() < total {
        tracing::debug!(
            dropped = total - kept.len(),
            season,
            "dropped upcoming events of another season"
        );
    }
    kept
}

/// Kickoff from `strTimestamp`, else `dateEvent` + `strTime` (midnight when
/// the time is missing or unreadable). All values are taken as UTC.
fn parse_kickoff(
    timestamp: Option<&str>,
    date: Option<&str>,
    time: Option<&str>,
) -> Option<DateTime<Utc>> {
    if let Some(ts) = timestamp.map(str::trim).filter(|s| !s.is_empty()) {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(ts) {
            return Some(parsed.with_timezone(&Utc));
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S") {
            return Some(parsed.and_utc());
        }
    }

    let date = NaiveDate::parse_from_str(date?.trim(), "%Y-%m-%d").ok()?;
    let time = time.and_then(parse_time).unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time).and_utc())
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    // Provider times sometimes carry an offset suffix, e.g. "19:00:00+00:00".
    let clock = raw.trim().get(..8).unwrap_or(raw.trim());
    NaiveTime::parse_from_str(clock, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(clock, "%H:%M"))
        .ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Scores arrive as strings, numbers or null depending on the endpoint.
fn score_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) => non_empty(Some(s)),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
