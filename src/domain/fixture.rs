//! Fixture records: one scheduled or completed match.
//!
//! A [`FixtureDraft`] is what an upstream source produces: descriptive fields
//! only, keyed by the provider's external id. A [`FixtureRecord`] is the
//! persisted form, carrying the stable internal identity, the annotation
//! fields written by the analysis path, and the bookkeeping timestamps.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::annotation::Conditions;
use super::freshness::Timestamped;
use super::{FixtureId, League};

/// Cache key for a fixture listing: one league, one season.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureKey {
    /// League tag.
    pub league: League,
    /// Season label (e.g. `"2025-2026"` or `"2026"`).
    pub season: String,
}

impl FixtureKey {
    /// Builds a key from a league and season label.
    #[must_use]
    pub fn new(league: League, season: impl Into<String>) -> Self {
        Self {
            league,
            season: season.into(),
        }
    }
}

impl fmt::Display for FixtureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.league, self.season)
    }
}

/// Descriptive fixture data as delivered by an upstream source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureDraft {
    /// Provider-assigned identifier; the reconciliation key.
    pub external_id: String,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Home team badge URL.
    pub home_team_badge: Option<String>,
    /// Away team badge URL.
    pub away_team_badge: Option<String>,
    /// League the fixture was requested for.
    pub league: League,
    /// Season label the fixture was requested for.
    pub season: String,
    /// Kickoff time.
    pub kickoff: DateTime<Utc>,
    /// Venue name.
    pub venue: Option<String>,
    /// City, either explicit from the payload or resolved. Empty when unknown.
    pub city: String,
    /// Country name.
    pub country: Option<String>,
    /// Home score; absent until the match starts.
    pub home_score: Option<String>,
    /// Away score; absent until the match starts.
    pub away_score: Option<String>,
    /// Provider status text (e.g. `"Match Finished"`, `"Not Started"`).
    pub status: Option<String>,
}

/// A persisted fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRecord {
    /// Stable internal identity (immutable after creation).
    pub id: FixtureId,
    /// Provider-assigned identifier, unique across all records.
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
    pub league: League,
    /// Season label.
    pub season: String,
    /// Kickoff time.
    pub kickoff: DateTime<Utc>,
    /// Venue name.
    pub venue: Option<String>,
    /// Resolved city. Empty when unknown.
    pub city: String,
    /// Country name.
    pub country: Option<String>,
    /// Home score.
    pub home_score: Option<String>,
    /// Away score.
    pub away_score: Option<String>,
    /// Provider status text.
    pub status: Option<String>,
    /// Conditions used by the most recent analysis.
    pub weather: Option<Conditions>,
    /// Most recent analysis text.
    pub analysis: Option<String>,
    /// When `analysis` was written.
    pub analyzed_at: Option<DateTime<Utc>>,
    /// First persistence time (immutable after creation).
    pub created_at: DateTime<Utc>,
    /// Last upsert time; the freshness signal for the listing cache.
    pub updated_at: DateTime<Utc>,
}

impl FixtureDraft {
    /// Whether this draft is labelled with `key`'s league and season.
    #[must_use]
    pub fn belongs_to(&self, key: &FixtureKey) -> bool {
        self.league == key.league && self.season == key.season
    }
}

impl FixtureRecord {
    /// Creates a new record from a draft with a fresh identity.
    #[must_use]
    pub fn from_draft(draft: FixtureDraft, id: FixtureId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            external_id: draft.external_id,
            home_team: draft.home_team,
            away_team: draft.away_team,
            home_team_badge: draft.home_team_badge,
            away_team_badge: draft.away_team_badge,
            league: draft.league,
            season: draft.season,
            kickoff: draft.kickoff,
            venue: draft.venue,
            city: draft.city,
            country: draft.country,
            home_score: draft.home_score,
            away_score: draft.away_score,
            status: draft.status,
            weather: None,
            analysis: None,
            analyzed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the descriptive fields from `draft` and refreshes
    /// `updated_at`.
    ///
    /// Identity, `created_at` and the annotation fields are left untouched.
    pub fn apply_draft(&mut self, draft: FixtureDraft, now: DateTime<Utc>) {
        self.home_team = draft.home_team;
        self.away_team = draft.away_team;
        self.home_team_badge = draft.home_team_badge;
        self.away_team_badge = draft.away_team_badge;
        self.league = draft.league;
        self.season = draft.season;
        self.kickoff = draft.kickoff;
        self.venue = draft.venue;
        self.city = draft.city;
        self.country = draft.country;
        self.home_score = draft.home_score;
        self.away_score = draft.away_score;
        self.status = draft.status;
        self.updated_at = now;
    }
}

impl Timestamped for FixtureRecord {
    fn timestamp(&self) -> DateTime<Utc> {
        self.updated_at
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{draft, kickoff};
    use super::*;

    #[test]
    fn from_draft_sets_both_timestamps() {
        let now = kickoff(0);
        let record = FixtureRecord::from_draft(draft("e1", 0), FixtureId::new(), now);
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now);
        assert!(record.analysis.is_none());
    }

    #[test]
    fn apply_draft_preserves_identity_and_annotation() {
        let id = FixtureId::new();
        let created = kickoff(0);
        let mut record = FixtureRecord::from_draft(draft("e1", 0), id, created);
        record.analysis = Some("cached text".to_string());

        let mut update = draft("e1", 0);
        update.home_score = Some("2".to_string());
        update.away_score = Some("1".to_string());
        let later = kickoff(3);
        record.apply_draft(update, later);

        assert_eq!(record.id, id);
        assert_eq!(record.created_at, created);
        assert_eq!(record.updated_at, later);
        assert_eq!(record.home_score.as_deref(), Some("2"));
        assert_eq!(record.analysis.as_deref(), Some("cached text"));
    }

    #[test]
    fn key_display_joins_league_and_season() {
        assert_eq!(
            FixtureKey::new(League::Spanish, "2025-2026").to_string(),
            "spanish/2025-2026"
        );
    }

    #[test]
    fn draft_belongs_only_to_its_own_key() {
        let d = draft("e1", 0);
        assert!(d.belongs_to(&FixtureKey::new(League::Spanish, "2025-2026")));
        assert!(!d.belongs_to(&FixtureKey::new(League::Spanish, "2019-2020")));
        assert!(!d.belongs_to(&FixtureKey::new(League::Mls, "2025-2026")));
    }
}
