//! City resolution for fixtures whose upstream payload omits it.
//!
//! Resolution order:
//! 1. explicit non-empty city from the payload;
//! 2. venue table, exact case-insensitive match, then the first key (in table
//!    order) contained case-insensitively in the venue name;
//! 3. team table, exact match on the home team;
//! 4. empty.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::FixtureDraft;
use crate::error::GatewayError;

const DEFAULT_VENUES: &[(&str, &str)] = &[
    ("Santiago Bernabeu", "Madrid"),
    ("Estadio Metropolitano", "Madrid"),
    ("Camp Nou", "Barcelona"),
    ("Estadi Olimpic Lluis Companys", "Barcelona"),
    ("Ramon Sanchez Pizjuan", "Sevilla"),
    ("Benito Villamarin", "Sevilla"),
    ("Mestalla", "Valencia"),
    ("San Mames", "Bilbao"),
    ("Reale Arena", "San Sebastian"),
    ("Dignity Health Sports Park", "Carson"),
    ("BMO Stadium", "Los Angeles"),
    ("Mercedes-Benz Stadium", "Atlanta"),
    ("Chase Stadium", "Fort Lauderdale"),
    ("Yankee Stadium", "New York"),
];

const DEFAULT_TEAMS: &[(&str, &str)] = &[
    ("Real Madrid", "Madrid"),
    ("Barcelona", "Barcelona"),
    ("Atletico Madrid", "Madrid"),
    ("Sevilla", "Sevilla"),
    ("LA Galaxy", "Los Angeles"),
    ("LAFC", "Los Angeles"),
];

/// Static lookup tables injected into the resolver.
///
/// Venue entries are ordered: substring matching returns the first hit in
/// table order.
#[derive(Debug, Clone, Deserialize)]
pub struct CityTables {
    /// Ordered `(venue, city)` pairs.
    #[serde(default)]
    pub venues: Vec<(String, String)>,
    /// `team -> city` map.
    #[serde(default)]
    pub teams: HashMap<String, String>,
}

impl CityTables {
    /// Loads tables from a JSON file of the form
    /// `{"venues": [["Camp Nou", "Barcelona"]], "teams": {"LAFC": "Los Angeles"}}`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the file cannot be read or
    /// parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, GatewayError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::InvalidRequest(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            GatewayError::InvalidRequest(format!("invalid city tables {}: {e}", path.display()))
        })
    }
}

impl Default for CityTables {
    fn default() -> Self {
        Self {
            venues: DEFAULT_VENUES
                .iter()
                .map(|(venue, city)| ((*venue).to_string(), (*city).to_string()))
                .collect(),
            teams: DEFAULT_TEAMS
                .iter()
                .map(|(team, city)| ((*team).to_string(), (*city).to_string()))
                .collect(),
        }
    }
}

/// Fills the `city` field of upstream drafts. Pure and total.
#[derive(Debug, Clone)]
pub struct CityResolver {
    /// Venue keys pre-lowercased, paired with their city, in table order.
    venues: Vec<(String, String)>,
    teams: HashMap<String, String>,
}

impl CityResolver {
    /// Builds a resolver over the given tables.
    #[must_use]
    pub fn new(tables: CityTables) -> Self {
        let venues = tables
            .venues
            .into_iter()
            .filter(|(venue, _)| !venue.trim().is_empty())
            .map(|(venue, city)| (venue.to_lowercase(), city))
            .collect();
        Self {
            venues,
            teams: tables.teams,
        }
    }

    /// Returns `draft` with `city` resolved through the fallback chain.
    #[must_use]
    pub fn resolve(&self, mut draft: FixtureDraft) -> FixtureDraft {
        if draft.city.trim().is_empty() {
            draft.city = self
                .city_for(draft.venue.as_deref(), &draft.home_team)
                .unwrap_or_default();
        }
        draft
    }

    /// Resolves a city from venue and home team only.
    #[must_use]
    pub fn city_for(&self, venue: Option<&str>, home_team: &str) -> Option<String> {
        venue
            .and_then(|v| self.city_for_venue(v))
            .or_else(|| self.teams.get(home_team).cloned())
    }

    fn city_for_venue(&self, venue: &str) -> Option<String> {
        let needle = venue.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.venues
            .iter()
            .find(|(key, _)| *key == needle)
            .or_else(|| self.venues.iter().find(|(key, _)| needle.contains(key.as_str())))
            .map(|(_, city)| city.clone())
    }
}

impl Default for CityResolver {
    fn default() -> Self {
        Self::new(CityTables::default())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::fixture::test_support::draft;

    fn with_venue(venue: &str) -> FixtureDraft {
        let mut d = draft("e1", 0);
        d.home_team = "Unlisted FC".to_string();
        d.venue = Some(venue.to_string());
        d
    }

    #[test]
    fn explicit_city_wins_over_venue_table() {
        let mut d = with_venue("Camp Nou");
        d.city = "X".to_string();
        assert_eq!(CityResolver::default().resolve(d).city, "X");
    }

    #[test]
    fn exact_venue_match_is_case_insensitive() {
        let resolved = CityResolver::default().resolve(with_venue("camp nou"));
        assert_eq!(resolved.city, "Barcelona");
    }

    #[test]
    fn venue_substring_match() {
        let resolved =
            CityResolver::default().resolve(with_venue("Estadio Santiago Bernabeu Nuevo"));
        assert_eq!(resolved.city, "Madrid");
    }

    #[test]
    fn exact_match_beats_earlier_substring_match() {
        let tables = CityTables {
            venues: vec![
                ("Arena".to_string(), "First".to_string()),
                ("Big Arena".to_string(), "Second".to_string()),
            ],
            teams: HashMap::new(),
        };
        let resolver = CityResolver::new(tables);
        assert_eq!(resolver.resolve(with_venue("big arena")).city, "Second");
        assert_eq!(resolver.resolve(with_venue("Big Arena North")).city, "First");
    }

    #[test]
    fn falls_back_to_home_team() {
        let mut d = draft("e1", 0);
        d.home_team = "LAFC".to_string();
        d.venue = Some("Unknown Ground".to_string());
        assert_eq!(CityResolver::default().resolve(d).city, "Los Angeles");
    }

    #[test]
    fn team_match_is_exact_only() {
        let mut d = draft("e1", 0);
        d.home_team = "lafc".to_string();
        assert_eq!(CityResolver::default().resolve(d).city, "");
    }

    #[test]
    fn no_match_leaves_city_empty() {
        let resolved = CityResolver::default().resolve(with_venue("Nowhere Park"));
        assert!(resolved.city.is_empty());
    }

    #[test]
    fn blank_keys_never_match() {
        let tables = CityTables {
            venues: vec![("  ".to_string(), "Ghost".to_string())],
            teams: HashMap::new(),
        };
        let resolved = CityResolver::new(tables).resolve(with_venue("Any Stadium"));
        assert!(resolved.city.is_empty());
    }

    #[test]
    fn tables_parse_from_json() {
        let raw = r#"{"venues": [["Camp Nou", "Barcelona"]], "teams": {"LAFC": "Los Angeles"}}"#;
        let parsed: Result<CityTables, _> = serde_json::from_str(raw);
        let Ok(tables) = parsed else {
            panic!("tables should parse");
        };
        assert_eq!(tables.venues.len(), 1);
        assert_eq!(tables.teams.get("LAFC").map(String::as_str), Some("Los Angeles"));
    }
}
