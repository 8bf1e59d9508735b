//! Supported leagues and season labelling.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// A league the gateway knows how to fetch from the sports data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum League {
    /// Spanish top flight (season spans two calendar years).
    Spanish,
    /// Major League Soccer (season is one calendar year).
    Mls,
}

impl League {
    /// Every supported league.
    pub const ALL: [Self; 2] = [Self::Spanish, Self::Mls];

    /// Tag stored on fixture records and accepted in queries.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spanish => "spanish",
            Self::Mls => "mls",
        }
    }

    /// League identifier used by the upstream provider.
    #[must_use]
    pub const fn upstream_id(&self) -> &'static str {
        match self {
            Self::Spanish => "4335",
            Self::Mls => "4346",
        }
    }

    /// Season label in effect at `now`.
    ///
    /// The Spanish season rolls over in August (`"2025-2026"`), MLS follows
    /// the calendar year (`"2026"`).
    #[must_use]
    pub fn current_season(&self, now: DateTime<Utc>) -> String {
        let year = now.year();
        match self {
            Self::Spanish if now.month() >= 8 => format!("{year}-{}", year + 1),
            Self::Spanish => format!("{}-{year}", year - 1),
            Self::Mls => year.to_string(),
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for League {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|league| league.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GatewayError::UnknownLeague(s.to_string()))
    }
}
