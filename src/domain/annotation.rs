//! Generated match annotations and the conditions they were built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::freshness::Timestamped;
use super::{AnnotationId, FixtureId};

/// Weather conditions supplied by the caller when requesting an analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Conditions {
    /// Temperature in °C.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Wind speed in km/h.
    #[serde(default)]
    pub wind_speed: Option<f64>,
    /// Relative humidity in percent.
    #[serde(default)]
    pub humidity: Option<f64>,
    /// Condition label (e.g. `"Clouds"`).
    #[serde(default)]
    pub condition: Option<String>,
}

/// One generated analysis for one fixture.
///
/// Never mutated after insertion; a newer annotation supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Annotation identity.
    pub id: AnnotationId,
    /// Fixture this annotation belongs to.
    pub fixture_id: FixtureId,
    /// Generated text.
    pub content: String,
    /// Generator that produced `content`.
    pub model: String,
    /// Temperature used as input, 0 when not supplied.
    pub temperature: f64,
    /// Wind speed used as input, 0 when not supplied.
    pub wind_speed: f64,
    /// Condition label used as input, empty when not supplied.
    pub condition: String,
    /// Full conditions snapshot as supplied.
    pub conditions: Conditions,
    /// Creation time; the freshness signal for the annotation cache.
    pub created_at: DateTime<Utc>,
}

impl AnnotationRecord {
    /// Builds a new annotation for `fixture_id` created at `now`.
    #[must_use]
    pub fn new(
        fixture_id: FixtureId,
        content: String,
        model: impl Into<String>,
        conditions: Conditions,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AnnotationId::new(),
            fixture_id,
            content,
            model: model.into(),
            temperature: conditions.temperature.unwrap_or(0.0),
            wind_speed: conditions.wind_speed.unwrap_or(0.0),
            condition: conditions.condition.clone().unwrap_or_default(),
            conditions,
            created_at: now,
        }
    }
}

impl Timestamped for AnnotationRecord {
    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_inputs_default_to_zero_and_empty() {
        let record = AnnotationRecord::new(
            FixtureId::new(),
            "text".to_string(),
            "offline",
            Conditions::default(),
            Utc::now(),
        );
        assert!(record.temperature.abs() < f64::EPSILON);
        assert!(record.wind_speed.abs() < f64::EPSILON);
        assert!(record.condition.is_empty());
    }

    #[test]
    fn supplied_inputs_are_copied() {
        let conditions = Conditions {
            temperature: Some(21.5),
            wind_speed: Some(14.0),
            humidity: Some(60.0),
            condition: Some("Clear".to_string()),
        };
        let record = AnnotationRecord::new(
            FixtureId::new(),
            "text".to_string(),
            "offline",
            conditions.clone(),
            Utc::now(),
        );
        assert!((record.temperature - 21.5).abs() < f64::EPSILON);
        assert_eq!(record.condition, "Clear");
        assert_eq!(record.conditions, conditions);
    }

    #[test]
    fn conditions_accept_partial_json() {
        let parsed: Result<Conditions, _> = serde_json::from_str(r#"{"temperature": 12}"#);
        assert!(matches!(parsed, Ok(ref c) if c.temperature == Some(12.0) && c.condition.is_none()));
    }
}
