//! Analysis generator backends and the deterministic fallback text.

use async_trait::async_trait;

use super::AnalysisGenerator;
use crate::domain::{Conditions, FixtureRecord};
use crate::error::GeneratorError;

const FALLBACK_TEMPERATURE: f64 = 18.0;
const FALLBACK_WIND_SPEED: f64 = 10.0;

/// Generator used when no model backend is configured.
///
/// Always reports [`GeneratorError::NotConfigured`], so every annotation is
/// the deterministic fallback.
#[derive(Debug, Clone, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl AnalysisGenerator for OfflineGenerator {
    fn model(&self) -> &str {
        "offline"
    }

    async fn generate(
        &self,
        _fixture: &FixtureRecord,
        _conditions: &Conditions,
    ) -> Result<String, GeneratorError> {
        Err(GeneratorError::NotConfigured)
    }
}

/// Deterministic analysis used whenever the generator fails.
///
/// Missing or zero temperature and wind fall back to 18 °C and 10 km/h.
#[must_use]
pub fn fallback_analysis(fixture: &FixtureRecord, conditions: &Conditions) -> String {
    let temperature = non_zero(conditions.temperature).unwrap_or(FALLBACK_TEMPERATURE);
    let wind = non_zero(conditions.wind_speed).unwrap_or(FALLBACK_WIND_SPEED);
    let home = &fixture.home_team;
    let away = &fixture.away_team;

    format!(
        "Match Analysis: {home} vs {away}\n\n\
         Based on the current conditions with {temperature}°C temperature and {wind} km/h wind, \
         this match promises to be competitive. The moderate weather conditions favor technical play. \
         {home} has home advantage which could be decisive. \
         The wind speed is manageable but may affect long passes and set pieces. \
         Expect both teams to focus on ground-based build-up play."
    )
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}
