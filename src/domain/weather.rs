//! Current weather at a city, in the units the API reports.

use chrono::{DateTime, Utc};

use super::Conditions;

/// One current-weather observation. Temperatures are whole °C and wind is
/// whole km/h.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// City name as the provider spells it.
    pub city: String,
    /// ISO country code, empty when unknown.
    pub country: String,
    /// Air temperature.
    pub temperature: f64,
    /// Apparent temperature.
    pub feels_like: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// Free-text description, e.g. "light rain".
    pub description: String,
    /// Provider icon code.
    pub icon: String,
    /// Short condition group, e.g. "Rain".
    pub condition: String,
    /// When the report was produced.
    pub observed_at: DateTime<Utc>,
}

impl WeatherReport {
    /// Placeholder served when no provider is configured or the provider is
    /// down. Always the same mild values; only the city and time vary.
    #[must_use]
    pub fn mock(city: &str, now: DateTime<Utc>) -> Self {
        Self {
            city: city.to_string(),
            country: "ES".to_string(),
            temperature: 18.0,
            feels_like: 17.0,
            humidity: 65.0,
            wind_speed: 12.0,
            description: "partly cloudy".to_string(),
            icon: "02d".to_string(),
            condition: "Clouds".to_string(),
            observed_at: now,
        }
    }

    /// The subset stored with an annotation.
    #[must_use]
    pub fn to_conditions(&self) -> Conditions {
        Conditions {
            temperature: Some(self.temperature),
            wind_speed: Some(self.wind_speed),
            humidity: Some(self.humidity),
            condition: Some(self.condition.clone()).filter(|c| !c.is_empty()),
        }
    }
}
