//! Weather DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::WeatherReport;

/// Query string for `GET /weather`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeatherQuery {
    /// City name.
    pub city: String,
    /// ISO 3166 country code narrowing the city, e.g. `ES`.
    #[serde(default)]
    pub country: Option<String>,
}

/// Current weather at a city.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeatherDto {
    /// City name.
    pub city: String,
    /// Country code; empty when unknown.
    pub country: String,
    /// Temperature in °C.
    pub temperature: f64,
    /// Apparent temperature in °C.
    pub feels_like: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// Free-text description.
    pub description: String,
    /// Provider icon code.
    pub icon: String,
    /// Condition group, e.g. `Rain`.
    pub conditions: String,
    /// Observation time.
    pub timestamp: DateTime<Utc>,
}

impl From<WeatherReport> for WeatherDto {
    fn from(report: WeatherReport) -> Self {
        Self {
            city: report.city,
            country: report.country,
            temperature: report.temperature,
            feels_like: report.feels_like,
            humidity: report.humidity,
            wind_speed: report.wind_speed,
            description: report.description,
            icon: report.icon,
            conditions: report.condition,
            timestamp: report.observed_at,
        }
    }
}
