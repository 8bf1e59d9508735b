//! Reqwest-backed current-weather lookup against the OpenWeather 2.5 API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::WeatherSource;
use crate::domain::WeatherReport;
use crate::error::SourceError;

/// Metres per second to kilometres per hour.
const MS_TO_KMH: f64 = 3.6;

/// Current-weather client. Queries by `city[,country]` in metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
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
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(
        &self,
        city: &str,
        country: Option<&str>,
    ) -> Result<WeatherReport, SourceError> {
        let location = location(city, country);
        let response = self
            .client
            .get(format!("{}/weather", self.base_url.trim_end_matches('/')))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("q", location.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_weather(body.as_ref(), Utc::now())
    }
}

fn location(city: &str, country: Option<&str>) -> String {
    match country.map(str::trim).filter(|c| !c.is_empty()) {
        Some(country) => format!("{},{country}", city.trim()),
        None => city.trim().to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    #[serde(default)]
    name: String,
    #[serde(default)]
    sys: Option<SysDto>,
    main: MainDto,
    #[serde(default)]
    wind: Option<WindDto>,
    #[serde(default)]
    weather: Vec<ConditionDto>,
}

#[derive(Debug, Deserialize)]
struct SysDto {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainDto {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct WindDto {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionDto {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

/// Decodes a current-weather payload. Temperatures are rounded to whole
/// degrees and wind is converted to whole km/h.
fn parse_weather(body: &[u8], now: DateTime<Utc>) -> Result<WeatherReport, SourceError> {
    let decoded: CurrentWeather = serde_json::from_slice(body)
        .map_err(|e| SourceError::Decode(format!("invalid weather payload: {e}")))?;

    let primary = decoded.weather.into_iter().next();
    let (condition, description, icon) = primary
        .map(|c| (c.main, c.description, c.icon))
        .unwrap_or_default();

    Ok(WeatherReport {
        city: decoded.name,
        country: decoded.sys.and_then(|s| s.country).unwrap_or_default(),
        temperature: decoded.main.temp.round(),
        feels_like: decoded.main.feels_like.round(),
        humidity: decoded.main.humidity,
        wind_speed: decoded
            .wind
            .map_or(0.0, |w| (w.speed * MS_TO_KMH).round()),
        description,
        icon,
        condition,
        observed_at: now,
    })
}
