//! Current weather by city, with a mock reading when the provider is absent
//! or failing.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{Conditions, FixtureRecord, WeatherReport};
use crate::error::{GatewayError, SourceError};
use crate::upstream::WeatherSource;

/// Weather lookups. Only an unknown city is an error; every other provider
/// failure degrades to [`WeatherReport::mock`].
#[derive(Debug, Default)]
pub struct WeatherService {
    source: Option<Arc<dyn WeatherSource>>,
}

impl WeatherService {
    /// Creates a service backed by `source`.
    #[must_use]
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// Creates a service that always serves mock readings.
    #[must_use]
    pub fn offline() -> Self {
        Self::default()
    }

    /// Current weather at `city`.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::InvalidRequest`] if `city` is blank.
    /// - [`GatewayError::CityNotFound`] if the provider does not know it.
    pub async fn current(
        &self,
        city: &str,
        country: Option<&str>,
    ) -> Result<WeatherReport, GatewayError> {
        self.lookup(city, country, Utc::now()).await
    }

    /// [`Self::current`] with an explicit clock for mock readings.
    ///
    /// # Errors
    ///
    /// See [`Self::current`].
    pub async fn lookup(
        &self,
        city: &str,
        country: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<WeatherReport, GatewayError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(GatewayError::InvalidRequest("city must not be empty".to_string()));
        }

        let Some(source) = &self.source else {
            tracing::debug!(city, "no weather provider configured, serving mock");
            return Ok(WeatherReport::mock(city, now));
        };

        match source.current(city, country).await {
            Ok(report) => Ok(report),
            Err(SourceError::Status(404)) => Err(GatewayError::CityNotFound(city.to_string())),
            Err(e) => {
                tracing::warn!(city, error = %e, "weather provider failed, serving mock");
                Ok(WeatherReport::mock(city, now))
            }
        }
    }

    /// Conditions at the fixture's city, or `None` when the city is unknown
    /// to us or to the provider.
    pub async fn conditions_for(&self, fixture: &FixtureRecord) -> Option<Conditions> {
        if fixture.city.trim().is_empty() {
            return None;
        }
        match self.current(&fixture.city, None).await {
            Ok(report) => Some(report.to_conditions()),
            Err(e) => {
                tracing::debug!(fixture_id = %fixture.id, error = %e, "no weather for fixture");
                None
            }
        }
    }
}
