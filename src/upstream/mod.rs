//! Upstream collaborators: fixture sources, the weather provider and the
//! analysis generator.
//!
//! Each is a trait so the service layer can be driven by the real HTTP
//! adapters in production and by scripted fakes in tests.

pub mod generator;
pub mod openweather;
pub mod sportsdb;

use async_trait::async_trait;

use crate::domain::{Conditions, FixtureDraft, FixtureRecord, League, WeatherReport};
use crate::error::{GeneratorError, SourceError};

pub use generator::{OfflineGenerator, fallback_analysis};
pub use openweather::OpenWeatherClient;
pub use sportsdb::{SeasonListing, SportsDbClient, UpcomingListing};

/// One upstream listing of fixtures.
///
/// Sources are consulted in a fixed priority order; see
/// [`crate::domain::reconcile`].
#[async_trait]
pub trait FixtureSource: Send + Sync + std::fmt::Debug {
    /// Stable name used in logs and error details.
    fn name(&self) -> &str;

    /// Fetches the raw fixtures this source knows for `league`/`season`.
    async fn fetch(&self, league: League, season: &str) -> Result<Vec<FixtureDraft>, SourceError>;
}

/// Current-weather lookup by city.
#[async_trait]
pub trait WeatherSource: Send + Sync + std::fmt::Debug {
    /// Current weather at `city`, optionally narrowed by a country code.
    /// An unknown city is reported as [`SourceError::Status`] 404.
    async fn current(
        &self,
        city: &str,
        country: Option<&str>,
    ) -> Result<WeatherReport, SourceError>;
}

/// Produces the analysis text for a fixture.
#[async_trait]
pub trait AnalysisGenerator: Send + Sync + std::fmt::Debug {
    /// Model or backend name recorded on each annotation.
    fn model(&self) -> &str;

    /// Generates analysis text. Failures are replaced by
    /// [`fallback_analysis`] in the service layer.
    async fn generate(
        &self,
        fixture: &FixtureRecord,
        conditions: &Conditions,
    ) -> Result<String, GeneratorError>;
}
