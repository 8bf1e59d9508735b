//! Per-fixture analysis text, cached for the annotation TTL.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::{CacheAside, Served, WeatherService};
use crate::domain::{AnnotationRecord, Conditions, FixtureId, FixtureRecord, FreshnessGate};
use crate::error::GatewayError;
use crate::persistence::Store;
use crate::upstream::{AnalysisGenerator, fallback_analysis};

/// Model name recorded when the generator failed and the fallback text was
/// stored instead.
pub const FALLBACK_MODEL: &str = "fallback";

/// Serves the latest annotation for a fixture, generating a new one when
/// the latest is older than the TTL.
#[derive(Debug)]
pub struct AnnotationService {
    store: Arc<dyn Store>,
    generator: Arc<dyn AnalysisGenerator>,
    weather: Option<Arc<WeatherService>>,
    cache: CacheAside,
}

impl AnnotationService {
    /// Creates a service.
    #[must_use]
    pub fn new(
        store: Arc<dyn Store>,
        generator: Arc<dyn AnalysisGenerator>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            generator,
            weather: None,
            cache: CacheAside::new(FreshnessGate::new(ttl)),
        }
    }

    /// Looks up current weather at the fixture's city when a request
    /// carries no conditions.
    #[must_use]
    pub fn with_weather(mut self, weather: Arc<WeatherService>) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Returns the cached annotation if fresh, else generates and stores a
    /// new one. Generator failures never surface; the fallback text is
    /// stored instead.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::FixtureNotFound`] if the fixture does not exist.
    /// - [`GatewayError::PersistenceError`] if the store fails.
    pub async fn get_or_create_annotation(
        &self,
        fixture_id: FixtureId,
        conditions: Conditions,
    ) -> Result<AnnotationRecord, GatewayError> {
        let served = self.load(fixture_id, conditions, Utc::now()).await?;
        served.records.into_iter().next().ok_or_else(|| {
            GatewayError::Internal(format!("no annotation produced for fixture {fixture_id}"))
        })
    }

    /// Cache-aside read for one fixture at a given instant.
    ///
    /// # Errors
    ///
    /// See [`Self::get_or_create_annotation`].
    pub async fn load(
        &self,
        fixture_id: FixtureId,
        conditions: Conditions,
        now: DateTime<Utc>,
    ) -> Result<Served<AnnotationRecord>, GatewayError> {
        let fixture = self.fixture(fixture_id).await?;
        let cached: Vec<AnnotationRecord> = self
            .store
            .find_latest_annotation(fixture_id)
            .await?
            .into_iter()
            .collect();

        self.cache
            .load(&fixture_id, cached, now, || {
                self.create(&fixture, conditions, now)
            })
            .await
    }

    /// The most recent annotation, regardless of age.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::FixtureNotFound`] if the fixture does not exist.
    /// - [`GatewayError::AnnotationNotFound`] if none was generated yet.
    pub async fn get_latest_annotation(
        &self,
        fixture_id: FixtureId,
    ) -> Result<AnnotationRecord, GatewayError> {
        let _ = self.fixture(fixture_id).await?;
        self.store
            .find_latest_annotation(fixture_id)
            .await?
            .ok_or_else(|| GatewayError::AnnotationNotFound(*fixture_id.as_uuid()))
    }

    async fn fixture(&self, fixture_id: FixtureId) -> Result<FixtureRecord, GatewayError> {
        self.store
            .find_by_id(fixture_id)
            .await?
            .ok_or_else(|| GatewayError::FixtureNotFound(*fixture_id.as_uuid()))
    }

    async fn create(
        &self,
        fixture: &FixtureRecord,
        conditions: Conditions,
        now: DateTime<Utc>,
    ) -> Result<Vec<AnnotationRecord>, GatewayError> {
        let conditions = match &self.weather {
            Some(weather) if conditions == Conditions::default() => {
                weather.conditions_for(fixture).await.unwrap_or(conditions)
            }
            _ => conditions,
        };

        let (content, model) = match self.generator.generate(fixture, &conditions).await {
            Ok(text) if !text.trim().is_empty() => (text, self.generator.model().to_string()),
            Ok(_) => {
                tracing::warn!(fixture_id = %fixture.id, "generator returned empty text, using fallback");
                (fallback_analysis(fixture, &conditions), FALLBACK_MODEL.to_string())
            }
            Err(e) => {
                tracing::warn!(fixture_id = %fixture.id, error = %e, "generator failed, using fallback");
                (fallback_analysis(fixture, &conditions), FALLBACK_MODEL.to_string())
            }
        };

        let record = AnnotationRecord::new(fixture.id, content, model, conditions, now);
        self.store.insert_annotation(&record).await?;
        self.store
            .record_analysis(fixture.id, &record.content, &record.conditions, now)
            .await?;

        tracing::info!(
            fixture_id = %fixture.id,
            annotation_id = %record.id,
            model = %record.model,
            "annotation created"
        );
        Ok(vec![record])
    }
}
