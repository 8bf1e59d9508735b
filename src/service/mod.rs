//! Service layer: cache-aside orchestration.
//!
//! [`FixtureService`] runs the fetch → reconcile → upsert pipeline behind
//! the stale-fallback policy. [`AnnotationService`] reuses the same
//! [`CacheAside`] policy for per-fixture analysis text, filling missing
//! conditions from [`WeatherService`].

pub mod annotation_service;
pub mod cache_aside;
pub mod fixture_service;
pub mod upsert;
pub mod weather_service;

pub use annotation_service::AnnotationService;
pub use cache_aside::{CacheAside, Served, ServedFrom};
pub use fixture_service::FixtureService;
pub use upsert::CacheUpsertEngine;
pub use weather_service::WeatherService;

#[cfg(test)]
pub(crate) mod test_support {
    //! Scripted collaborators shared by service and router tests.

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use crate::domain::{
        AnnotationRecord, Conditions, FixtureDraft, FixtureId, FixtureKey, FixtureRecord, League,
        WeatherReport,
    };
    use crate::error::{GatewayError, GeneratorError, SourceError};
    use crate::persistence::{MemoryStore, Store};
    use crate::upstream::{AnalysisGenerator, FixtureSource, WeatherSource};

    /// Source that returns a fixed listing, or fails when it has none.
    #[derive(Debug)]
    pub(crate) struct ScriptedSource {
        name: &'static str,
        drafts: Option<Vec<FixtureDraft>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        pub(crate) fn ok(name: &'static str, drafts: Vec<FixtureDraft>) -> Arc<Self> {
            Arc::new(Self {
                name,
                drafts: Some(drafts),
                calls: AtomicUsize::new(0),
            })
        }

        pub(crate) fn failing(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                drafts: None,
                calls: AtomicUsize::new(0),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FixtureSource for ScriptedSource {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch(
            &self,
            _league: League,
            _season: &str,
        ) -> Result<Vec<FixtureDraft>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.drafts
                .clone()
                .ok_or_else(|| SourceError::Transport("connection refused".to_string()))
        }
    }

    /// Generator with a canned reply, or failing when it has none.
    #[derive(Debug)]
    pub(crate) struct ScriptedGenerator {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl ScriptedGenerator {
        pub(crate) fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(text.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        pub(crate) fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: AtomicUsize::new(0),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnalysisGenerator for ScriptedGenerator {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn generate(
            &self,
            _fixture: &FixtureRecord,
            _conditions: &Conditions,
        ) -> Result<String, GeneratorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .ok_or_else(|| GeneratorError::Failed("quota exceeded".to_string()))
        }
    }

    /// Weather provider with a fixed reading, or a fixed failure.
    #[derive(Debug)]
    pub(crate) struct ScriptedWeather {
        reading: Result<(f64, f64, String), SourceError>,
        calls: AtomicUsize,
    }

    impl ScriptedWeather {
        pub(crate) fn reporting(temperature: f64, wind_speed: f64, condition: &str) -> Arc<Self> {
            Arc::new(Self {
                reading: Ok((temperature, wind_speed, condition.to_string())),
                calls: AtomicUsize::new(0),
            })
        }

        pub(crate) fn failing_with(err: SourceError) -> Arc<Self> {
            Arc::new(Self {
                reading: Err(err),
                calls: AtomicUsize::new(0),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherSource for ScriptedWeather {
        async fn current(
            &self,
            city: &str,
            _country: Option<&str>,
        ) -> Result<WeatherReport, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (temperature, wind_speed, condition) = self.reading.clone()?;
            Ok(WeatherReport {
                city: city.to_string(),
                country: "ES".to_string(),
                temperature,
                feels_like: temperature,
                humidity: 70.0,
                wind_speed,
                description: condition.to_lowercase(),
                icon: "13d".to_string(),
                condition,
                observed_at: Utc::now(),
            })
        }
    }

    /// [`MemoryStore`] whose upserts start failing after a fixed count.
    #[derive(Debug)]
    pub(crate) struct FlakyStore {
        pub(crate) inner: MemoryStore,
        fail_upserts_after: usize,
        upserts: AtomicUsize,
    }

    impl FlakyStore {
        pub(crate) fn failing_upserts_after(count: usize) -> Self {
            Self {
                inner: MemoryStore::new(),
                fail_upserts_after: count,
                upserts: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Store for FlakyStore {
        async fn find_by_key(&self, key: &FixtureKey) -> Result<Vec<FixtureRecord>, GatewayError> {
            self.inner.find_by_key(key).await
        }

        async fn find_by_id(&self, id: FixtureId) -> Result<Option<FixtureRecord>, GatewayError> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_external_id(
            &self,
            external_id: &str,
        ) -> Result<Option<FixtureRecord>, GatewayError> {
            self.inner.find_by_external_id(external_id).await
        }

        async fn upsert(&self, record: FixtureRecord) -> Result<FixtureRecord, GatewayError> {
            if self.upserts.fetch_add(1, Ordering::SeqCst) >= self.fail_upserts_after {
                return Err(GatewayError::PersistenceError(
                    "connection reset".to_string(),
                ));
            }
            self.inner.upsert(record).await
        }

        async fn insert_annotation(&self, record: &AnnotationRecord) -> Result<(), GatewayError> {
            self.inner.insert_annotation(record).await
        }

        async fn find_latest_annotation(
            &self,
            fixture_id: FixtureId,
        ) -> Result<Option<AnnotationRecord>, GatewayError> {
            self.inner.find_latest_annotation(fixture_id).await
        }

        async fn record_analysis(
            &self,
            fixture_id: FixtureId,
            analysis: &str,
            weather: &Conditions,
            analyzed_at: DateTime<Utc>,
        ) -> Result<(), GatewayError> {
            self.inner
                .record_analysis(fixture_id, analysis, weather, analyzed_at)
                .await
        }
    }
}
