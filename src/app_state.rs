//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{AnnotationService, FixtureService, WeatherService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Cache-aside fixture listings.
    pub fixture_service: Arc<FixtureService>,
    /// Cache-aside match annotations.
    pub annotation_service: Arc<AnnotationService>,
    /// Current weather by city.
    pub weather_service: Arc<WeatherService>,
}
