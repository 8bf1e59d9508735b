//! fixture-gateway server entry point.
//!
//! Wires configuration, store, upstream sources and services, then starts
//! the Axum HTTP server.

use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use fixture_gateway::api;
use fixture_gateway::app_state::AppState;
use fixture_gateway::config::{GatewayConfig, LogFormat};
use fixture_gateway::domain::{CityResolver, CityTables};
use fixture_gateway::persistence::{MemoryStore, PostgresStore, Store};
use fixture_gateway::service::{AnnotationService, FixtureService, WeatherService};
use fixture_gateway::upstream::{
    FixtureSource, OfflineGenerator, OpenWeatherClient, SeasonListing, SportsDbClient,
    UpcomingListing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config =
        GatewayConfig::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting fixture-gateway");

    // Store of record
    let store: Arc<dyn Store> = if config.persistence_enabled {
        let store = PostgresStore::connect(&config)
            .await
            .context("connecting to PostgreSQL")?;
        tracing::info!("using PostgreSQL store");
        Arc::new(store)
    } else {
        tracing::warn!("persistence disabled, using in-memory store");
        Arc::new(MemoryStore::new())
    };

    // Upstream collaborators, highest priority first
    let client = SportsDbClient::new(
        config.sports_api_base_url.clone(),
        config.sports_api_key.clone(),
        config.upstream_timeout(),
    )
    .context("building upstream HTTP client")?;
    let sources: Vec<Arc<dyn FixtureSource>> = vec![
        Arc::new(SeasonListing::new(client.clone())),
        Arc::new(UpcomingListing::new(client)),
    ];

    let weather_service = Arc::new(match &config.weather_api_key {
        Some(key) => WeatherService::new(Arc::new(
            OpenWeatherClient::new(
                config.weather_api_base_url.clone(),
                key.clone(),
                config.upstream_timeout(),
            )
            .context("building weather HTTP client")?,
        )),
        None => {
            tracing::warn!("WEATHER_API_KEY not set, weather lookups serve mock readings");
            WeatherService::offline()
        }
    });

    let tables = match &config.city_tables_path {
        Some(path) => CityTables::from_json_file(path)
            .with_context(|| format!("loading city tables from {}", path.display()))?,
        None => CityTables::default(),
    };

    // Build service layer
    let fixture_service = Arc::new(FixtureService::new(
        Arc::clone(&store),
        sources,
        CityResolver::new(tables),
        config.fixture_ttl(),
    ));
    let annotation_service = Arc::new(
        AnnotationService::new(store, Arc::new(OfflineGenerator), config.annotation_ttl())
            .with_weather(Arc::clone(&weather_service)),
    );

    let app_state = AppState {
        fixture_service,
        annotation_service,
        weather_service,
    };

    let app = api::build_router()
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
