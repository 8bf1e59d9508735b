//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api/v1`; `/health` sits at the
//! root.

pub mod doc;
pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", doc::ApiDoc::openapi()),
        )
    };

    router
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use chrono::Duration;
    use tower::ServiceExt;
    use utoipa::OpenApi;

    use super::*;
    use crate::domain::CityResolver;
    use crate::domain::fixture::test_support::draft;
    use crate::persistence::{MemoryStore, Store};
    use crate::error::SourceError;
    use crate::service::test_support::{ScriptedGenerator, ScriptedSource, ScriptedWeather};
    use crate::service::{AnnotationService, FixtureService, WeatherService};
    use crate::upstream::FixtureSource;

    fn app(sources: Vec<Arc<ScriptedSource>>) -> Router {
        app_with_weather(sources, WeatherService::offline())
    }

    fn app_with_weather(sources: Vec<Arc<ScriptedSource>>, weather: WeatherService) -> Router {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let weather_service = Arc::new(weather);
        let sources = sources
            .into_iter()
            .map(|s| s as Arc<dyn FixtureSource>)
            .collect();
        let state = AppState {
            fixture_service: Arc::new(FixtureService::new(
                Arc::clone(&store),
                sources,
                CityResolver::default(),
                Duration::hours(1),
            )),
            annotation_service: Arc::new(
                AnnotationService::new(store, ScriptedGenerator::failing(), Duration::hours(1))
                    .with_weather(Arc::clone(&weather_service)),
            ),
            weather_service,
        };
        build_router().with_state(state)
    }

    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let Ok(response) = app.clone().oneshot(request).await;
        let status = response.status();
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body should be readable");
        };
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn get(uri: &str) -> Request<Body> {
        let Ok(request) = Request::get(uri).body(Body::empty()) else {
            panic!("valid request");
        };
        request
    }

    fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        let Ok(request) = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("valid request");
        };
        request
    }

    fn season_path() -> String {
        format!(
            "/api/v1/fixtures?league=spanish&season={}",
            draft("x", 0).season
        )
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let app = app(Vec::new());
        let (status, body) = call(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn lists_fixtures_then_gets_one() {
        let app = app(vec![ScriptedSource::ok(
            "season",
            vec![draft("e1", 0), draft("e2", 24)],
        )]);

        let (status, body) = call(&app, get(&season_path())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0]["external_id"], "e2");
        assert_eq!(body["data"][0]["league"], "spanish");

        let Some(id) = body["data"][1]["id"].as_str() else {
            panic!("fixture id missing");
        };
        let (status, detail) = call(&app, get(&format!("/api/v1/fixtures/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["external_id"], "e1");
    }

    #[tokio::test]
    async fn unknown_league_is_bad_request() {
        let app = app(Vec::new());
        let (status, body) = call(&app, get("/api/v1/fixtures?league=bundesliga")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1002);
    }

    #[tokio::test]
    async fn upstream_down_without_cache_is_503() {
        let app = app(vec![
            ScriptedSource::failing("season"),
            ScriptedSource::failing("upcoming"),
        ]);
        let (status, body) = call(&app, get(&season_path())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], 5001);
        assert_eq!(body["error"]["details"], "season, upcoming");
    }

    #[tokio::test]
    async fn missing_fixture_is_404() {
        let app = app(Vec::new());
        let uri = format!("/api/v1/fixtures/{}", uuid::Uuid::new_v4());
        let (status, body) = call(&app, get(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], 2001);
    }

    #[tokio::test]
    async fn annotation_falls_back_and_is_retrievable() {
        let app = app(vec![ScriptedSource::ok("season", vec![draft("e1", 0)])]);
        let (_, listing) = call(&app, get(&season_path())).await;
        let Some(id) = listing["data"][0]["id"].as_str() else {
            panic!("fixture id missing");
        };

        let (status, missing) = call(&app, get(&format!("/api/v1/annotations/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(missing["error"]["code"], 2002);

        let request = serde_json::json!({
            "fixture_id": id,
            "conditions": { "temperature": 21.0, "wind_speed": 5.0 }
        });
        let (status, created) = call(&app, post_json("/api/v1/annotations", &request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["model"], "fallback");
        let Some(content) = created["content"].as_str() else {
            panic!("content missing");
        };
        assert!(content.starts_with("Match Analysis: Barcelona vs Sevilla"));
        assert!(content.contains("21°C"));

        let (status, latest) = call(&app, get(&format!("/api/v1/annotations/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(latest["id"], created["id"]);

        let (_, fixture) = call(&app, get(&format!("/api/v1/fixtures/{id}"))).await;
        assert_eq!(fixture["analysis"], created["content"]);
    }

    #[tokio::test]
    async fn annotation_for_unknown_fixture_is_404() {
        let app = app(Vec::new());
        let request = serde_json::json!({ "fixture_id": uuid::Uuid::new_v4() });
        let (status, _) = call(&app, post_json("/api/v1/annotations", &request)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn weather_without_provider_is_mocked() {
        let app = app(Vec::new());
        let (status, body) = call(&app, get("/api/v1/weather?city=Malaga&country=ES")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["city"], "Malaga");
        assert_eq!(body["temperature"], 18.0);
        assert_eq!(body["wind_speed"], 12.0);
        assert_eq!(body["conditions"], "Clouds");
    }

    #[tokio::test]
    async fn weather_for_unknown_city_is_bad_request() {
        let app = app_with_weather(
            Vec::new(),
            WeatherService::new(ScriptedWeather::failing_with(SourceError::Status(404))),
        );
        let (status, body) = call(&app, get("/api/v1/weather?city=Atlantis")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1003);
        assert_eq!(body["error"]["message"], "city not found: Atlantis");
    }

    #[tokio::test]
    async fn weather_requires_a_city() {
        let app = app(Vec::new());
        let (status, _) = call(&app, get("/api/v1/weather")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn annotation_without_conditions_uses_city_weather() {
        let mut located = draft("e1", 0);
        located.city = "Sevilla".to_string();
        let app = app_with_weather(
            vec![ScriptedSource::ok("season", vec![located])],
            WeatherService::new(ScriptedWeather::reporting(31.0, 8.0, "Clear")),
        );
        let (_, listing) = call(&app, get(&season_path())).await;
        let Some(id) = listing["data"][0]["id"].as_str() else {
            panic!("fixture id missing");
        };

        let request = serde_json::json!({ "fixture_id": id });
        let (status, created) = call(&app, post_json("/api/v1/annotations", &request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["temperature"], 31.0);
        assert_eq!(created["condition"], "Clear");
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = doc::ApiDoc::openapi();
        for path in [
            "/api/v1/fixtures",
            "/api/v1/fixtures/{id}",
            "/api/v1/annotations",
            "/api/v1/annotations/{fixture_id}",
            "/api/v1/weather",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
