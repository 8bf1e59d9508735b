//! OpenAPI document for the REST API, served by Swagger UI when the
//! `swagger-ui` feature is enabled.

use utoipa::OpenApi;

use crate::api::dto::{
    AnnotationDto, CreateAnnotationRequest, FixtureDto, FixtureListResponse, WeatherDto,
};
use crate::api::handlers::system::HealthResponse;
use crate::domain::Conditions;
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI document listing every route and schema.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "fixture-gateway",
        description = "Cached football fixtures, generated match annotations and current weather."
    ),
    paths(
        crate::api::handlers::fixtures::list_fixtures,
        crate::api::handlers::fixtures::get_fixture,
        crate::api::handlers::annotations::create_annotation,
        crate::api::handlers::annotations::get_latest_annotation,
        crate::api::handlers::weather::get_weather,
        crate::api::handlers::system::health_handler,
    ),
    components(schemas(
        FixtureDto,
        FixtureListResponse,
        AnnotationDto,
        CreateAnnotationRequest,
        Conditions,
        WeatherDto,
        HealthResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Fixtures", description = "Cached fixture listings"),
        (name = "Annotations", description = "Generated match analysis"),
        (name = "Weather", description = "Current weather by city"),
        (name = "System", description = "Health"),
    )
)]
pub struct ApiDoc;
