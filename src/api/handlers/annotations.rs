//! Annotation handlers: get-or-create and latest.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{AnnotationDto, CreateAnnotationRequest};
use crate::app_state::AppState;
use crate::domain::FixtureId;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /annotations`: analysis for a fixture under given conditions.
///
/// Returns the latest annotation while it is younger than the TTL,
/// otherwise generates and stores a new one.
///
/// # Errors
///
/// Returns [`GatewayError::FixtureNotFound`] for an unknown fixture.
#[utoipa::path(
    post,
    path = "/api/v1/annotations",
    tag = "Annotations",
    summary = "Get or create an annotation",
    description = "Serves the cached analysis if recent enough, else generates one. Generator failures are replaced by a deterministic fallback text.",
    request_body = CreateAnnotationRequest,
    responses(
        (status = 200, description = "Annotation", body = AnnotationDto),
        (status = 404, description = "Fixture not found", body = ErrorResponse),
    )
)]
pub async fn create_annotation(
    State(state): State<AppState>,
    Json(req): Json<CreateAnnotationRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let record = state
        .annotation_service
        .get_or_create_annotation(FixtureId::from_uuid(req.fixture_id), req.conditions)
        .await?;
    Ok(Json(AnnotationDto::from(record)))
}

/// `GET /annotations/{fixture_id}`: latest annotation, whatever its age.
///
/// # Errors
///
/// Returns [`GatewayError`] when the fixture or its annotation is missing.
#[utoipa::path(
    get,
    path = "/api/v1/annotations/{fixture_id}",
    tag = "Annotations",
    summary = "Latest annotation",
    params(("fixture_id" = uuid::Uuid, Path, description = "Internal fixture id")),
    responses(
        (status = 200, description = "Latest annotation", body = AnnotationDto),
        (status = 404, description = "Fixture or annotation not found", body = ErrorResponse),
    )
)]
pub async fn get_latest_annotation(
    State(state): State<AppState>,
    Path(fixture_id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let record = state
        .annotation_service
        .get_latest_annotation(FixtureId::from_uuid(fixture_id))
        .await?;
    Ok(Json(AnnotationDto::from(record)))
}

/// Annotation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/annotations", post(create_annotation))
        .route("/annotations/{fixture_id}", get(get_latest_annotation))
}
