//! Fixture handlers: list by league/season, get by id.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{FixtureDto, FixtureListResponse, FixtureQuery};
use crate::app_state::AppState;
use crate::domain::{FixtureId, League};
use crate::error::{ErrorResponse, GatewayError};

/// `GET /fixtures`: fixtures of one league and season.
///
/// # Errors
///
/// Returns [`GatewayError`] for an unknown league, or when upstream is down
/// and nothing is cached.
#[utoipa::path(
    get,
    path = "/api/v1/fixtures",
    tag = "Fixtures",
    summary = "List fixtures",
    description = "Returns cached fixtures while they are younger than the TTL, otherwise refreshes from the season and upcoming listings. Falls back to the stale cache when every upstream source fails.",
    params(FixtureQuery),
    responses(
        (status = 200, description = "Fixtures, most recent kickoff first", body = FixtureListResponse),
        (status = 400, description = "Unknown league", body = ErrorResponse),
        (status = 503, description = "Upstream unavailable and nothing cached", body = ErrorResponse),
    )
)]
pub async fn list_fixtures(
    State(state): State<AppState>,
    Query(query): Query<FixtureQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let league: League = query.league.parse()?;
    let records = state
        .fixture_service
        .get_fixtures(league, query.season.as_deref())
        .await?;
    Ok(Json(FixtureListResponse::from(records)))
}

/// `GET /fixtures/{id}`: one stored fixture.
///
/// # Errors
///
/// Returns [`GatewayError::FixtureNotFound`] for an unknown id.
#[utoipa::path(
    get,
    path = "/api/v1/fixtures/{id}",
    tag = "Fixtures",
    summary = "Get fixture",
    params(("id" = uuid::Uuid, Path, description = "Internal fixture id")),
    responses(
        (status = 200, description = "Fixture", body = FixtureDto),
        (status = 404, description = "Fixture not found", body = ErrorResponse),
    )
)]
pub async fn get_fixture(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let record = state
        .fixture_service
        .get_fixture(FixtureId::from_uuid(id))
        .await?;
    Ok(Json(FixtureDto::from(record)))
}

/// Fixture routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fixtures", get(list_fixtures))
        .route("/fixtures/{id}", get(get_fixture))
}
