//! Weather handler: current conditions by city.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{WeatherDto, WeatherQuery};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /weather`: current weather at a city.
///
/// # Errors
///
/// Returns [`GatewayError`] for a blank or unknown city.
#[utoipa::path(
    get,
    path = "/api/v1/weather",
    tag = "Weather",
    summary = "Current weather",
    description = "Current conditions in metric units with wind in km/h. Serves a fixed mock reading when no provider key is configured or the provider fails.",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Current weather", body = WeatherDto),
        (status = 400, description = "Blank or unknown city", body = ErrorResponse),
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let report = state
        .weather_service
        .current(&query.city, query.country.as_deref())
        .await?;
    Ok(Json(WeatherDto::from(report)))
}

/// Weather routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/weather", get(get_weather))
}
