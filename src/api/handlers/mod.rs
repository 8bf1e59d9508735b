//! REST endpoint handlers organized by resource.

pub mod annotations;
pub mod fixtures;
pub mod system;
pub mod weather;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(fixtures::routes())
        .merge(annotations::routes())
        .merge(weather::routes())
}
