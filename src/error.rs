//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! [`SourceError`] and [`GeneratorError`] describe failures of the upstream
//! collaborators; they are absorbed by the service layer and only surface
//! through [`GatewayError::UpstreamUnavailable`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 5001,
///     "message": "upstream unavailable for spanish/2025-2026 and nothing cached",
///     "details": "season, upcoming"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                 |
/// |-----------|-----------------|-----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request             |
/// | 2000–2999 | Not Found       | 404 Not Found               |
/// | 3000–3999 | Server          | 500 Internal Server Error   |
/// | 5000–5999 | Upstream        | 503 Service Unavailable     |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Fixture with the given internal ID was not found.
    #[error("fixture not found: {0}")]
    FixtureNotFound(uuid::Uuid),

    /// No annotation exists yet for the given fixture.
    #[error("no annotation for fixture {0}")]
    AnnotationNotFound(uuid::Uuid),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// League tag is not supported.
    #[error("unknown league: {0}")]
    UnknownLeague(String),

    /// The weather provider does not know the city.
    #[error("city not found: {0}")]
    CityNotFound(String),

    /// Every upstream source failed and nothing was cached for the key.
    #[error("upstream unavailable for {key} and nothing cached")]
    UpstreamUnavailable {
        /// Cache key the request was for.
        key: String,
        /// Sources that failed, in priority order.
        failed_sources: Vec<String>,
    },

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::UnknownLeague(_) => 1002,
            Self::CityNotFound(_) => 1003,
            Self::FixtureNotFound(_) => 2001,
            Self::AnnotationNotFound(_) => 2002,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::UpstreamUnavailable { .. } => 5001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::UnknownLeague(_) | Self::CityNotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::FixtureNotFound(_) | Self::AnnotationNotFound(_) => StatusCode::NOT_FOUND,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Whether a stale cached value may be served in place of this error.
    #[must_use]
    pub const fn is_upstream_unavailable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable { .. })
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::UpstreamUnavailable { failed_sources, .. } if !failed_sources.is_empty() => {
                Some(failed_sources.join(", "))
            }
            _ => None,
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

/// Failure of a single upstream call (fixture listing or weather).
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// Connection, DNS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-success status.
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// Payload could not be decoded.
    #[error("invalid upstream payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Failure of the annotation generator. Never surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// No generator backend is configured.
    #[error("generator not configured")]
    NotConfigured,

    /// The backend failed or returned nothing usable.
    #[error("generator failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_categories() {
        assert_eq!(
            GatewayError::UnknownLeague("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::FixtureNotFound(uuid::Uuid::nil()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::UpstreamUnavailable {
                key: "mls/2026".to_string(),
                failed_sources: Vec::new(),
            }
            .status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            GatewayError::PersistenceError("down".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unknown_city_is_a_bad_request() {
        let err = GatewayError::CityNotFound("Atlantis".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1003);
        assert_eq!(err.to_string(), "city not found: Atlantis");
        assert!(!err.is_upstream_unavailable());
    }

    #[test]
    fn only_upstream_unavailable_is_maskable() {
        let upstream = GatewayError::UpstreamUnavailable {
            key: "mls/2026".to_string(),
            failed_sources: vec!["season".to_string()],
        };
        assert!(upstream.is_upstream_unavailable());
        assert!(!GatewayError::PersistenceError("down".to_string()).is_upstream_unavailable());
    }

    #[test]
    fn upstream_details_list_failed_sources() {
        let err = GatewayError::UpstreamUnavailable {
            key: "mls/2026".to_string(),
            failed_sources: vec!["season".to_string(), "upcoming".to_string()],
        };
        assert_eq!(err.details().as_deref(), Some("season, upcoming"));
        assert_eq!(err.error_code(), 5001);
    }
}
