//! Annotation DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AnnotationRecord, Conditions};

/// Request body for `POST /annotations`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAnnotationRequest {
    /// Internal fixture id.
    pub fixture_id: uuid::Uuid,
    /// Conditions to analyse the fixture under. All fields are optional.
    #[serde(default)]
    pub conditions: Conditions,
}

/// One annotation as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnnotationDto {
    /// Annotation id.
    pub id: uuid::Uuid,
    /// Fixture the annotation belongs to.
    pub fixture_id: uuid::Uuid,
    /// Analysis text.
    pub content: String,
    /// Model or backend that produced `content`.
    pub model: String,
    /// Temperature used, 0 when not supplied.
    pub temperature: f64,
    /// Wind speed used, 0 when not supplied.
    pub wind_speed: f64,
    /// Condition label used, empty when not supplied.
    pub condition: String,
    /// Full conditions snapshot.
    pub conditions: Conditions,
    /// Generation time.
    pub created_at: DateTime<Utc>,
}

impl From<AnnotationRecord> for AnnotationDto {
    fn from(record: AnnotationRecord) -> Self {
        Self {
            id: *record.id.as_uuid(),
            fixture_id: record.fixture_id.into(),
            content: record.content,
            model: record.model,
            temperature: record.temperature,
            wind_speed: record.wind_speed,
            condition: record.condition,
            conditions: record.conditions,
            created_at: record.created_at,
        }
    }
}
