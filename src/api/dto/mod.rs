//! Data Transfer Objects for REST request/response serialization.
//!
//! Identifiers are plain UUIDs and timestamps are RFC 3339 strings.

pub mod annotation_dto;
pub mod fixture_dto;
pub mod weather_dto;

pub use annotation_dto::*;
pub use fixture_dto::*;
pub use weather_dto::*;
