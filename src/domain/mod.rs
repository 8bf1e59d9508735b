//! Domain layer: fixture and annotation records plus the pure components of
//! the cache-aside pipeline.
//!
//! Everything here is side-effect free: the freshness gate, the city
//! resolver and the multi-source reconciler never fail and never touch I/O.

pub mod annotation;
pub mod city;
pub mod fixture;
pub mod fixture_id;
pub mod freshness;
pub mod league;
pub mod reconciler;
pub mod weather;

pub use annotation::{AnnotationRecord, Conditions};
pub use city::{CityResolver, CityTables};
pub use fixture::{FixtureDraft, FixtureKey, FixtureRecord};
pub use fixture_id::{AnnotationId, FixtureId};
pub use freshness::{Freshness, FreshnessGate, Timestamped};
pub use league::League;
pub use reconciler::{Reconciliation, SourceOutcome, reconcile};
pub use weather::WeatherReport;
