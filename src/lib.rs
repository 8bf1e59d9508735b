//! # fixture-gateway
//!
//! REST gateway that serves football fixtures and generated match
//! annotations from a persistent cache, refreshing from third-party APIs
//! only when the cached data is older than its TTL.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── FixtureService / AnnotationService (service/)
//!     │       └── CacheAside + CacheUpsertEngine
//!     │
//!     ├── FreshnessGate, reconcile, CityResolver (domain/)
//!     │
//!     ├── FixtureSource / AnalysisGenerator (upstream/)
//!     │
//!     └── Store: PostgreSQL or in-memory (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod upstream;
