//! Internal identifiers for fixtures and annotations.
//!
//! A fixture has two identities. The provider's `external_id` is what
//! upserts match on, and it is only unique within that provider. The
//! [`FixtureId`] is ours: minted the first time an external id is stored,
//! kept across every later upsert, and the only column an annotation uses
//! to point at its fixture. [`AnnotationId`] names one generated text.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Mints a fresh random id.
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wraps an id read back from storage or a request path.
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// The raw UUID, for binding into queries and error payloads.
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$name> for uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id! {
    /// Our identity for a fixture, stable across refreshes.
    ///
    /// Annotations join on this, never on the provider's external id, so a
    /// re-listed fixture keeps its analysis history.
    FixtureId
}

uuid_id! {
    /// Identity of one stored annotation. Several may exist per fixture;
    /// the newest by `created_at` is the one served.
    AnnotationId
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_differ() {
        assert_ne!(FixtureId::new(), FixtureId::new());
        assert_ne!(AnnotationId::new(), AnnotationId::new());
    }

    #[test]
    fn display_is_hyphenated_uuid() {
        let uuid = uuid::Uuid::new_v4();
        assert_eq!(FixtureId::from_uuid(uuid).to_string(), uuid.to_string());
    }

    #[test]
    fn fixture_id_serializes_as_bare_uuid() {
        let uuid = uuid::Uuid::new_v4();
        let Ok(json) = serde_json::to_string(&FixtureId::from_uuid(uuid)) else {
            panic!("serialization failed");
        };
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn stored_uuid_round_trips_through_the_newtype() {
        let uuid = uuid::Uuid::new_v4();
        let id = FixtureId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
        assert_eq!(uuid::Uuid::from(id), uuid);
        assert_eq!(*AnnotationId::from_uuid(uuid).as_uuid(), uuid);
    }
}
