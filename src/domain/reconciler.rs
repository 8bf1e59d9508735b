//! Merges fixture listings from several upstream sources into one set.
//!
//! Sources are passed in priority order. The first source to deliver an
//! external id owns that fixture; later sources only add ids not yet seen.
//! A failed source contributes nothing. The merged set is sorted by kickoff,
//! most recent first, with the external id as tiebreak.

use std::collections::HashSet;

use super::FixtureDraft;
use crate::error::SourceError;

/// Result of one upstream fetch, tagged with the source that produced it.
#[derive(Debug)]
pub struct SourceOutcome {
    /// Source name, used for logging and error reporting.
    pub source: String,
    /// Drafts on success, or the fetch failure.
    pub result: Result<Vec<FixtureDraft>, SourceError>,
}

impl SourceOutcome {
    /// Successful outcome.
    #[must_use]
    pub fn ok(source: impl Into<String>, drafts: Vec<FixtureDraft>) -> Self {
        Self {
            source: source.into(),
            result: Ok(drafts),
        }
    }

    /// Failed outcome.
    #[must_use]
    pub fn failed(source: impl Into<String>, error: SourceError) -> Self {
        Self {
            source: source.into(),
            result: Err(error),
        }
    }
}

/// A source that failed during reconciliation.
#[derive(Debug)]
pub struct FailedSource {
    /// Source name.
    pub source: String,
    /// Why it failed.
    pub error: SourceError,
}

/// Merged output of [`reconcile`].
#[derive(Debug, Default)]
pub struct Reconciliation {
    /// Deduplicated drafts, kickoff descending.
    pub fixtures: Vec<FixtureDraft>,
    /// Number of sources that returned successfully (possibly empty).
    pub succeeded: usize,
    /// Sources that failed, in priority order.
    pub failed: Vec<FailedSource>,
}

impl Reconciliation {
    /// `true` when at least one source was consulted and none succeeded.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.succeeded == 0 && !self.failed.is_empty()
    }

    /// `true` when some, but not all, sources failed.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.succeeded > 0 && !self.failed.is_empty()
    }

    /// Names of the failed sources.
    #[must_use]
    pub fn failed_names(&self) -> Vec<String> {
        self.failed.iter().map(|f| f.source.clone()).collect()
    }
}

/// Merges `outcomes` (highest priority first) into one deduplicated set.
///
/// Never fails: an all-empty input yields an empty set.
#[must_use]
pub fn reconcile(outcomes: Vec<SourceOutcome>) -> Reconciliation {
    let mut seen = HashSet::new();
    let mut merged = Reconciliation::default();

    for outcome in outcomes {
        match outcome.result {
            Ok(drafts) => {
                merged.succeeded += 1;
                for draft in drafts {
                    if seen.insert(draft.external_id.clone()) {
                        merged.fixtures.push(draft);
                    }
                }
            }
            Err(error) => merged.failed.push(FailedSource {
                source: outcome.source,
                error,
            }),
        }
    }

    merged.fixtures.sort_by(|a, b| {
        b.kickoff
            .cmp(&a.kickoff)
            .then_with(|| a.external_id.cmp(&b.external_id))
    });
    merged
}
