//! Package registry lookups.
//!
//! The rest of the pipeline only sees the [`Registry`] trait, so the
//! found/not-found heuristic can be swapped without touching the verifier.

pub mod search;

pub use search::SearchPageRegistry;

use crate::types::LookupStatus;
use std::future::Future;

/// Answers whether a dependency name is published.
pub trait Registry: Send + Sync + 'static {
    /// Look up a single name. Never retries; failures are reported as
    /// [`LookupStatus::Failed`].
    fn lookup(&self, name: &str) -> impl Future<Output = LookupStatus> + Send;
}
