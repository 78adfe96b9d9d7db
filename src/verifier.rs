//! Dependency verification for a single manifest.

use crate::notify::{Event, Sink};
use crate::registry::Registry;
use crate::types::{Manifest, Outcome};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Checks every dependency of a manifest against the registry.
pub struct Verifier<R> {
    registry: Arc<R>,
    sink: Arc<dyn Sink>,
}

impl<R: Registry> Verifier<R> {
    pub fn new(registry: Arc<R>, sink: Arc<dyn Sink>) -> Self {
        Self { registry, sink }
    }

    /// Launch one lookup task per declared dependency and wait for all of them.
    ///
    /// Each outcome is emitted to the sink as soon as its lookup resolves, and
    /// all outcomes are returned once the last task has finished. Fan-out is
    /// unbounded within a manifest.
    pub async fn verify(&self, manifest: Manifest, source_url: &str) -> Vec<Outcome> {
        let checks = manifest.checks(source_url);
        drop(manifest);

        debug!("Verifying {} dependencies from {}", checks.len(), source_url);

        let mut tasks = JoinSet::new();
        for check in checks {
            let registry = Arc::clone(&self.registry);
            let sink = Arc::clone(&self.sink);

            tasks.spawn(async move {
                let status = registry.lookup(&check.name).await;
                let outcome = Outcome { check, status };
                sink.emit(&Event::Dependency(outcome.clone()));
                outcome
            });
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => warn!("Dependency check task for {} failed: {}", source_url, e),
            }
        }

        outcomes
    }
}
