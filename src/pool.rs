//! Bounded worker pool for URL tasks.

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{trace, warn};

/// Runs one task per input with at most `capacity` tasks in flight.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    slots: Arc<Semaphore>,
    capacity: NonZeroUsize,
}

impl WorkerPool {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(capacity.get())),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Run `task` for every item and wait for all of them.
    ///
    /// Admission blocks until a slot is free. A slot is held by the spawned
    /// task until its future completes, whatever the result. Results come
    /// back in completion order.
    pub async fn run<I, F, Fut, T>(&self, items: I, task: F) -> Vec<T>
    where
        I: IntoIterator,
        F: Fn(I::Item) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let mut tasks = JoinSet::new();

        for item in items {
            let slot = match Arc::clone(&self.slots).acquire_owned().await {
                Ok(slot) => slot,
                Err(e) => {
                    warn!("Worker pool closed, not admitting more tasks: {}", e);
                    break;
                }
            };
            trace!(
                "Admitted task ({} of {} slots free)",
                self.slots.available_permits(),
                self.capacity
            );

            let work = task(item);
            tasks.spawn(async move {
                let _slot = slot;
                work.await
            });
        }

        let mut results = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => warn!("Worker task failed: {}", e),
            }
        }

        results
    }
}
