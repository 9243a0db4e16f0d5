//! In-memory job queue.

use super::{
    domain::{JobHandle, JobQueue, MaintenanceJob},
    ports::{JobEnqueueError, JobEnqueueResult, JobEnqueuer},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::{Arc, RwLock};

/// Holds enqueued jobs in memory; nothing ever runs them.
#[derive(Debug, Clone)]
pub struct InMemoryJobQueue<C: Clock + Send + Sync> {
    clock: Arc<C>,
    jobs: Arc<RwLock<Vec<JobHandle>>>,
}

impl<C: Clock + Send + Sync> InMemoryJobQueue<C> {
    /// Creates an empty queue stamped by `clock`.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            clock,
            jobs: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Jobs waiting on `queue`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`JobEnqueueError::Persistence`] when the lock is poisoned.
    pub fn pending(&self, queue: JobQueue) -> JobEnqueueResult<Vec<JobHandle>> {
        let jobs = self
            .jobs
            .read()
            .map_err(|err| JobEnqueueError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(jobs
            .iter()
            .filter(|handle| handle.queue() == queue)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> JobEnqueuer for InMemoryJobQueue<C> {
    async fn enqueue(&self, job: MaintenanceJob, queue: JobQueue) -> JobEnqueueResult<JobHandle> {
        let handle = JobHandle::new(job, queue, self.clock.utc());
        let mut jobs = self
            .jobs
            .write()
            .map_err(|err| JobEnqueueError::persistence(std::io::Error::other(err.to_string())))?;
        jobs.push(handle.clone());
        Ok(handle)
    }
}
