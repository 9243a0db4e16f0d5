//! Port for handing jobs to background workers.

use super::domain::{JobHandle, JobQueue, MaintenanceJob};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for job enqueueing.
pub type JobEnqueueResult<T> = Result<T, JobEnqueueError>;

/// Places jobs on named queues.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobEnqueuer: Send + Sync {
    /// Enqueues `job` on `queue` and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`JobEnqueueError::Persistence`] when the queue is unavailable.
    async fn enqueue(&self, job: MaintenanceJob, queue: JobQueue) -> JobEnqueueResult<JobHandle>;
}

/// Errors returned by job enqueuers.
#[derive(Debug, Clone, Error)]
pub enum JobEnqueueError {
    /// Queue storage failure.
    #[error("job queue error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl JobEnqueueError {
    /// Wraps a queue storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
