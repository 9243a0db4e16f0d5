//! Maintenance actions that hand their work to background jobs.
//!
//! Actions here authorize the caller, enqueue a job through the
//! [`ports::JobEnqueuer`] port and return at once. Running the job is left to
//! whatever consumes the queue.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

pub use adapters::InMemoryJobQueue;
pub use domain::{JobHandle, JobQueue, JobResource, MaintenanceJob, PROCESSING_STATE};
pub use ports::{JobEnqueueError, JobEnqueueResult, JobEnqueuer};
pub use services::{BuildpackCacheCleanup, CacheCleanupError, SecurityContext};

#[cfg(test)]
mod tests;
