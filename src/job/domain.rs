//! Maintenance jobs, queues and the handles returned by enqueueing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use uuid::Uuid;

/// Jobs an action can hand to the background workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceJob {
    /// Deletes every cached buildpack from the blobstore.
    BuildpackCacheCleanup,
}

impl MaintenanceJob {
    /// Operation name shown in job resources.
    #[must_use]
    pub const fn operation(self) -> &'static str {
        match self {
            Self::BuildpackCacheCleanup => "buildpack_cache.delete",
        }
    }
}

/// Named work queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobQueue {
    /// The shared queue for jobs without a dedicated worker pool.
    #[serde(rename = "cc-generic")]
    Generic,
}

impl JobQueue {
    /// Queue name as the workers know it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "cc-generic",
        }
    }
}

impl fmt::Display for JobQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to an enqueued job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    guid: Uuid,
    job: MaintenanceJob,
    queue: JobQueue,
    created_at: DateTime<Utc>,
}

impl JobHandle {
    /// Creates a handle for a freshly enqueued job.
    #[must_use]
    pub fn new(job: MaintenanceJob, queue: JobQueue, created_at: DateTime<Utc>) -> Self {
        Self {
            guid: Uuid::new_v4(),
            job,
            queue,
            created_at,
        }
    }

    /// Job identifier.
    #[must_use]
    pub const fn guid(&self) -> Uuid {
        self.guid
    }

    /// The enqueued job.
    #[must_use]
    pub const fn job(&self) -> MaintenanceJob {
        self.job
    }

    /// The queue the job waits on.
    #[must_use]
    pub const fn queue(&self) -> JobQueue {
        self.queue
    }

    /// Enqueue time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// State reported for a job that has been accepted but not finished.
pub const PROCESSING_STATE: &str = "PROCESSING";

/// An accepted job as presented to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResource {
    /// Job identifier.
    pub guid: String,
    /// Operation name.
    pub operation: String,
    /// Always [`PROCESSING_STATE`] for a new job.
    pub state: String,
    /// Enqueue time, `YYYY-MM-DDThh:mm:ssZ`.
    pub created_at: String,
    /// Same as `created_at` for a new job.
    pub updated_at: String,
    /// Hypermedia links.
    pub links: Value,
}

impl JobResource {
    /// Presents `handle` with a `self` link under `api_base`.
    #[must_use]
    pub fn from_handle(handle: &JobHandle, api_base: &str) -> Self {
        let timestamp = crate::message::domain::format_timestamp(&handle.created_at());
        let href = format!("{}/v3/jobs/{}", api_base.trim_end_matches('/'), handle.guid());
        Self {
            guid: handle.guid().to_string(),
            operation: handle.job().operation().to_owned(),
            state: PROCESSING_STATE.to_owned(),
            created_at: timestamp.clone(),
            updated_at: timestamp,
            links: json!({ "self": { "href": href } }),
        }
    }
}
