//! Maintenance actions that only enqueue work.

use super::{
    domain::{JobHandle, JobQueue, MaintenanceJob},
    ports::{JobEnqueueError, JobEnqueuer},
};
use crate::message::error::{ApiError, ErrorKind};
use std::sync::Arc;
use thiserror::Error;

/// Roles of the caller, as resolved by the host's authentication layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityContext {
    user_guid: Option<String>,
    admin: bool,
}

impl SecurityContext {
    /// An administrator.
    #[must_use]
    pub fn admin(user_guid: impl Into<String>) -> Self {
        Self {
            user_guid: Some(user_guid.into()),
            admin: true,
        }
    }

    /// A regular user.
    #[must_use]
    pub fn user(user_guid: impl Into<String>) -> Self {
        Self {
            user_guid: Some(user_guid.into()),
            admin: false,
        }
    }

    /// The caller's GUID, if authenticated.
    #[must_use]
    pub fn user_guid(&self) -> Option<&str> {
        self.user_guid.as_deref()
    }

    /// Returns `true` for administrators.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.admin
    }
}

/// Errors returned by [`BuildpackCacheCleanup::delete`].
#[derive(Debug, Clone, Error)]
pub enum CacheCleanupError {
    /// The caller is not an administrator.
    #[error("You are not authorized to perform the requested action")]
    NotAuthorized,

    /// The job could not be enqueued.
    #[error(transparent)]
    Enqueue(#[from] JobEnqueueError),
}

impl CacheCleanupError {
    /// The API error kind, if the failure is caused by the caller.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::NotAuthorized => Some(ErrorKind::NotAuthorized),
            Self::Enqueue(_) => None,
        }
    }

    /// Renders caller-caused failures as an API error entry.
    #[must_use]
    pub fn to_api_error(&self) -> Option<ApiError> {
        self.kind().map(|kind| ApiError::new(kind, self.to_string()))
    }
}

/// Deletes the buildpack cache by enqueueing a cleanup job.
#[derive(Debug)]
pub struct BuildpackCacheCleanup<Q: JobEnqueuer> {
    enqueuer: Arc<Q>,
}

impl<Q: JobEnqueuer> BuildpackCacheCleanup<Q> {
    /// Creates the action.
    #[must_use]
    pub const fn new(enqueuer: Arc<Q>) -> Self {
        Self { enqueuer }
    }

    /// Enqueues the cleanup on the generic queue.
    ///
    /// # Errors
    ///
    /// Returns [`CacheCleanupError::NotAuthorized`] unless `context` is an
    /// administrator, or [`CacheCleanupError::Enqueue`] when the queue fails.
    pub async fn delete(&self, context: &SecurityContext) -> Result<JobHandle, CacheCleanupError> {
        if !context.is_admin() {
            tracing::warn!(
                user_guid = context.user_guid().unwrap_or("anonymous"),
                "buildpack cache cleanup refused for non-admin"
            );
            return Err(CacheCleanupError::NotAuthorized);
        }

        let handle = self
            .enqueuer
            .enqueue(MaintenanceJob::BuildpackCacheCleanup, JobQueue::Generic)
            .await?;
        tracing::info!(
            job_guid = %handle.guid(),
            queue = handle.queue().as_str(),
            "enqueued buildpack cache cleanup"
        );
        Ok(handle)
    }
}
