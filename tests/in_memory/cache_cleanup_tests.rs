//! Buildpack cache cleanup over the in-memory job queue.

use std::sync::Arc;

use crate::in_memory::helpers::runtime;
use eyre::{WrapErr, eyre};
use mockable::DefaultClock;
use plinth::{
    job::{
        BuildpackCacheCleanup, CacheCleanupError, InMemoryJobQueue, JobQueue, JobResource,
        MaintenanceJob, PROCESSING_STATE, SecurityContext,
    },
    message::error::ErrorResponse,
};
use rstest::{fixture, rstest};
use serde_json::json;
use std::io;
use tokio::runtime::Runtime;

#[fixture]
fn queue() -> Arc<InMemoryJobQueue<DefaultClock>> {
    Arc::new(InMemoryJobQueue::new(Arc::new(DefaultClock)))
}

/// An admin request leaves exactly one cleanup job on the generic queue.
#[rstest]
fn admin_cleanup_is_queued(
    runtime: io::Result<Runtime>,
    queue: Arc<InMemoryJobQueue<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime.wrap_err("runtime creation")?;
    let action = BuildpackCacheCleanup::new(Arc::clone(&queue));

    let handle = rt
        .block_on(action.delete(&SecurityContext::admin("admin-1")))
        .wrap_err("enqueue cleanup")?;
    let pending = queue.pending(JobQueue::Generic)?;

    assert_eq!(pending, [handle.clone()]);
    assert_eq!(handle.job(), MaintenanceJob::BuildpackCacheCleanup);
    Ok(())
}

/// The accepted job renders as a processing job resource.
#[rstest]
fn queued_job_renders_as_resource(
    runtime: io::Result<Runtime>,
    queue: Arc<InMemoryJobQueue<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime.wrap_err("runtime creation")?;
    let action = BuildpackCacheCleanup::new(Arc::clone(&queue));

    let handle = rt.block_on(action.delete(&SecurityContext::admin("admin-1")))?;
    let resource = JobResource::from_handle(&handle, "https://api.example.com/");
    let body = serde_json::to_value(&resource)?;

    assert_eq!(body.get("state"), Some(&json!(PROCESSING_STATE)));
    assert_eq!(body.get("operation"), Some(&json!("buildpack_cache.delete")));
    assert_eq!(
        body.pointer("/links/self/href"),
        Some(&json!(format!(
            "https://api.example.com/v3/jobs/{}",
            handle.guid()
        )))
    );
    assert_eq!(resource.created_at, resource.updated_at);
    Ok(())
}

/// Non-admins are refused and nothing is queued.
#[rstest]
fn non_admin_cleanup_is_refused(
    runtime: io::Result<Runtime>,
    queue: Arc<InMemoryJobQueue<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime.wrap_err("runtime creation")?;
    let action = BuildpackCacheCleanup::new(Arc::clone(&queue));

    let result = rt.block_on(action.delete(&SecurityContext::user("user-1")));

    let Err(err) = result else {
        return Err(eyre!("non-admin cleanup should be refused"));
    };
    assert!(matches!(err, CacheCleanupError::NotAuthorized));
    let response = err
        .to_api_error()
        .map(ErrorResponse::from)
        .ok_or_else(|| eyre!("refusal should render as an API error"))?;
    assert_eq!(
        serde_json::to_value(&response)?,
        json!({
            "errors": [{
                "code": 10003,
                "title": "NotAuthorized",
                "detail": "You are not authorized to perform the requested action"
            }]
        })
    );
    assert!(queue.pending(JobQueue::Generic)?.is_empty());
    Ok(())
}
