//! Buildpack cache cleanup authorization and job presentation.

use std::sync::Arc;

use crate::job::{
    BuildpackCacheCleanup, CacheCleanupError, InMemoryJobQueue, JobEnqueueError, JobHandle,
    JobQueue, JobResource, MaintenanceJob, PROCESSING_STATE, SecurityContext,
    ports::MockJobEnqueuer,
};
use crate::message::error::ErrorKind;
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn queue() -> Arc<InMemoryJobQueue<DefaultClock>> {
    Arc::new(InMemoryJobQueue::new(Arc::new(DefaultClock)))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_enqueues_cleanup_on_generic_queue(queue: Arc<InMemoryJobQueue<DefaultClock>>) {
    let action = BuildpackCacheCleanup::new(Arc::clone(&queue));

    let handle = action
        .delete(&SecurityContext::admin("admin-guid"))
        .await
        .expect("admin may clean the cache");

    assert_eq!(handle.job(), MaintenanceJob::BuildpackCacheCleanup);
    assert_eq!(handle.queue(), JobQueue::Generic);
    assert_eq!(handle.queue().as_str(), "cc-generic");
    assert_eq!(
        queue.pending(JobQueue::Generic).expect("queue readable"),
        vec![handle]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_admin_is_not_authorized(queue: Arc<InMemoryJobQueue<DefaultClock>>) {
    let action = BuildpackCacheCleanup::new(Arc::clone(&queue));

    let result = action
        .delete(&SecurityContext::user("user-guid"))
        .await;

    let Err(err) = result else {
        panic!("non-admin should be refused");
    };
    assert!(matches!(err, CacheCleanupError::NotAuthorized));
    assert_eq!(err.kind(), Some(ErrorKind::NotAuthorized));
    assert_eq!(err.to_api_error().map(|api| api.code), Some(10003));
    assert!(
        queue
            .pending(JobQueue::Generic)
            .expect("queue readable")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn enqueue_failure_is_propagated() {
    let mut enqueuer = MockJobEnqueuer::new();
    enqueuer.expect_enqueue().times(1).returning(|_, _| {
        Err(JobEnqueueError::persistence(std::io::Error::other(
            "queue offline",
        )))
    });
    let action = BuildpackCacheCleanup::new(Arc::new(enqueuer));

    let result = action
        .delete(&SecurityContext::admin("admin-guid"))
        .await;

    let Err(err) = result else {
        panic!("enqueue failure should surface");
    };
    assert_eq!(err.kind(), None);
    assert!(err.to_string().contains("queue offline"));
}

#[rstest]
fn job_resource_is_processing_with_self_link() {
    let created_at = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid date");
    let handle = JobHandle::new(
        MaintenanceJob::BuildpackCacheCleanup,
        JobQueue::Generic,
        created_at,
    );

    let resource = JobResource::from_handle(&handle, "https://api.example.com/");

    assert_eq!(resource.state, PROCESSING_STATE);
    assert_eq!(resource.operation, "buildpack_cache.delete");
    assert_eq!(resource.created_at, "2024-03-01T12:00:00Z");
    assert_eq!(
        resource.links,
        json!({ "self": { "href": format!("https://api.example.com/v3/jobs/{}", handle.guid()) } })
    );
}
