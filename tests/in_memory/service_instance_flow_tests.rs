//! End-to-end creation of user-provided instances over in-memory adapters.

use std::sync::Arc;

use crate::in_memory::helpers::{
    KNOWN_SPACE, OTHER_SPACE, create_action, create_body, create_message, events, instances,
    runtime,
};
use eyre::{WrapErr, eyre};
use plinth::{
    message::{create::REDACTED_CREDENTIALS, error::ErrorKind},
    service_instance::{
        adapters::memory::{InMemoryServiceEventRepository, InMemoryServiceInstanceRepository},
        domain::{USER_PROVIDED_TYPE, UserAuditInfo},
        ports::ServiceInstanceRepository,
        services::ServiceInstanceCreateError,
    },
};
use rstest::rstest;
use serde_json::json;
use std::io;
use tokio::runtime::Runtime;

/// A created instance can be read back with every attribute and its
/// metadata.
#[rstest]
fn created_instance_round_trips(
    runtime: io::Result<Runtime>,
    instances: Arc<InMemoryServiceInstanceRepository>,
    events: Arc<InMemoryServiceEventRepository>,
) -> eyre::Result<()> {
    let rt = runtime.wrap_err("runtime creation")?;
    let action = create_action(&instances, &events);
    let message = create_message(create_body("orders-db", KNOWN_SPACE))?;

    let created = rt
        .block_on(action.create(&message, &UserAuditInfo::new("user-1")))
        .wrap_err("create instance")?;
    let found = rt
        .block_on(instances.find_by_guid(created.guid()))?
        .ok_or_else(|| eyre!("instance not found after create"))?;

    assert_eq!(found, created);
    assert_eq!(found.name(), "orders-db");
    assert_eq!(found.instance_type(), USER_PROVIDED_TYPE);
    assert_eq!(found.route_service_url(), Some("https://proxy.example.com"));
    assert_eq!(found.syslog_drain_url(), None);
    assert_eq!(found.tags(), ["db".to_owned()]);
    assert_eq!(found.labels().len(), 2);
    assert_eq!(found.annotations().len(), 1);
    assert_eq!(instances.label_count()?, 2);
    assert_eq!(instances.annotation_count()?, 1);
    Ok(())
}

/// Prefixed label keys are stored split at the slash.
#[rstest]
fn prefixed_labels_keep_their_prefix(
    runtime: io::Result<Runtime>,
    instances: Arc<InMemoryServiceInstanceRepository>,
    events: Arc<InMemoryServiceEventRepository>,
) -> eyre::Result<()> {
    let rt = runtime.wrap_err("runtime creation")?;
    let action = create_action(&instances, &events);
    let message = create_message(create_body("orders-db", KNOWN_SPACE))?;

    let created = rt.block_on(action.create(&message, &UserAuditInfo::new("user-1")))?;
    let tier = created
        .labels()
        .iter()
        .find(|label| label.key_name() == "tier")
        .ok_or_else(|| eyre!("tier label missing"))?;

    assert_eq!(tier.key_prefix(), Some("example.com"));
    assert_eq!(tier.value(), "backend");
    assert_eq!(tier.key(), "example.com/tier");
    Ok(())
}

/// Each creation records exactly one audit event and credentials never
/// reach it.
#[rstest]
fn audit_event_carries_redacted_request(
    runtime: io::Result<Runtime>,
    instances: Arc<InMemoryServiceInstanceRepository>,
    events: Arc<InMemoryServiceEventRepository>,
) -> eyre::Result<()> {
    let rt = runtime.wrap_err("runtime creation")?;
    let action = create_action(&instances, &events);
    let message = create_message(create_body("orders-db", KNOWN_SPACE))?;
    let actor = UserAuditInfo::new("user-1")
        .with_name("alice")
        .with_email("alice@example.com");

    let created = rt.block_on(action.create(&message, &actor))?;
    let recorded = events.events()?;

    let [event] = recorded.as_slice() else {
        return Err(eyre!("expected one event, found {}", recorded.len()));
    };
    assert_eq!(event.event_type, "audit.user_provided_service_instance.create");
    assert_eq!(event.instance_guid, created.guid());
    assert_eq!(event.space_guid, KNOWN_SPACE);
    assert_eq!(event.actor, actor);
    assert_eq!(
        event.request.get("credentials"),
        Some(&json!(REDACTED_CREDENTIALS))
    );
    assert!(!event.request.to_string().contains("s3cret"));
    Ok(())
}

/// Names are unique per space, not globally.
#[rstest]
fn duplicate_name_is_rejected_only_within_a_space(
    runtime: io::Result<Runtime>,
    instances: Arc<InMemoryServiceInstanceRepository>,
    events: Arc<InMemoryServiceEventRepository>,
) -> eyre::Result<()> {
    let rt = runtime.wrap_err("runtime creation")?;
    let action = create_action(&instances, &events);
    let actor = UserAuditInfo::new("user-1");

    rt.block_on(action.create(&create_message(create_body("shared", KNOWN_SPACE))?, &actor))?;
    rt.block_on(action.create(&create_message(create_body("shared", OTHER_SPACE))?, &actor))?;
    let duplicate =
        rt.block_on(action.create(&create_message(create_body("shared", KNOWN_SPACE))?, &actor));

    let Err(err) = duplicate else {
        return Err(eyre!("duplicate name in one space should be rejected"));
    };
    assert!(matches!(err, ServiceInstanceCreateError::NameTaken(ref name) if name == "shared"));
    assert_eq!(err.kind(), Some(ErrorKind::NameTaken));
    assert_eq!(
        err.to_api_error().map(|api| api.detail),
        Some("The service instance name is taken: shared".to_owned())
    );
    assert_eq!(instances.instance_count()?, 2);
    assert_eq!(instances.label_count()?, 4);
    assert_eq!(events.events()?.len(), 2);
    Ok(())
}

/// A space the store does not know is an entity error, not a crash.
#[rstest]
fn unknown_space_is_an_invalid_entity(
    runtime: io::Result<Runtime>,
    instances: Arc<InMemoryServiceInstanceRepository>,
    events: Arc<InMemoryServiceEventRepository>,
) -> eyre::Result<()> {
    let rt = runtime.wrap_err("runtime creation")?;
    let action = create_action(&instances, &events);
    let message = create_message(create_body("orders-db", "space-404"))?;

    let result = rt.block_on(action.create(&message, &UserAuditInfo::new("user-1")));

    let Err(err) = result else {
        return Err(eyre!("unknown space should be rejected"));
    };
    assert_eq!(err.kind(), Some(ErrorKind::InvalidEntity));
    assert_eq!(
        err.to_api_error().map(|api| api.code),
        Some(10008)
    );
    assert_eq!(instances.instance_count()?, 0);
    assert!(events.events()?.is_empty());
    Ok(())
}

/// Invalid messages never reach the store.
#[rstest]
fn invalid_message_is_rejected_before_storage(
    runtime: io::Result<Runtime>,
    instances: Arc<InMemoryServiceInstanceRepository>,
    events: Arc<InMemoryServiceEventRepository>,
) -> eyre::Result<()> {
    let rt = runtime.wrap_err("runtime creation")?;
    let action = create_action(&instances, &events);
    let mut body = create_body("orders-db", KNOWN_SPACE);
    if let Some(object) = body.as_object_mut() {
        object.insert("route_service_url".to_owned(), json!("http://proxy.example.com"));
    }
    let message = create_message(body)?;

    let result = rt.block_on(action.create(&message, &UserAuditInfo::new("user-1")));

    assert!(matches!(
        result,
        Err(ServiceInstanceCreateError::InvalidEntity(ref detail))
            if detail == "Route service url must be a valid https URI"
    ));
    assert_eq!(instances.instance_count()?, 0);
    assert!(events.events()?.is_empty());
    Ok(())
}
