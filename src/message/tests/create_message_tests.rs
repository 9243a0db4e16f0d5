//! Request-body messages for task and user-provided instance creation.

use crate::message::{
    RequestMessage,
    create::{REDACTED_CREDENTIALS, TaskCreateMessage, UserProvidedServiceInstanceCreateMessage},
    domain::RawParams,
    error::ErrorKind,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

fn body(value: Value) -> RawParams {
    RawParams::from_json(value).expect("object body")
}

#[fixture]
fn instance_body() -> Value {
    json!({
        "type": "user-provided",
        "name": "my-db",
        "credentials": { "password": "hunter2" },
        "syslog_drain_url": "syslog://logs.example.com:514",
        "route_service_url": "https://proxy.example.com",
        "tags": ["db", "prod"],
        "relationships": { "space": { "data": { "guid": "space-1" } } },
        "metadata": {
            "labels": { "env": "prod" },
            "annotations": { "example.com/owner": "team-a" }
        }
    })
}

fn with(mut base: Value, key: &str, value: Value) -> Value {
    if let Some(object) = base.as_object_mut() {
        object.insert(key.to_owned(), value);
    }
    base
}

fn without(mut base: Value, key: &str) -> Value {
    if let Some(object) = base.as_object_mut() {
        object.remove(key);
    }
    base
}

#[rstest]
fn task_with_every_field_is_valid() {
    let message = TaskCreateMessage::from_params(&body(json!({
        "name": "migrate",
        "command": "rake db:migrate",
        "memory_in_mb": 512,
        "disk_in_mb": "1024",
        "log_rate_limit_in_bytes_per_second": -1,
        "template": { "process": { "guid": "process-1" } },
        "metadata": { "labels": { "kind": "migration" } }
    })));

    assert!(message.is_valid(), "unexpected errors: {}", message.errors());
    assert_eq!(message.name(), Some("migrate"));
    assert_eq!(message.command(), Some("rake db:migrate"));
    assert_eq!(message.memory_in_mb(), Some(512));
    assert_eq!(message.disk_in_mb(), Some(1024));
    assert_eq!(message.log_rate_limit_in_bytes_per_second(), Some(-1));
    assert_eq!(message.template_process_guid(), Some("process-1"));
    assert_eq!(
        message.metadata().labels().get("kind"),
        Some(&Some("migration".to_owned()))
    );
}

#[rstest]
fn absent_limits_are_valid_and_unset() {
    let message = TaskCreateMessage::from_params(&body(json!({ "command": "echo hi" })));

    assert!(message.is_valid());
    assert_eq!(message.memory_in_mb(), None);
    assert_eq!(message.droplet_guid(), None);
    assert!(message.metadata().is_empty());
}

#[rstest]
#[case(json!(4.5), "must be an integer")]
#[case(json!("4.5"), "must be an integer")]
#[case(json!("lots"), "is not a number")]
#[case(json!(0), "must be greater than 0")]
#[case(json!(-3), "must be greater than 0")]
fn memory_must_be_a_positive_integer(#[case] memory: Value, #[case] message: &str) {
    let task = TaskCreateMessage::from_params(&body(json!({ "memory_in_mb": memory })));

    assert_eq!(task.errors().on("memory_in_mb"), [message]);
}

#[rstest]
fn fractional_memory_reads_naturally() {
    let task = TaskCreateMessage::from_params(&body(json!({ "memory_in_mb": 4.5 })));

    assert_eq!(task.errors().full_messages(), ["Memory in mb must be an integer"]);
}

#[rstest]
fn log_rate_below_unlimited_is_rejected() {
    let task = TaskCreateMessage::from_params(&body(json!({
        "log_rate_limit_in_bytes_per_second": -2
    })));

    assert_eq!(
        task.errors().on("log_rate_limit_in_bytes_per_second"),
        ["must be greater than or equal to -1"]
    );
}

#[rstest]
fn droplet_and_template_conflict() {
    let task = TaskCreateMessage::from_params(&body(json!({
        "droplet_guid": "droplet-1",
        "template": { "process": { "guid": "process-1" } }
    })));

    assert_eq!(
        task.errors().base(),
        ["Cannot specify both 'droplet_guid' and 'template'"]
    );
    assert!(
        task.errors()
            .iter()
            .all(|error| error.kind() == ErrorKind::ConflictingParameters)
    );
}

#[rstest]
fn template_must_name_a_process() {
    let task = TaskCreateMessage::from_params(&body(json!({ "template": { "process": {} } })));

    assert_eq!(
        task.errors().on("template"),
        ["must contain a valid GUID at 'process.guid'"]
    );
}

#[rstest]
fn unknown_body_keys_are_reported() {
    let task = TaskCreateMessage::from_params(&body(json!({ "command": "ls", "image": "x" })));

    assert_eq!(task.errors().base(), ["Unknown field(s): 'image'"]);
}

#[rstest]
fn user_provided_instance_reads_every_field(instance_body: Value) {
    let message = UserProvidedServiceInstanceCreateMessage::from_params(&body(instance_body));

    assert!(message.is_valid(), "unexpected errors: {}", message.errors());
    assert_eq!(message.name(), Some("my-db"));
    assert_eq!(message.space_guid(), Some("space-1"));
    assert_eq!(
        message.credentials(),
        Some(&json!({ "password": "hunter2" }))
    );
    assert_eq!(
        message.syslog_drain_url(),
        Some("syslog://logs.example.com:514")
    );
    assert_eq!(message.route_service_url(), Some("https://proxy.example.com"));
    assert_eq!(
        message.tags(),
        Some(&["db".to_owned(), "prod".to_owned()][..])
    );
    assert_eq!(
        message.metadata().annotations().get("example.com/owner"),
        Some(&Some("team-a".to_owned()))
    );
}

#[rstest]
fn only_user_provided_type_is_accepted(instance_body: Value) {
    let message = UserProvidedServiceInstanceCreateMessage::from_params(&body(with(
        instance_body,
        "type",
        json!("managed"),
    )));

    assert_eq!(message.errors().on("type"), ["must be one of 'user-provided'"]);
}

#[rstest]
#[case("name", "can't be blank")]
#[case("relationships", "can't be blank")]
#[case("type", "can't be blank")]
fn required_fields(instance_body: Value, #[case] field: &str, #[case] message: &str) {
    let parsed =
        UserProvidedServiceInstanceCreateMessage::from_params(&body(without(instance_body, field)));

    assert_eq!(parsed.errors().on(field), [message]);
}

#[rstest]
fn name_is_length_limited(instance_body: Value) {
    let parsed = UserProvidedServiceInstanceCreateMessage::from_params(&body(with(
        instance_body,
        "name",
        json!("n".repeat(256)),
    )));

    assert_eq!(
        parsed.errors().on("name"),
        ["is too long (maximum is 255 characters)"]
    );
}

#[rstest]
#[case("route_service_url", json!("http://proxy.example.com"), "must be a valid https URI")]
#[case("syslog_drain_url", json!("not a url"), "must be a valid URI")]
#[case("credentials", json!("secret"), "must be an object")]
#[case("tags", json!("db"), "must be an array")]
#[case("name", json!(7), "must be a string")]
fn field_shapes_and_urls(
    instance_body: Value,
    #[case] field: &str,
    #[case] value: Value,
    #[case] message: &str,
) {
    let parsed =
        UserProvidedServiceInstanceCreateMessage::from_params(&body(with(instance_body, field, value)));

    assert_eq!(parsed.errors().on(field), [message]);
}

#[rstest]
fn tags_have_a_combined_length_limit(instance_body: Value) {
    let tags: Vec<String> = (0..3).map(|_| "t".repeat(800)).collect();
    let parsed =
        UserProvidedServiceInstanceCreateMessage::from_params(&body(with(instance_body, "tags", json!(tags))));

    assert_eq!(
        parsed.errors().on("tags"),
        ["combined length must not exceed 2048 characters"]
    );
}

#[rstest]
fn space_relationship_needs_a_guid(instance_body: Value) {
    let parsed = UserProvidedServiceInstanceCreateMessage::from_params(&body(with(
        instance_body,
        "relationships",
        json!({ "space": { "data": {} } }),
    )));

    assert_eq!(
        parsed.errors().on("relationships"),
        ["must contain a valid GUID at 'space.data.guid'"]
    );
}

#[rstest]
fn metadata_problems_are_reported_together(instance_body: Value) {
    let parsed = UserProvidedServiceInstanceCreateMessage::from_params(&body(with(
        instance_body,
        "metadata",
        json!({
            "labels": { "-env": "prod", "tier": "pr@d" },
            "annotations": { "note": 5 },
            "owners": {}
        }),
    )));

    assert_eq!(
        parsed.errors().on("metadata"),
        [
            "has unexpected field(s): 'owners'",
            "label key error: '-env' starts or ends with invalid characters",
            "label value error: 'pr@d' contains invalid characters",
            "annotation value error: 'note' value must be a string",
        ]
    );
}

#[rstest]
fn audit_request_hides_credentials(instance_body: Value) {
    let parsed = UserProvidedServiceInstanceCreateMessage::from_params(&body(instance_body));
    let audit = parsed.audit_request();

    assert_eq!(audit.get("credentials"), Some(&json!(REDACTED_CREDENTIALS)));
    assert_eq!(audit.get("name"), Some(&json!("my-db")));
    assert_eq!(audit.get("tags"), Some(&json!(["db", "prod"])));
    assert!(!audit.to_string().contains("hunter2"));
}

#[rstest]
fn audit_request_without_credentials_is_unchanged(instance_body: Value) {
    let parsed =
        UserProvidedServiceInstanceCreateMessage::from_params(&body(without(instance_body, "credentials")));

    assert!(parsed.audit_request().get("credentials").is_none());
}
