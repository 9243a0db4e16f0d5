//! Concrete list messages and the shared list accessors.

use crate::message::{
    RequestMessage,
    domain::{LabelRequirement, OrderBy, OrderDirection, RawParams},
    list::{
        BuildsListMessage, DEFAULT_PER_PAGE, EventsListMessage, ListMessage, PaginationOptions,
        ProcessesListMessage, ServiceInstancesListMessage, ServiceUsageEventsListMessage,
        SpacesListMessage,
    },
    ports::MessageConfig,
};
use chrono::{TimeZone, Utc};
use rstest::rstest;

fn query<M: RequestMessage>(raw: &str) -> M {
    M::from_params(&RawParams::from_query(raw))
}

#[rstest]
fn processes_expose_their_filters() {
    let message: ProcessesListMessage =
        query("types=web,worker&space_guids=s1&organization_guids=o1&app_guids=a1,a2&guids=p1");

    assert!(message.is_valid());
    assert_eq!(message.types(), Some(&["web".to_owned(), "worker".to_owned()][..]));
    assert_eq!(message.space_guids(), Some(&["s1".to_owned()][..]));
    assert_eq!(message.organization_guids(), Some(&["o1".to_owned()][..]));
    assert_eq!(message.app_guids().map(<[String]>::len), Some(2));
    assert_eq!(message.guids(), Some(&["p1".to_owned()][..]));
    assert_eq!(message.app_guid(), None);
}

#[rstest]
fn nested_processes_route_keeps_app_guid() {
    let message: ProcessesListMessage = query("app_guid=app-1&types=web");

    assert!(message.is_valid());
    assert_eq!(message.app_guid(), Some("app-1"));
}

#[rstest]
fn pagination_defaults_are_filled_in() {
    let message: SpacesListMessage = query("names=dev");

    assert_eq!(message.pagination(), PaginationOptions::default());
    assert_eq!(message.pagination().per_page, DEFAULT_PER_PAGE);
    assert_eq!(message.page(), None);
}

#[rstest]
fn pagination_uses_requested_values() {
    let message: SpacesListMessage = query("page=3&per_page=10&order_by=-updated_at");

    assert_eq!(
        message.pagination(),
        PaginationOptions {
            page: 3,
            per_page: 10,
            order_by: OrderBy::new("updated_at", OrderDirection::Descending),
        }
    );
}

#[rstest]
fn lenient_config_accepts_larger_pages() {
    let raw = RawParams::from_query("per_page=8000");

    assert!(!SpacesListMessage::from_params(&raw).is_valid());
    assert!(SpacesListMessage::from_params_with_config(&raw, &MessageConfig::lenient()).is_valid());
}

#[rstest]
fn spaces_accept_label_selectors() {
    let message: SpacesListMessage = query("names=dev,prod&label_selector=env%3Dprod");

    assert_eq!(message.names().map(<[String]>::len), Some(2));
    let selector = message.label_selector().expect("selector");
    assert_eq!(
        selector.requirements(),
        [LabelRequirement::Equal {
            key: "env".to_owned(),
            value: "prod".to_owned()
        }]
    );
}

#[rstest]
fn builds_filter_by_state_and_label() {
    let message: BuildsListMessage = query("states=STAGED,FAILED&package_guids=pkg&label_selector=!legacy");

    assert!(message.is_valid());
    assert_eq!(message.states().map(<[String]>::len), Some(2));
    assert_eq!(message.package_guids(), Some(&["pkg".to_owned()][..]));
    assert!(message.label_selector().is_some());
}

#[rstest]
fn events_filter_by_target_and_time() {
    let message: EventsListMessage = query(
        "types=audit.app.create&target_guids=t1&created_ats[gte]=2024-01-01T00:00:00Z",
    );

    assert!(message.is_valid());
    assert_eq!(message.target_guids(), Some(&["t1".to_owned()][..]));
    let filters = message.created_ats().expect("created_ats");
    assert!(filters.is_relational());
    let instant = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid date");
    assert!(filters.matches(&instant));
}

#[rstest]
fn events_do_not_accept_label_selectors() {
    let message: EventsListMessage = query("label_selector=env%3Dprod");

    assert_eq!(
        message.errors().base(),
        ["Unknown query parameter(s): 'label_selector'"]
    );
}

#[rstest]
fn invalid_timestamps_yield_no_filters() {
    let message: ProcessesListMessage = query("created_ats[lt]=soon");

    assert!(!message.is_valid());
    assert!(message.created_ats().is_none());
}

#[rstest]
fn usage_events_accept_one_after_guid() {
    let message: ServiceUsageEventsListMessage =
        query("after_guid=evt-1&service_instance_types=managed");

    assert!(message.is_valid());
    assert_eq!(message.after_guid(), Some("evt-1"));
    assert_eq!(
        message.service_instance_types(),
        Some(&["managed".to_owned()][..])
    );
}

#[rstest]
fn usage_events_reject_several_after_guids() {
    let message: ServiceUsageEventsListMessage = query("after_guid=evt-1,evt-2");

    assert_eq!(
        message.errors().on("after_guid"),
        ["filter accepts only one guid"]
    );
}

#[rstest]
fn service_instances_read_fields_selection() {
    let message: ServiceInstancesListMessage = query(
        "type=user-provided&fields[space]=guid&fields[space.organization]=name,guid",
    );

    assert!(message.is_valid(), "unexpected errors: {}", message.errors());
    assert_eq!(message.instance_type(), Some("user-provided"));
    let fields = message.fields().expect("fields");
    assert!(fields.includes("space", "guid"));
    assert!(fields.includes("space.organization", "name"));
    assert!(!fields.includes("space", "relationship.organization"));
}

#[rstest]
fn requested_tracks_keys_even_when_empty() {
    let message: SpacesListMessage = query("names=");

    assert!(message.requested("names"));
    assert!(!message.requested("guids"));
    assert_eq!(message.names().map(<[String]>::len), Some(0));
}

#[rstest]
fn param_hash_omits_paging_and_reparses() {
    let message: ProcessesListMessage = query(
        "types=web,worker&page=2&per_page=10&order_by=-name&label_selector=env%3Dprod&created_ats[gt]=2024-01-01T00:00:00Z",
    );
    let hash = message.to_param_hash();

    assert!(!hash.contains_key("page"));
    assert!(!hash.contains_key("per_page"));
    assert!(hash.contains_key("order_by"));

    let reparsed = ProcessesListMessage::from_params(&hash);
    assert!(reparsed.is_valid(), "unexpected errors: {}", reparsed.errors());
    assert_eq!(reparsed.types(), message.types());
    assert_eq!(reparsed.order_by(), message.order_by());
    assert_eq!(reparsed.label_selector(), message.label_selector());
    assert_eq!(reparsed.created_ats(), message.created_ats());
}

#[rstest]
fn param_hash_keeps_nested_app_guid() {
    let message: ProcessesListMessage = query("app_guid=app-1&types=web");

    let hash = message.to_param_hash();
    assert_eq!(hash.keys().collect::<Vec<_>>(), ["app_guid", "types"]);
}

#[rstest]
fn query_string_round_trips() {
    let message: ServiceInstancesListMessage =
        query("names=a,b&fields[space]=guid&per_page=5");

    let rendered = message.to_query_string();
    assert!(!rendered.contains("per_page"));

    let reparsed: ServiceInstancesListMessage = query(&rendered);
    assert!(reparsed.is_valid(), "unexpected errors: {}", reparsed.errors());
    assert_eq!(reparsed.names(), message.names());
    assert_eq!(reparsed.fields(), message.fields());
}
