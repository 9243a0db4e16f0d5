//! Service usage event list query.

use crate::message::{
    RequestMessage,
    domain::{FieldKind, FieldRule, FieldSpec, MessageSchema},
    list::ListMessage,
    parsed::ParsedMessage,
};
use once_cell::sync::Lazy;

static SCHEMA: Lazy<MessageSchema> = Lazy::new(|| {
    MessageSchema::list("service_usage_events_list")
        .pagination()
        .field(
            FieldSpec::new("after_guid", FieldKind::CommaList).with_rule(FieldRule::ExactItems {
                count: 1,
                message: "filter accepts only one guid",
            }),
        )
        .comma_list("guids")
        .comma_list("service_instance_types")
        .comma_list("service_offering_guids")
        .audit_timestamps()
        .disallow("updated_ats", "Filtering by 'updated_ats' is not allowed")
        .order_by_fields(&["created_at"])
        .register()
});

/// Query for `GET /v3/service_usage_events`.
///
/// Usage events are immutable, so `updated_ats` is rejected and results
/// sort only by `created_at`.
#[derive(Debug, Clone)]
pub struct ServiceUsageEventsListMessage {
    parsed: ParsedMessage,
}

impl ServiceUsageEventsListMessage {
    /// The event after which to start listing.
    #[must_use]
    pub fn after_guid(&self) -> Option<&str> {
        self.parsed
            .list("after_guid")
            .and_then(|guids| guids.first())
            .map(String::as_str)
    }

    /// Service instance types.
    #[must_use]
    pub fn service_instance_types(&self) -> Option<&[String]> {
        self.parsed.list("service_instance_types")
    }

    /// Service offering GUIDs.
    #[must_use]
    pub fn service_offering_guids(&self) -> Option<&[String]> {
        self.parsed.list("service_offering_guids")
    }
}

impl RequestMessage for ServiceUsageEventsListMessage {
    fn schema() -> &'static MessageSchema {
        &SCHEMA
    }

    fn from_parsed(parsed: ParsedMessage) -> Self {
        Self { parsed }
    }

    fn parsed(&self) -> &ParsedMessage {
        &self.parsed
    }
}

impl ListMessage for ServiceUsageEventsListMessage {}
