//! Audit event list query.

use crate::message::{
    RequestMessage, domain::MessageSchema, list::ListMessage, parsed::ParsedMessage,
};
use once_cell::sync::Lazy;

static SCHEMA: Lazy<MessageSchema> = Lazy::new(|| {
    MessageSchema::list("audit_events_list")
        .pagination()
        .comma_list("types")
        .comma_list("target_guids")
        .comma_list("space_guids")
        .comma_list("organization_guids")
        .audit_timestamps()
        .register()
});

/// Query for `GET /v3/audit_events`.
#[derive(Debug, Clone)]
pub struct EventsListMessage {
    parsed: ParsedMessage,
}

impl EventsListMessage {
    /// Event types.
    #[must_use]
    pub fn types(&self) -> Option<&[String]> {
        self.parsed.list("types")
    }

    /// GUIDs of the resources the events are about.
    #[must_use]
    pub fn target_guids(&self) -> Option<&[String]> {
        self.parsed.list("target_guids")
    }

    /// Space GUIDs.
    #[must_use]
    pub fn space_guids(&self) -> Option<&[String]> {
        self.parsed.list("space_guids")
    }

    /// Organization GUIDs.
    #[must_use]
    pub fn organization_guids(&self) -> Option<&[String]> {
        self.parsed.list("organization_guids")
    }
}

impl RequestMessage for EventsListMessage {
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

impl ListMessage for EventsListMessage {}
