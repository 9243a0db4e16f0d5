//! Space list query.

use crate::message::{
    RequestMessage, domain::MessageSchema, list::ListMessage, parsed::ParsedMessage,
};
use once_cell::sync::Lazy;

static SCHEMA: Lazy<MessageSchema> = Lazy::new(|| {
    MessageSchema::list("spaces_list")
        .pagination()
        .comma_list("names")
        .comma_list("guids")
        .comma_list("organization_guids")
        .label_selector()
        .audit_timestamps()
        .register()
});

/// Query for `GET /v3/spaces`.
#[derive(Debug, Clone)]
pub struct SpacesListMessage {
    parsed: ParsedMessage,
}

impl SpacesListMessage {
    /// Space names.
    #[must_use]
    pub fn names(&self) -> Option<&[String]> {
        self.parsed.list("names")
    }

    /// Organization GUIDs.
    #[must_use]
    pub fn organization_guids(&self) -> Option<&[String]> {
        self.parsed.list("organization_guids")
    }
}

impl RequestMessage for SpacesListMessage {
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

impl ListMessage for SpacesListMessage {}
