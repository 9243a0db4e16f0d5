//! Build list query.

use crate::message::{
    RequestMessage, domain::MessageSchema, list::ListMessage, parsed::ParsedMessage,
};
use once_cell::sync::Lazy;

static SCHEMA: Lazy<MessageSchema> = Lazy::new(|| {
    MessageSchema::list("builds_list")
        .pagination()
        .comma_list("app_guids")
        .comma_list("package_guids")
        .comma_list("states")
        .label_selector()
        .audit_timestamps()
        .register()
});

/// Query for `GET /v3/builds`.
#[derive(Debug, Clone)]
pub struct BuildsListMessage {
    parsed: ParsedMessage,
}

impl BuildsListMessage {
    /// App GUIDs.
    #[must_use]
    pub fn app_guids(&self) -> Option<&[String]> {
        self.parsed.list("app_guids")
    }

    /// Package GUIDs.
    #[must_use]
    pub fn package_guids(&self) -> Option<&[String]> {
        self.parsed.list("package_guids")
    }

    /// Build states.
    #[must_use]
    pub fn states(&self) -> Option<&[String]> {
        self.parsed.list("states")
    }
}

impl RequestMessage for BuildsListMessage {
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

impl ListMessage for BuildsListMessage {}
