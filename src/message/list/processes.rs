//! Process list query, including the app-nested route.

use crate::message::{
    RequestMessage,
    domain::{FieldKind, FieldSpec, MessageSchema},
    list::ListMessage,
    parsed::ParsedMessage,
};
use once_cell::sync::Lazy;

static SCHEMA: Lazy<MessageSchema> = Lazy::new(|| {
    MessageSchema::list("processes_list")
        .pagination()
        .field(FieldSpec::new("app_guid", FieldKind::Guid))
        .comma_list("types")
        .comma_list("space_guids")
        .comma_list("organization_guids")
        .comma_list("app_guids")
        .comma_list("guids")
        .label_selector()
        .audit_timestamps()
        .exclusive_when_present(
            "app_guid",
            &["app_guids", "space_guids", "organization_guids"],
        )
        .register()
});

/// Query for `GET /v3/processes` and `GET /v3/apps/:guid/processes`.
///
/// On the nested route `app_guid` is set and the app, space and
/// organization scoping filters are rejected as unknown.
#[derive(Debug, Clone)]
pub struct ProcessesListMessage {
    parsed: ParsedMessage,
}

impl ProcessesListMessage {
    /// The parent app on the nested route.
    #[must_use]
    pub fn app_guid(&self) -> Option<&str> {
        self.parsed.text("app_guid")
    }

    /// Process types.
    #[must_use]
    pub fn types(&self) -> Option<&[String]> {
        self.parsed.list("types")
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

    /// App GUIDs.
    #[must_use]
    pub fn app_guids(&self) -> Option<&[String]> {
        self.parsed.list("app_guids")
    }
}

impl RequestMessage for ProcessesListMessage {
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

impl ListMessage for ProcessesListMessage {}
