//! Service instance list query with space and organization sideloading.

use crate::message::{
    RequestMessage,
    domain::{FieldInclusion, FieldKind, FieldSpec, FieldsSelection, MessageSchema},
    list::ListMessage,
    parsed::ParsedMessage,
};
use once_cell::sync::Lazy;

/// Sideloadable attributes of an instance's space.
pub const SPACE_FIELDS: FieldInclusion =
    FieldInclusion::new("space", &["guid", "relationship.organization"]);

/// Sideloadable attributes of the organization owning an instance's space.
pub const SPACE_ORGANIZATION_FIELDS: FieldInclusion =
    FieldInclusion::new("space.organization", &["name", "guid"]);

const FIELDS: &[FieldInclusion] = &[SPACE_FIELDS, SPACE_ORGANIZATION_FIELDS];

static SCHEMA: Lazy<MessageSchema> = Lazy::new(|| {
    MessageSchema::list("service_instances_list")
        .pagination()
        .comma_list("names")
        .comma_list("space_guids")
        .comma_list("organization_guids")
        .field(FieldSpec::new("type", FieldKind::Text))
        .label_selector()
        .fields(FIELDS)
        .register()
});

/// Query for `GET /v3/service_instances`.
#[derive(Debug, Clone)]
pub struct ServiceInstancesListMessage {
    parsed: ParsedMessage,
}

impl ServiceInstancesListMessage {
    /// Instance names.
    #[must_use]
    pub fn names(&self) -> Option<&[String]> {
        self.parsed.list("names")
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

    /// `managed` or `user-provided`.
    #[must_use]
    pub fn instance_type(&self) -> Option<&str> {
        self.parsed.text("type")
    }

    /// Requested sideload attributes.
    #[must_use]
    pub fn fields(&self) -> Option<&FieldsSelection> {
        self.parsed.fields()
    }
}

impl RequestMessage for ServiceInstancesListMessage {
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

impl ListMessage for ServiceInstancesListMessage {}
