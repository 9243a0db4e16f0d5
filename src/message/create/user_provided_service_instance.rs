//! User-provided service instance create body and its redacted audit view.

use crate::message::{
    RequestMessage,
    domain::{FieldKind, FieldRule, FieldSpec, MessageSchema, MetadataRequest},
    parsed::ParsedMessage,
};
use once_cell::sync::Lazy;
use serde_json::Value;

/// Replacement for credentials in audit payloads.
pub const REDACTED_CREDENTIALS: &str = "[PRIVATE DATA HIDDEN]";

static SCHEMA: Lazy<MessageSchema> = Lazy::new(|| {
    MessageSchema::body("user_provided_service_instance_create")
        .field(
            FieldSpec::new("type", FieldKind::Text)
                .with_rule(FieldRule::Required)
                .with_rule(FieldRule::OneOf(&["user-provided"])),
        )
        .field(
            FieldSpec::new("name", FieldKind::Text)
                .with_rule(FieldRule::Required)
                .with_rule(FieldRule::MaxLength(255)),
        )
        .field(FieldSpec::new("credentials", FieldKind::Object))
        .field(FieldSpec::new("syslog_drain_url", FieldKind::Text).with_rule(FieldRule::Uri))
        .field(
            FieldSpec::new("route_service_url", FieldKind::Text).with_rule(FieldRule::HttpsUri),
        )
        .field(FieldSpec::new("tags", FieldKind::Array).with_rule(FieldRule::CombinedLength))
        .field(
            FieldSpec::new(
                "relationships",
                FieldKind::Reference(&["space", "data", "guid"]),
            )
            .with_rule(FieldRule::Required),
        )
        .metadata()
        .register()
});

/// Body of `POST /v3/service_instances` with `type: user-provided`.
#[derive(Debug, Clone)]
pub struct UserProvidedServiceInstanceCreateMessage {
    parsed: ParsedMessage,
}

impl UserProvidedServiceInstanceCreateMessage {
    /// Instance name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.parsed.text("name")
    }

    /// Credentials object handed to bound apps.
    #[must_use]
    pub fn credentials(&self) -> Option<&Value> {
        self.parsed.object("credentials")
    }

    /// Syslog drain URL.
    #[must_use]
    pub fn syslog_drain_url(&self) -> Option<&str> {
        self.parsed.text("syslog_drain_url")
    }

    /// Route service URL.
    #[must_use]
    pub fn route_service_url(&self) -> Option<&str> {
        self.parsed.text("route_service_url")
    }

    /// Tags.
    #[must_use]
    pub fn tags(&self) -> Option<&[String]> {
        self.parsed.list("tags")
    }

    /// The owning space.
    #[must_use]
    pub fn space_guid(&self) -> Option<&str> {
        self.parsed
            .object("relationships")?
            .get("space")?
            .get("data")?
            .get("guid")?
            .as_str()
    }

    /// Requested labels and annotations.
    #[must_use]
    pub fn metadata(&self) -> MetadataRequest {
        self.parsed
            .object("metadata")
            .map(MetadataRequest::from_json)
            .unwrap_or_default()
    }

    /// The request body as recorded in audit events.
    ///
    /// Credentials are replaced with [`REDACTED_CREDENTIALS`]; every other
    /// key is kept verbatim.
    #[must_use]
    pub fn audit_request(&self) -> Value {
        let mut body = self.parsed.raw().to_json_object();
        if let Some(credentials) = body.get_mut("credentials") {
            *credentials = Value::String(REDACTED_CREDENTIALS.to_owned());
        }
        Value::Object(body)
    }
}

impl RequestMessage for UserProvidedServiceInstanceCreateMessage {
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
