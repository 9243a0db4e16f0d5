//! Task create body.

use crate::message::{
    RequestMessage,
    domain::{FieldKind, FieldRule, FieldSpec, MessageSchema, MetadataRequest},
    parsed::ParsedMessage,
};
use once_cell::sync::Lazy;

static SCHEMA: Lazy<MessageSchema> = Lazy::new(|| {
    MessageSchema::body("task_create")
        .field(FieldSpec::new("name", FieldKind::Text))
        .field(FieldSpec::new("command", FieldKind::Text))
        .field(FieldSpec::new("droplet_guid", FieldKind::Guid))
        .field(FieldSpec::new("memory_in_mb", FieldKind::Integer).with_rule(FieldRule::Positive))
        .field(FieldSpec::new("disk_in_mb", FieldKind::Integer).with_rule(FieldRule::Positive))
        .field(
            FieldSpec::new("log_rate_limit_in_bytes_per_second", FieldKind::Integer)
                .with_rule(FieldRule::AtLeast(-1)),
        )
        .field(FieldSpec::new(
            "template",
            FieldKind::Reference(&["process", "guid"]),
        ))
        .metadata()
        .conflicting("droplet_guid", "template")
        .register()
});

/// Body of `POST /v3/apps/:guid/tasks`.
///
/// Absent resource limits fall back to the app's defaults downstream;
/// `-1` for the log rate limit means unlimited.
#[derive(Debug, Clone)]
pub struct TaskCreateMessage {
    parsed: ParsedMessage,
}

impl TaskCreateMessage {
    /// Task name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.parsed.text("name")
    }

    /// Command to run.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.parsed.text("command")
    }

    /// Droplet to run the task from.
    #[must_use]
    pub fn droplet_guid(&self) -> Option<&str> {
        self.parsed.text("droplet_guid")
    }

    /// Memory limit in megabytes.
    #[must_use]
    pub fn memory_in_mb(&self) -> Option<i64> {
        self.parsed.integer("memory_in_mb")
    }

    /// Disk limit in megabytes.
    #[must_use]
    pub fn disk_in_mb(&self) -> Option<i64> {
        self.parsed.integer("disk_in_mb")
    }

    /// Log rate limit; `-1` is unlimited.
    #[must_use]
    pub fn log_rate_limit_in_bytes_per_second(&self) -> Option<i64> {
        self.parsed.integer("log_rate_limit_in_bytes_per_second")
    }

    /// Process whose settings the task copies.
    #[must_use]
    pub fn template_process_guid(&self) -> Option<&str> {
        self.parsed
            .object("template")?
            .get("process")?
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
}

impl RequestMessage for TaskCreateMessage {
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
