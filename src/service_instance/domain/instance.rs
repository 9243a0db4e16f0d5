//! User-provided service instance aggregate.

use super::{ServiceInstanceDomainError, ServiceInstanceGuid};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The only instance type this module creates.
pub const USER_PROVIDED_TYPE: &str = "user-provided";

/// A label or annotation stored alongside an instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetadataEntry {
    key_prefix: Option<String>,
    key_name: String,
    value: String,
}

impl MetadataEntry {
    /// Splits `key` at its first `/` into prefix and name.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceInstanceDomainError::EmptyMetadataKey`] when the name
    /// part is empty.
    pub fn parse(key: &str, value: impl Into<String>) -> Result<Self, ServiceInstanceDomainError> {
        let (key_prefix, key_name) = match key.split_once('/') {
            Some((prefix, name)) => (Some(prefix.to_owned()), name),
            None => (None, key),
        };
        if key_name.is_empty() {
            return Err(ServiceInstanceDomainError::EmptyMetadataKey(key.to_owned()));
        }
        Ok(Self {
            key_prefix,
            key_name: key_name.to_owned(),
            value: value.into(),
        })
    }

    /// The DNS prefix, if any.
    #[must_use]
    pub fn key_prefix(&self) -> Option<&str> {
        self.key_prefix.as_deref()
    }

    /// The key name.
    #[must_use]
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// The stored value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The key as written in requests, `prefix/name` or `name`.
    #[must_use]
    pub fn key(&self) -> String {
        self.key_prefix.as_ref().map_or_else(
            || self.key_name.clone(),
            |prefix| format!("{prefix}/{}", self.key_name),
        )
    }
}

/// Attributes of a user-provided instance before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProvidedInstanceDraft {
    name: String,
    space_guid: String,
    credentials: Value,
    syslog_drain_url: Option<String>,
    route_service_url: Option<String>,
    tags: Vec<String>,
    labels: Vec<MetadataEntry>,
    annotations: Vec<MetadataEntry>,
}

impl UserProvidedInstanceDraft {
    /// Starts a draft with defaults for every optional attribute.
    ///
    /// # Errors
    ///
    /// Returns an error when `name` is blank or `space_guid` is empty.
    pub fn new(
        name: impl Into<String>,
        space_guid: impl Into<String>,
    ) -> Result<Self, ServiceInstanceDomainError> {
        let instance_name = name.into();
        if instance_name.trim().is_empty() {
            return Err(ServiceInstanceDomainError::BlankName);
        }
        let space = space_guid.into();
        if space.is_empty() {
            return Err(ServiceInstanceDomainError::MissingSpace);
        }
        Ok(Self {
            name: instance_name,
            space_guid: space,
            credentials: Value::Object(Map::new()),
            syslog_drain_url: None,
            route_service_url: None,
            tags: Vec::new(),
            labels: Vec::new(),
            annotations: Vec::new(),
        })
    }

    /// Sets the credentials object.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Value) -> Self {
        self.credentials = credentials;
        self
    }

    /// Sets the syslog drain URL.
    #[must_use]
    pub fn with_syslog_drain_url(mut self, url: impl Into<String>) -> Self {
        self.syslog_drain_url = Some(url.into());
        self
    }

    /// Sets the route service URL.
    #[must_use]
    pub fn with_route_service_url(mut self, url: impl Into<String>) -> Self {
        self.route_service_url = Some(url.into());
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Adds a label.
    #[must_use]
    pub fn with_label(mut self, label: MetadataEntry) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: MetadataEntry) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Data needed to rebuild a stored instance.
#[derive(Debug, Clone)]
pub struct PersistedServiceInstanceData {
    /// Instance identifier.
    pub guid: ServiceInstanceGuid,
    /// Instance name.
    pub name: String,
    /// Owning space GUID.
    pub space_guid: String,
    /// Credentials object.
    pub credentials: Value,
    /// Syslog drain URL.
    pub syslog_drain_url: Option<String>,
    /// Route service URL.
    pub route_service_url: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Labels.
    pub labels: Vec<MetadataEntry>,
    /// Annotations.
    pub annotations: Vec<MetadataEntry>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A stored user-provided service instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    guid: ServiceInstanceGuid,
    name: String,
    space_guid: String,
    credentials: Value,
    syslog_drain_url: Option<String>,
    route_service_url: Option<String>,
    tags: Vec<String>,
    labels: Vec<MetadataEntry>,
    annotations: Vec<MetadataEntry>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ServiceInstance {
    /// Creates a new instance from a draft, stamped with the clock's time.
    #[must_use]
    pub fn create(draft: UserProvidedInstanceDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let UserProvidedInstanceDraft {
            name,
            space_guid,
            credentials,
            syslog_drain_url,
            route_service_url,
            tags,
            labels,
            annotations,
        } = draft;

        Self {
            guid: ServiceInstanceGuid::new(),
            name,
            space_guid,
            credentials,
            syslog_drain_url,
            route_service_url,
            tags,
            labels,
            annotations,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an instance from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedServiceInstanceData) -> Self {
        Self {
            guid: data.guid,
            name: data.name,
            space_guid: data.space_guid,
            credentials: data.credentials,
            syslog_drain_url: data.syslog_drain_url,
            route_service_url: data.route_service_url,
            tags: data.tags,
            labels: data.labels,
            annotations: data.annotations,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Instance identifier.
    #[must_use]
    pub const fn guid(&self) -> ServiceInstanceGuid {
        self.guid
    }

    /// Instance name, unique within its space.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning space GUID.
    #[must_use]
    pub fn space_guid(&self) -> &str {
        &self.space_guid
    }

    /// Always [`USER_PROVIDED_TYPE`].
    #[must_use]
    pub const fn instance_type(&self) -> &'static str {
        USER_PROVIDED_TYPE
    }

    /// Credentials object handed to bound apps.
    #[must_use]
    pub const fn credentials(&self) -> &Value {
        &self.credentials
    }

    /// Syslog drain URL.
    #[must_use]
    pub fn syslog_drain_url(&self) -> Option<&str> {
        self.syslog_drain_url.as_deref()
    }

    /// Route service URL.
    #[must_use]
    pub fn route_service_url(&self) -> Option<&str> {
        self.route_service_url.as_deref()
    }

    /// Tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Labels.
    #[must_use]
    pub fn labels(&self) -> &[MetadataEntry] {
        &self.labels
    }

    /// Annotations.
    #[must_use]
    pub fn annotations(&self) -> &[MetadataEntry] {
        &self.annotations
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
