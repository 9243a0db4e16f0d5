//! Diesel row models for service-instance persistence.

use super::schema::{service_instance_annotations, service_instance_labels, service_instances};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for service instances.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = service_instances)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceInstanceRow {
    /// Instance identifier.
    pub guid: uuid::Uuid,
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
    /// Tags as a JSON array.
    pub tags: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for service instances.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = service_instances)]
pub struct NewServiceInstanceRow {
    /// Instance identifier.
    pub guid: uuid::Uuid,
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
    /// Tags as a JSON array.
    pub tags: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Key and value columns shared by label and annotation tables.
#[derive(Debug, Clone, Queryable)]
pub struct MetadataRow {
    /// Optional DNS prefix.
    pub key_prefix: Option<String>,
    /// Key name.
    pub key_name: String,
    /// Stored value.
    pub value: String,
}

/// Insert model for labels.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = service_instance_labels)]
pub struct NewLabelRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Owning instance.
    pub resource_guid: uuid::Uuid,
    /// Optional DNS prefix.
    pub key_prefix: Option<String>,
    /// Key name.
    pub key_name: String,
    /// Label value.
    pub value: String,
}

/// Insert model for annotations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = service_instance_annotations)]
pub struct NewAnnotationRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Owning instance.
    pub resource_guid: uuid::Uuid,
    /// Optional DNS prefix.
    pub key_prefix: Option<String>,
    /// Key name.
    pub key_name: String,
    /// Annotation value.
    pub value: String,
}
