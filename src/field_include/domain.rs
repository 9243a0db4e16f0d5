//! Summaries of related resources that decorators sideload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The parts of an organization a decorator can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    /// Organization GUID.
    pub guid: String,
    /// Organization name.
    pub name: String,
    /// Creation time, used for ordering.
    pub created_at: DateTime<Utc>,
}

/// The parts of a space a decorator can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceSummary {
    /// Space GUID.
    pub guid: String,
    /// Space name.
    pub name: String,
    /// Creation time, used for ordering.
    pub created_at: DateTime<Utc>,
    /// The owning organization.
    pub organization: OrganizationSummary,
}

/// A resource that lives in a space.
pub trait SpaceScoped {
    /// The resource's space.
    fn space(&self) -> &SpaceSummary;
}

impl<T: SpaceScoped> SpaceScoped for &T {
    fn space(&self) -> &SpaceSummary {
        (*self).space()
    }
}
