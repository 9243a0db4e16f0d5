//! Opt-in sideloading of related resources.
//!
//! A list response for space-scoped resources can carry an `included`
//! section with the requested attributes of each distinct space and its
//! organization. Only attributes the caller asked for via `fields` are
//! emitted; entries follow the spaces' creation order.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use plinth::field_include::{
//!     FieldIncludeRegistry, OrganizationSummary, SpaceScoped, SpaceSummary,
//! };
//! use plinth::message::domain::FieldsSelection;
//! use serde_json::{Map, json};
//!
//! struct Instance(SpaceSummary);
//!
//! impl SpaceScoped for Instance {
//!     fn space(&self) -> &SpaceSummary {
//!         &self.0
//!     }
//! }
//!
//! let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid date");
//! let space = SpaceSummary {
//!     guid: "space-1".to_owned(),
//!     name: "dev".to_owned(),
//!     created_at,
//!     organization: OrganizationSummary {
//!         guid: "org-1".to_owned(),
//!         name: "acme".to_owned(),
//!         created_at,
//!     },
//! };
//!
//! let fields = FieldsSelection::new().with("space", ["guid"]);
//! let mut hash = Map::new();
//! FieldIncludeRegistry::for_fields(&fields).decorate(&mut hash, &[Instance(space)]);
//!
//! assert_eq!(
//!     serde_json::Value::Object(hash),
//!     json!({ "included": { "spaces": [{ "guid": "space-1" }] } })
//! );
//! ```

pub mod decorators;
pub mod domain;
pub mod registry;

pub use decorators::{FieldIncludeDecorator, SpaceDecorator, SpaceOrganizationDecorator};
pub use domain::{OrganizationSummary, SpaceScoped, SpaceSummary};
pub use registry::FieldIncludeRegistry;

#[cfg(test)]
mod tests;
