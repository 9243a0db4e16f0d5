//! Decorators that add `included` summaries to a serialized resource list.
//!
//! A decorator is built from the caller's `fields` selection only when the
//! requested attributes for its relation intersect the attributes it can
//! emit. It then writes only that intersection.

use super::domain::{OrganizationSummary, SpaceScoped, SpaceSummary};
use crate::message::{
    domain::{FieldInclusion, FieldsSelection},
    list::{SPACE_FIELDS, SPACE_ORGANIZATION_FIELDS},
};
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;

/// Adds sideloaded summaries to a serialized response.
pub trait FieldIncludeDecorator<R>: Send + Sync {
    /// The relation this decorator emits.
    fn inclusion(&self) -> FieldInclusion;

    /// Writes the decorator's section under `included`.
    fn decorate(&self, hash: &mut Map<String, Value>, resources: &[R]);
}

fn requested_attributes(
    inclusion: FieldInclusion,
    fields: &FieldsSelection,
) -> Option<BTreeSet<&'static str>> {
    let requested = fields.get(inclusion.relation())?;
    let attributes: BTreeSet<&'static str> = inclusion
        .allowed()
        .iter()
        .copied()
        .filter(|allowed| requested.iter().any(|attribute| attribute == allowed))
        .collect();
    (!attributes.is_empty()).then_some(attributes)
}

fn insert_included(hash: &mut Map<String, Value>, section: &str, entries: Vec<Value>) {
    let mut included = match hash.remove("included") {
        Some(Value::Object(existing)) => existing,
        _ => Map::new(),
    };
    included.insert(section.to_owned(), Value::Array(entries));
    hash.insert("included".to_owned(), Value::Object(included));
}

fn distinct_spaces<R: SpaceScoped>(resources: &[R]) -> Vec<&SpaceSummary> {
    let mut seen = BTreeSet::new();
    let mut spaces = Vec::new();
    for resource in resources {
        let space = resource.space();
        if seen.insert(space.guid.as_str()) {
            spaces.push(space);
        }
    }
    spaces.sort_by(|left, right| {
        left.created_at
            .cmp(&right.created_at)
            .then_with(|| left.guid.cmp(&right.guid))
    });
    spaces
}

/// Emits `included.spaces` for `fields[space]=guid,relationship.organization`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceDecorator {
    attributes: BTreeSet<&'static str>,
}

impl SpaceDecorator {
    /// Returns `true` when the selection asks for any emitted attribute.
    #[must_use]
    pub fn matches(fields: &FieldsSelection) -> bool {
        requested_attributes(SPACE_FIELDS, fields).is_some()
    }

    /// Builds the decorator, or `None` when the selection does not match.
    #[must_use]
    pub fn for_fields(fields: &FieldsSelection) -> Option<Self> {
        requested_attributes(SPACE_FIELDS, fields).map(|attributes| Self { attributes })
    }

    fn render(&self, space: &SpaceSummary) -> Value {
        let mut entry = Map::new();
        if self.attributes.contains("guid") {
            entry.insert("guid".to_owned(), Value::String(space.guid.clone()));
        }
        if self.attributes.contains("relationship.organization") {
            entry.insert(
                "relationships".to_owned(),
                json!({ "organization": { "data": { "guid": space.organization.guid } } }),
            );
        }
        Value::Object(entry)
    }
}

impl<R: SpaceScoped> FieldIncludeDecorator<R> for SpaceDecorator {
    fn inclusion(&self) -> FieldInclusion {
        SPACE_FIELDS
    }

    fn decorate(&self, hash: &mut Map<String, Value>, resources: &[R]) {
        let spaces = distinct_spaces(resources)
            .into_iter()
            .map(|space| self.render(space))
            .collect();
        insert_included(hash, "spaces", spaces);
    }
}

/// Emits `included.organizations` for `fields[space.organization]=name,guid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceOrganizationDecorator {
    attributes: BTreeSet<&'static str>,
}

impl SpaceOrganizationDecorator {
    /// Returns `true` when the selection asks for any emitted attribute.
    #[must_use]
    pub fn matches(fields: &FieldsSelection) -> bool {
        requested_attributes(SPACE_ORGANIZATION_FIELDS, fields).is_some()
    }

    /// Builds the decorator, or `None` when the selection does not match.
    #[must_use]
    pub fn for_fields(fields: &FieldsSelection) -> Option<Self> {
        requested_attributes(SPACE_ORGANIZATION_FIELDS, fields)
            .map(|attributes| Self { attributes })
    }

    fn render(&self, organization: &OrganizationSummary) -> Value {
        let mut entry = Map::new();
        if self.attributes.contains("name") {
            entry.insert("name".to_owned(), Value::String(organization.name.clone()));
        }
        if self.attributes.contains("guid") {
            entry.insert("guid".to_owned(), Value::String(organization.guid.clone()));
        }
        Value::Object(entry)
    }
}

impl<R: SpaceScoped> FieldIncludeDecorator<R> for SpaceOrganizationDecorator {
    fn inclusion(&self) -> FieldInclusion {
        SPACE_ORGANIZATION_FIELDS
    }

    fn decorate(&self, hash: &mut Map<String, Value>, resources: &[R]) {
        let mut seen = BTreeSet::new();
        let mut organizations: Vec<&OrganizationSummary> = Vec::new();
        for resource in resources {
            let organization = &resource.space().organization;
            if seen.insert(organization.guid.as_str()) {
                organizations.push(organization);
            }
        }
        organizations.sort_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then_with(|| left.guid.cmp(&right.guid))
        });
        let rendered = organizations
            .into_iter()
            .map(|organization| self.render(organization))
            .collect();
        insert_included(hash, "organizations", rendered);
    }
}
