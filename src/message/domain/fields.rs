//! Opt-in sideloading of related-resource attributes via `fields[relation]=…`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A relation that may be sideloaded and the attribute paths it supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInclusion {
    relation: &'static str,
    allowed: &'static [&'static str],
}

impl FieldInclusion {
    /// Declares a relation and its allowed attribute paths.
    #[must_use]
    pub const fn new(relation: &'static str, allowed: &'static [&'static str]) -> Self {
        Self { relation, allowed }
    }

    /// The relation name, e.g. `space` or `space.organization`.
    #[must_use]
    pub const fn relation(&self) -> &'static str {
        self.relation
    }

    /// Attribute paths accepted for this relation.
    #[must_use]
    pub const fn allowed(&self) -> &'static [&'static str] {
        self.allowed
    }

    /// Returns `true` when `attribute` may be requested.
    #[must_use]
    pub fn permits(&self, attribute: &str) -> bool {
        self.allowed.contains(&attribute)
    }

    /// The error text listing the accepted attribute paths.
    #[must_use]
    pub fn valid_values_message(&self) -> String {
        format!("valid values are: {}", quote_list(self.allowed.iter().copied()))
    }
}

/// The caller's requested attribute paths per relation.
///
/// # Examples
///
/// ```
/// use plinth::message::domain::FieldsSelection;
///
/// let fields = FieldsSelection::new().with("space", ["guid", "relationship.organization"]);
/// assert!(fields.includes("space", "guid"));
/// assert!(!fields.includes("space", "name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsSelection {
    relations: BTreeMap<String, Vec<String>>,
}

impl FieldsSelection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            relations: BTreeMap::new(),
        }
    }

    /// Builder-style insert of a relation's attribute paths.
    #[must_use]
    pub fn with<I, S>(mut self, relation: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(relation, attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Records the attribute paths requested for a relation.
    pub fn insert(&mut self, relation: impl Into<String>, attributes: Vec<String>) {
        self.relations.insert(relation.into(), attributes);
    }

    /// Requested attribute paths for a relation, in request order.
    #[must_use]
    pub fn get(&self, relation: &str) -> Option<&[String]> {
        self.relations.get(relation).map(Vec::as_slice)
    }

    /// Returns `true` when `attribute` was requested for `relation`.
    #[must_use]
    pub fn includes(&self, relation: &str, attribute: &str) -> bool {
        self.get(relation)
            .is_some_and(|attributes| attributes.iter().any(|requested| requested == attribute))
    }

    /// Iterates relations and their attributes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.relations
            .iter()
            .map(|(relation, attributes)| (relation.as_str(), attributes.as_slice()))
    }

    /// Returns `true` when nothing was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

pub(crate) fn quote_list<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    values
        .into_iter()
        .map(|value| format!("'{value}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
