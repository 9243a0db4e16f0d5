//! Labels and annotations supplied in a request body's `metadata` object.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Requested labels and annotations.
///
/// A `None` value asks for the entry to be removed; create actions ignore
/// such entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRequest {
    labels: BTreeMap<String, Option<String>>,
    annotations: BTreeMap<String, Option<String>>,
}

impl MetadataRequest {
    /// Reads an already-validated `metadata` object.
    #[must_use]
    pub fn from_json(metadata: &Value) -> Self {
        Self {
            labels: string_entries(metadata.get("labels")),
            annotations: string_entries(metadata.get("annotations")),
        }
    }

    /// Requested labels.
    #[must_use]
    pub const fn labels(&self) -> &BTreeMap<String, Option<String>> {
        &self.labels
    }

    /// Requested annotations.
    #[must_use]
    pub const fn annotations(&self) -> &BTreeMap<String, Option<String>> {
        &self.annotations
    }

    /// Returns `true` when neither labels nor annotations were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.annotations.is_empty()
    }
}

fn string_entries(section: Option<&Value>) -> BTreeMap<String, Option<String>> {
    section
        .and_then(Value::as_object)
        .map(|entries| {
            entries
                .iter()
                .map(|(key, value)| (key.clone(), value.as_str().map(ToOwned::to_owned)))
                .collect()
        })
        .unwrap_or_default()
}
