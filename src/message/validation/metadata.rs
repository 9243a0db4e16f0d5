//! Validation of the `metadata` object carried by create and update bodies.

use crate::message::{
    domain::{FieldInput, FieldKind, LabelKey, LabelLimits, quote_list, validate_label_value},
    error::{FieldError, ValidationErrors},
    normalization::Candidate,
    ports::validator::{MessageConfig, ParamValidator, ValidationResult},
};
use serde_json::{Map, Value};

const SECTIONS: &[&str] = &["labels", "annotations"];

/// Checks label and annotation keys and values.
///
/// Every problem is reported against the `metadata` field.
#[derive(Debug, Clone, Copy)]
pub struct MetadataValidator {
    limits: LabelLimits,
    max_annotation_value_length: usize,
}

impl MetadataValidator {
    /// Creates the validator.
    #[must_use]
    pub const fn new(config: &MessageConfig) -> Self {
        Self {
            limits: config.label_limits(),
            max_annotation_value_length: config.max_annotation_value_length,
        }
    }

    fn check_object(&self, metadata: &Map<String, Value>) -> Vec<String> {
        let mut messages = Vec::new();
        let unexpected: Vec<&str> = metadata
            .keys()
            .map(String::as_str)
            .filter(|key| !SECTIONS.contains(key))
            .collect();
        if !unexpected.is_empty() {
            messages.push(format!(
                "has unexpected field(s): {}",
                quote_list(unexpected)
            ));
        }

        if let Some(labels) = metadata.get("labels") {
            match labels {
                Value::Object(entries) => self.check_labels(entries, &mut messages),
                Value::Null => {}
                _ => messages.push("labels must be an object".to_owned()),
            }
        }
        if let Some(annotations) = metadata.get("annotations") {
            match annotations {
                Value::Object(entries) => self.check_annotations(entries, &mut messages),
                Value::Null => {}
                _ => messages.push("annotations must be an object".to_owned()),
            }
        }
        messages
    }

    fn check_labels(&self, labels: &Map<String, Value>, messages: &mut Vec<String>) {
        for (key, value) in labels {
            if let Err(err) = LabelKey::parse(key, &self.limits) {
                messages.push(format!("label key error: {err}"));
            }
            match value {
                Value::String(text) => {
                    if let Err(err) = validate_label_value(text, &self.limits) {
                        messages.push(format!("label value error: {err}"));
                    }
                }
                Value::Null => {}
                _ => messages.push(format!("label value error: '{key}' value must be a string")),
            }
        }
    }

    fn check_annotations(&self, annotations: &Map<String, Value>, messages: &mut Vec<String>) {
        for (key, value) in annotations {
            if let Err(err) = LabelKey::parse(key, &self.limits) {
                messages.push(format!("annotation key error: {err}"));
            }
            match value {
                Value::String(text)
                    if text.chars().count() > self.max_annotation_value_length =>
                {
                    messages.push(format!(
                        "annotation value error: '{key}' is greater than {} characters",
                        self.max_annotation_value_length
                    ));
                }
                Value::String(_) | Value::Null => {}
                _ => messages.push(format!(
                    "annotation value error: '{key}' value must be a string"
                )),
            }
        }
    }
}

impl ParamValidator for MetadataValidator {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn validate(&self, candidate: &Candidate) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        for spec in candidate.schema().fields() {
            if spec.kind() != FieldKind::Metadata {
                continue;
            }
            let Some(FieldInput::Object(Value::Object(metadata))) = candidate.input(spec.key())
            else {
                continue;
            };
            for message in self.check_object(metadata) {
                errors.push(FieldError::invalid_value(spec.key(), message));
            }
        }
        errors.into_result()
    }
}
