//! Normalized field inputs and the typed values extracted from them.

use super::{
    fields::FieldsSelection,
    label_selector::{LabelSelector, LabelSelectorError},
    order_by::OrderBy,
    params::ParamValue,
    timestamp::{ParseTimestampOperatorError, TimestampFilter, TimestampFilters, TimestampOperator},
};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// One `operator => value` entry of a timestamp filter before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampInput {
    operator: Result<TimestampOperator, ParseTimestampOperatorError>,
    raw: String,
    instant: Option<DateTime<Utc>>,
}

impl TimestampInput {
    /// Records a filter entry.
    #[must_use]
    pub const fn new(
        operator: Result<TimestampOperator, ParseTimestampOperatorError>,
        raw: String,
        instant: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            operator,
            raw,
            instant,
        }
    }

    /// The operator, or the unrecognized token.
    #[must_use]
    pub const fn operator(&self) -> &Result<TimestampOperator, ParseTimestampOperatorError> {
        &self.operator
    }

    /// The value as supplied.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed instant, when the value is a single valid timestamp.
    #[must_use]
    pub const fn instant(&self) -> Option<DateTime<Utc>> {
        self.instant
    }

    fn to_filter(&self) -> Option<TimestampFilter> {
        let operator = self.operator.as_ref().ok()?;
        self.instant
            .map(|instant| TimestampFilter::new(*operator, instant))
    }
}

/// A field's value after normalization.
///
/// Normalization never fails. Input that cannot take the field's shape is
/// kept as [`FieldInput::Unparseable`] so the validators can word the
/// rejection.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Explicit null; treated as absent.
    Null,
    /// A single string.
    Text(String),
    /// An ordered list of strings.
    List(Vec<String>),
    /// An integral number.
    Integer(i64),
    /// Timestamp filter entries.
    Timestamps(Vec<TimestampInput>),
    /// A tokenized label selector or the reason it could not be tokenized.
    LabelSelector(Result<LabelSelector, LabelSelectorError>),
    /// A sort request.
    OrderBy(OrderBy),
    /// Requested sideload attributes.
    Fields(FieldsSelection),
    /// A JSON object.
    Object(Value),
    /// A value with the wrong shape, kept verbatim.
    Unparseable(ParamValue),
}

impl FieldInput {
    /// Returns `true` for an explicit null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Extracts the typed value.
    ///
    /// Returns `None` for nulls, unparseable input, and timestamp or label
    /// selector input that failed to parse.
    #[must_use]
    pub fn to_value(&self) -> Option<FieldValue> {
        match self {
            Self::Null | Self::Unparseable(_) => None,
            Self::Text(text) => Some(FieldValue::Text(text.clone())),
            Self::List(items) => Some(FieldValue::List(items.clone())),
            Self::Integer(number) => Some(FieldValue::Integer(*number)),
            Self::Timestamps(inputs) => inputs
                .iter()
                .map(TimestampInput::to_filter)
                .collect::<Option<Vec<_>>>()
                .map(|filters| FieldValue::Timestamps(TimestampFilters::new(filters))),
            Self::LabelSelector(parsed) => parsed.clone().ok().map(FieldValue::LabelSelector),
            Self::OrderBy(order) => Some(FieldValue::OrderBy(order.clone())),
            Self::Fields(selection) => Some(FieldValue::Fields(selection.clone())),
            Self::Object(object) => Some(FieldValue::Object(object.clone())),
        }
    }
}

/// A typed, validated field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A single string.
    Text(String),
    /// An ordered list of strings.
    List(Vec<String>),
    /// An integral number.
    Integer(i64),
    /// Timestamp filters.
    Timestamps(TimestampFilters),
    /// A label selector.
    LabelSelector(LabelSelector),
    /// A sort request.
    OrderBy(OrderBy),
    /// Requested sideload attributes.
    Fields(FieldsSelection),
    /// A JSON object.
    Object(Value),
}
