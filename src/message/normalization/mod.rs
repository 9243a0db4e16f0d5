//! Parameter normalization.
//!
//! Resolves each raw value into the shape its field declares. Normalization
//! never fails: input that does not fit is kept as
//! [`FieldInput::Unparseable`] and the validators decide how to report it.

use crate::message::domain::{
    FieldInclusion, FieldInput, FieldKind, FieldsSelection, LabelSelector, MessageSchema, OrderBy,
    ParamMap, ParamValue, RawParams, Scalar, TimestampInput, TimestampOperator, parse_timestamp,
};

/// A request after normalization and before validation.
#[derive(Debug, Clone)]
pub struct Candidate {
    schema: &'static MessageSchema,
    requested: Vec<String>,
    inputs: Vec<(&'static str, FieldInput)>,
    unknown: Vec<String>,
}

impl Candidate {
    /// The schema the request was normalized against.
    #[must_use]
    pub const fn schema(&self) -> &'static MessageSchema {
        self.schema
    }

    /// Every key present in the raw request, in request order.
    pub fn requested(&self) -> impl Iterator<Item = &str> {
        self.requested.iter().map(String::as_str)
    }

    /// Returns `true` when `key` was present in the raw request.
    #[must_use]
    pub fn is_requested(&self, key: &str) -> bool {
        self.requested.iter().any(|requested| requested == key)
    }

    /// The normalized input for an accepted key.
    #[must_use]
    pub fn input(&self, key: &str) -> Option<&FieldInput> {
        self.inputs
            .iter()
            .find(|(field, _)| *field == key)
            .map(|(_, input)| input)
    }

    /// Normalized inputs for accepted keys, in request order.
    pub fn inputs(&self) -> impl Iterator<Item = (&'static str, &FieldInput)> {
        self.inputs.iter().map(|(field, input)| (*field, input))
    }

    /// Keys that are not accepted, in request order.
    ///
    /// Includes keys made unavailable by an exclusion rule.
    #[must_use]
    pub fn unknown_keys(&self) -> &[String] {
        &self.unknown
    }
}

/// Normalizes raw parameters against a schema.
#[must_use]
pub fn normalize(schema: &'static MessageSchema, raw: &RawParams) -> Candidate {
    let active_exclusions: Vec<_> = schema
        .exclusions()
        .iter()
        .filter(|rule| raw.contains_key(rule.trigger()))
        .collect();

    let mut inputs = Vec::new();
    let mut unknown = Vec::new();
    for (key, value) in raw.iter() {
        let spec = schema
            .field(key)
            .filter(|_| !active_exclusions.iter().any(|rule| rule.excludes(key)));
        match spec {
            Some(field) => inputs.push((field.key(), normalize_value(field.kind(), value))),
            None => unknown.push(key.to_owned()),
        }
    }

    Candidate {
        schema,
        requested: raw.keys().map(ToOwned::to_owned).collect(),
        inputs,
        unknown,
    }
}

/// Splits a comma-delimited filter value.
///
/// Elements are trimmed and keep their order; duplicates are kept and
/// trailing empty elements are dropped.
///
/// # Examples
///
/// ```
/// use plinth::message::normalization::split_comma_list;
///
/// assert_eq!(split_comma_list("a, b ,c"), vec!["a", "b", "c"]);
/// assert!(split_comma_list("").is_empty());
/// ```
#[must_use]
pub fn split_comma_list(value: &str) -> Vec<String> {
    let mut items: Vec<String> = value
        .split(',')
        .map(|item| item.trim().to_owned())
        .collect();
    while items.last().is_some_and(String::is_empty) {
        items.pop();
    }
    items
}

fn normalize_value(kind: FieldKind, value: &ParamValue) -> FieldInput {
    if value.is_null() {
        return FieldInput::Null;
    }
    let unparseable = || FieldInput::Unparseable(value.clone());
    match kind {
        FieldKind::CommaList => match value {
            ParamValue::Scalar(Scalar::Text(text)) => FieldInput::List(split_comma_list(text)),
            ParamValue::List(items) => text_items(items).map_or_else(unparseable, FieldInput::List),
            _ => unparseable(),
        },
        FieldKind::Array => match value {
            ParamValue::List(items) => text_items(items).map_or_else(unparseable, FieldInput::List),
            _ => unparseable(),
        },
        FieldKind::Text | FieldKind::Guid => value
            .as_text()
            .map_or_else(unparseable, |text| FieldInput::Text(text.to_owned())),
        FieldKind::Integer => normalize_integer(value).unwrap_or_else(unparseable),
        FieldKind::Timestamps => normalize_timestamps(value).unwrap_or_else(unparseable),
        FieldKind::LabelSelector => value.as_text().map_or_else(unparseable, |text| {
            FieldInput::LabelSelector(LabelSelector::parse(text))
        }),
        FieldKind::OrderBy => value
            .as_text()
            .map_or_else(unparseable, |text| FieldInput::OrderBy(OrderBy::parse(text))),
        FieldKind::Fields(inclusions) => value
            .as_map()
            .and_then(|map| normalize_fields(inclusions, map))
            .map_or_else(unparseable, FieldInput::Fields),
        FieldKind::Object | FieldKind::Metadata | FieldKind::Reference(_) => match value {
            ParamValue::Map(_) => FieldInput::Object(value.to_json()),
            _ => unparseable(),
        },
    }
}

fn text_items(items: &[ParamValue]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| item.as_text().map(ToOwned::to_owned))
        .collect()
}

fn normalize_integer(value: &ParamValue) -> Option<FieldInput> {
    match value {
        ParamValue::Scalar(Scalar::Integer(number)) => Some(FieldInput::Integer(*number)),
        ParamValue::Scalar(Scalar::Text(text)) => {
            text.trim().parse::<i64>().ok().map(FieldInput::Integer)
        }
        _ => None,
    }
}

fn normalize_timestamps(value: &ParamValue) -> Option<FieldInput> {
    let inputs = match value {
        ParamValue::Map(operators) => operators
            .iter()
            .map(|(operator, bound)| operator_input(operator, bound))
            .collect(),
        ParamValue::Scalar(Scalar::Text(text)) if text.contains(',') => {
            split_comma_list(text).into_iter().map(equality_input).collect()
        }
        ParamValue::Scalar(Scalar::Text(text)) => {
            parse_timestamp(text)?;
            vec![equality_input(text.clone())]
        }
        ParamValue::List(items) => text_items(items)?
            .into_iter()
            .map(equality_input)
            .collect(),
        ParamValue::Scalar(_) => return None,
    };
    Some(FieldInput::Timestamps(inputs))
}

fn equality_input(raw: String) -> TimestampInput {
    let instant = parse_timestamp(&raw);
    TimestampInput::new(Ok(TimestampOperator::Eq), raw, instant)
}

fn operator_input(operator: &str, bound: &ParamValue) -> TimestampInput {
    let raw = match bound {
        ParamValue::Scalar(scalar) => scalar.to_string(),
        ParamValue::List(items) => items
            .iter()
            .map(|item| match item {
                ParamValue::Scalar(scalar) => scalar.to_string(),
                nested => nested.to_json().to_string(),
            })
            .collect::<Vec<_>>()
            .join(","),
        ParamValue::Map(_) => bound.to_json().to_string(),
    };
    let instant = bound.as_text().and_then(parse_timestamp);
    TimestampInput::new(operator.parse(), raw, instant)
}

fn normalize_fields(inclusions: &[FieldInclusion], map: &ParamMap) -> Option<FieldsSelection> {
    let mut selection = FieldsSelection::new();
    for (relation, attributes) in map.iter() {
        if !inclusions
            .iter()
            .any(|inclusion| inclusion.relation() == relation)
        {
            continue;
        }
        let requested = match attributes {
            ParamValue::Scalar(Scalar::Text(text)) => split_comma_list(text),
            ParamValue::List(items) => text_items(items)?,
            _ => return None,
        };
        selection.insert(relation, requested);
    }
    Some(selection)
}
