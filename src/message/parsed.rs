//! The validated result of parsing one request.

use crate::message::{
    domain::{
        FieldInput, FieldValue, FieldsSelection, LabelSelector, MessageSchema, OrderBy, ParamMap,
        ParamValue, RawParams, Scalar, TimestampFilters, TimestampInput, TimestampOperator,
    },
    error::{ErrorResponse, ValidationErrors},
    normalization::{Candidate, normalize},
    ports::validator::MessageConfig,
    validation::ValidatorSet,
};
use once_cell::sync::Lazy;
use serde_json::Value;
use url::form_urlencoded;

static DEFAULT_VALIDATORS: Lazy<ValidatorSet> = Lazy::new(ValidatorSet::new);

const PAGING_KEYS: &[&str] = &["page", "per_page"];

/// An immutable, validated request.
///
/// Construction always succeeds; check [`Self::is_valid`] before acting on
/// the values.
#[derive(Debug, Clone)]
pub struct ParsedMessage {
    raw: RawParams,
    candidate: Candidate,
    errors: ValidationErrors,
}

impl ParsedMessage {
    /// Parses raw parameters with the default limits.
    #[must_use]
    pub fn parse(schema: &'static MessageSchema, raw: &RawParams) -> Self {
        Self::run(schema, raw, &DEFAULT_VALIDATORS)
    }

    /// Parses raw parameters with custom limits.
    #[must_use]
    pub fn parse_with_config(
        schema: &'static MessageSchema,
        raw: &RawParams,
        config: &MessageConfig,
    ) -> Self {
        Self::run(schema, raw, &ValidatorSet::with_config(config.clone()))
    }

    fn run(schema: &'static MessageSchema, raw: &RawParams, validators: &ValidatorSet) -> Self {
        let candidate = normalize(schema, raw);
        let errors = validators.run(&candidate);
        tracing::debug!(
            message = schema.name(),
            requested = raw.len(),
            errors = errors.len(),
            "parsed request message"
        );
        Self {
            raw: raw.clone(),
            candidate,
            errors,
        }
    }

    /// The schema the request was parsed against.
    #[must_use]
    pub const fn schema(&self) -> &'static MessageSchema {
        self.candidate.schema()
    }

    /// The parameters as received.
    #[must_use]
    pub const fn raw(&self) -> &RawParams {
        &self.raw
    }

    /// Returns `true` when no validation errors were recorded.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Validation errors in the order they were found.
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// The `{errors: [...]}` body describing every problem.
    #[must_use]
    pub fn error_response(&self) -> ErrorResponse {
        ErrorResponse::from(&self.errors)
    }

    /// Returns `true` when `key` was present in the raw request, even with
    /// a null value.
    #[must_use]
    pub fn requested(&self, key: &str) -> bool {
        self.candidate.is_requested(key)
    }

    /// Keys present in the raw request, in request order.
    pub fn requested_keys(&self) -> impl Iterator<Item = &str> {
        self.candidate.requested()
    }

    /// The normalized input for an accepted key.
    #[must_use]
    pub fn input(&self, key: &str) -> Option<&FieldInput> {
        self.candidate.input(key)
    }

    /// The typed value of an accepted key.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<FieldValue> {
        self.input(key).and_then(FieldInput::to_value)
    }

    /// A list value.
    #[must_use]
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.input(key)? {
            FieldInput::List(items) => Some(items),
            _ => None,
        }
    }

    /// A string value.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.input(key)? {
            FieldInput::Text(text) => Some(text),
            _ => None,
        }
    }

    /// An integer value.
    #[must_use]
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.input(key)? {
            FieldInput::Integer(number) => Some(*number),
            _ => None,
        }
    }

    /// Timestamp filters, when every entry is valid.
    #[must_use]
    pub fn timestamps(&self, key: &str) -> Option<TimestampFilters> {
        match self.value(key)? {
            FieldValue::Timestamps(filters) => Some(filters),
            _ => None,
        }
    }

    /// A parsed label selector.
    #[must_use]
    pub fn label_selector(&self, key: &str) -> Option<&LabelSelector> {
        match self.input(key)? {
            FieldInput::LabelSelector(Ok(selector)) => Some(selector),
            _ => None,
        }
    }

    /// The `order_by` sort request.
    #[must_use]
    pub fn order_by(&self) -> Option<&OrderBy> {
        match self.input("order_by")? {
            FieldInput::OrderBy(order) => Some(order),
            _ => None,
        }
    }

    /// The `fields` sideload selection.
    #[must_use]
    pub fn fields(&self) -> Option<&FieldsSelection> {
        match self.input("fields")? {
            FieldInput::Fields(selection) => Some(selection),
            _ => None,
        }
    }

    /// A JSON object value.
    #[must_use]
    pub fn object(&self, key: &str) -> Option<&Value> {
        match self.input(key)? {
            FieldInput::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Filter and sort parameters, excluding `page` and `per_page`.
    ///
    /// Lists are joined back into comma strings, so parsing the result
    /// yields the same requested values.
    #[must_use]
    pub fn to_param_hash(&self) -> ParamMap {
        self.to_param_hash_excluding(&[])
    }

    /// Like [`Self::to_param_hash`], also dropping the given keys.
    #[must_use]
    pub fn to_param_hash_excluding(&self, excluded: &[&str]) -> ParamMap {
        self.candidate
            .inputs()
            .filter(|(key, _)| !PAGING_KEYS.contains(key) && !excluded.contains(key))
            .filter_map(|(key, input)| render_input(input).map(|value| (key, value)))
            .collect()
    }

    /// [`Self::to_param_hash`] as a URL query string, for next-page links.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.to_param_hash().iter() {
            match value {
                ParamValue::Scalar(scalar) => {
                    serializer.append_pair(key, &scalar.to_string());
                }
                ParamValue::List(items) => {
                    let list_key = format!("{key}[]");
                    for item in items {
                        serializer.append_pair(&list_key, &query_text(item));
                    }
                }
                ParamValue::Map(nested) => {
                    for (sub_key, item) in nested.iter() {
                        serializer.append_pair(&format!("{key}[{sub_key}]"), &query_text(item));
                    }
                }
            }
        }
        serializer.finish()
    }
}

fn query_text(value: &ParamValue) -> String {
    match value {
        ParamValue::Scalar(scalar) => scalar.to_string(),
        nested => nested.to_json().to_string(),
    }
}

fn render_input(input: &FieldInput) -> Option<ParamValue> {
    let rendered = match input {
        FieldInput::Null => ParamValue::null(),
        FieldInput::Text(text) => ParamValue::text(text.clone()),
        FieldInput::List(items) => ParamValue::text(items.join(",")),
        FieldInput::Integer(number) => ParamValue::Scalar(Scalar::Integer(*number)),
        FieldInput::Timestamps(entries) => render_timestamps(entries),
        FieldInput::LabelSelector(parsed) => {
            ParamValue::text(parsed.as_ref().ok()?.as_str().to_owned())
        }
        FieldInput::OrderBy(order) => ParamValue::text(order.to_string()),
        FieldInput::Fields(selection) => ParamValue::Map(
            selection
                .iter()
                .map(|(relation, attributes)| (relation, attributes.join(",")))
                .collect(),
        ),
        FieldInput::Object(object) => ParamValue::from_json(object.clone()),
        FieldInput::Unparseable(raw) => raw.clone(),
    };
    Some(rendered)
}

fn render_timestamps(entries: &[TimestampInput]) -> ParamValue {
    let equality_only = entries
        .iter()
        .all(|entry| matches!(entry.operator(), Ok(TimestampOperator::Eq)));
    if equality_only {
        let joined: Vec<&str> = entries.iter().map(TimestampInput::raw).collect();
        return ParamValue::text(joined.join(","));
    }
    ParamValue::Map(
        entries
            .iter()
            .map(|entry| {
                let operator = match entry.operator() {
                    Ok(operator) => operator.as_str().to_owned(),
                    Err(unknown) => unknown.0.clone(),
                };
                (operator, entry.raw().to_owned())
            })
            .collect(),
    )
}

/// A message type parsed from raw request parameters.
pub trait RequestMessage: Sized {
    /// The message type's schema.
    fn schema() -> &'static MessageSchema;

    /// Wraps an already parsed request.
    fn from_parsed(parsed: ParsedMessage) -> Self;

    /// The parsed request.
    fn parsed(&self) -> &ParsedMessage;

    /// Parses raw parameters with the default limits.
    #[must_use]
    fn from_params(raw: &RawParams) -> Self {
        Self::from_parsed(ParsedMessage::parse(Self::schema(), raw))
    }

    /// Parses raw parameters with custom limits.
    #[must_use]
    fn from_params_with_config(raw: &RawParams, config: &MessageConfig) -> Self {
        Self::from_parsed(ParsedMessage::parse_with_config(
            Self::schema(),
            raw,
            config,
        ))
    }

    /// Returns `true` when no validation errors were recorded.
    #[must_use]
    fn is_valid(&self) -> bool {
        self.parsed().is_valid()
    }

    /// Validation errors in the order they were found.
    #[must_use]
    fn errors(&self) -> &ValidationErrors {
        self.parsed().errors()
    }

    /// Returns `true` when `key` was present in the raw request.
    #[must_use]
    fn requested(&self, key: &str) -> bool {
        self.parsed().requested(key)
    }
}
