//! Individual parameter validators.
//!
//! Each validator owns one concern and reports every problem it finds for
//! the fields it owns. Fields absent from the request are skipped unless a
//! rule requires them.

use crate::message::{
    domain::{
        FieldInput, FieldKind, FieldRule, FieldSpec, LabelKey, LabelLimits, LabelSelectorError,
        ParamValue, Scalar, TimestampOperator, quote_list, validate_label_value,
    },
    error::{ErrorKind, FieldError, ValidationErrors},
    normalization::Candidate,
    ports::validator::{MessageConfig, ParamValidator, ValidationResult},
};
use serde_json::Value;
use url::Url;

const TIMESTAMP_REQUIRED: &str = "relational operator and timestamp must be specified";
const TIMESTAMP_SINGLE_VALUE: &str = "only accepts one value when using a relational operator";
const TIMESTAMP_FORMAT_HINT: &str =
    "has an invalid timestamp format. Timestamps should be formatted as 'YYYY-MM-DDThh:mm:ssZ'";

fn declared_inputs(candidate: &Candidate) -> impl Iterator<Item = (&FieldSpec, &FieldInput)> {
    candidate
        .schema()
        .fields()
        .iter()
        .filter_map(|spec| candidate.input(spec.key()).map(|input| (spec, input)))
}

/// Rejects keys outside the schema with one whole-message error.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowedKeysValidator;

impl ParamValidator for AllowedKeysValidator {
    fn name(&self) -> &'static str {
        "allowed_keys"
    }

    fn validate(&self, candidate: &Candidate) -> ValidationResult<()> {
        let unknown = candidate.unknown_keys();
        if unknown.is_empty() {
            return Ok(());
        }
        let message = candidate
            .schema()
            .kind()
            .unknown_keys_message(unknown.iter().map(String::as_str));
        Err(FieldError::base(ErrorKind::UnknownParameter, message).into())
    }
}

/// Rejects registered keys the message type never accepts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisallowedValidator;

impl ParamValidator for DisallowedValidator {
    fn name(&self) -> &'static str {
        "disallowed"
    }

    fn validate(&self, candidate: &Candidate) -> ValidationResult<()> {
        candidate
            .schema()
            .disallowed()
            .iter()
            .filter(|param| candidate.is_requested(param.key()))
            .map(|param| FieldError::base(ErrorKind::UnknownParameter, param.message()))
            .collect::<ValidationErrors>()
            .into_result()
    }
}

/// Rejects requests that supply two mutually exclusive keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictValidator;

impl ParamValidator for ConflictValidator {
    fn name(&self) -> &'static str {
        "conflict"
    }

    fn validate(&self, candidate: &Candidate) -> ValidationResult<()> {
        let supplied =
            |key: &str| candidate.input(key).is_some_and(|input| !input.is_null());
        candidate
            .schema()
            .conflicts()
            .iter()
            .map(|rule| rule.keys())
            .filter(|(first, second)| supplied(first) && supplied(second))
            .map(|(first, second)| {
                FieldError::base(
                    ErrorKind::ConflictingParameters,
                    format!("Cannot specify both '{first}' and '{second}'"),
                )
            })
            .collect::<ValidationErrors>()
            .into_result()
    }
}

/// Checks that each value has its field's shape.
#[derive(Debug, Clone, Copy)]
pub struct TypeValidator {
    max_guid_length: usize,
}

impl TypeValidator {
    /// Creates the validator.
    #[must_use]
    pub const fn new(config: &MessageConfig) -> Self {
        Self {
            max_guid_length: config.max_guid_length,
        }
    }
}

impl ParamValidator for TypeValidator {
    fn name(&self) -> &'static str {
        "type"
    }

    fn validate(&self, candidate: &Candidate) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        for (spec, input) in declared_inputs(candidate) {
            let message = match (spec.kind(), input) {
                (FieldKind::Timestamps, _) => None,
                (kind, FieldInput::Unparseable(raw)) => Some(shape_message(kind, raw)),
                (FieldKind::Guid, FieldInput::Text(guid)) => {
                    let length = guid.chars().count();
                    (length == 0 || length > self.max_guid_length).then(|| {
                        format!("must be between 1 and {} characters", self.max_guid_length)
                    })
                }
                _ => None,
            };
            if let Some(text) = message {
                errors.push(FieldError::invalid_type(spec.key(), text));
            }
        }
        errors.into_result()
    }
}

fn shape_message(kind: FieldKind, raw: &ParamValue) -> String {
    let text = match kind {
        FieldKind::CommaList | FieldKind::Array => "must be an array",
        FieldKind::Integer => integer_message(raw),
        FieldKind::Fields(_)
        | FieldKind::Object
        | FieldKind::Metadata
        | FieldKind::Reference(_) => "must be an object",
        FieldKind::Text
        | FieldKind::Guid
        | FieldKind::Timestamps
        | FieldKind::LabelSelector
        | FieldKind::OrderBy => "must be a string",
    };
    text.to_owned()
}

fn integer_message(raw: &ParamValue) -> &'static str {
    let fractional = match raw {
        ParamValue::Scalar(Scalar::Float(_)) => true,
        ParamValue::Scalar(Scalar::Text(text)) => text.trim().parse::<f64>().is_ok(),
        _ => false,
    };
    if fractional {
        "must be an integer"
    } else {
        "is not a number"
    }
}

/// Checks the per-field rules declared in the schema.
#[derive(Debug, Clone)]
pub struct ConstraintValidator {
    config: MessageConfig,
}

impl ConstraintValidator {
    /// Creates the validator.
    #[must_use]
    pub fn new(config: &MessageConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn check(&self, rule: FieldRule, input: Option<&FieldInput>) -> Option<String> {
        match (rule, input) {
            (FieldRule::Required, None | Some(FieldInput::Null)) => Some(blank()),
            (FieldRule::Required, Some(FieldInput::Text(text))) if text.trim().is_empty() => {
                Some(blank())
            }
            (FieldRule::Positive, Some(FieldInput::Integer(number))) if *number <= 0 => {
                Some("must be greater than 0".to_owned())
            }
            (FieldRule::AtLeast(bound), Some(FieldInput::Integer(number))) if *number < bound => {
                Some(format!("must be greater than or equal to {bound}"))
            }
            (FieldRule::PerPageLimit, Some(FieldInput::Integer(number)))
                if !(1..=self.config.max_per_page).contains(number) =>
            {
                Some(format!("must be between 1 and {}", self.config.max_per_page))
            }
            (FieldRule::ExactItems { count, message }, Some(FieldInput::List(items)))
                if items.len() != count =>
            {
                Some(message.to_owned())
            }
            (FieldRule::OneOf(allowed), Some(FieldInput::Text(text)))
                if !allowed.contains(&text.as_str()) =>
            {
                Some(format!(
                    "must be one of {}",
                    quote_list(allowed.iter().copied())
                ))
            }
            (FieldRule::MaxLength(max), Some(FieldInput::Text(text)))
                if text.chars().count() > max =>
            {
                Some(format!("is too long (maximum is {max} characters)"))
            }
            (FieldRule::Uri, Some(FieldInput::Text(text))) if Url::parse(text).is_err() => {
                Some("must be a valid URI".to_owned())
            }
            (FieldRule::HttpsUri, Some(FieldInput::Text(text)))
                if !Url::parse(text).is_ok_and(|url| url.scheme() == "https") =>
            {
                Some("must be a valid https URI".to_owned())
            }
            (FieldRule::CombinedLength, Some(FieldInput::List(items)))
                if items.iter().map(|item| item.chars().count()).sum::<usize>()
                    > self.config.max_tags_length =>
            {
                Some(format!(
                    "combined length must not exceed {} characters",
                    self.config.max_tags_length
                ))
            }
            _ => None,
        }
    }
}

fn blank() -> String {
    "can't be blank".to_owned()
}

impl ParamValidator for ConstraintValidator {
    fn name(&self) -> &'static str {
        "constraint"
    }

    fn validate(&self, candidate: &Candidate) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        for spec in candidate.schema().fields() {
            let input = candidate.input(spec.key());
            for rule in spec.rules() {
                if let Some(message) = self.check(*rule, input) {
                    errors.push(FieldError::invalid_value(spec.key(), message));
                }
            }
        }
        errors.into_result()
    }
}

/// Checks that reference objects carry a GUID at their declared path.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceValidator {
    max_guid_length: usize,
}

impl ReferenceValidator {
    /// Creates the validator.
    #[must_use]
    pub const fn new(config: &MessageConfig) -> Self {
        Self {
            max_guid_length: config.max_guid_length,
        }
    }
}

impl ParamValidator for ReferenceValidator {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn validate(&self, candidate: &Candidate) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        for (spec, input) in declared_inputs(candidate) {
            let (FieldKind::Reference(path), FieldInput::Object(object)) = (spec.kind(), input)
            else {
                continue;
            };
            let guid = path
                .iter()
                .try_fold(object, |node, segment| node.get(*segment))
                .and_then(Value::as_str);
            let valid = guid.is_some_and(|text| {
                let length = text.chars().count();
                (1..=self.max_guid_length).contains(&length)
            });
            if !valid {
                errors.push(FieldError::invalid_type(
                    spec.key(),
                    format!("must contain a valid GUID at '{}'", path.join(".")),
                ));
            }
        }
        errors.into_result()
    }
}

/// Checks timestamp filter operators and values.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampValidator;

impl ParamValidator for TimestampValidator {
    fn name(&self) -> &'static str {
        "timestamp"
    }

    fn validate(&self, candidate: &Candidate) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        for (spec, input) in declared_inputs(candidate) {
            if spec.kind() != FieldKind::Timestamps {
                continue;
            }
            let mut messages: Vec<String> = Vec::new();
            match input {
                FieldInput::Timestamps(entries) if !entries.is_empty() => {
                    for entry in entries {
                        let message = match entry.operator() {
                            Err(unknown) => Some(unknown.to_string()),
                            Ok(operator)
                                if *operator != TimestampOperator::Eq
                                    && entry.raw().contains(',') =>
                            {
                                Some(TIMESTAMP_SINGLE_VALUE.to_owned())
                            }
                            Ok(_) if entry.instant().is_none() => {
                                Some(TIMESTAMP_FORMAT_HINT.to_owned())
                            }
                            Ok(_) => None,
                        };
                        if let Some(text) = message
                            && !messages.contains(&text)
                        {
                            messages.push(text);
                        }
                    }
                }
                FieldInput::Null => {}
                _ => messages.push(TIMESTAMP_REQUIRED.to_owned()),
            }
            for message in messages {
                errors.push(FieldError::field(
                    spec.key(),
                    ErrorKind::InvalidFilterGrammar,
                    message,
                ));
            }
        }
        errors.into_result()
    }
}

/// Checks label selector grammar plus key and value rules.
#[derive(Debug, Clone, Copy)]
pub struct LabelSelectorValidator {
    limits: LabelLimits,
}

impl LabelSelectorValidator {
    /// Creates the validator.
    #[must_use]
    pub const fn new(config: &MessageConfig) -> Self {
        Self {
            limits: config.label_limits(),
        }
    }
}

impl ParamValidator for LabelSelectorValidator {
    fn name(&self) -> &'static str {
        "label_selector"
    }

    fn validate(&self, candidate: &Candidate) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        for (spec, input) in declared_inputs(candidate) {
            let FieldInput::LabelSelector(parsed) = input else {
                continue;
            };
            let key = spec.key();
            let report = |errors: &mut ValidationErrors, message: String| {
                errors.push(FieldError::field(key, ErrorKind::InvalidFilterGrammar, message));
            };
            match parsed {
                Err(LabelSelectorError::Empty) => {
                    report(&mut errors, "Missing label_selector value".to_owned());
                }
                Err(_) => report(&mut errors, "Invalid label_selector value".to_owned()),
                Ok(selector) => {
                    for requirement in selector.requirements() {
                        if let Err(err) = LabelKey::parse(requirement.key(), &self.limits) {
                            report(&mut errors, format!("label key error: {err}"));
                        }
                        for value in requirement.values() {
                            if let Err(err) = validate_label_value(value, &self.limits) {
                                report(&mut errors, format!("label value error: {err}"));
                            }
                        }
                    }
                }
            }
        }
        errors.into_result()
    }
}

/// Checks the `order_by` column against the sortable list.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderByValidator;

impl ParamValidator for OrderByValidator {
    fn name(&self) -> &'static str {
        "order_by"
    }

    fn validate(&self, candidate: &Candidate) -> ValidationResult<()> {
        let sortable = candidate.schema().order_by_fields();
        declared_inputs(candidate)
            .filter_map(|(spec, input)| match input {
                FieldInput::OrderBy(order) if !sortable.contains(&order.field()) => Some(
                    FieldError::invalid_value(
                        spec.key(),
                        format!("can only be: {}", quote_list(sortable.iter().copied())),
                    ),
                ),
                _ => None,
            })
            .collect::<ValidationErrors>()
            .into_result()
    }
}

/// Checks `fields[relation]` attributes against each relation's allowed set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldsValidator;

impl ParamValidator for FieldsValidator {
    fn name(&self) -> &'static str {
        "fields"
    }

    fn validate(&self, candidate: &Candidate) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        for (spec, input) in declared_inputs(candidate) {
            let (FieldKind::Fields(inclusions), FieldInput::Fields(selection)) =
                (spec.kind(), input)
            else {
                continue;
            };
            for inclusion in inclusions {
                let rejected = selection.get(inclusion.relation()).is_some_and(|attributes| {
                    attributes
                        .iter()
                        .any(|attribute| !inclusion.permits(attribute))
                });
                if rejected {
                    errors.push(FieldError::invalid_value(
                        spec.key(),
                        format!(
                            "[{}] {}",
                            inclusion.relation(),
                            inclusion.valid_values_message()
                        ),
                    ));
                }
            }
        }
        errors.into_result()
    }
}
