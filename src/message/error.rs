//! Error taxonomy for request validation.
//!
//! Input problems are collected into [`ValidationErrors`] rather than
//! raised; callers inspect them and render an [`ErrorResponse`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Category of a validation or action failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A key outside the message type's accepted set.
    UnknownParameter,
    /// A value of the wrong shape.
    InvalidFieldType,
    /// A value of the right shape that breaks a constraint.
    InvalidFieldValue,
    /// A filter that does not follow the filter grammar.
    InvalidFilterGrammar,
    /// Keys that may not be supplied together.
    ConflictingParameters,
    /// The requested name is already used in its scope.
    NameTaken,
    /// The store rejected the entity.
    InvalidEntity,
    /// The actor may not perform the action.
    NotAuthorized,
}

impl ErrorKind {
    /// The stable numeric API error code.
    #[must_use]
    pub const fn api_code(self) -> u32 {
        match self {
            Self::UnknownParameter | Self::InvalidFilterGrammar => 10005,
            Self::InvalidFieldType
            | Self::InvalidFieldValue
            | Self::ConflictingParameters
            | Self::InvalidEntity => 10008,
            Self::NameTaken => 60002,
            Self::NotAuthorized => 10003,
        }
    }

    /// The API error title paired with [`Self::api_code`].
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::UnknownParameter | Self::InvalidFilterGrammar => "BadQueryParameter",
            Self::InvalidFieldType
            | Self::InvalidFieldValue
            | Self::ConflictingParameters
            | Self::InvalidEntity => "UnprocessableEntity",
            Self::NameTaken => "ServiceInstanceNameTaken",
            Self::NotAuthorized => "NotAuthorized",
        }
    }
}

/// What an error is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorScope {
    /// The message as a whole.
    Base,
    /// A single field.
    Field(String),
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.full_message())]
pub struct FieldError {
    scope: ErrorScope,
    kind: ErrorKind,
    message: String,
}

impl FieldError {
    /// Creates an error scoped to the whole message.
    #[must_use]
    pub fn base(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            scope: ErrorScope::Base,
            kind,
            message: message.into(),
        }
    }

    /// Creates an error scoped to one field.
    #[must_use]
    pub fn field(field: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            scope: ErrorScope::Field(field.into()),
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for an [`ErrorKind::InvalidFieldType`] error.
    #[must_use]
    pub fn invalid_type(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::field(field, ErrorKind::InvalidFieldType, message)
    }

    /// Shorthand for an [`ErrorKind::InvalidFieldValue`] error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::field(field, ErrorKind::InvalidFieldValue, message)
    }

    /// What the error is attached to.
    #[must_use]
    pub const fn scope(&self) -> &ErrorScope {
        &self.scope
    }

    /// The field name for field-scoped errors.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        match &self.scope {
            ErrorScope::Base => None,
            ErrorScope::Field(name) => Some(name),
        }
    }

    /// The error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The message without the field name.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message as shown to API clients.
    ///
    /// Field errors are prefixed with the humanized field name, so
    /// `memory_in_mb` / `must be an integer` reads
    /// `Memory in mb must be an integer`.
    #[must_use]
    pub fn full_message(&self) -> String {
        match &self.scope {
            ErrorScope::Base => self.message.clone(),
            ErrorScope::Field(name) => format!("{} {}", humanize(name), self.message),
        }
    }
}

fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut characters = spaced.chars();
    characters.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(characters).collect()
    })
}

/// Ordered collection of validation problems for one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", self.full_messages().join("; "))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Appends an error.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Appends every error from another collection.
    pub fn extend(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }

    /// Returns `true` when nothing was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded errors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates errors in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Messages recorded against `field`, without the field prefix.
    #[must_use]
    pub fn on(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|error| error.field_name() == Some(field))
            .map(FieldError::message)
            .collect()
    }

    /// Messages recorded against the message as a whole.
    #[must_use]
    pub fn base(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|error| error.scope == ErrorScope::Base)
            .map(FieldError::message)
            .collect()
    }

    /// Returns `true` when any error is attached to `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors
            .iter()
            .any(|error| error.field_name() == Some(field))
    }

    /// Client-facing messages in order.
    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(FieldError::full_message).collect()
    }

    /// Converts the collection into `Ok(())` when empty.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// One entry of an API error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable numeric code.
    pub code: u32,
    /// Short error title.
    pub title: String,
    /// Client-facing description.
    pub detail: String,
}

impl ApiError {
    /// Builds an entry for a kind and detail text.
    #[must_use]
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            code: kind.api_code(),
            title: kind.title().to_owned(),
            detail: detail.into(),
        }
    }
}

impl From<&FieldError> for ApiError {
    fn from(error: &FieldError) -> Self {
        Self::new(error.kind(), error.full_message())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.code, self.detail)
    }
}

/// The `{errors: [...]}` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// One entry per problem.
    pub errors: Vec<ApiError>,
}

impl From<&ValidationErrors> for ErrorResponse {
    fn from(errors: &ValidationErrors) -> Self {
        Self {
            errors: errors.iter().map(ApiError::from).collect(),
        }
    }
}

impl From<ApiError> for ErrorResponse {
    fn from(error: ApiError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}
