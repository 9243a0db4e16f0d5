//! Label and annotation key/value grammar.
//!
//! Keys take the form `[prefix/]name`. The optional prefix is a DNS
//! subdomain; the name is alphanumeric with interior `-`, `_` and `.`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length limits applied to metadata keys and values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelLimits {
    /// Maximum length of the name part of a key.
    pub max_name_length: usize,
    /// Maximum length of the DNS prefix part of a key.
    pub max_prefix_length: usize,
    /// Maximum length of a label value.
    pub max_value_length: usize,
}

impl Default for LabelLimits {
    fn default() -> Self {
        Self {
            max_name_length: 63,
            max_prefix_length: 253,
            max_value_length: 63,
        }
    }
}

/// Reasons a metadata key is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LabelKeyError {
    /// The key is empty.
    #[error("key cannot be empty string")]
    Empty,

    /// The key contains more than one `/`.
    #[error("key has more than one '/'")]
    TooManySlashes,

    /// The prefix is not a DNS subdomain.
    #[error("prefix '{0}' must be in valid dns format")]
    InvalidPrefix(String),

    /// The prefix is too long.
    #[error("prefix '{prefix}' is greater than {max} characters")]
    PrefixTooLong {
        /// The offending prefix.
        prefix: String,
        /// The configured limit.
        max: usize,
    },

    /// The name is too long.
    #[error("'{name}' is greater than {max} characters")]
    NameTooLong {
        /// The offending name.
        name: String,
        /// The configured limit.
        max: usize,
    },

    /// The name contains characters outside the allowed set.
    #[error("'{0}' contains invalid characters")]
    InvalidCharacters(String),

    /// The name starts or ends with a non-alphanumeric character.
    #[error("'{0}' starts or ends with invalid characters")]
    InvalidBoundary(String),
}

/// Reasons a label value is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LabelValueError {
    /// The value is too long.
    #[error("'{value}' is greater than {max} characters")]
    TooLong {
        /// The offending value.
        value: String,
        /// The configured limit.
        max: usize,
    },

    /// The value contains characters outside the allowed set.
    #[error("'{0}' contains invalid characters")]
    InvalidCharacters(String),

    /// The value starts or ends with a non-alphanumeric character.
    #[error("'{0}' starts or ends with invalid characters")]
    InvalidBoundary(String),
}

/// A metadata key split into its optional prefix and its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelKey {
    prefix: Option<String>,
    name: String,
}

impl LabelKey {
    /// Parses and validates a key.
    ///
    /// # Errors
    ///
    /// Returns [`LabelKeyError`] when the key breaks the grammar or limits.
    ///
    /// # Examples
    ///
    /// ```
    /// use plinth::message::domain::{LabelKey, LabelLimits};
    ///
    /// let key = LabelKey::parse("example.com/env", &LabelLimits::default()).expect("valid key");
    /// assert_eq!(key.prefix(), Some("example.com"));
    /// assert_eq!(key.name(), "env");
    /// ```
    pub fn parse(key: &str, limits: &LabelLimits) -> Result<Self, LabelKeyError> {
        if key.is_empty() {
            return Err(LabelKeyError::Empty);
        }
        let mut parts = key.split('/');
        let first = parts.next().unwrap_or_default();
        let second = parts.next();
        if parts.next().is_some() {
            return Err(LabelKeyError::TooManySlashes);
        }

        let (prefix, name) = match second {
            Some(name) => (Some(first), name),
            None => (None, first),
        };

        if let Some(dns_prefix) = prefix {
            validate_prefix(dns_prefix, limits)?;
        }
        validate_name(name, limits)?;

        Ok(Self {
            prefix: prefix.map(ToOwned::to_owned),
            name: name.to_owned(),
        })
    }

    /// The DNS prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The key name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Validates a label value.
///
/// Empty values are permitted.
///
/// # Errors
///
/// Returns [`LabelValueError`] when the value breaks the grammar or limit.
pub fn validate_label_value(value: &str, limits: &LabelLimits) -> Result<(), LabelValueError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.chars().count() > limits.max_value_length {
        return Err(LabelValueError::TooLong {
            value: value.to_owned(),
            max: limits.max_value_length,
        });
    }
    if !value.chars().all(is_name_character) {
        return Err(LabelValueError::InvalidCharacters(value.to_owned()));
    }
    if !has_alphanumeric_boundaries(value) {
        return Err(LabelValueError::InvalidBoundary(value.to_owned()));
    }
    Ok(())
}

fn validate_prefix(prefix: &str, limits: &LabelLimits) -> Result<(), LabelKeyError> {
    if prefix.chars().count() > limits.max_prefix_length {
        return Err(LabelKeyError::PrefixTooLong {
            prefix: prefix.to_owned(),
            max: limits.max_prefix_length,
        });
    }
    let valid = !prefix.is_empty()
        && prefix.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|character| character.is_ascii_alphanumeric() || character == '-')
                && has_alphanumeric_boundaries(segment)
        });
    if valid {
        Ok(())
    } else {
        Err(LabelKeyError::InvalidPrefix(prefix.to_owned()))
    }
}

fn validate_name(name: &str, limits: &LabelLimits) -> Result<(), LabelKeyError> {
    if name.is_empty() {
        return Err(LabelKeyError::Empty);
    }
    if name.chars().count() > limits.max_name_length {
        return Err(LabelKeyError::NameTooLong {
            name: name.to_owned(),
            max: limits.max_name_length,
        });
    }
    if !name.chars().all(is_name_character) {
        return Err(LabelKeyError::InvalidCharacters(name.to_owned()));
    }
    if !has_alphanumeric_boundaries(name) {
        return Err(LabelKeyError::InvalidBoundary(name.to_owned()));
    }
    Ok(())
}

const fn is_name_character(character: char) -> bool {
    character.is_ascii_alphanumeric() || matches!(character, '-' | '_' | '.')
}

fn has_alphanumeric_boundaries(value: &str) -> bool {
    let first = value.chars().next();
    let last = value.chars().last();
    matches!((first, last), (Some(start), Some(end))
        if start.is_ascii_alphanumeric() && end.is_ascii_alphanumeric())
}
