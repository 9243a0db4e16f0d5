//! Validator port for request messages.
//!
//! Defines the interface each parameter check implements and the limits
//! the checks read.

use crate::message::{
    domain::LabelLimits, error::ValidationErrors, normalization::Candidate,
};
use serde::Deserialize;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// A single check run against a normalized request.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Report every problem they find, not just the first
/// - Ignore fields they do not own
/// - Be stateless and thread-safe
pub trait ParamValidator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Checks the candidate.
    ///
    /// # Errors
    ///
    /// Returns every problem found, in field declaration order.
    fn validate(&self, candidate: &Candidate) -> ValidationResult<()>;
}

/// Limits applied while validating request messages.
///
/// # Examples
///
/// ```
/// use plinth::message::ports::validator::MessageConfig;
///
/// let config = MessageConfig::default();
/// assert_eq!(config.max_per_page, 5000);
///
/// let strict = MessageConfig::strict();
/// assert!(strict.max_per_page < config.max_per_page);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Largest accepted `per_page`.
    pub max_per_page: i64,
    /// Longest accepted GUID.
    pub max_guid_length: usize,
    /// Longest label key name.
    pub max_label_name_length: usize,
    /// Longest label key prefix.
    pub max_label_prefix_length: usize,
    /// Longest label value.
    pub max_label_value_length: usize,
    /// Longest annotation value.
    pub max_annotation_value_length: usize,
    /// Longest combined length of a `tags` list.
    pub max_tags_length: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            max_per_page: 5000,
            max_guid_length: 200,
            max_label_name_length: 63,
            max_label_prefix_length: 253,
            max_label_value_length: 63,
            max_annotation_value_length: 5000,
            max_tags_length: 2048,
        }
    }
}

impl MessageConfig {
    /// Creates a configuration with generous limits.
    ///
    /// Useful for internal tooling that pages through large collections.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            max_per_page: 10_000,
            max_annotation_value_length: 10_000,
            ..Default::default()
        }
    }

    /// Creates a configuration with reduced limits.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_per_page: 500,
            max_guid_length: 36,
            max_label_name_length: 63,
            max_label_prefix_length: 253,
            max_label_value_length: 63,
            max_annotation_value_length: 1000,
            max_tags_length: 512,
        }
    }

    /// The label key and value limits.
    #[must_use]
    pub const fn label_limits(&self) -> LabelLimits {
        LabelLimits {
            max_name_length: self.max_label_name_length,
            max_prefix_length: self.max_label_prefix_length,
            max_value_length: self.max_label_value_length,
        }
    }
}
