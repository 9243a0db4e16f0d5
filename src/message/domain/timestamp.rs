//! Timestamp filters such as `created_ats[gt]=2020-01-01T00:00:00Z`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The only accepted timestamp layout: UTC, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const TIMESTAMP_LENGTH: usize = "YYYY-MM-DDThh:mm:ssZ".len();

/// Relational operator attached to a timestamp filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampOperator {
    /// Equal to.
    Eq,
    /// Strictly before.
    Lt,
    /// Before or equal to.
    Lte,
    /// Strictly after.
    Gt,
    /// After or equal to.
    Gte,
}

/// Error returned for an unrecognized operator token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid relational operator: '{0}'")]
pub struct ParseTimestampOperatorError(pub String);

impl TimestampOperator {
    /// Returns the wire token for this operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
        }
    }

    /// Applies the operator with `candidate` on the left-hand side.
    #[must_use]
    pub fn compare(self, candidate: &DateTime<Utc>, bound: &DateTime<Utc>) -> bool {
        match self {
            Self::Eq => candidate == bound,
            Self::Lt => candidate < bound,
            Self::Lte => candidate <= bound,
            Self::Gt => candidate > bound,
            Self::Gte => candidate >= bound,
        }
    }
}

impl FromStr for TimestampOperator {
    type Err = ParseTimestampOperatorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "eq" => Ok(Self::Eq),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            other => Err(ParseTimestampOperatorError(other.to_owned())),
        }
    }
}

impl fmt::Display for TimestampOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a `YYYY-MM-DDThh:mm:ssZ` timestamp.
///
/// Returns `None` for anything else, including fractional seconds and
/// numeric offsets.
///
/// # Examples
///
/// ```
/// use plinth::message::domain::parse_timestamp;
///
/// assert!(parse_timestamp("2020-06-30T12:34:56Z").is_some());
/// assert!(parse_timestamp("2020-06-30T12:34:56+01:00").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if value.len() != TIMESTAMP_LENGTH || !value.is_ascii() {
        return None;
    }
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Formats a timestamp in the accepted layout.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// A single validated timestamp filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampFilter {
    operator: TimestampOperator,
    timestamp: DateTime<Utc>,
}

impl TimestampFilter {
    /// Creates a filter.
    #[must_use]
    pub const fn new(operator: TimestampOperator, timestamp: DateTime<Utc>) -> Self {
        Self {
            operator,
            timestamp,
        }
    }

    /// The relational operator.
    #[must_use]
    pub const fn operator(&self) -> TimestampOperator {
        self.operator
    }

    /// The bound being compared against.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns `true` when `candidate` satisfies this filter.
    #[must_use]
    pub fn matches(&self, candidate: &DateTime<Utc>) -> bool {
        self.operator.compare(candidate, &self.timestamp)
    }
}

/// All filters supplied for one timestamp field.
///
/// Relational filters (`lt`, `lte`, `gt`, `gte`) are conjunctive. Equality
/// filters come from a plain value or comma list and match when any of them
/// matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampFilters {
    filters: Vec<TimestampFilter>,
}

impl TimestampFilters {
    /// Wraps a list of filters.
    #[must_use]
    pub const fn new(filters: Vec<TimestampFilter>) -> Self {
        Self { filters }
    }

    /// Individual filters in request order.
    #[must_use]
    pub fn filters(&self) -> &[TimestampFilter] {
        &self.filters
    }

    /// Returns `true` when any filter uses a relational operator.
    #[must_use]
    pub fn is_relational(&self) -> bool {
        self.filters
            .iter()
            .any(|filter| filter.operator != TimestampOperator::Eq)
    }

    /// Evaluates every filter against `candidate`.
    #[must_use]
    pub fn matches(&self, candidate: &DateTime<Utc>) -> bool {
        let mut equalities = self
            .filters
            .iter()
            .filter(|filter| filter.operator == TimestampOperator::Eq)
            .peekable();
        let equality_ok =
            equalities.peek().is_none() || equalities.any(|filter| filter.matches(candidate));
        let relational_ok = self
            .filters
            .iter()
            .filter(|filter| filter.operator != TimestampOperator::Eq)
            .all(|filter| filter.matches(candidate));
        equality_ok && relational_ok
    }
}
