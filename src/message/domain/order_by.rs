//! `order_by` sort parameter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sortable fields when a message type does not declare its own.
pub const DEFAULT_ORDER_BY_FIELDS: &[&str] = &["created_at", "updated_at", "name"];

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderDirection {
    /// Oldest/smallest first.
    #[default]
    Ascending,
    /// Newest/largest first.
    Descending,
}

/// A requested sort column and direction.
///
/// # Examples
///
/// ```
/// use plinth::message::domain::{OrderBy, OrderDirection};
///
/// let order = OrderBy::parse("-created_at");
/// assert_eq!(order.field(), "created_at");
/// assert_eq!(order.direction(), OrderDirection::Descending);
/// assert_eq!(order.to_string(), "-created_at");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    field: String,
    direction: OrderDirection,
}

impl OrderBy {
    /// Creates an ordering.
    #[must_use]
    pub fn new(field: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Parses `field`, `+field` or `-field`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(field) = trimmed.strip_prefix('-') {
            return Self::new(field, OrderDirection::Descending);
        }
        Self::new(
            trimmed.strip_prefix('+').unwrap_or(trimmed),
            OrderDirection::Ascending,
        )
    }

    /// The column name without a direction prefix.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The sort direction.
    #[must_use]
    pub const fn direction(&self) -> OrderDirection {
        self.direction
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            OrderDirection::Ascending => f.write_str(&self.field),
            OrderDirection::Descending => write!(f, "-{}", self.field),
        }
    }
}
