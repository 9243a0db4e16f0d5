//! List-endpoint query messages.
//!
//! Every list message accepts `page`, `per_page` and `order_by` on top of
//! its own filters. The shared accessors live on [`ListMessage`].

mod builds;
mod events;
mod processes;
mod service_instances;
mod service_usage_events;
mod spaces;

pub use builds::BuildsListMessage;
pub use events::EventsListMessage;
pub use processes::ProcessesListMessage;
pub use service_instances::{
    SPACE_FIELDS, SPACE_ORGANIZATION_FIELDS, ServiceInstancesListMessage,
};
pub use service_usage_events::ServiceUsageEventsListMessage;
pub use spaces::SpacesListMessage;

use crate::message::{
    RequestMessage,
    domain::{LabelSelector, OrderBy, OrderDirection, ParamMap, TimestampFilters},
};

/// Page size used when `per_page` is absent.
pub const DEFAULT_PER_PAGE: i64 = 50;

/// Resolved paging and sorting for a list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationOptions {
    /// One-based page number.
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Sort column and direction.
    pub order_by: OrderBy,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            order_by: OrderBy::new("created_at", OrderDirection::Ascending),
        }
    }
}

/// Accessors shared by every list message.
pub trait ListMessage: RequestMessage {
    /// Requested page.
    #[must_use]
    fn page(&self) -> Option<i64> {
        self.parsed().integer("page")
    }

    /// Requested page size.
    #[must_use]
    fn per_page(&self) -> Option<i64> {
        self.parsed().integer("per_page")
    }

    /// Requested sort.
    #[must_use]
    fn order_by(&self) -> Option<&OrderBy> {
        self.parsed().order_by()
    }

    /// Requested label selector, when the message type accepts one.
    #[must_use]
    fn label_selector(&self) -> Option<&LabelSelector> {
        self.parsed().label_selector("label_selector")
    }

    /// `created_ats` filters, when the message type accepts them.
    #[must_use]
    fn created_ats(&self) -> Option<TimestampFilters> {
        self.parsed().timestamps("created_ats")
    }

    /// `updated_ats` filters, when the message type accepts them.
    #[must_use]
    fn updated_ats(&self) -> Option<TimestampFilters> {
        self.parsed().timestamps("updated_ats")
    }

    /// `guids` filter, when the message type accepts it.
    #[must_use]
    fn guids(&self) -> Option<&[String]> {
        self.parsed().list("guids")
    }

    /// Paging and sorting with defaults filled in.
    #[must_use]
    fn pagination(&self) -> PaginationOptions {
        let defaults = PaginationOptions::default();
        PaginationOptions {
            page: self.page().unwrap_or(defaults.page),
            per_page: self.per_page().unwrap_or(defaults.per_page),
            order_by: self.order_by().cloned().unwrap_or(defaults.order_by),
        }
    }

    /// Filter and sort parameters without `page` and `per_page`.
    #[must_use]
    fn to_param_hash(&self) -> ParamMap {
        self.parsed().to_param_hash()
    }

    /// [`Self::to_param_hash`] as a URL query string.
    #[must_use]
    fn to_query_string(&self) -> String {
        self.parsed().to_query_string()
    }
}
