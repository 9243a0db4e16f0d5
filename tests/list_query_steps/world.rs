//! Shared world state for list query BDD scenarios.

use plinth::message::{
    ParsedMessage, RequestMessage,
    domain::RawParams,
    list::{
        BuildsListMessage, EventsListMessage, ProcessesListMessage, ServiceInstancesListMessage,
        ServiceUsageEventsListMessage, SpacesListMessage,
    },
};
use rstest::fixture;

/// Scenario world for list query behaviour tests.
#[derive(Default)]
pub struct ListQueryWorld {
    pub raw: Option<RawParams>,
    pub parsed: Option<ParsedMessage>,
}

impl ListQueryWorld {
    /// The parsed message, or an error when no `When` step ran.
    ///
    /// # Errors
    ///
    /// Returns an error when the query has not been parsed yet.
    pub fn parsed(&self) -> Result<&ParsedMessage, eyre::Report> {
        self.parsed
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing parsed message in scenario world"))
    }
}

/// Parses `raw` as the list message named `kind`.
///
/// # Errors
///
/// Returns an error for an unrecognized list name.
pub fn parse_list(kind: &str, raw: &RawParams) -> Result<ParsedMessage, eyre::Report> {
    let parsed = match kind {
        "processes" => ProcessesListMessage::from_params(raw).parsed().clone(),
        "spaces" => SpacesListMessage::from_params(raw).parsed().clone(),
        "builds" => BuildsListMessage::from_params(raw).parsed().clone(),
        "audit events" => EventsListMessage::from_params(raw).parsed().clone(),
        "service instances" => ServiceInstancesListMessage::from_params(raw).parsed().clone(),
        "service usage events" => ServiceUsageEventsListMessage::from_params(raw).parsed().clone(),
        other => return Err(eyre::eyre!("unknown list message '{other}'")),
    };
    Ok(parsed)
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ListQueryWorld {
    ListQueryWorld::default()
}
