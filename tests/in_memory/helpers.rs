//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use plinth::{
    message::{
        RequestMessage, create::UserProvidedServiceInstanceCreateMessage, domain::RawParams,
    },
    service_instance::{
        adapters::memory::{InMemoryServiceEventRepository, InMemoryServiceInstanceRepository},
        services::ServiceInstanceCreateUserProvided,
    },
};
use rstest::fixture;
use serde_json::{Value, json};
use std::io;
use tokio::runtime::Runtime;

/// Space every fixture repository knows about.
pub const KNOWN_SPACE: &str = "space-1";

/// Second known space, for per-space uniqueness checks.
pub const OTHER_SPACE: &str = "space-2";

/// Action type wired to the in-memory adapters.
pub type CreateAction = ServiceInstanceCreateUserProvided<
    InMemoryServiceInstanceRepository,
    InMemoryServiceEventRepository,
    DefaultClock,
>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    plinth::telemetry::try_init_tracing();
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a repository that knows [`KNOWN_SPACE`] and [`OTHER_SPACE`].
#[fixture]
pub fn instances() -> Arc<InMemoryServiceInstanceRepository> {
    Arc::new(InMemoryServiceInstanceRepository::with_spaces([
        KNOWN_SPACE,
        OTHER_SPACE,
    ]))
}

/// Provides an empty event recorder.
#[fixture]
pub fn events() -> Arc<InMemoryServiceEventRepository> {
    Arc::new(InMemoryServiceEventRepository::new())
}

/// Builds the create action over shared adapters.
#[must_use]
pub fn create_action(
    instances: &Arc<InMemoryServiceInstanceRepository>,
    events: &Arc<InMemoryServiceEventRepository>,
) -> CreateAction {
    ServiceInstanceCreateUserProvided::new(
        Arc::clone(instances),
        Arc::clone(events),
        Arc::new(DefaultClock),
    )
}

/// A complete create body for `name` in `space`.
#[must_use]
pub fn create_body(name: &str, space: &str) -> Value {
    json!({
        "type": "user-provided",
        "name": name,
        "credentials": { "uri": "postgres://db.example.com/app", "password": "s3cret" },
        "route_service_url": "https://proxy.example.com",
        "tags": ["db"],
        "relationships": { "space": { "data": { "guid": space } } },
        "metadata": {
            "labels": { "env": "prod", "example.com/tier": "backend" },
            "annotations": { "contact": "ops@example.com" }
        }
    })
}

/// Parses a JSON body into a create message.
///
/// # Errors
///
/// Returns an error when the body is not a JSON object.
pub fn create_message(body: Value) -> eyre::Result<UserProvidedServiceInstanceCreateMessage> {
    let raw = RawParams::from_json(body)?;
    Ok(UserProvidedServiceInstanceCreateMessage::from_params(&raw))
}
