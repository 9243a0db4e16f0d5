//! Shared world state for user-provided instance BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use plinth::service_instance::{
    adapters::memory::{InMemoryServiceEventRepository, InMemoryServiceInstanceRepository},
    domain::ServiceInstance,
    services::{ServiceInstanceCreateError, ServiceInstanceCreateUserProvided},
};
use rstest::fixture;
use serde_json::Value;

/// Action type used by the BDD world.
pub type TestCreateAction = ServiceInstanceCreateUserProvided<
    InMemoryServiceInstanceRepository,
    InMemoryServiceEventRepository,
    DefaultClock,
>;

/// Scenario world for user-provided instance behaviour tests.
pub struct InstanceWorld {
    pub instances: Arc<InMemoryServiceInstanceRepository>,
    pub events: Arc<InMemoryServiceEventRepository>,
    pub pending_body: Option<Value>,
    pub last_result: Option<Result<ServiceInstance, ServiceInstanceCreateError>>,
}

impl InstanceWorld {
    /// Creates a world whose store accepts any space.
    #[must_use]
    pub fn new() -> Self {
        Self {
            instances: Arc::new(InMemoryServiceInstanceRepository::new()),
            events: Arc::new(InMemoryServiceEventRepository::new()),
            pending_body: None,
            last_result: None,
        }
    }

    /// Builds the create action over the world's adapters.
    #[must_use]
    pub fn action(&self) -> TestCreateAction {
        ServiceInstanceCreateUserProvided::new(
            Arc::clone(&self.instances),
            Arc::clone(&self.events),
            Arc::new(DefaultClock),
        )
    }
}

impl Default for InstanceWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> InstanceWorld {
    plinth::telemetry::try_init_tracing();
    InstanceWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
