//! In-memory adapters for service-instance persistence and auditing.

mod events;
mod instance;

pub use events::{InMemoryServiceEventRepository, RecordedServiceEvent};
pub use instance::{INVALID_SPACE_MESSAGE, InMemoryServiceInstanceRepository};
