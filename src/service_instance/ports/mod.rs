//! Port contracts for service-instance actions.

pub mod events;
pub mod repository;

pub use events::{ServiceEventError, ServiceEventRepository, ServiceEventResult};
pub use repository::{
    ServiceInstanceRepository, ServiceInstanceRepositoryError, ServiceInstanceRepositoryResult,
};

#[cfg(test)]
pub use events::MockServiceEventRepository;
#[cfg(test)]
pub use repository::MockServiceInstanceRepository;
