//! Domain model for service instances.

mod audit;
mod error;
mod ids;
mod instance;

pub use audit::{ServiceInstanceEventAction, UserAuditInfo};
pub use error::ServiceInstanceDomainError;
pub use ids::ServiceInstanceGuid;
pub use instance::{
    MetadataEntry, PersistedServiceInstanceData, ServiceInstance, USER_PROVIDED_TYPE,
    UserProvidedInstanceDraft,
};
