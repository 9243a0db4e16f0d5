//! Repository port for service-instance persistence.

use crate::service_instance::domain::{ServiceInstance, ServiceInstanceGuid};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for service-instance repository operations.
pub type ServiceInstanceRepositoryResult<T> = Result<T, ServiceInstanceRepositoryError>;

/// Service-instance persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceInstanceRepository: Send + Sync {
    /// Stores a user-provided instance with its labels and annotations.
    ///
    /// Either everything is stored or nothing is.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceInstanceRepositoryError::NameTaken`] when the space
    /// already has an instance with the same name, or
    /// [`ServiceInstanceRepositoryError::Validation`] when the store rejects
    /// the entity.
    async fn create_user_provided(
        &self,
        instance: &ServiceInstance,
    ) -> ServiceInstanceRepositoryResult<()>;

    /// Removes an instance together with its labels and annotations.
    ///
    /// Used to undo a create whose follow-up writes failed. Removing an
    /// unknown instance succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceInstanceRepositoryError::Persistence`] when the
    /// store cannot be written.
    async fn delete_user_provided(
        &self,
        guid: ServiceInstanceGuid,
    ) -> ServiceInstanceRepositoryResult<()>;

    /// Finds an instance by identifier.
    ///
    /// Returns `None` when the instance does not exist.
    async fn find_by_guid(
        &self,
        guid: ServiceInstanceGuid,
    ) -> ServiceInstanceRepositoryResult<Option<ServiceInstance>>;
}

/// Errors returned by service-instance repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ServiceInstanceRepositoryError {
    /// The space already holds an instance with this name.
    #[error("service instance name is taken: {name}")]
    NameTaken {
        /// The conflicting name.
        name: String,
    },

    /// The store rejected the entity.
    #[error("{0}")]
    Validation(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServiceInstanceRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
