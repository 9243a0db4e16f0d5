//! Audit-event port for service-instance actions.

use crate::service_instance::domain::{ServiceInstance, ServiceInstanceEventAction, UserAuditInfo};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit-event recording.
pub type ServiceEventResult<T> = Result<T, ServiceEventError>;

/// Records audit events for service instances.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceEventRepository: Send + Sync {
    /// Records one event for a user-provided instance.
    ///
    /// `request` must already be redacted.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceEventError::Persistence`] when the event cannot be
    /// stored.
    async fn record_user_provided_service_instance_event(
        &self,
        action: ServiceInstanceEventAction,
        instance: &ServiceInstance,
        request: &Value,
        actor: &UserAuditInfo,
    ) -> ServiceEventResult<()>;
}

/// Errors returned by audit-event recorders.
#[derive(Debug, Clone, Error)]
pub enum ServiceEventError {
    /// Persistence-layer failure.
    #[error("event persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServiceEventError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
