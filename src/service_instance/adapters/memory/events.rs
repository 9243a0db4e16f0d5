//! In-memory audit-event recorder.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, RwLock};

use crate::service_instance::{
    domain::{ServiceInstance, ServiceInstanceEventAction, ServiceInstanceGuid, UserAuditInfo},
    ports::{ServiceEventError, ServiceEventRepository, ServiceEventResult},
};

/// A recorded audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedServiceEvent {
    /// Event type, e.g. `audit.user_provided_service_instance.create`.
    pub event_type: &'static str,
    /// The affected instance.
    pub instance_guid: ServiceInstanceGuid,
    /// The instance name at the time of the event.
    pub instance_name: String,
    /// The owning space.
    pub space_guid: String,
    /// The redacted request body.
    pub request: Value,
    /// Who acted.
    pub actor: UserAuditInfo,
}

/// Collects events in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceEventRepository {
    events: Arc<RwLock<Vec<RecordedServiceEvent>>>,
}

impl InMemoryServiceEventRepository {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event recorded so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceEventError::Persistence`] when the lock is poisoned.
    pub fn events(&self) -> ServiceEventResult<Vec<RecordedServiceEvent>> {
        let events = self
            .events
            .read()
            .map_err(|err| ServiceEventError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(events.clone())
    }
}

#[async_trait]
impl ServiceEventRepository for InMemoryServiceEventRepository {
    async fn record_user_provided_service_instance_event(
        &self,
        action: ServiceInstanceEventAction,
        instance: &ServiceInstance,
        request: &Value,
        actor: &UserAuditInfo,
    ) -> ServiceEventResult<()> {
        let mut events = self
            .events
            .write()
            .map_err(|err| ServiceEventError::persistence(std::io::Error::other(err.to_string())))?;
        events.push(RecordedServiceEvent {
            event_type: action.as_str(),
            instance_guid: instance.guid(),
            instance_name: instance.name().to_owned(),
            space_guid: instance.space_guid().to_owned(),
            request: request.clone(),
            actor: actor.clone(),
        });
        Ok(())
    }
}
