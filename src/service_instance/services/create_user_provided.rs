//! Creates user-provided service instances from validated create messages.

use std::sync::Arc;

use crate::message::{
    RequestMessage,
    create::UserProvidedServiceInstanceCreateMessage,
    error::{ApiError, ErrorKind},
};
use crate::service_instance::{
    domain::{
        MetadataEntry, ServiceInstance, ServiceInstanceDomainError, ServiceInstanceEventAction,
        UserAuditInfo, UserProvidedInstanceDraft,
    },
    ports::{
        ServiceEventError, ServiceEventRepository, ServiceInstanceRepository,
        ServiceInstanceRepositoryError,
    },
};
use mockable::Clock;
use thiserror::Error;

/// Errors returned by [`ServiceInstanceCreateUserProvided::create`].
#[derive(Debug, Clone, Error)]
pub enum ServiceInstanceCreateError {
    /// The space already holds an instance with this name.
    #[error("The service instance name is taken: {0}")]
    NameTaken(String),

    /// The entity was rejected; carries the underlying text.
    #[error("{0}")]
    InvalidEntity(String),

    /// Storage failed for a reason unrelated to the request.
    #[error(transparent)]
    Repository(ServiceInstanceRepositoryError),

    /// The audit event could not be recorded.
    #[error(transparent)]
    Events(#[from] ServiceEventError),
}

impl ServiceInstanceCreateError {
    /// The API error kind, if the failure is caused by the request.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::NameTaken(_) => Some(ErrorKind::NameTaken),
            Self::InvalidEntity(_) => Some(ErrorKind::InvalidEntity),
            Self::Repository(_) | Self::Events(_) => None,
        }
    }

    /// Renders request-caused failures as an API error entry.
    #[must_use]
    pub fn to_api_error(&self) -> Option<ApiError> {
        self.kind().map(|kind| ApiError::new(kind, self.to_string()))
    }
}

impl From<ServiceInstanceRepositoryError> for ServiceInstanceCreateError {
    fn from(err: ServiceInstanceRepositoryError) -> Self {
        match err {
            ServiceInstanceRepositoryError::NameTaken { name } => Self::NameTaken(name),
            ServiceInstanceRepositoryError::Validation(message) => Self::InvalidEntity(message),
            other @ ServiceInstanceRepositoryError::Persistence(_) => Self::Repository(other),
        }
    }
}

impl From<ServiceInstanceDomainError> for ServiceInstanceCreateError {
    fn from(err: ServiceInstanceDomainError) -> Self {
        Self::InvalidEntity(err.to_string())
    }
}

/// Creates user-provided service instances and audits each creation.
#[derive(Clone)]
pub struct ServiceInstanceCreateUserProvided<R, E, C>
where
    R: ServiceInstanceRepository,
    E: ServiceEventRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    events: Arc<E>,
    clock: Arc<C>,
}

impl<R, E, C> ServiceInstanceCreateUserProvided<R, E, C>
where
    R: ServiceInstanceRepository,
    E: ServiceEventRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new action.
    #[must_use]
    pub const fn new(repository: Arc<R>, events: Arc<E>, clock: Arc<C>) -> Self {
        Self {
            repository,
            events,
            clock,
        }
    }

    /// Stores the instance described by `message` and records one audit
    /// event carrying the redacted request.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceInstanceCreateError::InvalidEntity`] when the message
    /// is invalid or the store rejects the entity,
    /// [`ServiceInstanceCreateError::NameTaken`] when the space already has
    /// an instance with this name, and a repository or event error when
    /// storage fails. When the audit event cannot be recorded the stored
    /// instance and its metadata are removed again.
    pub async fn create(
        &self,
        message: &UserProvidedServiceInstanceCreateMessage,
        actor: &UserAuditInfo,
    ) -> Result<ServiceInstance, ServiceInstanceCreateError> {
        if !message.is_valid() {
            let detail = message.errors().full_messages().join(", ");
            tracing::warn!(detail = %detail, "rejected invalid user-provided instance message");
            return Err(ServiceInstanceCreateError::InvalidEntity(detail));
        }

        let draft = draft_from_message(message)?;
        let instance = ServiceInstance::create(draft, &*self.clock);

        if let Err(err) = self.repository.create_user_provided(&instance).await {
            let create_error = ServiceInstanceCreateError::from(err);
            tracing::warn!(
                name = instance.name(),
                space_guid = instance.space_guid(),
                error = %create_error,
                "user-provided service instance not created"
            );
            return Err(create_error);
        }

        if let Err(err) = self
            .events
            .record_user_provided_service_instance_event(
                ServiceInstanceEventAction::Create,
                &instance,
                &message.audit_request(),
                actor,
            )
            .await
        {
            tracing::warn!(
                guid = %instance.guid(),
                error = %err,
                "audit event not recorded, removing user-provided service instance"
            );
            if let Err(undo) = self.repository.delete_user_provided(instance.guid()).await {
                tracing::error!(
                    guid = %instance.guid(),
                    error = %undo,
                    "failed to remove user-provided service instance after audit failure"
                );
                return Err(ServiceInstanceCreateError::Repository(undo));
            }
            return Err(err.into());
        }

        tracing::info!(
            guid = %instance.guid(),
            space_guid = instance.space_guid(),
            labels = instance.labels().len(),
            annotations = instance.annotations().len(),
            "created user-provided service instance"
        );
        Ok(instance)
    }
}

fn draft_from_message(
    message: &UserProvidedServiceInstanceCreateMessage,
) -> Result<UserProvidedInstanceDraft, ServiceInstanceCreateError> {
    let mut draft = UserProvidedInstanceDraft::new(
        message.name().unwrap_or_default(),
        message.space_guid().unwrap_or_default(),
    )?;
    if let Some(credentials) = message.credentials() {
        draft = draft.with_credentials(credentials.clone());
    }
    if let Some(url) = message.syslog_drain_url() {
        draft = draft.with_syslog_drain_url(url);
    }
    if let Some(url) = message.route_service_url() {
        draft = draft.with_route_service_url(url);
    }
    if let Some(tags) = message.tags() {
        draft = draft.with_tags(tags.to_vec());
    }

    let metadata = message.metadata();
    for (key, value) in metadata.labels() {
        if let Some(label_value) = value {
            draft = draft.with_label(MetadataEntry::parse(key, label_value.as_str())?);
        }
    }
    for (key, value) in metadata.annotations() {
        if let Some(annotation_value) = value {
            draft = draft.with_annotation(MetadataEntry::parse(key, annotation_value.as_str())?);
        }
    }
    Ok(draft)
}

impl<R, E, C> std::fmt::Debug for ServiceInstanceCreateUserProvided<R, E, C>
where
    R: ServiceInstanceRepository,
    E: ServiceEventRepository,
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceInstanceCreateUserProvided")
            .finish_non_exhaustive()
    }
}
