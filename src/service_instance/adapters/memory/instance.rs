//! In-memory repository for service-instance tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::service_instance::{
    domain::{MetadataEntry, ServiceInstance, ServiceInstanceGuid},
    ports::{
        ServiceInstanceRepository, ServiceInstanceRepositoryError,
        ServiceInstanceRepositoryResult,
    },
};

/// Message used when an instance names a space the store does not know.
pub const INVALID_SPACE_MESSAGE: &str =
    "Invalid space. Ensure that the space exists and you have access to it.";

/// Thread-safe in-memory service-instance repository.
///
/// Writes are applied to a staged copy of the state and swapped in only when
/// every record was accepted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceInstanceRepository {
    state: Arc<RwLock<InMemoryInstanceState>>,
}

#[derive(Debug, Clone, Default)]
struct InMemoryInstanceState {
    instances: HashMap<ServiceInstanceGuid, ServiceInstance>,
    name_index: HashMap<(String, String), ServiceInstanceGuid>,
    labels: Vec<(ServiceInstanceGuid, MetadataEntry)>,
    annotations: Vec<(ServiceInstanceGuid, MetadataEntry)>,
    known_spaces: Option<HashSet<String>>,
}

impl InMemoryServiceInstanceRepository {
    /// Creates an empty repository that accepts any space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that only accepts instances in `spaces`.
    #[must_use]
    pub fn with_spaces<I, S>(spaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let state = InMemoryInstanceState {
            known_spaces: Some(spaces.into_iter().map(Into::into).collect()),
            ..InMemoryInstanceState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Number of stored instances.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceInstanceRepositoryError::Persistence`] when the lock
    /// is poisoned.
    pub fn instance_count(&self) -> ServiceInstanceRepositoryResult<usize> {
        self.read(|state| state.instances.len())
    }

    /// Number of stored label records.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceInstanceRepositoryError::Persistence`] when the lock
    /// is poisoned.
    pub fn label_count(&self) -> ServiceInstanceRepositoryResult<usize> {
        self.read(|state| state.labels.len())
    }

    /// Number of stored annotation records.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceInstanceRepositoryError::Persistence`] when the lock
    /// is poisoned.
    pub fn annotation_count(&self) -> ServiceInstanceRepositoryResult<usize> {
        self.read(|state| state.annotations.len())
    }

    fn read<T>(
        &self,
        f: impl FnOnce(&InMemoryInstanceState) -> T,
    ) -> ServiceInstanceRepositoryResult<T> {
        let state = self.state.read().map_err(|err| {
            ServiceInstanceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(f(&state))
    }
}

fn insert_instance(
    staged: &mut InMemoryInstanceState,
    instance: &ServiceInstance,
) -> ServiceInstanceRepositoryResult<()> {
    if let Some(spaces) = &staged.known_spaces
        && !spaces.contains(instance.space_guid())
    {
        return Err(ServiceInstanceRepositoryError::Validation(
            INVALID_SPACE_MESSAGE.to_owned(),
        ));
    }
    let name_key = (
        instance.space_guid().to_owned(),
        instance.name().to_owned(),
    );
    if staged.name_index.contains_key(&name_key) {
        return Err(ServiceInstanceRepositoryError::NameTaken {
            name: instance.name().to_owned(),
        });
    }
    staged.name_index.insert(name_key, instance.guid());
    staged.instances.insert(instance.guid(), instance.clone());
    Ok(())
}

#[async_trait]
impl ServiceInstanceRepository for InMemoryServiceInstanceRepository {
    async fn create_user_provided(
        &self,
        instance: &ServiceInstance,
    ) -> ServiceInstanceRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ServiceInstanceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let mut staged = state.clone();
        insert_instance(&mut staged, instance)?;
        staged.labels.extend(
            instance
                .labels()
                .iter()
                .map(|label| (instance.guid(), label.clone())),
        );
        staged.annotations.extend(
            instance
                .annotations()
                .iter()
                .map(|annotation| (instance.guid(), annotation.clone())),
        );

        *state = staged;
        Ok(())
    }

    async fn delete_user_provided(
        &self,
        guid: ServiceInstanceGuid,
    ) -> ServiceInstanceRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ServiceInstanceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let mut staged = state.clone();
        if let Some(removed) = staged.instances.remove(&guid) {
            staged.name_index.remove(&(
                removed.space_guid().to_owned(),
                removed.name().to_owned(),
            ));
        }
        staged.labels.retain(|(owner, _)| *owner != guid);
        staged.annotations.retain(|(owner, _)| *owner != guid);

        *state = staged;
        Ok(())
    }

    async fn find_by_guid(
        &self,
        guid: ServiceInstanceGuid,
    ) -> ServiceInstanceRepositoryResult<Option<ServiceInstance>> {
        self.read(|state| state.instances.get(&guid).cloned())
    }
}
