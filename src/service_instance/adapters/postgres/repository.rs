//! `PostgreSQL` repository implementation for service-instance storage.

use super::{
    models::{MetadataRow, NewAnnotationRow, NewLabelRow, NewServiceInstanceRow, ServiceInstanceRow},
    schema::{service_instance_annotations, service_instance_labels, service_instances},
};
use crate::service_instance::{
    domain::{
        MetadataEntry, PersistedServiceInstanceData, ServiceInstance, ServiceInstanceGuid,
    },
    ports::{
        ServiceInstanceRepository, ServiceInstanceRepositoryError,
        ServiceInstanceRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// Unique index over `(space_guid, name)` on `service_instances`.
pub(crate) const NAME_PER_SPACE_CONSTRAINT: &str = "idx_service_instances_space_name_unique";

/// `PostgreSQL` connection pool type used by service-instance adapters.
pub type ServiceInstancePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed service-instance repository.
#[derive(Debug, Clone)]
pub struct PostgresServiceInstanceRepository {
    pool: ServiceInstancePgPool,
}

impl PostgresServiceInstanceRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ServiceInstancePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ServiceInstanceRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ServiceInstanceRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(ServiceInstanceRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ServiceInstanceRepositoryError::persistence)?
    }
}

#[async_trait]
impl ServiceInstanceRepository for PostgresServiceInstanceRepository {
    async fn create_user_provided(
        &self,
        instance: &ServiceInstance,
    ) -> ServiceInstanceRepositoryResult<()> {
        let name = instance.name().to_owned();
        let new_row = to_new_row(instance)?;
        let labels = label_rows(instance);
        let annotations = annotation_rows(instance);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::insert_into(service_instances::table)
                        .values(&new_row)
                        .execute(tx)?;
                    diesel::insert_into(service_instance_labels::table)
                        .values(&labels)
                        .execute(tx)?;
                    diesel::insert_into(service_instance_annotations::table)
                        .values(&annotations)
                        .execute(tx)?;
                    Ok(())
                })
                .map_err(|err| map_write_error(err, &name))
        })
        .await
    }

    async fn delete_user_provided(
        &self,
        guid: ServiceInstanceGuid,
    ) -> ServiceInstanceRepositoryResult<()> {
        let id = guid.into_inner();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(
                        service_instance_labels::table
                            .filter(service_instance_labels::resource_guid.eq(id)),
                    )
                    .execute(tx)?;
                    diesel::delete(
                        service_instance_annotations::table
                            .filter(service_instance_annotations::resource_guid.eq(id)),
                    )
                    .execute(tx)?;
                    diesel::delete(service_instances::table.filter(service_instances::guid.eq(id)))
                        .execute(tx)?;
                    Ok(())
                })
                .map_err(ServiceInstanceRepositoryError::persistence)
        })
        .await
    }

    async fn find_by_guid(
        &self,
        guid: ServiceInstanceGuid,
    ) -> ServiceInstanceRepositoryResult<Option<ServiceInstance>> {
        let id = guid.into_inner();
        self.run_blocking(move |connection| {
            let row = service_instances::table
                .filter(service_instances::guid.eq(id))
                .select(ServiceInstanceRow::as_select())
                .first::<ServiceInstanceRow>(connection)
                .optional()
                .map_err(ServiceInstanceRepositoryError::persistence)?;
            let Some(found) = row else {
                return Ok(None);
            };
            let labels = service_instance_labels::table
                .filter(service_instance_labels::resource_guid.eq(id))
                .select((
                    service_instance_labels::key_prefix,
                    service_instance_labels::key_name,
                    service_instance_labels::value,
                ))
                .order(service_instance_labels::key_name.asc())
                .load::<MetadataRow>(connection)
                .map_err(ServiceInstanceRepositoryError::persistence)?;
            let annotations = service_instance_annotations::table
                .filter(service_instance_annotations::resource_guid.eq(id))
                .select((
                    service_instance_annotations::key_prefix,
                    service_instance_annotations::key_name,
                    service_instance_annotations::value,
                ))
                .order(service_instance_annotations::key_name.asc())
                .load::<MetadataRow>(connection)
                .map_err(ServiceInstanceRepositoryError::persistence)?;
            row_to_instance(found, labels, annotations).map(Some)
        })
        .await
    }
}

pub(crate) fn map_write_error(err: DieselError, name: &str) -> ServiceInstanceRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_name_per_space_violation(info.as_ref()) =>
        {
            ServiceInstanceRepositoryError::NameTaken {
                name: name.to_owned(),
            }
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation,
            ref info,
        ) => ServiceInstanceRepositoryError::Validation(info.message().to_owned()),
        _ => ServiceInstanceRepositoryError::persistence(err),
    }
}

fn is_name_per_space_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|constraint| constraint == NAME_PER_SPACE_CONSTRAINT)
}

pub(crate) fn to_new_row(instance: &ServiceInstance) -> ServiceInstanceRepositoryResult<NewServiceInstanceRow> {
    let tags =
        serde_json::to_value(instance.tags()).map_err(ServiceInstanceRepositoryError::persistence)?;

    Ok(NewServiceInstanceRow {
        guid: instance.guid().into_inner(),
        name: instance.name().to_owned(),
        space_guid: instance.space_guid().to_owned(),
        credentials: instance.credentials().clone(),
        syslog_drain_url: instance.syslog_drain_url().map(ToOwned::to_owned),
        route_service_url: instance.route_service_url().map(ToOwned::to_owned),
        tags,
        created_at: instance.created_at(),
        updated_at: instance.updated_at(),
    })
}

pub(crate) fn label_rows(instance: &ServiceInstance) -> Vec<NewLabelRow> {
    instance
        .labels()
        .iter()
        .map(|label| NewLabelRow {
            id: uuid::Uuid::new_v4(),
            resource_guid: instance.guid().into_inner(),
            key_prefix: label.key_prefix().map(ToOwned::to_owned),
            key_name: label.key_name().to_owned(),
            value: label.value().to_owned(),
        })
        .collect()
}

pub(crate) fn annotation_rows(instance: &ServiceInstance) -> Vec<NewAnnotationRow> {
    instance
        .annotations()
        .iter()
        .map(|annotation| NewAnnotationRow {
            id: uuid::Uuid::new_v4(),
            resource_guid: instance.guid().into_inner(),
            key_prefix: annotation.key_prefix().map(ToOwned::to_owned),
            key_name: annotation.key_name().to_owned(),
            value: annotation.value().to_owned(),
        })
        .collect()
}

fn metadata_entries(rows: Vec<MetadataRow>) -> ServiceInstanceRepositoryResult<Vec<MetadataEntry>> {
    rows.into_iter()
        .map(|row| {
            let key = row.key_prefix.map_or_else(
                || row.key_name.clone(),
                |prefix| format!("{prefix}/{}", row.key_name),
            );
            MetadataEntry::parse(&key, row.value)
                .map_err(ServiceInstanceRepositoryError::persistence)
        })
        .collect()
}

pub(crate) fn row_to_instance(
    row: ServiceInstanceRow,
    labels: Vec<MetadataRow>,
    annotations: Vec<MetadataRow>,
) -> ServiceInstanceRepositoryResult<ServiceInstance> {
    let ServiceInstanceRow {
        guid,
        name,
        space_guid,
        credentials,
        syslog_drain_url,
        route_service_url,
        tags: persisted_tags,
        created_at,
        updated_at,
    } = row;

    let tags = match persisted_tags {
        Value::Null => Vec::new(),
        other => serde_json::from_value::<Vec<String>>(other)
            .map_err(ServiceInstanceRepositoryError::persistence)?,
    };

    let data = PersistedServiceInstanceData {
        guid: ServiceInstanceGuid::from_uuid(guid),
        name,
        space_guid,
        credentials,
        syslog_drain_url,
        route_service_url,
        tags,
        labels: metadata_entries(labels)?,
        annotations: metadata_entries(annotations)?,
        created_at,
        updated_at,
    };
    Ok(ServiceInstance::from_persisted(data))
}
