//! `PostgreSQL` adapters for service-instance persistence.

pub(crate) mod models;
mod repository;
mod schema;

pub use repository::{PostgresServiceInstanceRepository, ServiceInstancePgPool};
pub(crate) use repository::{
    NAME_PER_SPACE_CONSTRAINT, annotation_rows, label_rows, map_write_error, row_to_instance,
    to_new_row,
};
