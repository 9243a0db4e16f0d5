//! Errors raised while building service-instance entities.

use thiserror::Error;

/// Entity-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceInstanceDomainError {
    /// The instance name was missing or blank.
    #[error("name can't be blank")]
    BlankName,

    /// The owning space was not supplied.
    #[error("space can't be blank")]
    MissingSpace,

    /// A metadata key had no name segment.
    #[error("metadata key '{0}' has an empty name")]
    EmptyMetadataKey(String),
}
