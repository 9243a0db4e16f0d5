//! User-provided service instances.
//!
//! Turns a valid [`UserProvidedServiceInstanceCreateMessage`] into a stored
//! instance with its labels and annotations, then records one audit event.
//! The module follows the same hexagonal split as the rest of the crate:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The create action in [`services`]
//!
//! [`UserProvidedServiceInstanceCreateMessage`]: crate::message::create::UserProvidedServiceInstanceCreateMessage

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
