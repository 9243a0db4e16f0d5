//! Application services for service-instance actions.

mod create_user_provided;

pub use create_user_provided::{ServiceInstanceCreateError, ServiceInstanceCreateUserProvided};
