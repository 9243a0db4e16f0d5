//! Request-body messages for create endpoints.

mod task;
mod user_provided_service_instance;

pub use task::TaskCreateMessage;
pub use user_provided_service_instance::{
    REDACTED_CREDENTIALS, UserProvidedServiceInstanceCreateMessage,
};
