//! Port trait definitions for the message subsystem.
//!
//! Ports define the interfaces the validation pipeline is assembled from.

pub mod validator;

pub use validator::{MessageConfig, ParamValidator, ValidationResult};
