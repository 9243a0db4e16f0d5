//! Unit tests for the message module.
//!
//! Tests are organised by stage: raw parameters and domain values,
//! normalization, validators, then the concrete message types.

mod create_message_tests;
mod list_message_tests;
