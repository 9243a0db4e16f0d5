//! Plinth: request validation and list queries for a platform API.
//!
//! This crate turns untrusted query-string and JSON parameters into typed,
//! validated request messages, and provides the small set of actions that
//! consume them.
//!
//! # Architecture
//!
//! Plinth follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, queues, etc.)
//!
//! # Modules
//!
//! - [`message`]: Parameter normalization, validators and message types
//! - [`field_include`]: `fields[...]` sideloading of related resources
//! - [`service_instance`]: Creating user-provided service instances
//! - [`job`]: Maintenance actions that enqueue background jobs
//! - [`telemetry`]: Tracing subscriber setup

pub mod field_include;
pub mod job;
pub mod message;
pub mod service_instance;
pub mod telemetry;
