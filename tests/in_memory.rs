//! In-memory adapter integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `service_instance_flow_tests`: Creating user-provided instances end to end
//! - `cache_cleanup_tests`: Enqueueing buildpack cache cleanup jobs

mod in_memory {
    pub mod helpers;

    mod cache_cleanup_tests;
    mod service_instance_flow_tests;
}
