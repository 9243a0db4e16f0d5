//! Unit tests for user-provided service instances.
