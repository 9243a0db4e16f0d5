//! Step definitions for user-provided instance BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
