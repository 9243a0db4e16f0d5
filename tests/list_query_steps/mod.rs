//! Step definitions for list query BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
