//! Parameter validation.
//!
//! Individual validators live in [`rules`] and [`metadata`]; [`service`]
//! assembles them into the pipeline every message runs.

pub mod metadata;
pub mod rules;
pub mod service;

pub use service::ValidatorSet;
