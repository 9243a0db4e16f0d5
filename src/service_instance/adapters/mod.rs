//! Adapter implementations for service-instance ports.

pub mod memory;
pub mod postgres;
