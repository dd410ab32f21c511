//! Core types and service wiring for the curbside waste pickup scheduler.

/// Domain models and identifiers shared by all jurisdictions.
pub mod model;
/// Registry and helpers for plugging jurisdiction providers into the service.
pub mod plugin;
/// Traits describing the jurisdiction provider interfaces.
pub mod ports;
/// High-level service facade used by clients.
pub mod service;

pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use service::*;
