//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (document stores, generation backend).
//!
//! Implementations of these traits live in the server crate's adapters.

pub mod repositories;
pub mod services;

// Re-exports
pub use repositories::*;
pub use services::*;
