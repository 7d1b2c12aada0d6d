//! Repository Ports
//!
//! Abstract interfaces for document persistence.

mod design_repository;
mod prompt_repository;

pub use design_repository::*;
pub use prompt_repository::*;
