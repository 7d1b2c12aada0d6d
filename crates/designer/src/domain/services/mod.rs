//! Domain Services
//!
//! Stateless logic shared by the application layer.

mod generation;
mod lineage;

pub use generation::*;
pub use lineage::*;
