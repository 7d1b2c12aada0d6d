//! Domain Entities
//!
//! - Design: one immutable, versioned snapshot of a system design
//! - PromptSet: named templates steering the generation backend

mod design;
mod prompt;

pub use design::*;
pub use prompt::*;
