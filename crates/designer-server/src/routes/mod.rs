//! Designer API Routes
//!
//! - /generate_design - first version from requirements
//! - /list_designs - every stored design, most recent first
//! - /update_design - reconcile user edits into a new version
//! - /design/:id - single design lookup
//! - /design/:id/lineage - a design and its ancestors

pub mod design;
pub mod swagger;
