//! Designer API Data Models
//!
//! - Design: versioned system-design record as served over HTTP
//! - Requests: create and reconcile payloads

mod design;

pub use design::*;
