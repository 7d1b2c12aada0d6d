//! Lineage - walking parent pointers between design versions
//!
//! `parent_id` is a lookup-only relation: it is followed through the loaded
//! map, never used to own or free anything.

use std::collections::HashSet;

use crate::domain::{Design, DesignMap};

/// The design `id` followed by each ancestor up to its root.
///
/// Returns `None` when `id` is not stored. A dangling parent pointer ends
/// the chain; a cycle in a corrupt document is cut at the first repeat.
pub fn lineage(designs: &DesignMap, id: &str) -> Option<Vec<Design>> {
    let mut current = designs.get(id)?;
    let mut seen = HashSet::new();
    let mut chain = Vec::new();

    loop {
        if !seen.insert(current.id.as_str()) {
            tracing::warn!("Cycle in design lineage at {}", current.id);
            break;
        }
        chain.push(current.clone());

        match current.parent_id.as_deref().and_then(|p| designs.get(p)) {
            Some(parent) => current = parent,
            None => break,
        }
    }

    Some(chain)
}
