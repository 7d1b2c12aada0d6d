//! Design Repository Port
//!
//! Key-value access to stored design records.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Design, DesignMap};

/// Repository interface for Design records.
///
/// There are no transactions or locks: `save` re-reads the whole mapping and
/// writes it back, so concurrent writers may lose updates (last writer wins).
#[async_trait]
pub trait DesignRepository: Send + Sync {
    /// Load every stored design.
    ///
    /// A missing, unreadable or malformed document yields an empty map.
    async fn load_all(&self) -> DesignMap;

    /// Insert or overwrite the entry for `design.id`
    async fn save(&self, design: &Design) -> Result<(), DomainError>;
}
