//! Design - Versioned System Design Record
//!
//! Pure domain entity without infrastructure dependencies.
//!
//! Records are append-only: reconciling a design never touches the parent,
//! it produces a new record pointing back at it through `parent_id`.

use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// All stored designs keyed by id, in document order
pub type DesignMap = IndexMap<String, Design>;

/// Design - one immutable snapshot of a generated system design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub id: String,
    /// 1 for a fresh design, parent version + 1 after each reconciliation
    pub version: u32,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub requirements: String,
    pub assumptions: serde_json::Map<String, serde_json::Value>,
    pub constraints: Vec<String>,
    /// Structured design content as returned by the generation backend
    pub design: serde_json::Value,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl Design {
    /// Create a first-version design from user input and generated content
    pub fn generated(
        requirements: String,
        assumptions: serde_json::Map<String, serde_json::Value>,
        constraints: Vec<String>,
        design: serde_json::Value,
    ) -> Self {
        Self {
            id: Self::new_id(),
            version: 1,
            timestamp: Utc::now(),
            requirements,
            assumptions,
            constraints,
            design,
            parent_id: None,
        }
    }

    /// Create the next version of `parent` carrying reconciled content.
    ///
    /// Requirements, assumptions and constraints are inherited verbatim.
    /// Fails when the parent already carries the highest representable version.
    pub fn reconciled(parent: &Design, design: serde_json::Value) -> Result<Self, DomainError> {
        let version = parent.version.checked_add(1).ok_or_else(|| {
            DomainError::Validation("Design version limit reached.".to_string())
        })?;

        Ok(Self {
            id: Self::new_id(),
            version,
            timestamp: Utc::now(),
            requirements: parent.requirements.clone(),
            assumptions: parent.assumptions.clone(),
            constraints: parent.constraints.clone(),
            design,
            parent_id: Some(parent.id.clone()),
        })
    }

    /// Whether this record starts a lineage
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    fn new_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Parse an ISO-8601 timestamp; values without an offset are read as UTC
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc()),
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
