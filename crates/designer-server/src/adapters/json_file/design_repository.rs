//! JSON-file implementation of DesignRepository

use std::path::PathBuf;

use async_trait::async_trait;

use designer::{Design, DesignMap, DesignRepository, DomainError};

use super::{read_document, write_document};

/// Design records kept in one JSON object keyed by id
pub struct JsonDesignRepository {
    path: PathBuf,
}

impl JsonDesignRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DesignRepository for JsonDesignRepository {
    async fn load_all(&self) -> DesignMap {
        read_document(&self.path)
            .await
            .into_iter()
            .filter_map(|(id, value)| match serde_json::from_value::<Design>(value) {
                Ok(design) => Some((id, design)),
                Err(e) => {
                    tracing::warn!("Skipping unreadable design {}: {}", id, e);
                    None
                }
            })
            .collect()
    }

    async fn save(&self, design: &Design) -> Result<(), DomainError> {
        // Entries are kept as raw JSON so records this build cannot read survive the rewrite
        let mut doc = read_document(&self.path).await;
        let value = serde_json::to_value(design)
            .map_err(|e| DomainError::Repository(format!("Failed to serialize design: {e}")))?;
        doc.insert(design.id.clone(), value);

        write_document(&self.path, &doc).await.map_err(|e| {
            tracing::error!("Failed to persist design {}: {}", design.id, e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(requirements: &str) -> Design {
        let mut assumptions = serde_json::Map::new();
        assumptions.insert("scale".to_string(), json!("1M/day"));
        assumptions.insert("regions".to_string(), json!(["eu", "us"]));
        Design::generated(
            requirements.to_string(),
            assumptions,
            vec!["low latency".to_string()],
            json!({"services": ["api", "db"], "notes": null}),
        )
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonDesignRepository::new(dir.path().join("data/designs.json"));

        let first = sample("first");
        let second = Design::reconciled(&first, json!({"services": ["api"]})).unwrap();
        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        let designs = repo.load_all().await;
        assert_eq!(designs.len(), 2);
        assert_eq!(designs.get(&first.id), Some(&first));
        assert_eq!(designs.get(&second.id), Some(&second));

        let order: Vec<&String> = designs.keys().collect();
        assert_eq!(order, vec![&first.id, &second.id]);
    }

    #[tokio::test]
    async fn test_missing_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonDesignRepository::new(dir.path().join("designs.json"));
        assert!(repo.load_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("designs.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let repo = JsonDesignRepository::new(&path);
        assert!(repo.load_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_entry_skipped_but_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("designs.json");
        tokio::fs::write(&path, r#"{"legacy": {"id": "legacy", "version": "one"}}"#)
            .await
            .unwrap();

        let repo = JsonDesignRepository::new(&path);
        assert!(repo.load_all().await.is_empty());

        let design = sample("new");
        repo.save(&design).await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(raw.contains("\"legacy\""));
        assert_eq!(repo.load_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_save_overwrites_same_id() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonDesignRepository::new(dir.path().join("designs.json"));

        let mut design = sample("x");
        repo.save(&design).await.unwrap();
        design.design = json!({"replaced": true});
        repo.save(&design).await.unwrap();

        let designs = repo.load_all().await;
        assert_eq!(designs.len(), 1);
        assert_eq!(designs[&design.id].design, json!({"replaced": true}));
    }

    #[tokio::test]
    async fn test_loads_timestamp_without_offset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("designs.json");
        let doc = json!({
            "legacy": {
                "id": "legacy",
                "version": 1,
                "timestamp": "2025-03-01T09:30:00.123456",
                "requirements": "Design a URL shortener",
                "assumptions": {},
                "constraints": [],
                "design": {"services": ["api"]},
                "parent_id": null
            }
        });
        tokio::fs::write(&path, doc.to_string()).await.unwrap();

        let repo = JsonDesignRepository::new(&path);
        let designs = repo.load_all().await;

        let legacy = &designs["legacy"];
        assert_eq!(legacy.timestamp.to_rfc3339(), "2025-03-01T09:30:00.123456+00:00");
        assert_eq!(legacy.design, json!({"services": ["api"]}));

        let child = Design::reconciled(legacy, json!({"services": ["api", "cache"]})).unwrap();
        repo.save(&child).await.unwrap();

        let designs = repo.load_all().await;
        assert_eq!(designs.len(), 2);
        assert_eq!(designs[&child.id].parent_id.as_deref(), Some("legacy"));
    }
}
