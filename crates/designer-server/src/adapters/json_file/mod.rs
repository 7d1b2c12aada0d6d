//! JSON Document Store Implementations
//!
//! Each store is a single JSON object on disk, read and written whole.
//! A missing, unreadable or malformed document reads as empty; that is the
//! documented default of both stores, not an error path.

mod design_repository;
mod prompt_repository;

pub use design_repository::JsonDesignRepository;
pub use prompt_repository::JsonPromptRepository;

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use designer::DomainError;

/// Top-level entries of a document, in file order
type Document = IndexMap<String, Value>;

/// Read `path` as a JSON object, empty when absent or corrupt
async fn read_document(path: &Path) -> Document {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Document::new(),
        Err(e) => {
            tracing::warn!("Could not read {}: {} - treating as empty", path.display(), e);
            return Document::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!("Malformed JSON in {}: {} - treating as empty", path.display(), e);
            Document::new()
        }
    }
}

/// Write `doc` to `path` pretty-printed, creating parent directories
async fn write_document(path: &Path, doc: &Document) -> Result<(), DomainError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            DomainError::Repository(format!("Failed to create {}: {e}", dir.display()))
        })?;
    }

    let body = serde_json::to_string_pretty(doc)
        .map_err(|e| DomainError::Repository(format!("Failed to serialize document: {e}")))?;

    tokio::fs::write(path, body).await.map_err(|e| {
        DomainError::Repository(format!("Failed to write {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let doc = read_document(&dir.path().join("nope.json")).await;
        assert!(doc.is_empty());
    }

    #[tokio::test]
    async fn test_non_object_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        tokio::fs::write(&path, "[1, 2, 3]").await.unwrap();
        assert!(read_document(&path).await.is_empty());
    }

    #[tokio::test]
    async fn test_write_creates_directories_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("doc.json");

        let mut doc = Document::new();
        doc.insert("zeta".to_string(), json!(1));
        doc.insert("alpha".to_string(), json!(2));
        write_document(&path, &doc).await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(raw.find("zeta").unwrap() < raw.find("alpha").unwrap());
        assert!(raw.contains("\n  \"zeta\": 1"));

        let read_back = read_document(&path).await;
        let keys: Vec<&str> = read_back.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
