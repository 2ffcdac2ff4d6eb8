//! In-process content store

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;

use super::{CmsError, ContentStore};
use crate::content::DocumentKind;

/// Documents kept in memory, in insertion order
///
/// Reads and writes can be switched to fail, which is how the fallback and
/// persistence-error paths are exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<Value>>,
    next_id: AtomicU64,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub create_calls: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with documents (ids are kept as given)
    pub fn with_documents(documents: Vec<Value>) -> Self {
        Self {
            documents: Mutex::new(documents),
            ..Self::default()
        }
    }

    /// Snapshot of everything stored
    pub async fn documents(&self) -> Vec<Value> {
        self.documents.lock().await.clone()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn fetch(&self, kind: DocumentKind) -> Result<Value, CmsError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(CmsError::Request("memory store read disabled".to_string()));
        }

        let documents = self.documents.lock().await;
        let mut matching = documents
            .iter()
            .filter(|doc| doc.get("_type").and_then(Value::as_str) == Some(kind.as_str()))
            .cloned();

        Ok(match kind {
            DocumentKind::Profile => matching.next().unwrap_or(Value::Null),
            _ => Value::Array(matching.collect()),
        })
    }

    async fn create(&self, mut document: Value) -> Result<String, CmsError> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(CmsError::Status {
                status: 503,
                body: "memory store write disabled".to_string(),
            });
        }

        let Some(fields) = document.as_object_mut() else {
            return Err(CmsError::Decode("document must be an object".to_string()));
        };
        let id = format!("mem-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        fields.insert("_id".to_string(), Value::String(id.clone()));

        self.documents.lock().await.push(document);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_then_fetch() {
        let store = MemoryStore::new();
        let id = store
            .create(json!({"_type": "skill", "name": "Rust"}))
            .await
            .unwrap();
        assert_eq!(id, "mem-1");

        let skills = store.fetch(DocumentKind::Skill).await.unwrap();
        assert_eq!(skills.as_array().map(Vec::len), Some(1));
        assert_eq!(skills[0]["_id"], "mem-1");

        let projects = store.fetch(DocumentKind::Project).await.unwrap();
        assert_eq!(projects, json!([]));

        let profile = store.fetch(DocumentKind::Profile).await.unwrap();
        assert!(profile.is_null());
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let store = MemoryStore::new();
        store.fail_reads.store(true, Ordering::Relaxed);
        store.fail_writes.store(true, Ordering::Relaxed);

        assert!(store.fetch(DocumentKind::Project).await.is_err());
        assert!(store.create(json!({"_type": "contact"})).await.is_err());
        assert_eq!(store.create_calls.load(Ordering::Relaxed), 1);
        assert!(store.documents().await.is_empty());
    }
}
