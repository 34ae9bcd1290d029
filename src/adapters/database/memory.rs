//! In-memory control store
//!
//! Holds the singleton document behind a mutex, mirroring the shared
//! database's per-document atomicity: each trait call locks once, so a call
//! is atomic, but nothing orders one call against the next. Used by tests
//! and dry runs.

use crate::adapters::database::traits::ControlStore;
use crate::domain::{BarqueError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Mutex;

/// Mutex-held singleton document.
#[derive(Debug, Default)]
pub struct MemoryControlStore {
    doc: Mutex<Option<Value>>,
}

impl MemoryControlStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ControlStore for MemoryControlStore {
    async fn fetch(&self) -> Result<Option<Value>> {
        let guard = self
            .doc
            .lock()
            .map_err(|_| BarqueError::Other("memory control store poisoned".to_string()))?;
        Ok(guard.clone())
    }

    async fn replace(&self, doc: Value) -> Result<()> {
        let mut guard = self
            .doc
            .lock()
            .map_err(|_| BarqueError::Other("memory control store poisoned".to_string()))?;
        *guard = Some(doc);
        Ok(())
    }

    async fn set_fields(&self, fields: &[(String, Value)]) -> Result<()> {
        let mut guard = self
            .doc
            .lock()
            .map_err(|_| BarqueError::Other("memory control store poisoned".to_string()))?;
        // Matched-document semantics: nothing to update when unset.
        let Some(doc) = guard.as_mut() else {
            return Ok(());
        };
        for (path, value) in fields {
            let segments: Vec<&str> = path.split('.').collect();
            deep_set(doc, &segments, value.clone());
        }
        Ok(())
    }
}

/// Sets `value` at the dotted path, creating intermediate objects and
/// replacing non-object intermediates on the way down.
fn deep_set(node: &mut Value, path: &[&str], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    let Value::Object(map) = node else {
        return;
    };
    if rest.is_empty() {
        map.insert((*head).to_string(), value);
        return;
    }
    let child = map
        .entry((*head).to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    deep_set(child, rest, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_empty() {
        let store = MemoryControlStore::new();
        assert!(store.fetch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_then_fetch() {
        let store = MemoryControlStore::new();
        store.replace(json!({"pitr": {"enabled": true}})).await.unwrap();
        let doc = store.fetch().await.unwrap().unwrap();
        assert_eq!(doc["pitr"]["enabled"], json!(true));
    }

    #[tokio::test]
    async fn test_set_fields_without_document_is_noop() {
        let store = MemoryControlStore::new();
        store
            .set_fields(&[("pitr.enabled".to_string(), json!(true))])
            .await
            .unwrap();
        assert!(store.fetch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_fields_creates_intermediates() {
        let store = MemoryControlStore::new();
        store.replace(json!({})).await.unwrap();
        store
            .set_fields(&[
                ("storage.s3.region".to_string(), json!("eu-central-1")),
                ("pitr.changed".to_string(), json!(1_700_000_000)),
            ])
            .await
            .unwrap();
        let doc = store.fetch().await.unwrap().unwrap();
        assert_eq!(doc["storage"]["s3"]["region"], json!("eu-central-1"));
        assert_eq!(doc["pitr"]["changed"], json!(1_700_000_000));
    }

    #[tokio::test]
    async fn test_set_fields_replaces_scalar_intermediate() {
        let store = MemoryControlStore::new();
        store.replace(json!({"storage": "oops"})).await.unwrap();
        store
            .set_fields(&[("storage.type".to_string(), json!("s3"))])
            .await
            .unwrap();
        let doc = store.fetch().await.unwrap().unwrap();
        assert_eq!(doc["storage"]["type"], json!("s3"));
    }
}
