//! In-memory store backend
//!
//! Backs the engine's unit tests and any caller that doesn't need
//! persistence. Collections are plain maps behind a mutex; ids are ULIDs
//! like the file backend's.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use serde_json::Value;
use ulid::Ulid;

use super::{select, Document, DocumentStore, Filter, OrderBy, StoreError};

/// A transient, process-local document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_collections<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, BTreeMap<String, Value>>) -> T,
    ) -> T {
        let mut guard = self
            .collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.with_collections(|c| {
            c.get(collection)
                .and_then(|docs| docs.get(id))
                .map(|body| Document {
                    id: id.to_string(),
                    body: body.clone(),
                })
        }))
    }

    fn query(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
        limit: Option<usize>,
    ) -> Result<Vec<Document>, StoreError> {
        let docs = self.with_collections(|c| {
            c.get(collection)
                .map(|docs| {
                    docs.iter()
                        .map(|(id, body)| Document {
                            id: id.clone(),
                            body: body.clone(),
                        })
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        });
        Ok(select(docs, filters, order, limit))
    }

    fn add(&self, collection: &str, body: Value) -> Result<String, StoreError> {
        let id = Ulid::new().to_string();
        self.set(collection, &id, body)?;
        Ok(id)
    }

    fn set(&self, collection: &str, id: &str, body: Value) -> Result<(), StoreError> {
        self.with_collections(|c| {
            c.entry(collection.to_string())
                .or_default()
                .insert(id.to_string(), body);
        });
        Ok(())
    }

    fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError> {
        self.with_collections(|c| {
            let body = c
                .get_mut(collection)
                .and_then(|docs| docs.get_mut(id))
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                })?;
            merge_shallow(body, patch);
            Ok(())
        })
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.with_collections(|c| {
            if let Some(docs) = c.get_mut(collection) {
                docs.remove(id);
            }
        });
        Ok(())
    }
}

/// Merge top-level fields of `patch` into `body`
pub(crate) fn merge_shallow(body: &mut Value, patch: Value) {
    if let (Value::Object(target), Value::Object(fields)) = (body, patch) {
        for (k, v) in fields {
            target.insert(k, v);
        }
    }
}
