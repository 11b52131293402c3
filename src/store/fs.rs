//! File-backed store backend
//!
//! One YAML file per document at `<root>/<collection>/<id>.yaml`. Ids are
//! ULIDs when store-assigned; callers that key documents by name (modules,
//! user ids) pass the id through `set`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use ulid::Ulid;
use walkdir::WalkDir;

use super::memory::merge_shallow;
use super::{select, Document, DocumentStore, Filter, OrderBy, StoreError};

/// Document store persisted as plain YAML files
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn doc_path(&self, collection: &str, id: &str) -> PathBuf {
        self.root.join(collection).join(format!("{}.yaml", id))
    }

    fn read_doc(&self, path: &Path) -> Result<Value, StoreError> {
        let contents = fs::read_to_string(path)?;
        serde_yml::from_str(&contents).map_err(|e| StoreError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn write_doc(&self, path: &Path, body: &Value) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_yml::to_string(body).map_err(|e| StoreError::Serialize {
            message: e.to_string(),
        })?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl DocumentStore for FsStore {
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let path = self.doc_path(collection, id);
        if !path.exists() {
            return Ok(None);
        }
        let body = self.read_doc(&path)?;
        Ok(Some(Document {
            id: id.to_string(),
            body,
        }))
    }

    fn query(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
        limit: Option<usize>,
    ) -> Result<Vec<Document>, StoreError> {
        let dir = self.root.join(collection);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();
        for entry in WalkDir::new(&dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "yaml"))
        {
            let id = entry
                .path()
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let body = self.read_doc(entry.path())?;
            docs.push(Document { id, body });
        }

        Ok(select(docs, filters, order, limit))
    }

    fn add(&self, collection: &str, body: Value) -> Result<String, StoreError> {
        let id = Ulid::new().to_string();
        self.set(collection, &id, body)?;
        Ok(id)
    }

    fn set(&self, collection: &str, id: &str, body: Value) -> Result<(), StoreError> {
        self.write_doc(&self.doc_path(collection, id), &body)
    }

    fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError> {
        let path = self.doc_path(collection, id);
        if !path.exists() {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        let mut body = self.read_doc(&path)?;
        merge_shallow(&mut body, patch);
        self.write_doc(&path, &body)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let path = self.doc_path(collection, id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_set_get_roundtrip() {
        let tmp = tempdir().unwrap();
        let store = FsStore::new(tmp.path());
        store
            .set("modules", "GHG Basic", json!({"name": "GHG Basic"}))
            .unwrap();
        let doc = store.get("modules", "GHG Basic").unwrap().unwrap();
        assert_eq!(doc.body["name"], "GHG Basic");
    }

    #[test]
    fn test_query_filters_and_orders() {
        let tmp = tempdir().unwrap();
        let store = FsStore::new(tmp.path());
        store
            .set("subs", "a", json!({"status": "Rejected", "timestamp": "2024-01-01T00:00:00Z"}))
            .unwrap();
        store
            .set("subs", "b", json!({"status": "Rejected", "timestamp": "2024-02-01T00:00:00Z"}))
            .unwrap();
        store
            .set("subs", "c", json!({"status": "Approved", "timestamp": "2024-03-01T00:00:00Z"}))
            .unwrap();

        let out = store
            .query(
                "subs",
                &[Filter::eq("status", "Rejected")],
                Some(&OrderBy::desc("timestamp")),
                None,
            )
            .unwrap();
        let ids: Vec<&str> = out.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_query_missing_collection_is_empty() {
        let tmp = tempdir().unwrap();
        let store = FsStore::new(tmp.path());
        assert!(store.query("nothing", &[], None, None).unwrap().is_empty());
    }

    #[test]
    fn test_add_assigns_ulid() {
        let tmp = tempdir().unwrap();
        let store = FsStore::new(tmp.path());
        let id = store.add("subs", json!({})).unwrap();
        assert_eq!(id.len(), 26);
        assert!(store.get("subs", &id).unwrap().is_some());
    }
}
