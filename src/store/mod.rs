//! Document store abstraction
//!
//! The workflow engine talks to a collection/document store through the
//! [`DocumentStore`] trait: equality filters, single-field ordering, and
//! shallow partial updates. Two backends are provided: [`MemoryStore`] for
//! tests and [`FsStore`], which keeps one YAML file per document under the
//! project directory.

pub mod fs;
pub mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Logical collection names
pub mod collections {
    /// Emission factor catalog
    pub const EMISSION_FACTORS: &str = "emission_factors";
    /// Reporting modules, keyed by module name
    pub const MODULES: &str = "modules";
    /// User profiles, keyed by user id
    pub const USERS: &str = "users";
    /// Client submissions
    pub const SUBMISSIONS: &str = "submissions";
    /// Identity provider credential records
    pub const AUTH_USERS: &str = "auth_users";
}

/// Errors from store backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Failed to serialize document: {message}")]
    Serialize { message: String },

    #[error("Corrupt document at {path}: {message}")]
    Corrupt { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored document: the store-assigned id plus the JSON body
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

impl Document {
    /// Deserialize the body into a typed entity
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(self.body.clone()).map_err(|e| StoreError::Corrupt {
            path: self.id.clone(),
            message: e.to_string(),
        })
    }
}

/// Equality filter on a top-level document field
#[derive(Debug, Clone)]
pub enum Filter {
    Eq(String, Value),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    /// Whether a document body satisfies this filter
    pub fn matches(&self, body: &Value) -> bool {
        match self {
            Filter::Eq(field, expected) => body.get(field) == Some(expected),
        }
    }
}

/// Sort direction for ordered reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Single-field ordering for query results
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Desc,
        }
    }
}

/// The store contract required by the workflow engine.
///
/// `update` performs a shallow merge of the given fields into an existing
/// document. `delete` is idempotent: removing an absent document succeeds.
pub trait DocumentStore {
    /// Fetch a single document by id
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Query a collection with equality filters, optional ordering, and limit
    fn query(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
        limit: Option<usize>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Add a document with a store-assigned id
    fn add(&self, collection: &str, body: Value) -> Result<String, StoreError>;

    /// Write a document under a caller-chosen id, replacing any existing body
    fn set(&self, collection: &str, id: &str, body: Value) -> Result<(), StoreError>;

    /// Shallow-merge fields into an existing document
    fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError>;

    /// Remove a document; absent ids are not an error
    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Ordering over JSON values for query sorting: numbers numerically, strings
/// lexicographically (RFC 3339 timestamps therefore sort chronologically),
/// anything else compares equal. Missing fields sort first.
pub(crate) fn compare_values(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Apply filters, ordering, and limit to a raw document set.
pub(crate) fn select(
    mut docs: Vec<Document>,
    filters: &[Filter],
    order: Option<&OrderBy>,
    limit: Option<usize>,
) -> Vec<Document> {
    docs.retain(|d| filters.iter().all(|f| f.matches(&d.body)));

    if let Some(order) = order {
        docs.sort_by(|a, b| {
            let ord = compare_values(a.body.get(&order.field), b.body.get(&order.field));
            match order.direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        });
    }

    if let Some(limit) = limit {
        docs.truncate(limit);
    }

    docs
}
