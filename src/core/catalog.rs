//! Factor catalog and module authoring
//!
//! Administrators grow the emission-factor catalog and bundle factors into
//! named reporting modules. Factors are append-only; modules are immutable
//! snapshots of `{key, name, unit}` projections. The live factor values are
//! re-read at approval time, never from the module snapshot.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::entities::{EmissionFactor, FactorKey, FactorRef, ReportingModule, Scope};
use crate::store::{collections, DocumentStore, Filter, OrderBy, StoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("A factor with key {key} already exists")]
    DuplicateKey { key: FactorKey },

    #[error("Factor value must be a non-negative number, got {value}")]
    InvalidValue { value: f64 },

    #[error("Unknown factor key: {key}")]
    UnknownFactor { key: FactorKey },

    #[error("A module named \"{name}\" already exists")]
    DuplicateModule { name: String },

    #[error("Module \"{name}\" not found")]
    ModuleNotFound { name: String },

    #[error("A module needs at least one factor")]
    EmptyModule,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Add a factor to the catalog.
///
/// The derived key must be unique: a second factor with a colliding
/// name+scope is rejected rather than silently shadowing the first.
pub fn add_factor<S: DocumentStore>(
    store: &S,
    name: &str,
    scope: Scope,
    value: f64,
    unit: &str,
) -> Result<(String, EmissionFactor), CatalogError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CatalogError::InvalidValue { value });
    }

    let factor = EmissionFactor::new(name.to_string(), scope, value, unit.to_string());
    let existing = store.query(
        collections::EMISSION_FACTORS,
        &[Filter::eq("key", factor.key.as_str())],
        None,
        Some(1),
    )?;
    if !existing.is_empty() {
        return Err(CatalogError::DuplicateKey { key: factor.key });
    }

    let body = serde_json::to_value(&factor).map_err(|e| StoreError::Serialize {
        message: e.to_string(),
    })?;
    let id = store.add(collections::EMISSION_FACTORS, body)?;
    Ok((id, factor))
}

/// All factors, ordered by name ascending
pub fn list_factors<S: DocumentStore>(
    store: &S,
) -> Result<Vec<(String, EmissionFactor)>, CatalogError> {
    let docs = store.query(
        collections::EMISSION_FACTORS,
        &[],
        Some(&OrderBy::asc("name")),
        None,
    )?;
    let mut factors = Vec::with_capacity(docs.len());
    for doc in docs {
        let factor: EmissionFactor = doc.parse()?;
        factors.push((doc.id, factor));
    }
    Ok(factors)
}

/// Look up a single factor by its derived key
pub fn get_factor<S: DocumentStore>(
    store: &S,
    key: &FactorKey,
) -> Result<Option<EmissionFactor>, CatalogError> {
    let docs = store.query(
        collections::EMISSION_FACTORS,
        &[Filter::eq("key", key.as_str())],
        None,
        Some(1),
    )?;
    match docs.into_iter().next() {
        Some(doc) => Ok(Some(doc.parse()?)),
        None => Ok(None),
    }
}

/// Snapshot of the current factor values keyed by factor key.
///
/// This is the authoritative input to footprint calculation at approval
/// time.
pub fn current_factor_values<S: DocumentStore>(
    store: &S,
) -> Result<BTreeMap<FactorKey, f64>, CatalogError> {
    let mut values = BTreeMap::new();
    for (_, factor) in list_factors(store)? {
        values.insert(factor.key, factor.value);
    }
    Ok(values)
}

/// Create a module from a set of existing factor keys.
///
/// Every key must resolve at creation time; the stored projection is a
/// snapshot and is not updated when factors change.
pub fn add_module<S: DocumentStore>(
    store: &S,
    name: &str,
    keys: &[FactorKey],
) -> Result<ReportingModule, CatalogError> {
    if keys.is_empty() {
        return Err(CatalogError::EmptyModule);
    }
    if store.get(collections::MODULES, name)?.is_some() {
        return Err(CatalogError::DuplicateModule {
            name: name.to_string(),
        });
    }

    let mut refs = Vec::with_capacity(keys.len());
    for key in keys {
        let factor = get_factor(store, key)?.ok_or_else(|| CatalogError::UnknownFactor {
            key: key.clone(),
        })?;
        refs.push(FactorRef {
            key: factor.key,
            name: factor.name,
            unit: factor.unit,
        });
    }

    let module = ReportingModule::new(name.to_string(), refs);
    let body = serde_json::to_value(&module).map_err(|e| StoreError::Serialize {
        message: e.to_string(),
    })?;
    store.set(collections::MODULES, name, body)?;
    Ok(module)
}

/// Fetch a module by name; absence is fatal to the caller's operation
pub fn get_module<S: DocumentStore>(
    store: &S,
    name: &str,
) -> Result<ReportingModule, CatalogError> {
    let doc = store
        .get(collections::MODULES, name)?
        .ok_or_else(|| CatalogError::ModuleNotFound {
            name: name.to_string(),
        })?;
    Ok(doc.parse()?)
}

/// All modules, ordered by name ascending
pub fn list_modules<S: DocumentStore>(store: &S) -> Result<Vec<ReportingModule>, CatalogError> {
    let docs = store.query(collections::MODULES, &[], Some(&OrderBy::asc("name")), None)?;
    let mut modules = Vec::with_capacity(docs.len());
    for doc in docs {
        modules.push(doc.parse()?);
    }
    Ok(modules)
}

/// Remove a factor from the catalog by key.
///
/// Submissions referencing the key remain reviewable: approval skips keys
/// that no longer resolve.
pub fn remove_factor<S: DocumentStore>(store: &S, key: &FactorKey) -> Result<(), CatalogError> {
    let docs = store.query(
        collections::EMISSION_FACTORS,
        &[Filter::eq("key", key.as_str())],
        None,
        Some(1),
    )?;
    let doc = docs
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::UnknownFactor { key: key.clone() })?;
    store.delete(collections::EMISSION_FACTORS, &doc.id)?;
    Ok(())
}
