//! Reporting module entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::factor::FactorKey;

/// Snapshot projection of a factor chosen into a module.
///
/// Name and unit are captured for form rendering; only `key` is resolved
/// against the live catalog later. Factor value corrections therefore apply
/// at approval time without touching stored modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorRef {
    pub key: FactorKey,
    pub name: String,
    pub unit: String,
}

/// A named bundle of emission factors assigned to clients.
///
/// Keyed by name in the store; immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingModule {
    /// Unique module name, also the document id
    pub name: String,

    /// Factors a client on this module must report against
    pub factors: Vec<FactorRef>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ReportingModule {
    pub fn new(name: String, factors: Vec<FactorRef>) -> Self {
        Self {
            name,
            factors,
            created_at: Utc::now(),
        }
    }

    /// Whether a key belongs to this module's factor set
    pub fn contains_key(&self, key: &FactorKey) -> bool {
        self.factors.iter().any(|f| &f.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::factor::Scope;

    fn sample() -> ReportingModule {
        ReportingModule::new(
            "GHG Basic".to_string(),
            vec![FactorRef {
                key: FactorKey::derive("Grid Electricity", Scope::Two),
                name: "Grid Electricity".to_string(),
                unit: "kWh".to_string(),
            }],
        )
    }

    #[test]
    fn test_module_roundtrip() {
        let module = sample();
        let yaml = serde_yml::to_string(&module).unwrap();
        let parsed: ReportingModule = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.name, "GHG Basic");
        assert_eq!(parsed.factors.len(), 1);
    }

    #[test]
    fn test_contains_key() {
        let module = sample();
        assert!(module.contains_key(&"Grid_Electricity_S2".into()));
        assert!(!module.contains_key(&"Diesel_S1".into()));
    }
}
