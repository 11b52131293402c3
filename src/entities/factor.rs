//! Emission factor entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GHG accounting scope attached to a factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Scope {
    #[serde(rename = "1")]
    #[value(name = "1")]
    One,
    #[serde(rename = "2")]
    #[value(name = "2")]
    Two,
    #[serde(rename = "3")]
    #[value(name = "3")]
    Three,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::One => write!(f, "1"),
            Scope::Two => write!(f, "2"),
            Scope::Three => write!(f, "3"),
        }
    }
}

impl std::str::FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Scope::One),
            "2" => Ok(Scope::Two),
            "3" => Ok(Scope::Three),
            other => Err(format!("Unknown scope: {} (expected 1, 2, or 3)", other)),
        }
    }
}

/// The join key derived from a factor's name and scope.
///
/// This is the only stable reference between factors, modules, and submission
/// entries; store-assigned document ids are never cross-referenced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorKey(String);

impl FactorKey {
    /// Derive the key: each whitespace character in the name becomes an
    /// underscore, then `_S<scope>` is appended.
    /// `"Grid Electricity"` at scope 2 becomes `Grid_Electricity_S2`.
    pub fn derive(name: &str, scope: Scope) -> Self {
        let normalized: String = name
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        FactorKey(format!("{}_S{}", normalized, scope))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FactorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FactorKey {
    fn from(s: &str) -> Self {
        FactorKey(s.to_string())
    }
}

impl From<String> for FactorKey {
    fn from(s: String) -> Self {
        FactorKey(s)
    }
}

/// A quantified conversion ratio from activity data to emissions.
///
/// Created by an administrator, never edited or deleted afterwards; read by
/// module authoring and re-read live at approval time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionFactor {
    /// Factor name as entered by the administrator
    pub name: String,

    /// Emission scope ("1", "2", "3")
    pub scope: Scope,

    /// Emission value per unit of activity (kg CO2e), non-negative
    pub value: f64,

    /// Activity unit, e.g. "kWh" or "litre"
    pub unit: String,

    /// Derived join key, unique across the catalog
    pub key: FactorKey,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl EmissionFactor {
    pub fn new(name: String, scope: Scope, value: f64, unit: String) -> Self {
        let key = FactorKey::derive(&name, scope);
        Self {
            name,
            scope,
            value,
            unit,
            key,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation() {
        assert_eq!(
            FactorKey::derive("Grid Electricity", Scope::Two).as_str(),
            "Grid_Electricity_S2"
        );
        assert_eq!(FactorKey::derive("Diesel", Scope::One).as_str(), "Diesel_S1");
    }

    #[test]
    fn test_key_derivation_preserves_whitespace_positions() {
        // Each whitespace character maps to one underscore, runs included
        assert_eq!(
            FactorKey::derive("Natural  Gas", Scope::One).as_str(),
            "Natural__Gas_S1"
        );
    }

    #[test]
    fn test_scope_wire_format() {
        let yaml = serde_yml::to_string(&Scope::Two).unwrap();
        assert_eq!(yaml.trim(), "'2'");
        assert_eq!(serde_yml::from_str::<Scope>("\"3\"").unwrap(), Scope::Three);
    }

    #[test]
    fn test_factor_roundtrip() {
        let factor = EmissionFactor::new(
            "Grid Electricity".to_string(),
            Scope::Two,
            0.45,
            "kWh".to_string(),
        );
        let yaml = serde_yml::to_string(&factor).unwrap();
        let parsed: EmissionFactor = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.key.as_str(), "Grid_Electricity_S2");
        assert_eq!(parsed.value, 0.45);
    }

    #[test]
    fn test_factor_serializes_camel_case() {
        let factor = EmissionFactor::new("Diesel".to_string(), Scope::One, 2.68, "litre".to_string());
        let yaml = serde_yml::to_string(&factor).unwrap();
        assert!(yaml.contains("createdAt:"));
    }
}
