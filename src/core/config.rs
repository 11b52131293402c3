//! Project configuration

use serde::{Deserialize, Serialize};

use crate::core::project::Project;

/// Settings from `.cft/config.yaml`; every field has a default so a missing
/// or partial file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Label appended to footprint totals in output
    pub footprint_unit: String,

    /// How many historical submissions to show per client
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            footprint_unit: "kg CO2e".to_string(),
            history_limit: 10,
        }
    }
}

impl Config {
    /// Load the project config, falling back to defaults when absent or
    /// unreadable
    pub fn load(project: &Project) -> Self {
        std::fs::read_to_string(project.config_path())
            .ok()
            .and_then(|contents| serde_yml::from_str(&contents).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, project: &Project) -> std::io::Result<()> {
        let contents = serde_yml::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(project.config_path(), contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.footprint_unit, "kg CO2e");
        assert_eq!(config.history_limit, 10);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_yml::from_str("history_limit: 25\n").unwrap();
        assert_eq!(config.history_limit, 25);
        assert_eq!(config.footprint_unit, "kg CO2e");
    }

    #[test]
    fn test_save_load_roundtrip() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        let mut config = Config::default();
        config.footprint_unit = "t CO2e".to_string();
        config.save(&project).unwrap();

        let loaded = Config::load(&project);
        assert_eq!(loaded.footprint_unit, "t CO2e");
    }
}
