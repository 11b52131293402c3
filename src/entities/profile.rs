//! User profile entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role binding stored on a user profile; immutable once set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Client => write!(f, "client"),
        }
    }
}

/// A user's profile document, keyed by the identity provider's user id.
///
/// Clients carry a reporting module; the admin profile does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub role: Role,

    /// Display name of the organization (or "Administrator")
    pub organization_name: String,

    /// Name of the assigned reporting module; required for clients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting_module: Option<String>,

    /// Set when a submission is awaiting review, cleared when reviewed
    #[serde(default)]
    pub has_new_submission: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn admin(organization_name: String) -> Self {
        Self {
            role: Role::Admin,
            organization_name,
            reporting_module: None,
            has_new_submission: false,
            created_at: Utc::now(),
        }
    }

    pub fn client(organization_name: String, reporting_module: String) -> Self {
        Self {
            role: Role::Client,
            organization_name,
            reporting_module: Some(reporting_module),
            has_new_submission: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_yml::to_string(&Role::Client).unwrap().trim(), "client");
        assert_eq!(serde_yml::from_str::<Role>("admin").unwrap(), Role::Admin);
    }

    #[test]
    fn test_client_profile_roundtrip() {
        let profile = UserProfile::client("Acme Corp".to_string(), "GHG Basic".to_string());
        let yaml = serde_yml::to_string(&profile).unwrap();
        assert!(yaml.contains("organizationName: Acme Corp"));
        assert!(yaml.contains("reportingModule: GHG Basic"));
        assert!(yaml.contains("hasNewSubmission: false"));

        let parsed: UserProfile = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.role, Role::Client);
    }

    #[test]
    fn test_admin_profile_has_no_module() {
        let profile = UserProfile::admin("Administrator".to_string());
        let yaml = serde_yml::to_string(&profile).unwrap();
        assert!(!yaml.contains("reportingModule"));
    }
}
