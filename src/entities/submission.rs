//! Submission entity type

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::factor::FactorKey;

/// Submission lifecycle status.
///
/// Wire strings match the stored documents exactly, including the space in
/// "Pending Review".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    #[serde(rename = "Pending Review")]
    PendingReview,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::PendingReview => "Pending Review",
            SubmissionStatus::Approved => "Approved",
            SubmissionStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-entry review verdict, administrator-controlled after submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Correct,
    Wrong,
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStatus::Correct => write!(f, "correct"),
            ReviewStatus::Wrong => write!(f, "wrong"),
        }
    }
}

/// One reported activity value within a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Activity amount in the factor's unit, non-negative
    pub activity: f64,

    /// Unit snapshot from the module projection
    pub unit: String,

    /// Factor name snapshot from the module projection
    pub name: String,

    /// Defaults to correct at submission; flipped by the reviewer
    pub review_status: ReviewStatus,

    /// Reviewer comment; carried only on entries marked wrong
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_comment: Option<String>,
}

/// Invariant violations detected when loading a submission document
#[derive(Debug, Error)]
pub enum SubmissionInvariantError {
    #[error("Approved submission is missing finalFootprint or verifiedAt")]
    ApprovedWithoutFootprint,

    #[error("Submission in status {status} carries approval fields")]
    FootprintWithoutApproval { status: SubmissionStatus },
}

/// One reporting period's activity data from one client.
///
/// Created Pending Review by a client; mutated only by an administrator
/// review. A Rejected submission is deleted once its corrected re-submission
/// has been written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Owning user id
    pub organization_id: String,

    /// Organization display name snapshot
    pub organization_name: String,

    /// Assigned module name at submit time
    pub module: String,

    /// Submission timestamp
    pub timestamp: DateTime<Utc>,

    pub status: SubmissionStatus,

    /// Accepted activity values keyed by factor key
    pub entries: BTreeMap<FactorKey, Entry>,

    /// Computed footprint; present iff status is Approved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_footprint: Option<f64>,

    /// Approval timestamp; present iff status is Approved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

impl Submission {
    /// Build a fresh Pending Review submission
    pub fn pending(
        organization_id: String,
        organization_name: String,
        module: String,
        entries: BTreeMap<FactorKey, Entry>,
    ) -> Self {
        Self {
            organization_id,
            organization_name,
            module,
            timestamp: Utc::now(),
            status: SubmissionStatus::PendingReview,
            entries,
            final_footprint: None,
            verified_at: None,
        }
    }

    /// Approval fields exist if and only if the status is Approved
    pub fn check_invariants(&self) -> Result<(), SubmissionInvariantError> {
        let has_approval = self.final_footprint.is_some() && self.verified_at.is_some();
        match self.status {
            SubmissionStatus::Approved if !has_approval => {
                Err(SubmissionInvariantError::ApprovedWithoutFootprint)
            }
            SubmissionStatus::PendingReview | SubmissionStatus::Rejected
                if self.final_footprint.is_some() || self.verified_at.is_some() =>
            {
                Err(SubmissionInvariantError::FootprintWithoutApproval {
                    status: self.status,
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(activity: f64) -> Entry {
        Entry {
            activity,
            unit: "kWh".to_string(),
            name: "Grid Electricity".to_string(),
            review_status: ReviewStatus::Correct,
            admin_comment: None,
        }
    }

    fn pending() -> Submission {
        let mut entries = BTreeMap::new();
        entries.insert("Grid_Electricity_S2".into(), entry(500.0));
        Submission::pending(
            "uid-1".to_string(),
            "Acme Corp".to_string(),
            "GHG Basic".to_string(),
            entries,
        )
    }

    #[test]
    fn test_status_wire_format() {
        let yaml = serde_yml::to_string(&SubmissionStatus::PendingReview).unwrap();
        assert_eq!(yaml.trim(), "Pending Review");
        assert_eq!(
            serde_yml::from_str::<SubmissionStatus>("Rejected").unwrap(),
            SubmissionStatus::Rejected
        );
    }

    #[test]
    fn test_pending_submission_roundtrip() {
        let sub = pending();
        let yaml = serde_yml::to_string(&sub).unwrap();
        assert!(yaml.contains("status: Pending Review"));
        assert!(yaml.contains("organizationId: uid-1"));
        assert!(!yaml.contains("finalFootprint"));

        let parsed: Submission = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        parsed.check_invariants().unwrap();
    }

    #[test]
    fn test_invariant_approved_requires_footprint() {
        let mut sub = pending();
        sub.status = SubmissionStatus::Approved;
        assert!(matches!(
            sub.check_invariants(),
            Err(SubmissionInvariantError::ApprovedWithoutFootprint)
        ));

        sub.final_footprint = Some(225.0);
        sub.verified_at = Some(Utc::now());
        sub.check_invariants().unwrap();
    }

    #[test]
    fn test_invariant_footprint_requires_approval() {
        let mut sub = pending();
        sub.final_footprint = Some(90.0);
        assert!(matches!(
            sub.check_invariants(),
            Err(SubmissionInvariantError::FootprintWithoutApproval { .. })
        ));
    }

    #[test]
    fn test_entry_comment_omitted_when_none() {
        let yaml = serde_yml::to_string(&entry(10.0)).unwrap();
        assert!(yaml.contains("reviewStatus: correct"));
        assert!(!yaml.contains("adminComment"));
    }
}
