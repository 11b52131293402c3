//! Submission workflow engine
//!
//! Owns the submission lifecycle and the footprint arithmetic: the gate that
//! locks a client while a submission awaits review, the tolerant intake of
//! activity values, the all-or-nothing review commit, and the approval-time
//! re-resolution of factor values. This is the only place these business
//! rules live; everything else is store and CLI glue.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

use crate::core::catalog::{self, CatalogError};
use crate::entities::{
    Entry, FactorKey, ReportingModule, ReviewStatus, Submission, SubmissionStatus, UserProfile,
};
use crate::store::{collections, DocumentStore, Filter, OrderBy, StoreError};

/// Errors that can occur during workflow operations
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("A submission from {since} is pending review; wait for verification before submitting new data")]
    Locked { since: DateTime<Utc> },

    #[error("Client profile has no reporting module assigned")]
    NoModuleAssigned,

    #[error("No review decision supplied for entry {key}")]
    MissingDecision { key: FactorKey },

    #[error("Submission not found: {id}")]
    UnknownSubmission { id: String },

    #[error("Cannot review a submission in status {from}")]
    InvalidTransition { from: SubmissionStatus },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The reviewer's overall action on a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Verify,
    Reject,
}

/// A reviewer's verdict on a single entry
#[derive(Debug, Clone)]
pub struct EntryDecision {
    pub status: ReviewStatus,
    pub comment: Option<String>,
}

impl EntryDecision {
    pub fn correct() -> Self {
        Self {
            status: ReviewStatus::Correct,
            comment: None,
        }
    }

    pub fn wrong(comment: impl Into<String>) -> Self {
        Self {
            status: ReviewStatus::Wrong,
            comment: Some(comment.into()),
        }
    }
}

/// A client's entry permission, derived from their latest submission
#[derive(Debug, Clone)]
pub enum Gate {
    /// May submit. Carries the latest submission (if any) so a rejected
    /// form can be pre-populated with previous values and admin comments.
    Open {
        previous: Option<(String, Submission)>,
    },
    /// Latest submission is pending review; no new submission is accepted
    Locked { since: DateTime<Utc> },
}

impl Gate {
    /// The previous rejected submission, when the gate is open after a
    /// rejection
    pub fn rejected_previous(&self) -> Option<(&str, &Submission)> {
        match self {
            Gate::Open {
                previous: Some((id, sub)),
            } if sub.status == SubmissionStatus::Rejected => Some((id.as_str(), sub)),
            _ => None,
        }
    }
}

/// What `submit` accepted and excluded
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    /// Store id of the new submission
    pub id: String,
    /// Entries written into the submission
    pub accepted: usize,
    /// Module fields excluded for a missing, negative, or non-finite value
    pub excluded: usize,
    /// Supplied keys that do not belong to the assigned module
    pub unknown_keys: Vec<FactorKey>,
}

/// Result of a committed review
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub status: SubmissionStatus,
    pub final_footprint: Option<f64>,
}

/// The total status-transition function over (status, action, all-correct).
///
/// A submission that is already Approved cannot be re-reviewed; anything
/// else moves to Rejected unless the reviewer verifies and every entry is
/// correct.
pub fn transition(
    from: SubmissionStatus,
    action: ReviewAction,
    all_correct: bool,
) -> Result<SubmissionStatus, WorkflowError> {
    match (from, action) {
        (SubmissionStatus::Approved, _) => Err(WorkflowError::InvalidTransition { from }),
        (_, ReviewAction::Reject) => Ok(SubmissionStatus::Rejected),
        (_, ReviewAction::Verify) => Ok(if all_correct {
            SubmissionStatus::Approved
        } else {
            SubmissionStatus::Rejected
        }),
    }
}

/// Footprint arithmetic: Σ activity × current factor value over entries
/// whose key still resolves. Stale keys are skipped, so a factor deleted
/// after submission reduces the total instead of failing the approval.
pub fn footprint(
    entries: &BTreeMap<FactorKey, Entry>,
    current_values: &BTreeMap<FactorKey, f64>,
) -> f64 {
    entries
        .iter()
        .filter_map(|(key, entry)| current_values.get(key).map(|value| entry.activity * value))
        .sum()
}

/// Workflow engine over a document store.
///
/// Stateless per request: every operation fetches what it needs rather than
/// relying on ambient caches.
pub struct WorkflowEngine<'a, S: DocumentStore> {
    store: &'a S,
}

impl<'a, S: DocumentStore> WorkflowEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Determine the client's current entry permission from their most
    /// recent submission (timestamp descending, at most one considered).
    pub fn check_status(&self, client_id: &str) -> Result<Gate, WorkflowError> {
        let docs = self.store.query(
            collections::SUBMISSIONS,
            &[Filter::eq("organizationId", client_id)],
            Some(&OrderBy::desc("timestamp")),
            Some(1),
        )?;

        let Some(doc) = docs.into_iter().next() else {
            return Ok(Gate::Open { previous: None });
        };
        let submission: Submission = doc.parse()?;

        Ok(match submission.status {
            SubmissionStatus::PendingReview => Gate::Locked {
                since: submission.timestamp,
            },
            SubmissionStatus::Approved | SubmissionStatus::Rejected => Gate::Open {
                previous: Some((doc.id, submission)),
            },
        })
    }

    /// Create a Pending Review submission from raw activity values.
    ///
    /// Intake is tolerant: module fields with a missing, negative, or
    /// non-finite value are silently excluded (counted in the receipt), and
    /// keys outside the assigned module are ignored. If the client's latest
    /// submission was Rejected it is deleted after the new one is written;
    /// create-then-delete, so a failure in between leaves both documents
    /// visible in the admin queue rather than losing data.
    pub fn submit(
        &self,
        client_id: &str,
        profile: &UserProfile,
        module: &ReportingModule,
        raw_entries: &BTreeMap<FactorKey, f64>,
    ) -> Result<SubmitReceipt, WorkflowError> {
        let gate = self.check_status(client_id)?;
        if let Gate::Locked { since } = gate {
            return Err(WorkflowError::Locked { since });
        }
        let superseded = gate
            .rejected_previous()
            .map(|(id, _)| id.to_string());

        let mut entries = BTreeMap::new();
        let mut excluded = 0usize;
        for factor_ref in &module.factors {
            match raw_entries.get(&factor_ref.key) {
                Some(&activity) if activity.is_finite() && activity >= 0.0 => {
                    entries.insert(
                        factor_ref.key.clone(),
                        Entry {
                            activity,
                            unit: factor_ref.unit.clone(),
                            name: factor_ref.name.clone(),
                            review_status: ReviewStatus::Correct,
                            admin_comment: None,
                        },
                    );
                }
                _ => excluded += 1,
            }
        }
        let unknown_keys: Vec<FactorKey> = raw_entries
            .keys()
            .filter(|key| !module.contains_key(key))
            .cloned()
            .collect();

        let submission = Submission::pending(
            client_id.to_string(),
            profile.organization_name.clone(),
            module.name.clone(),
            entries,
        );
        let body = serde_json::to_value(&submission).map_err(|e| StoreError::Serialize {
            message: e.to_string(),
        })?;
        let accepted = submission.entries.len();

        let id = self.store.add(collections::SUBMISSIONS, body)?;
        if let Some(old_id) = superseded {
            self.store.delete(collections::SUBMISSIONS, &old_id)?;
        }

        // Advisory flag for the admin dashboard; the queue query is the
        // source of truth, so a failed update is not worth failing the
        // submission over.
        let _ = self.store.update(
            collections::USERS,
            client_id,
            json!({ "hasNewSubmission": true }),
        );

        Ok(SubmitReceipt {
            id,
            accepted,
            excluded,
            unknown_keys,
        })
    }

    /// Fetch one submission for review display
    pub fn get_submission(&self, submission_id: &str) -> Result<Submission, WorkflowError> {
        let doc = self
            .store
            .get(collections::SUBMISSIONS, submission_id)?
            .ok_or_else(|| WorkflowError::UnknownSubmission {
                id: submission_id.to_string(),
            })?;
        Ok(doc.parse()?)
    }

    /// Commit a review. All-or-nothing: every entry must have a decision or
    /// nothing is written.
    ///
    /// Approval recomputes the footprint from the *current* factor catalog,
    /// not the values in force at submission time, so factor corrections
    /// apply retroactively to later approvals.
    pub fn review(
        &self,
        submission_id: &str,
        decisions: &BTreeMap<FactorKey, EntryDecision>,
        action: ReviewAction,
    ) -> Result<ReviewOutcome, WorkflowError> {
        let doc = self
            .store
            .get(collections::SUBMISSIONS, submission_id)?
            .ok_or_else(|| WorkflowError::UnknownSubmission {
                id: submission_id.to_string(),
            })?;
        let mut submission: Submission = doc.parse()?;

        for key in submission.entries.keys() {
            if !decisions.contains_key(key) {
                return Err(WorkflowError::MissingDecision { key: key.clone() });
            }
        }
        let all_correct = submission
            .entries
            .keys()
            .all(|key| decisions[key].status == ReviewStatus::Correct);

        let next = transition(submission.status, action, all_correct)?;
        let outcome = match next {
            SubmissionStatus::Approved => {
                let current_values = catalog::current_factor_values(self.store)?;
                let total = footprint(&submission.entries, &current_values);

                for entry in submission.entries.values_mut() {
                    entry.review_status = ReviewStatus::Correct;
                    entry.admin_comment = None;
                }
                submission.status = SubmissionStatus::Approved;
                submission.final_footprint = Some(total);
                submission.verified_at = Some(Utc::now());

                ReviewOutcome {
                    status: SubmissionStatus::Approved,
                    final_footprint: Some(total),
                }
            }
            SubmissionStatus::Rejected => {
                for (key, entry) in submission.entries.iter_mut() {
                    let decision = &decisions[key];
                    entry.review_status = decision.status;
                    // Each entry carries its own comment; correct entries
                    // never keep a stale one.
                    entry.admin_comment = match decision.status {
                        ReviewStatus::Wrong => decision.comment.clone(),
                        ReviewStatus::Correct => None,
                    };
                }
                submission.status = SubmissionStatus::Rejected;
                submission.final_footprint = None;
                submission.verified_at = None;

                ReviewOutcome {
                    status: SubmissionStatus::Rejected,
                    final_footprint: None,
                }
            }
            SubmissionStatus::PendingReview => unreachable!("transition never yields Pending"),
        };

        let body = serde_json::to_value(&submission).map_err(|e| StoreError::Serialize {
            message: e.to_string(),
        })?;
        self.store
            .set(collections::SUBMISSIONS, submission_id, body)?;

        let _ = self.store.update(
            collections::USERS,
            &submission.organization_id,
            json!({ "hasNewSubmission": false }),
        );

        Ok(outcome)
    }

    /// The administrators' work queue: Pending Review and Rejected
    /// submissions, newest first. Rejected items stay here until the client's
    /// corrected re-submission deletes them.
    pub fn list_pending(&self) -> Result<Vec<(String, Submission)>, WorkflowError> {
        let mut items = Vec::new();
        for status in [SubmissionStatus::PendingReview, SubmissionStatus::Rejected] {
            let docs = self.store.query(
                collections::SUBMISSIONS,
                &[Filter::eq("status", status.as_str())],
                None,
                None,
            )?;
            for doc in docs {
                let submission: Submission = doc.parse()?;
                items.push((doc.id, submission));
            }
        }
        items.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));
        Ok(items)
    }

    /// A client's submission history, newest first
    pub fn history(
        &self,
        client_id: &str,
        limit: usize,
    ) -> Result<Vec<(String, Submission)>, WorkflowError> {
        let docs = self.store.query(
            collections::SUBMISSIONS,
            &[Filter::eq("organizationId", client_id)],
            Some(&OrderBy::desc("timestamp")),
            Some(limit),
        )?;
        let mut items = Vec::with_capacity(docs.len());
        for doc in docs {
            let submission: Submission = doc.parse()?;
            items.push((doc.id, submission));
        }
        Ok(items)
    }
}
