//! Core module - business rules and project plumbing

pub mod accounts;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod project;
pub mod workflow;

pub use accounts::AccountsError;
pub use auth::{AuthError, IdentityProvider, LocalIdentity, Session};
pub use catalog::CatalogError;
pub use config::Config;
pub use project::{Project, ProjectError};
pub use workflow::{
    EntryDecision, Gate, ReviewAction, ReviewOutcome, SubmitReceipt, WorkflowEngine, WorkflowError,
};
