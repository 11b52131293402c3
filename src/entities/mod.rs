//! Entity type definitions

pub mod factor;
pub mod module;
pub mod profile;
pub mod submission;

pub use factor::{EmissionFactor, FactorKey, Scope};
pub use module::{FactorRef, ReportingModule};
pub use profile::{Role, UserProfile};
pub use submission::{Entry, ReviewStatus, Submission, SubmissionStatus};
