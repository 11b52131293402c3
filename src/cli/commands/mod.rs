//! CLI command implementations

pub mod client;
pub mod completions;
pub mod factor;
pub mod init;
pub mod login;
pub mod module;
pub mod queue;
pub mod report;
pub mod review;
pub mod status;
pub mod submit;
