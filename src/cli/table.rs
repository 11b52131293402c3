//! Table rendering for list commands

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::truncate_str;
use crate::entities::{EmissionFactor, ReportingModule, Submission, UserProfile};

pub fn render<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
pub struct FactorRow {
    #[tabled(rename = "KEY")]
    pub key: String,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "SCOPE")]
    pub scope: String,
    #[tabled(rename = "VALUE")]
    pub value: String,
    #[tabled(rename = "UNIT")]
    pub unit: String,
}

impl From<&EmissionFactor> for FactorRow {
    fn from(factor: &EmissionFactor) -> Self {
        Self {
            key: factor.key.to_string(),
            name: truncate_str(&factor.name, 30),
            scope: factor.scope.to_string(),
            value: format!("{}", factor.value),
            unit: factor.unit.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct ModuleRow {
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "FACTORS")]
    pub factors: String,
    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<&ReportingModule> for ModuleRow {
    fn from(module: &ReportingModule) -> Self {
        Self {
            name: truncate_str(&module.name, 30),
            factors: module.factors.len().to_string(),
            created: module.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct ClientRow {
    #[tabled(rename = "ORGANIZATION")]
    pub organization: String,
    #[tabled(rename = "MODULE")]
    pub module: String,
    #[tabled(rename = "NEW SUBMISSION")]
    pub has_new: String,
}

impl From<&UserProfile> for ClientRow {
    fn from(profile: &UserProfile) -> Self {
        Self {
            organization: truncate_str(&profile.organization_name, 30),
            module: profile.reporting_module.clone().unwrap_or_default(),
            has_new: if profile.has_new_submission { "yes" } else { "no" }.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct QueueRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "ORGANIZATION")]
    pub organization: String,
    #[tabled(rename = "MODULE")]
    pub module: String,
    #[tabled(rename = "SUBMITTED")]
    pub submitted: String,
    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl QueueRow {
    pub fn new(id: &str, submission: &Submission) -> Self {
        Self {
            id: id.to_string(),
            organization: truncate_str(&submission.organization_name, 30),
            module: truncate_str(&submission.module, 20),
            submitted: submission.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            status: submission.status.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct HistoryRow {
    #[tabled(rename = "DATE")]
    pub date: String,
    #[tabled(rename = "STATUS")]
    pub status: String,
    #[tabled(rename = "TOTAL")]
    pub total: String,
}

impl HistoryRow {
    pub fn new(submission: &Submission, footprint_unit: &str) -> Self {
        Self {
            date: submission.timestamp.format("%Y-%m-%d").to_string(),
            status: submission.status.to_string(),
            total: submission
                .final_footprint
                .map(|v| format!("{:.2} {}", v, footprint_unit))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}
