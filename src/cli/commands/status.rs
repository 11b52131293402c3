//! `cft status` command - Client entry permission and recent reports

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::format_footprint;
use crate::cli::table::{render, HistoryRow};
use crate::cli::AppContext;
use crate::core::workflow::{Gate, WorkflowEngine};
use crate::entities::{ReviewStatus, SubmissionStatus};

pub fn run() -> Result<()> {
    let ctx = AppContext::load()?;
    let (session, profile) = ctx.require_client()?;

    println!("Organization: {}", profile.organization_name);
    if let Some(module) = &profile.reporting_module {
        println!("Reporting module: {}", module);
    }

    let engine = WorkflowEngine::new(&ctx.store);
    match engine.check_status(&session.user_id).into_diagnostic()? {
        Gate::Locked { since } => {
            println!(
                "{} Submission from {} is pending review; data entry is locked",
                style("●").yellow(),
                since.format("%Y-%m-%d %H:%M")
            );
        }
        Gate::Open { previous: None } => {
            println!("{} No submissions yet; ready for data entry", style("●").green());
        }
        Gate::Open {
            previous: Some((_, latest)),
        } => match latest.status {
            SubmissionStatus::Approved => {
                let total = latest
                    .final_footprint
                    .map(|v| format_footprint(v, &ctx.config.footprint_unit))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{} Latest submission verified: {}",
                    style("●").green(),
                    total
                );
            }
            SubmissionStatus::Rejected => {
                println!(
                    "{} Latest submission was rejected; correct and resubmit",
                    style("●").red()
                );
                for (key, entry) in &latest.entries {
                    if entry.review_status == ReviewStatus::Wrong {
                        println!(
                            "  {}: {}",
                            key,
                            entry.admin_comment.as_deref().unwrap_or("(no comment)")
                        );
                    }
                }
            }
            SubmissionStatus::PendingReview => {}
        },
    }

    let history = engine
        .history(&session.user_id, ctx.config.history_limit)
        .into_diagnostic()?;
    if !history.is_empty() {
        println!();
        let rows: Vec<HistoryRow> = history
            .iter()
            .map(|(_, sub)| HistoryRow::new(sub, &ctx.config.footprint_unit))
            .collect();
        println!("{}", render(rows));
    }
    Ok(())
}
