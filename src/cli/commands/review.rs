//! `cft review` command - Verify or reject a submission

use std::collections::BTreeMap;

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_footprint, parse_decisions};
use crate::cli::AppContext;
use crate::core::workflow::{EntryDecision, ReviewAction, WorkflowEngine};
use crate::entities::{FactorKey, ReviewStatus, Submission, SubmissionStatus};

#[derive(clap::Args, Debug)]
pub struct ReviewArgs {
    /// Submission id (from `cft queue`)
    pub id: String,

    /// Entry verdict as KEY=correct or KEY=wrong:comment (repeatable);
    /// prompts when omitted
    #[arg(long = "mark")]
    pub mark: Vec<String>,

    /// Verify the submission (approves when every entry is correct)
    #[arg(long, conflicts_with = "reject")]
    pub verify: bool,

    /// Reject the submission outright
    #[arg(long)]
    pub reject: bool,

    /// Fallback comment for entries marked wrong without their own
    #[arg(long)]
    pub comment_all: Option<String>,
}

pub fn run(args: ReviewArgs) -> Result<()> {
    let ctx = AppContext::load()?;
    ctx.require_admin()?;

    let engine = WorkflowEngine::new(&ctx.store);
    let submission = engine.get_submission(&args.id).into_diagnostic()?;

    print_submission(&submission);

    let (decisions, action) = if args.mark.is_empty() && !args.verify && !args.reject {
        prompt_review(&submission)?
    } else {
        let mut decisions = parse_decisions(&args.mark)?;
        if let Some(comment) = &args.comment_all {
            for decision in decisions.values_mut() {
                if decision.status == ReviewStatus::Wrong && decision.comment.is_none() {
                    decision.comment = Some(comment.clone());
                }
            }
        }
        let action = if args.reject {
            ReviewAction::Reject
        } else {
            ReviewAction::Verify
        };
        (decisions, action)
    };

    let outcome = engine
        .review(&args.id, &decisions, action)
        .into_diagnostic()?;

    match outcome.status {
        SubmissionStatus::Approved => {
            let total = outcome.final_footprint.unwrap_or(0.0);
            println!(
                "{} Submission verified. Final footprint: {}",
                style("✓").green(),
                format_footprint(total, &ctx.config.footprint_unit)
            );
        }
        _ => {
            println!(
                "{} Submission rejected; the client may correct and resubmit",
                style("✗").red()
            );
        }
    }
    Ok(())
}

fn print_submission(submission: &Submission) {
    println!(
        "{} / {} ({}, submitted {})",
        style(&submission.organization_name).bold(),
        submission.module,
        submission.status,
        submission.timestamp.format("%Y-%m-%d %H:%M")
    );
    for (key, entry) in &submission.entries {
        println!("  {} = {} {} ({})", key, entry.activity, entry.unit, entry.name);
    }
}

/// Walk the entries one by one, then ask for the overall action
fn prompt_review(
    submission: &Submission,
) -> Result<(BTreeMap<FactorKey, EntryDecision>, ReviewAction)> {
    let theme = ColorfulTheme::default();
    let mut decisions = BTreeMap::new();

    for (key, entry) in &submission.entries {
        let choice = Select::with_theme(&theme)
            .with_prompt(format!("{} = {} {}", key, entry.activity, entry.unit))
            .items(&["correct", "wrong"])
            .default(0)
            .interact()
            .into_diagnostic()?;

        let decision = if choice == 0 {
            EntryDecision::correct()
        } else {
            let comment: String = Input::with_theme(&theme)
                .with_prompt("Comment for the client")
                .interact_text()
                .into_diagnostic()?;
            EntryDecision::wrong(comment)
        };
        decisions.insert(key.clone(), decision);
    }

    let verify = Confirm::with_theme(&theme)
        .with_prompt("Verify this submission?")
        .default(true)
        .interact()
        .into_diagnostic()?;

    Ok((
        decisions,
        if verify {
            ReviewAction::Verify
        } else {
            ReviewAction::Reject
        },
    ))
}
