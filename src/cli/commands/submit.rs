//! `cft submit` command - Client activity data entry

use std::collections::BTreeMap;

use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::parse_activity_values;
use crate::cli::AppContext;
use crate::core::catalog;
use crate::core::workflow::{Gate, WorkflowEngine, WorkflowError};
use crate::entities::{FactorKey, ReportingModule, ReviewStatus, Submission};

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// Activity value as KEY=VALUE (repeatable); prompts when omitted
    #[arg(long = "set")]
    pub set: Vec<String>,
}

pub fn run(args: SubmitArgs) -> Result<()> {
    let ctx = AppContext::load()?;
    let (session, profile) = ctx.require_client()?;

    let module_name = profile
        .reporting_module
        .as_deref()
        .ok_or(WorkflowError::NoModuleAssigned)
        .into_diagnostic()?;
    let module = catalog::get_module(&ctx.store, module_name).into_diagnostic()?;

    let engine = WorkflowEngine::new(&ctx.store);
    let gate = engine.check_status(&session.user_id).into_diagnostic()?;
    if let Gate::Locked { since } = gate {
        return Err(WorkflowError::Locked { since }).into_diagnostic();
    }

    if let Some((_, previous)) = gate.rejected_previous() {
        print_rejection(previous);
    }

    let values = if args.set.is_empty() {
        prompt_values(&module, gate.rejected_previous().map(|(_, sub)| sub))?
    } else {
        parse_activity_values(&args.set)?
    };

    let receipt = engine
        .submit(&session.user_id, &profile, &module, &values)
        .into_diagnostic()?;

    println!(
        "{} Submitted {} entr{} for review",
        style("✓").green(),
        receipt.accepted,
        if receipt.accepted == 1 { "y" } else { "ies" }
    );
    if receipt.excluded > 0 {
        println!(
            "  {} module field(s) left blank or invalid were excluded",
            receipt.excluded
        );
    }
    for key in &receipt.unknown_keys {
        println!(
            "  {} {} is not part of module \"{}\"; ignored",
            style("!").yellow(),
            key,
            module.name
        );
    }
    println!("Your data is locked until an administrator reviews it.");
    Ok(())
}

/// Show the reviewer's verdicts before a corrected re-submission
fn print_rejection(previous: &Submission) {
    println!(
        "{} Your previous submission was rejected. Reviewer comments:",
        style("!").yellow()
    );
    for (key, entry) in &previous.entries {
        if entry.review_status == ReviewStatus::Wrong {
            println!(
                "  {} {}: {}",
                style("✗").red(),
                key,
                entry.admin_comment.as_deref().unwrap_or("(no comment)")
            );
        }
    }
}

/// Interactive entry over the module's fields, pre-populated from the
/// rejected previous submission where one exists. An empty answer leaves
/// the field out.
fn prompt_values(
    module: &ReportingModule,
    previous: Option<&Submission>,
) -> Result<BTreeMap<FactorKey, f64>> {
    let theme = ColorfulTheme::default();
    let mut values = BTreeMap::new();
    for factor_ref in &module.factors {
        let initial = previous
            .and_then(|sub| sub.entries.get(&factor_ref.key))
            .map(|entry| entry.activity.to_string())
            .unwrap_or_default();

        let answer: String = Input::with_theme(&theme)
            .with_prompt(format!("{} ({})", factor_ref.name, factor_ref.unit))
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        if let Ok(value) = answer.trim().parse::<f64>() {
            values.insert(factor_ref.key.clone(), value);
        }
    }
    Ok(values)
}
