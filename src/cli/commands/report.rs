//! `cft report` command - Verified report history and CSV export

use std::path::PathBuf;

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::output::{effective_format, print_serialized};
use crate::cli::table::{render, HistoryRow};
use crate::cli::{AppContext, GlobalOpts, OutputFormat};
use crate::core::workflow::WorkflowEngine;
use crate::entities::SubmissionStatus;

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show recent submissions and their outcomes
    History,

    /// Export verified reports as CSV
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output file (defaults to footprint-reports.csv)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    let ctx = AppContext::load()?;
    let (session, _) = ctx.require_client()?;
    let engine = WorkflowEngine::new(&ctx.store);

    match cmd {
        ReportCommands::History => {
            let history = engine
                .history(&session.user_id, ctx.config.history_limit)
                .into_diagnostic()?;
            if history.is_empty() {
                println!("No submissions yet");
                return Ok(());
            }
            match effective_format(global.output, true) {
                OutputFormat::Json | OutputFormat::Yaml => {
                    let payload: Vec<_> = history.iter().map(|(_, sub)| sub).collect();
                    print_serialized(global.output, &payload)?;
                }
                _ => {
                    let rows: Vec<HistoryRow> = history
                        .iter()
                        .map(|(_, sub)| HistoryRow::new(sub, &ctx.config.footprint_unit))
                        .collect();
                    println!("{}", render(rows));
                }
            }
        }
        ReportCommands::Export(args) => {
            let path = args
                .out
                .unwrap_or_else(|| PathBuf::from("footprint-reports.csv"));
            let history = engine
                .history(&session.user_id, usize::MAX)
                .into_diagnostic()?;

            let mut writer = csv::Writer::from_path(&path).into_diagnostic()?;
            writer
                .write_record(["date", "module", "verified_at", "footprint", "unit"])
                .into_diagnostic()?;

            let mut exported = 0usize;
            for (_, sub) in history {
                if sub.status != SubmissionStatus::Approved {
                    continue;
                }
                let verified = sub
                    .verified_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default();
                let total = sub
                    .final_footprint
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_default();
                writer
                    .write_record([
                        sub.timestamp.format("%Y-%m-%d").to_string(),
                        sub.module.clone(),
                        verified,
                        total,
                        ctx.config.footprint_unit.clone(),
                    ])
                    .into_diagnostic()?;
                exported += 1;
            }
            writer.flush().into_diagnostic()?;

            println!(
                "{} Exported {} verified report(s) to {}",
                style("✓").green(),
                exported,
                path.display()
            );
        }
    }
    Ok(())
}
