//! `cft queue` command - Administrator review queue

use miette::{IntoDiagnostic, Result};

use crate::cli::output::{effective_format, print_serialized};
use crate::cli::table::{render, QueueRow};
use crate::cli::{AppContext, GlobalOpts, OutputFormat};
use crate::core::workflow::WorkflowEngine;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let ctx = AppContext::load()?;
    ctx.require_admin()?;

    let engine = WorkflowEngine::new(&ctx.store);
    let items = engine.list_pending().into_diagnostic()?;

    if items.is_empty() {
        println!("No submissions awaiting review");
        return Ok(());
    }

    match effective_format(global.output, true) {
        OutputFormat::Json | OutputFormat::Yaml => {
            let payload: Vec<_> = items
                .iter()
                .map(|(id, sub)| serde_json::json!({ "id": id, "submission": sub }))
                .collect();
            print_serialized(global.output, &payload)?;
        }
        _ => {
            let rows: Vec<QueueRow> = items
                .iter()
                .map(|(id, sub)| QueueRow::new(id, sub))
                .collect();
            println!("{}", render(rows));
            println!("Run `cft review <ID>` to verify or reject a submission");
        }
    }
    Ok(())
}
