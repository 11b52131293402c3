//! `cft module` command - Reporting module authoring

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::output::{effective_format, print_serialized};
use crate::cli::table::{render, ModuleRow};
use crate::cli::{AppContext, GlobalOpts, OutputFormat};
use crate::core::catalog;
use crate::entities::FactorKey;

#[derive(Subcommand, Debug)]
pub enum ModuleCommands {
    /// Create a module from existing factor keys
    Add(AddArgs),

    /// List modules, ordered by name
    List,

    /// Show a module with its factor projection
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Module name, e.g. "GHG Basic"
    #[arg(long)]
    pub name: String,

    /// Factor keys to include (repeatable)
    #[arg(long = "factor", required = true)]
    pub factors: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Module name
    pub name: String,
}

pub fn run(cmd: ModuleCommands, global: &GlobalOpts) -> Result<()> {
    let ctx = AppContext::load()?;
    ctx.require_admin()?;

    match cmd {
        ModuleCommands::Add(args) => {
            let keys: Vec<FactorKey> = args
                .factors
                .iter()
                .map(|k| FactorKey::from(k.as_str()))
                .collect();
            let module = catalog::add_module(&ctx.store, &args.name, &keys).into_diagnostic()?;
            println!(
                "{} Created module \"{}\" with {} factor(s)",
                style("✓").green(),
                module.name,
                module.factors.len()
            );
        }
        ModuleCommands::List => {
            let modules = catalog::list_modules(&ctx.store).into_diagnostic()?;
            match effective_format(global.output, true) {
                OutputFormat::Json | OutputFormat::Yaml => {
                    print_serialized(global.output, &modules)?;
                }
                _ => {
                    let rows: Vec<ModuleRow> = modules.iter().map(ModuleRow::from).collect();
                    println!("{}", render(rows));
                    println!("{} module(s)", modules.len());
                }
            }
        }
        ModuleCommands::Show(args) => {
            let module = catalog::get_module(&ctx.store, &args.name).into_diagnostic()?;
            print_serialized(effective_format(global.output, false), &module)?;
        }
    }
    Ok(())
}
