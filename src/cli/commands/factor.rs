//! `cft factor` command - Emission factor catalog management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::output::{effective_format, print_serialized};
use crate::cli::table::{render, FactorRow};
use crate::cli::{AppContext, GlobalOpts, OutputFormat};
use crate::core::catalog;
use crate::entities::{FactorKey, Scope};

#[derive(Subcommand, Debug)]
pub enum FactorCommands {
    /// Add a factor to the catalog
    Add(AddArgs),

    /// List the catalog, ordered by name
    List,

    /// Show a factor by key
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Factor name, e.g. "Grid Electricity"
    #[arg(long)]
    pub name: String,

    /// Emission scope
    #[arg(long)]
    pub scope: Scope,

    /// Emission value in kg CO2e per unit of activity
    #[arg(long)]
    pub value: f64,

    /// Activity unit, e.g. kWh
    #[arg(long)]
    pub unit: String,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Factor key, e.g. Grid_Electricity_S2
    pub key: String,
}

pub fn run(cmd: FactorCommands, global: &GlobalOpts) -> Result<()> {
    let ctx = AppContext::load()?;
    ctx.require_admin()?;

    match cmd {
        FactorCommands::Add(args) => {
            let (_, factor) =
                catalog::add_factor(&ctx.store, &args.name, args.scope, args.value, &args.unit)
                    .into_diagnostic()?;
            println!(
                "{} Added factor {} (scope {}, {} kg CO2e per {})",
                style("✓").green(),
                factor.key,
                factor.scope,
                factor.value,
                factor.unit
            );
        }
        FactorCommands::List => {
            let factors = catalog::list_factors(&ctx.store).into_diagnostic()?;
            match effective_format(global.output, true) {
                OutputFormat::Json | OutputFormat::Yaml => {
                    let payload: Vec<_> = factors.iter().map(|(_, f)| f).collect();
                    print_serialized(global.output, &payload)?;
                }
                _ => {
                    let rows: Vec<FactorRow> =
                        factors.iter().map(|(_, f)| FactorRow::from(f)).collect();
                    println!("{}", render(rows));
                    println!("{} factor(s)", factors.len());
                }
            }
        }
        FactorCommands::Show(args) => {
            let key = FactorKey::from(args.key.as_str());
            let factor = catalog::get_factor(&ctx.store, &key)
                .into_diagnostic()?
                .ok_or_else(|| miette::miette!("Factor not found: {}", key))?;
            print_serialized(effective_format(global.output, false), &factor)?;
        }
    }
    Ok(())
}
