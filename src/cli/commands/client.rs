//! `cft client` command - Client account provisioning

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Password};
use miette::{IntoDiagnostic, Result};

use crate::cli::output::{effective_format, print_serialized};
use crate::cli::table::{render, ClientRow};
use crate::cli::{AppContext, GlobalOpts, OutputFormat};
use crate::core::accounts;
use crate::core::auth::LocalIdentity;

#[derive(Subcommand, Debug)]
pub enum ClientCommands {
    /// Provision a client account bound to a reporting module
    Add(AddArgs),

    /// List client accounts, ordered by organization
    List,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Organization name, e.g. "Acme Corp"
    #[arg(long)]
    pub org: String,

    /// Login email for the account
    #[arg(long)]
    pub email: String,

    /// Initial password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,

    /// Reporting module to assign
    #[arg(long)]
    pub module: String,
}

pub fn run(cmd: ClientCommands, global: &GlobalOpts) -> Result<()> {
    let ctx = AppContext::load()?;
    ctx.require_admin()?;

    match cmd {
        ClientCommands::Add(args) => {
            let password = match args.password {
                Some(p) => p,
                None => Password::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("Password for {}", args.email))
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .into_diagnostic()?,
            };

            let identity = LocalIdentity::new(&ctx.store);
            accounts::create_client(
                &ctx.store,
                &identity,
                &args.org,
                &args.email,
                &password,
                &args.module,
            )
            .into_diagnostic()?;

            println!(
                "{} Client \"{}\" created successfully! Module: {}.",
                style("✓").green(),
                args.org,
                args.module
            );
        }
        ClientCommands::List => {
            let clients = accounts::list_clients(&ctx.store).into_diagnostic()?;
            match effective_format(global.output, true) {
                OutputFormat::Json | OutputFormat::Yaml => {
                    let payload: Vec<_> = clients.iter().map(|(_, p)| p).collect();
                    print_serialized(global.output, &payload)?;
                }
                _ => {
                    let rows: Vec<ClientRow> =
                        clients.iter().map(|(_, p)| ClientRow::from(p)).collect();
                    println!("{}", render(rows));
                    println!("{} client(s)", clients.len());
                }
            }
        }
    }
    Ok(())
}
