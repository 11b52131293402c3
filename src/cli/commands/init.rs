//! `cft init` command - Project and administrator setup

use std::path::PathBuf;

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use miette::{IntoDiagnostic, Result};

use crate::core::auth::{IdentityProvider, LocalIdentity, Session};
use crate::core::{accounts, Config, Project};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Administrator account email (prompted when omitted)
    #[arg(long)]
    pub admin_email: Option<String>,

    /// Administrator account password (prompted when omitted)
    #[arg(long)]
    pub admin_password: Option<String>,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = match args.path {
        Some(p) => p,
        None => std::env::current_dir().into_diagnostic()?,
    };

    let project = Project::init(&path).into_diagnostic()?;
    Config::default().save(&project).into_diagnostic()?;

    let email = match args.admin_email {
        Some(e) => e,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Administrator email")
            .interact_text()
            .into_diagnostic()?,
    };
    let password = match args.admin_password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Administrator password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .into_diagnostic()?,
    };

    let store = project.store();
    let identity = LocalIdentity::new(&store);
    let user_id = identity.create_user(&email, &password).into_diagnostic()?;
    accounts::create_admin_profile(&store, &user_id, "Administrator").into_diagnostic()?;

    Session {
        user_id,
        email: email.clone(),
    }
    .save(&project.session_path())
    .into_diagnostic()?;

    println!(
        "{} Initialized cft project at {}",
        style("✓").green(),
        project.root().display()
    );
    println!("Signed in as administrator {}", email);
    Ok(())
}
