//! `cft login` / `cft logout` / `cft whoami` - Session management

use console::style;
use dialoguer::{theme::ColorfulTheme, Password};
use miette::{IntoDiagnostic, Result};

use crate::cli::AppContext;
use crate::core::auth::{IdentityProvider, LocalIdentity, Session};
use crate::core::accounts;
use crate::entities::Role;

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Account email
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

pub fn run(args: LoginArgs) -> Result<()> {
    let ctx = AppContext::load()?;

    let password = match args.password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()
            .into_diagnostic()?,
    };

    let identity = LocalIdentity::new(&ctx.store);
    let user_id = identity.sign_in(&args.email, &password).into_diagnostic()?;

    // Role routing: an account without a usable profile doesn't get a session
    let profile = match accounts::require_profile(&ctx.store, &user_id) {
        Ok(profile) => profile,
        Err(err) => {
            Session::clear(&ctx.project.session_path()).into_diagnostic()?;
            return Err(err).into_diagnostic();
        }
    };

    Session {
        user_id,
        email: args.email.clone(),
    }
    .save(&ctx.project.session_path())
    .into_diagnostic()?;

    match profile.role {
        Role::Admin => println!(
            "{} Signed in as administrator {}",
            style("✓").green(),
            args.email
        ),
        Role::Client => println!(
            "{} Signed in to the {} portal",
            style("✓").green(),
            profile.organization_name
        ),
    }
    Ok(())
}

pub fn run_logout() -> Result<()> {
    let ctx = AppContext::load()?;
    Session::clear(&ctx.project.session_path()).into_diagnostic()?;
    println!("Signed out");
    Ok(())
}

pub fn run_whoami() -> Result<()> {
    let ctx = AppContext::load()?;
    let (session, profile) = ctx.signed_in()?;
    println!("{} ({})", session.email, profile.role);
    if let Some(module) = &profile.reporting_module {
        println!("Organization: {}", profile.organization_name);
        println!("Reporting module: {}", module);
    }
    Ok(())
}
