//! Top-level argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::client::ClientCommands;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::factor::FactorCommands;
use crate::cli::commands::init::InitArgs;
use crate::cli::commands::login::LoginArgs;
use crate::cli::commands::module::ModuleCommands;
use crate::cli::commands::report::ReportCommands;
use crate::cli::commands::review::ReviewArgs;
use crate::cli::commands::submit::SubmitArgs;

/// Carbon Footprint Toolkit
#[derive(Parser, Debug)]
#[command(name = "cft", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, global = true, default_value = "auto")]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Auto,
    Table,
    Json,
    Yaml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a project and its administrator account
    Init(InitArgs),

    /// Sign in as an administrator or client
    Login(LoginArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage the emission factor catalog (admin)
    #[command(subcommand)]
    Factor(FactorCommands),

    /// Manage reporting modules (admin)
    #[command(subcommand)]
    Module(ModuleCommands),

    /// Manage client accounts (admin)
    #[command(subcommand)]
    Client(ClientCommands),

    /// Submit activity data for the assigned module (client)
    Submit(SubmitArgs),

    /// Show entry permission and recent reports (client)
    Status,

    /// List submissions awaiting review (admin)
    Queue,

    /// Review a submission: verify or reject (admin)
    Review(ReviewArgs),

    /// Work with verified reports (client)
    #[command(subcommand)]
    Report(ReportCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
