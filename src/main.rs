use clap::Parser;
use cft::cli::{commands, Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Login(args) => commands::login::run(args),
        Commands::Logout => commands::login::run_logout(),
        Commands::Whoami => commands::login::run_whoami(),
        Commands::Factor(cmd) => commands::factor::run(cmd, &cli.global),
        Commands::Module(cmd) => commands::module::run(cmd, &cli.global),
        Commands::Client(cmd) => commands::client::run(cmd, &cli.global),
        Commands::Submit(args) => commands::submit::run(args),
        Commands::Status => commands::status::run(),
        Commands::Queue => commands::queue::run(&cli.global),
        Commands::Review(args) => commands::review::run(args),
        Commands::Report(cmd) => commands::report::run(cmd, &cli.global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
