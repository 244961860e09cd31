//! CLI entry point - the composition root.
//!
//! Wires the runtime supervisor into the core facade via bootstrap, then
//! routes each command to its handler.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use adde_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command.as_ref() else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::from_cli(&cli);
    let mut ctx = bootstrap(&config)?;

    match command {
        Commands::Paths { json } => handlers::paths::execute(&ctx, *json)?,
        Commands::List { json } => handlers::list::execute(&ctx, *json)?,
        Commands::Groups => handlers::groups::execute(&ctx)?,
        Commands::Add { fields, line } => {
            handlers::add::execute(&mut ctx, fields, line.as_deref())?;
        }
        Commands::Remove { index } => handlers::remove::execute(&mut ctx, *index)?,
        Commands::Serve => handlers::serve::execute(&ctx).await?,
    }

    Ok(())
}
