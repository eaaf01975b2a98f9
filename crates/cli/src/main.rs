use crate::commands::Commands;
use crate::error::CliError;
use clap::Parser;
use tracing::Level;

mod commands;
mod error;

#[derive(Parser)]
#[command(
    name = "planfilter",
    version = "0.1.0",
    about = "Compiles policy query plans into SQL filters"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            plan,
            dialect,
            structured,
        } => commands::compile(&plan, dialect, structured)?,
        Commands::Seed { db } => commands::seed(&db).await?,
        Commands::Contacts {
            db,
            policy,
            username,
        } => commands::contacts(&db, &policy, &username).await?,
    }

    Ok(())
}
