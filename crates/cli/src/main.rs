//! Voidwear CLI - session-store migrations and health checks.
//!
//! # Usage
//!
//! ```bash
//! # Create the session schema for the storefront database
//! void-cli migrate storefront
//!
//! # Create the session schema for the admin database
//! void-cli migrate admin
//!
//! # Create both
//! void-cli migrate all
//!
//! # Probe the commerce API
//! void-cli health
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "void-cli")]
#[command(author, version, about = "Voidwear CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the tower-sessions schema in a binary's session database
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Probe the commerce API base URL and report status
    Health,
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Storefront session database (`STOREFRONT_DATABASE_URL`)
    Storefront,
    /// Admin session database (`ADMIN_DATABASE_URL`)
    Admin,
    /// Both databases
    All,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
            MigrateTarget::Admin => commands::migrate::admin().await?,
            MigrateTarget::All => {
                commands::migrate::storefront().await?;
                commands::migrate::admin().await?;
            }
        },
        Commands::Health => commands::health::check().await?,
    }
    Ok(())
}
