//! FarmHaat operational CLI.
//!
//! Subcommands:
//! - `migrate` - run schema migrations
//! - `create-admin` - provision (or promote) an admin account
//! - `seed` - load demo catalog data into an empty database

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI talks to its operator on stdout.
#![allow(clippy::print_stdout)]

mod commands;

use clap::{Parser, Subcommand};

use commands::CliError;

#[derive(Parser)]
#[command(name = "farmhaat-cli", about = "FarmHaat operational tooling", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run pending schema migrations.
    Migrate,
    /// Create an admin user, or promote/reset an existing one.
    CreateAdmin {
        /// Admin email address
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Password (min 8 characters)
        #[arg(long)]
        password: String,
    },
    /// Seed demo products into an empty catalog.
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farmhaat_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Migrate => commands::migrate::run().await,
        Command::CreateAdmin {
            email,
            name,
            password,
        } => commands::admin::run(&email, &name, &password).await,
        Command::Seed => commands::seed::run().await,
    }
}
