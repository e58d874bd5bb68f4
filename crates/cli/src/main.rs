//! Clover CLI - Document-store seeding and flushing tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed every collection from the seed directory
//! clover seed
//!
//! # Seed only some collections
//! clover seed --only products --only orders
//!
//! # Flush the storefront collections, preserving the demo shopper
//! clover flush
//!
//! # Flush preserving a different user
//! clover flush --preserve-user U42
//! ```
//!
//! # Commands
//!
//! - `seed` - Load, validate, and upsert seed data in dependency order
//! - `flush` - Mass-delete the storefront collections with exclusions
//!
//! Configuration comes from the environment (a `.env` file is honored); see
//! [`config`] for the variables and their defaults.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use clover_pipeline::seed::SeedTarget;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "clover")]
#[command(author, version, about = "Clover Market CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the document store from per-entity JSON files
    Seed {
        /// Restrict seeding to a collection (repeatable); omit to seed all
        /// of: users, products, discounts, orders, tickets, replies
        #[arg(long = "only", value_name = "COLLECTION")]
        only: Vec<SeedTarget>,
    },
    /// Flush the storefront collections, preserving one user
    Flush {
        /// User id to preserve in `users` (default: CLOVER_PRESERVE_USER)
        #[arg(long)]
        preserve_user: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { only } => commands::seed::run(&only).await?,
        Commands::Flush { preserve_user } => commands::flush::run(preserve_user).await?,
    }
    Ok(())
}
