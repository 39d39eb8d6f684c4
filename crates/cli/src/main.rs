//! Storedash CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run dashboard database migrations
//! sd-cli migrate
//!
//! # Create a dashboard account
//! sd-cli user create -u alice -p 'correct horse battery'
//!
//! # Create a store for an account
//! sd-cli store create -u alice -n "Maple Jerseys"
//!
//! # Seed a store's catalog from YAML
//! sd-cli seed -s <store-id> -f catalog.yaml
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` / `user set-password` - Manage accounts
//! - `store create` - Create a store
//! - `seed` - Seed options, billboards, categories, products and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sd-cli")]
#[command(author, version, about = "Storedash CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage dashboard accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage stores
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Seed a store's catalog from a YAML file
    Seed {
        /// Store ID
        #[arg(short, long)]
        store: String,

        /// Path to the catalog YAML file
        #[arg(short, long)]
        file: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new account
    Create {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Replace an account's password
    SetPassword {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Create a store owned by an account
    Create {
        /// Owner's username
        #[arg(short, long)]
        username: String,

        /// Store name
        #[arg(short, long)]
        name: String,
    },
}

#[tokio::main]
async fn main() {
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create { username, password } => {
                commands::user::create(&username, &password).await?;
            }
            UserAction::SetPassword { username, password } => {
                commands::user::set_password(&username, &password).await?;
            }
        },
        Commands::Store { action } => match action {
            StoreAction::Create { username, name } => {
                commands::store::create(&username, &name).await?;
            }
        },
        Commands::Seed { store, file } => commands::seed::run(&store, &file).await?,
    }
    Ok(())
}
