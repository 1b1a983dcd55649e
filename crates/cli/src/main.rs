//! Operational CLI for the bakery backend.
//!
//! ```bash
//! # Push the starter catalog to a fresh backend
//! miga-cli seed
//!
//! # Register an account and promote it to admin
//! miga-cli admin create -e admin@migabakery.cl -n "Admin" -p 'a-strong-passphrase'
//! ```
//!
//! Both commands read `BAKERY_API_URL` (and optionally `BAKERY_API_TOKEN`)
//! from the environment, the same variables the server binaries use.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "miga-cli", version, about = "Bakery backend tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Push the starter catalog to the backend
    Seed,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Register a user through the backend and promote it to admin
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let outcome = match Cli::parse().command {
        Command::Seed => commands::seed::run().await,
        Command::Admin {
            action:
                AdminAction::Create {
                    email,
                    name,
                    password,
                },
        } => commands::admin::create_user(&email, &name, &password).await,
    };

    if let Err(e) = outcome {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}
