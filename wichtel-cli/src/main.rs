//! Wichtel CLI - Secret Santa parties in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{auth, dashboard, gift, invite, party};

/// Wichtel - organize Secret Santa parties from your terminal
#[derive(Parser)]
#[command(name = "wt", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        /// Your name
        #[arg(long)]
        name: Option<String>,
        /// Your email address
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted if not given)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log in
    Login {
        /// Your email address
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted if not given)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show your parties and invitations
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage parties
    Party {
        #[command(subcommand)]
        command: party::PartyCommands,
    },

    /// Manage your invitations
    Invites {
        #[command(subcommand)]
        command: invite::InviteCommands,
    },

    /// Manage gift suggestions
    Gift {
        #[command(subcommand)]
        command: gift::GiftCommands,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Signup { name, email, password } => auth::signup(name, email, password).await,
        Commands::Login { email, password } => auth::login(email, password).await,
        Commands::Logout => auth::logout().await,
        Commands::Whoami { json } => auth::whoami(json).await,
        Commands::Dashboard { json } => dashboard::run(json).await,
        Commands::Party { command } => party::run(command).await,
        Commands::Invites { command } => invite::run(command).await,
        Commands::Gift { command } => gift::run(command).await,
    }
}
