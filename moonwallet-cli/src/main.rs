//! MoonWallet CLI - wallet and portfolio tracker in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{auth, coin, coins, demo, logs, settings, status, wallet, watch};

/// MoonWallet - wallet and portfolio tracker in your terminal
#[derive(Parser)]
#[command(name = "mw", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user and log in
    Register {
        /// Email address
        email: String,
        /// Password
        password: String,
    },

    /// Log in with an existing user
    Login {
        /// Email address
        email: String,
        /// Password
        password: String,
    },

    /// Log out of the active session
    Logout,

    /// Request a password reset for a registered email
    ResetPassword {
        /// Email address
        email: String,
    },

    /// Manage the wallet balance
    Wallet {
        #[command(subcommand)]
        command: wallet::WalletCommands,
    },

    /// Show the ranked coin listing
    Coins {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show detail for one coin
    Coin {
        /// Coin id, e.g. "bitcoin"
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the saved-coins watchlist
    Watch {
        #[command(subcommand)]
        command: watch::WatchCommands,
    },

    /// Show session, balance, and watchlist summary
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View or change settings
    Settings {
        #[command(subcommand)]
        command: Option<settings::SettingsCommands>,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register { email, password } => auth::run_register(&email, &password).await,
        Commands::Login { email, password } => auth::run_login(&email, &password).await,
        Commands::Logout => auth::run_logout().await,
        Commands::ResetPassword { email } => auth::run_reset_password(&email).await,
        Commands::Wallet { command } => wallet::run(command).await,
        Commands::Coins { json } => coins::run(json).await,
        Commands::Coin { id, json } => coin::run(&id, json).await,
        Commands::Watch { command } => watch::run(command).await,
        Commands::Status { json } => status::run(json).await,
        Commands::Settings { command } => settings::run(command),
        Commands::Demo { command } => demo::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
