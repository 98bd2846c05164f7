//! Wallet commands - deposit, withdraw, balance

use anyhow::Result;
use clap::Subcommand;
use moonwallet_core::services::WalletService;
use moonwallet_core::LogEvent;
use rust_decimal::Decimal;

use super::{get_context, get_logger, log_event};
use crate::output;

#[derive(Subcommand)]
pub enum WalletCommands {
    /// Add funds to the wallet
    Deposit {
        /// Amount to deposit (max 5000 per transaction)
        amount: Decimal,
    },
    /// Remove funds from the wallet
    Withdraw {
        /// Amount to withdraw
        amount: Decimal,
    },
    /// Show the current balance
    Balance {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: WalletCommands) -> Result<()> {
    let logger = get_logger();
    let ctx = get_context().await?;
    let vs_currency = ctx.config.vs_currency.clone();

    match command {
        WalletCommands::Deposit { amount } => {
            match ctx.wallet_service.deposit(amount).await {
                Ok(balance) => {
                    log_event(&logger, LogEvent::new("deposit").with_command("wallet deposit"));
                    output::success(&format!(
                        "Deposited {}. New balance: {}",
                        output::format_price(&amount, &vs_currency),
                        output::format_price(&balance, &vs_currency)
                    ));
                    Ok(())
                }
                Err(e) => {
                    log_event(
                        &logger,
                        LogEvent::new("deposit_failed")
                            .with_command("wallet deposit")
                            .with_error(e.to_string()),
                    );
                    Err(e.into())
                }
            }
        }
        WalletCommands::Withdraw { amount } => {
            match ctx.wallet_service.withdraw(amount).await {
                Ok(balance) => {
                    log_event(&logger, LogEvent::new("withdrawal").with_command("wallet withdraw"));
                    output::success(&format!(
                        "Withdrew {}. New balance: {}",
                        output::format_price(&amount, &vs_currency),
                        output::format_price(&balance, &vs_currency)
                    ));
                    Ok(())
                }
                Err(e) => {
                    log_event(
                        &logger,
                        LogEvent::new("withdrawal_failed")
                            .with_command("wallet withdraw")
                            .with_error(e.to_string()),
                    );
                    Err(e.into())
                }
            }
        }
        WalletCommands::Balance { json } => {
            let balance = ctx.wallet_service.balance().await;

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "balance": balance.to_string(),
                        "deposit_limit": WalletService::deposit_limit().to_string(),
                    })
                );
                return Ok(());
            }

            println!("Current balance: {}", output::format_price(&balance, &vs_currency));
            Ok(())
        }
    }
}
