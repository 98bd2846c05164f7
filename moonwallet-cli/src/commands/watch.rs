//! Watch commands - the saved-coins list

use anyhow::Result;
use clap::Subcommand;
use moonwallet_core::LogEvent;

use super::coins::fetch_spinner;
use super::{get_context, get_logger, log_event};
use crate::output;

#[derive(Subcommand)]
pub enum WatchCommands {
    /// Save a coin to the watchlist
    Add {
        /// Coin id, e.g. "bitcoin"
        id: String,
    },
    /// Show saved coins
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: WatchCommands) -> Result<()> {
    let logger = get_logger();
    let ctx = get_context().await?;

    match command {
        WatchCommands::Add { id } => {
            let spinner = fetch_spinner("Fetching coin data...");
            let result = ctx.market_service.coin_detail(&id).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }

            let coin = match result.coin {
                Some(coin) => coin,
                None => anyhow::bail!("Coin data not available for '{}'", id),
            };

            if ctx.watchlist_service.save(coin).await? {
                log_event(&logger, LogEvent::new("coin_saved").with_command("watch add"));
                output::success("Coin saved!");
            } else {
                output::info("Coin already saved.");
            }
            Ok(())
        }
        WatchCommands::List { json } => {
            let saved = ctx.watchlist_service.saved_coins().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
                return Ok(());
            }

            if saved.is_empty() {
                println!("No coins saved yet.");
                return Ok(());
            }

            let vs_currency = &ctx.config.vs_currency;
            let mut table = output::create_table();
            table.set_header(vec!["Coin", "Price"]);
            for coin in &saved {
                table.add_row(vec![
                    format!("{} ({})", coin.name, coin.symbol),
                    output::format_price(&coin.current_price, vs_currency),
                ]);
            }
            println!("{}", table);
            Ok(())
        }
    }
}
