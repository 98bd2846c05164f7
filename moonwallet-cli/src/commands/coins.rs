//! Coins command - ranked market listing

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use indicatif::ProgressBar;
use moonwallet_core::services::DataSource;
use moonwallet_core::LogEvent;

use super::{get_context, get_logger, log_command, log_event};
use crate::output;

/// Spinner shown while a fetch is in flight, suppressed when piped
pub fn fetch_spinner(message: &'static str) -> Option<ProgressBar> {
    if !atty::is(atty::Stream::Stderr) {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

pub async fn run(json: bool) -> Result<()> {
    let logger = get_logger();
    let ctx = get_context().await?;

    let spinner = if json { None } else { fetch_spinner("Fetching coins...") };
    let result = ctx.market_service.coin_listing().await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    for warning in &result.warnings {
        log_event(
            &logger,
            LogEvent::new("listing_fetch_failed")
                .with_command("coins")
                .with_error(warning.clone()),
        );
    }
    log_command(&logger, "coins");

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    for warning in &result.warnings {
        output::warning(warning);
    }
    match result.source {
        DataSource::Live => {}
        DataSource::Cache => output::info("Showing cached data."),
        DataSource::Fallback => output::info("Showing built-in listing."),
    }

    let vs_currency = &ctx.config.vs_currency;
    let mut table = output::create_table();
    table.set_header(vec!["Coin", "Price", "24h", "Market Cap"]);

    for coin in &result.coins {
        let change = output::format_percent(coin.change_24h_percent);
        let change = if coin.change_24h_percent < 0.0 {
            change.red().to_string()
        } else {
            change.green().to_string()
        };

        table.add_row(vec![
            format!("{} ({})", coin.name, coin.symbol),
            output::format_price(&coin.current_price, vs_currency),
            change,
            output::format_price(&coin.market_cap, vs_currency),
        ]);
    }

    println!("{}", table);
    Ok(())
}
