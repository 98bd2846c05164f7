//! Coin command - single coin detail view

use anyhow::Result;
use colored::Colorize;
use moonwallet_core::services::DataSource;
use moonwallet_core::LogEvent;

use super::coins::fetch_spinner;
use super::{get_context, get_logger, log_command, log_event};
use crate::output;

pub async fn run(coin_id: &str, json: bool) -> Result<()> {
    let logger = get_logger();
    let ctx = get_context().await?;

    let spinner = if json { None } else { fetch_spinner("Fetching coin data...") };
    let result = ctx.market_service.coin_detail(coin_id).await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    for warning in &result.warnings {
        log_event(
            &logger,
            LogEvent::new("detail_fetch_failed")
                .with_command("coin")
                .with_error(warning.clone()),
        );
    }
    log_command(&logger, "coin");

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    for warning in &result.warnings {
        output::warning(warning);
    }

    let coin = match result.coin {
        Some(coin) => coin,
        None => anyhow::bail!("Coin data not available for '{}'", coin_id),
    };

    if result.source == DataSource::Cache {
        output::info("Showing cached data.");
    }

    let vs_currency = &ctx.config.vs_currency;

    println!();
    println!("{}", format!("{} ({})", coin.name, coin.symbol).bold());
    println!(
        "{}",
        output::format_price(&coin.current_price, vs_currency).bold()
    );
    println!();

    let mut table = output::create_table();
    table.add_row(vec![
        "Market Cap".to_string(),
        output::format_price(&coin.market_cap, vs_currency),
    ]);
    table.add_row(vec![
        "24h Volume".to_string(),
        output::format_price(&coin.volume_24h, vs_currency),
    ]);
    table.add_row(vec![
        "24h Change".to_string(),
        output::format_percent(coin.change_24h_percent),
    ]);
    println!("{}", table);

    match &coin.sparkline_7d {
        Some(prices) if !prices.is_empty() => {
            let low = prices.iter().copied().fold(f64::INFINITY, f64::min);
            let high = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            println!();
            println!("7d  {}", output::sparkline(prices));
            println!("    low {:.2}  high {:.2}", low, high);
        }
        _ => {
            println!();
            println!("No chart data available");
        }
    }

    Ok(())
}
