//! Status command - session, balance, and watchlist summary

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::get_context;
use crate::output;

#[derive(Debug, Serialize)]
struct StatusSummary {
    logged_in_as: Option<String>,
    registered_users: usize,
    balance: String,
    saved_coins: usize,
    demo_mode: bool,
    price_feed: String,
}

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context().await?;

    let status = StatusSummary {
        logged_in_as: ctx.session_service.current_user().await.map(|c| c.email),
        registered_users: ctx.session_service.registered_count().await,
        balance: ctx.wallet_service.balance().await.to_string(),
        saved_coins: ctx.watchlist_service.saved_coins().await?.len(),
        demo_mode: ctx.config.demo_mode,
        price_feed: ctx.market_service.feed_name().to_string(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "MoonWallet Status".bold());
    println!();

    match &status.logged_in_as {
        // Display name mirrors the Profile screen: the part before the @
        Some(email) => {
            let name = email.split('@').next().unwrap_or("User");
            println!("Logged in as {} ({})", name.bold(), email);
        }
        None => println!("{}", "Not logged in".yellow()),
    }
    println!();

    let balance: rust_decimal::Decimal = status.balance.parse().unwrap_or_default();
    let mut table = output::create_table();
    table.add_row(vec![
        "Balance".to_string(),
        output::format_price(&balance, &ctx.config.vs_currency),
    ]);
    table.add_row(vec![
        "Registered users".to_string(),
        status.registered_users.to_string(),
    ]);
    table.add_row(vec!["Saved coins".to_string(), status.saved_coins.to_string()]);
    table.add_row(vec!["Price feed".to_string(), status.price_feed.clone()]);
    println!("{}", table);

    if status.demo_mode {
        println!();
        output::info("Demo mode is on; market data comes from built-in snapshots.");
    }

    Ok(())
}
