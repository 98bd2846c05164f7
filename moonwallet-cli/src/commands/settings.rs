//! Settings command - view and change app settings

use anyhow::Result;
use clap::Subcommand;
use moonwallet_core::config::Config;

use super::get_moonwallet_dir;
use crate::output;

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change settings
    Set {
        /// Quote currency for market data (e.g. usd, eur)
        #[arg(long)]
        currency: Option<String>,
        /// CoinGecko API key; pass an empty string to clear
        #[arg(long)]
        api_key: Option<String>,
        /// Push notification toggle
        #[arg(long)]
        push: Option<bool>,
        /// Email notification toggle
        #[arg(long)]
        email: Option<bool>,
    },
}

pub fn run(command: Option<SettingsCommands>) -> Result<()> {
    let moonwallet_dir = get_moonwallet_dir();
    std::fs::create_dir_all(&moonwallet_dir)?;
    let mut config = Config::load(&moonwallet_dir)?;

    match command {
        Some(SettingsCommands::Set {
            currency,
            api_key,
            push,
            email,
        }) => {
            if currency.is_none() && api_key.is_none() && push.is_none() && email.is_none() {
                output::warning("Nothing to change. See 'mw settings set --help'.");
                return Ok(());
            }

            if let Some(currency) = currency {
                config.vs_currency = currency.to_lowercase();
            }
            if let Some(key) = api_key {
                config.api_key = if key.is_empty() { None } else { Some(key) };
            }
            if let Some(push) = push {
                config.push_notifications = push;
            }
            if let Some(email) = email {
                config.email_notifications = email;
            }

            config.save(&moonwallet_dir)?;
            output::success("Settings saved");
            Ok(())
        }
        Some(SettingsCommands::Show { json }) => show(&config, json),
        None => show(&config, false),
    }
}

fn show(config: &Config, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "demoMode": config.demo_mode,
                "vsCurrency": config.vs_currency,
                "apiKey": config.api_key.as_deref().map(|_| "(set)"),
                "pushNotifications": config.push_notifications,
                "emailNotifications": config.email_notifications,
            })
        );
        return Ok(());
    }

    let mut table = output::create_table();
    table.add_row(vec!["Demo mode", if config.demo_mode { "on" } else { "off" }]);
    table.add_row(vec!["Currency", config.vs_currency.as_str()]);
    table.add_row(vec![
        "API key",
        if config.api_key.is_some() { "(set)" } else { "(none)" },
    ]);
    table.add_row(vec![
        "Push notifications",
        if config.push_notifications { "on" } else { "off" },
    ]);
    table.add_row(vec![
        "Email notifications",
        if config.email_notifications { "on" } else { "off" },
    ]);
    println!("{}", table);
    Ok(())
}
