//! Configuration management
//!
//! Compatible with the app shell's settings.json format:
//! ```json
//! {
//!   "app": { "demoMode": false, "vsCurrency": "usd", "apiKey": null,
//!            "pushNotifications": true, "emailNotifications": false }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Raw settings.json structure (matching the app shell format)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(default = "default_vs_currency")]
    vs_currency: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default = "default_true")]
    push_notifications: bool,
    #[serde(default)]
    email_notifications: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            demo_mode: false,
            vs_currency: default_vs_currency(),
            api_key: None,
            push_notifications: true,
            email_notifications: false,
            other: HashMap::new(),
        }
    }
}

/// MoonWallet configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    /// Quote currency for market data, e.g. "usd"
    pub vs_currency: String,
    /// Optional CoinGecko API key
    pub api_key: Option<String>,
    /// Acknowledged toggles from the Settings screen; they gate nothing yet
    pub push_notifications: bool,
    pub email_notifications: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            vs_currency: default_vs_currency(),
            api_key: None,
            push_notifications: true,
            email_notifications: false,
        }
    }
}

impl Config {
    /// Load config from the moonwallet directory
    ///
    /// Demo mode can be enabled via:
    /// 1. Settings file (mw demo on)
    /// 2. Environment variable MOONWALLET_DEMO_MODE (for CI/testing)
    ///
    /// The API key comes from settings, falling back to the CG_API_KEY
    /// environment variable (the name the mobile app used).
    pub fn load(moonwallet_dir: &Path) -> Result<Self> {
        let settings_path = moonwallet_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let demo_mode = match std::env::var("MOONWALLET_DEMO_MODE").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.demo_mode,
        };

        let api_key = raw
            .app
            .api_key
            .clone()
            .or_else(|| std::env::var("CG_API_KEY").ok())
            .filter(|k| !k.is_empty());

        Ok(Self {
            demo_mode,
            vs_currency: raw.app.vs_currency,
            api_key,
            push_notifications: raw.app.push_notifications,
            email_notifications: raw.app.email_notifications,
        })
    }

    /// Save config to the moonwallet directory
    /// Preserves settings fields the core doesn't manage
    pub fn save(&self, moonwallet_dir: &Path) -> Result<()> {
        let settings_path = moonwallet_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.app.demo_mode = self.demo_mode;
        settings.app.vs_currency = self.vs_currency.clone();
        settings.app.api_key = self.api_key.clone();
        settings.app.push_notifications = self.push_notifications;
        settings.app.email_notifications = self.email_notifications;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Enable demo mode
    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    /// Disable demo mode
    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_no_settings_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();

        assert!(!config.demo_mode);
        assert_eq!(config.vs_currency, "usd");
        assert!(config.push_notifications);
        assert!(!config.email_notifications);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        config.enable_demo_mode();
        config.vs_currency = "eur".to_string();
        config.email_notifications = true;
        config.save(dir.path()).unwrap();

        let reloaded = Config::load(dir.path()).unwrap();
        assert!(reloaded.demo_mode);
        assert_eq!(reloaded.vs_currency, "eur");
        assert!(reloaded.email_notifications);
    }

    #[test]
    fn test_save_preserves_unmanaged_fields() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"app": {"demoMode": false, "theme": "dark"}}"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        config.save(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        assert!(content.contains("theme"));
        assert!(content.contains("dark"));
    }
}
