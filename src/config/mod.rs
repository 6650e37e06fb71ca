//! Configuration for the shop system.
//!
//! TOML-backed, with defaults that work out of the box:
//!
//! ```toml
//! [shops]
//! max_shops_per_owner = 10
//!
//! [storage]
//! data_dir = "./data"
//!
//! [messages]
//! shop-created = "Chest shop created successfully!"
//! ```
//!
//! The `[messages]` table maps the stable message keys emitted by the event
//! port and the exchange engine to display text; hosts override entries to
//! localize or re-brand. Permission checks are not configured here — the
//! host's permission gate runs before any call into this crate.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub shops: ShopsConfig,
    pub storage: StorageConfig,
    #[serde(default = "default_messages")]
    pub messages: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopsConfig {
    /// Shops a single owner may register. Zero means unlimited.
    #[serde(default = "default_max_shops")]
    pub max_shops_per_owner: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the shop document.
    pub data_dir: String,
}

fn default_max_shops() -> u32 {
    10
}

fn default_messages() -> HashMap<String, String> {
    let entries = [
        ("shop-created", "Chest shop created successfully!"),
        ("shop-removed", "Chest shop removed!"),
        (
            "invalid-format",
            "Invalid shop format! Use: Want: <item> <amount> / Give: <item> <amount>",
        ),
        ("no-chest-found", "No chest found below the sign!"),
        ("sign-name-mismatch", "The first line must be your username or empty!"),
        ("max-shops-reached", "You have reached the maximum number of shops!"),
        ("sign-already-shop", "There is already a shop registered on this sign!"),
        ("not-shop-owner", "You can only break your own shop signs!"),
        ("cannot-buy-own-shop", "You cannot buy from your own shop!"),
        ("insufficient-items", "You don't have enough items to pay!"),
        ("insufficient-stock", "This shop is out of stock!"),
        ("shop-full", "This shop cannot accept payment right now!"),
        ("transaction-success", "Transaction successful!"),
        ("shop-sale", "Someone bought from your shop!"),
    ];
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Display text for a message key, with the same fallback the original
    /// system used for unconfigured keys.
    pub fn message(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| format!("Message not found: {}", key))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shops: ShopsConfig {
                max_shops_per_owner: default_max_shops(),
            },
            storage: StorageConfig {
                data_dir: "./data".to_string(),
            },
            messages: default_messages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_emitted_key() {
        let config = Config::default();
        for key in [
            "shop-created",
            "shop-removed",
            "invalid-format",
            "no-chest-found",
            "sign-name-mismatch",
            "max-shops-reached",
            "sign-already-shop",
            "not-shop-owner",
            "cannot-buy-own-shop",
            "insufficient-items",
            "insufficient-stock",
            "shop-full",
            "transaction-success",
            "shop-sale",
        ] {
            assert!(
                config.messages.contains_key(key),
                "missing default message for {}",
                key
            );
        }
    }

    #[test]
    fn unknown_keys_fall_back() {
        let config = Config::default();
        assert_eq!(
            config.message("definitely-not-a-key"),
            "Message not found: definitely-not-a-key"
        );
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.shops.max_shops_per_owner, 10);
        assert_eq!(back.storage.data_dir, "./data");
        assert_eq!(back.message("shop-created"), config.message("shop-created"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let text = "[shops]\n\n[storage]\ndata_dir = \"/srv/shops\"\n";
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.shops.max_shops_per_owner, 10);
        assert_eq!(config.storage.data_dir, "/srv/shops");
        assert_eq!(config.message("shop-full"), Config::default().message("shop-full"));
    }
}
