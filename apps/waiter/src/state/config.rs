//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MESA_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Restaurant name (shown in the app header)
    pub restaurant_name: String,

    /// Currency symbol the view puts in front of totals
    pub currency_symbol: String,

    /// Database file override; `None` means the platform data directory
    pub db_path: Option<PathBuf>,

    /// Menu file override; `None` means the bundled menu
    pub menu_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Restaurant: "Mesa"
    /// - Currency symbol: "S/"
    /// - Storage and menu: platform defaults
    fn default() -> Self {
        ConfigState {
            restaurant_name: "Mesa".to_string(),
            currency_symbol: "S/".to_string(),
            db_path: None,
            menu_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MESA_DB_PATH`: database file
    /// - `MESA_MENU_PATH`: menu JSON file
    /// - `MESA_RESTAURANT_NAME`: restaurant name
    /// - `MESA_CURRENCY_SYMBOL`: currency symbol
    pub fn from_env() -> Self {
        ConfigState::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`ConfigState::from_env`], reading variables through `var`.
    /// Blank values are ignored.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| var(name).filter(|v| !v.trim().is_empty());
        let mut config = ConfigState::default();

        if let Some(path) = var("MESA_DB_PATH") {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(path) = var("MESA_MENU_PATH") {
            config.menu_path = Some(PathBuf::from(path));
        }

        if let Some(name) = var("MESA_RESTAURANT_NAME") {
            config.restaurant_name = name;
        }

        if let Some(symbol) = var("MESA_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_vars_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MESA_DB_PATH", "/tmp/mesa.db"),
            ("MESA_RESTAURANT_NAME", "Chifa Lung Fung"),
            ("MESA_CURRENCY_SYMBOL", "  "),
        ]
        .into_iter()
        .collect();

        let config = ConfigState::from_vars(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/mesa.db")));
        assert_eq!(config.restaurant_name, "Chifa Lung Fung");
        assert_eq!(config.currency_symbol, "S/");
        assert_eq!(config.menu_path, None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(ConfigState::default()).unwrap();
        assert_eq!(json["restaurantName"], "Mesa");
        assert_eq!(json["currencySymbol"], "S/");

        // Totals travel as numbers; the view only needs the symbol
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["currencySymbol", "dbPath", "menuPath", "restaurantName"]);
    }
}
