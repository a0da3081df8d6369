//! # Configuration State
//!
//! Stores kiosk configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BISTRO_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use bistro_core::validation::validate_table_count;
use bistro_core::{ValidationError, DEFAULT_DIRECT_PRICED_CATEGORIES, DEFAULT_TABLE_COUNT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Kiosk configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Restaurant name (greeting and bill header)
    pub store_name: String,

    /// Menu document, read once at startup
    pub menu_path: PathBuf,

    /// Categories priced per item rather than by sub-category/dish/size
    pub direct_priced_categories: Vec<String>,

    /// Number of dine-in tables
    pub table_count: u8,

    /// Where encoded payment codes are written
    pub receipt_dir: PathBuf,

    /// QR module size in printer dots (1-16)
    pub qr_module_size: u8,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Smart Restaurant"
    /// - Menu: `./menu.json`
    /// - Tables: 15
    /// - Receipts: `./receipts`
    fn default() -> Self {
        ConfigState {
            store_name: "Smart Restaurant".to_string(),
            menu_path: PathBuf::from("menu.json"),
            direct_priced_categories: DEFAULT_DIRECT_PRICED_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            table_count: DEFAULT_TABLE_COUNT,
            receipt_dir: PathBuf::from("receipts"),
            qr_module_size: 5,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BISTRO_STORE_NAME`: Override store name
    /// - `BISTRO_MENU_PATH`: Menu JSON file
    /// - `BISTRO_DIRECT_CATEGORIES`: Comma separated direct-priced categories
    /// - `BISTRO_TABLE_COUNT`: Number of tables (1-255)
    /// - `BISTRO_RECEIPT_DIR`: Directory for payment codes
    /// - `BISTRO_QR_MODULE_SIZE`: QR module size (clamped to 1-16)
    ///
    /// Without `BISTRO_MENU_PATH`, `./menu.json` is used when present,
    /// otherwise `menu.json` in the platform data directory.
    pub fn from_env() -> Result<Self, ValidationError> {
        let dirs = ProjectDirs::from("com", "bistro", "kiosk");
        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;

        if let Some(dirs) = dirs {
            if std::env::var("BISTRO_MENU_PATH").is_err() && !config.menu_path.exists() {
                config.menu_path = dirs.data_dir().join("menu.json");
            }
            if std::env::var("BISTRO_RECEIPT_DIR").is_err() {
                config.receipt_dir = dirs.data_dir().join("receipts");
            }
        }

        Ok(config)
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("BISTRO_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(path) = lookup("BISTRO_MENU_PATH") {
            config.menu_path = PathBuf::from(path);
        }

        if let Some(list) = lookup("BISTRO_DIRECT_CATEGORIES") {
            config.direct_priced_categories = list
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(count) = lookup("BISTRO_TABLE_COUNT") {
            let count = count.trim().parse::<u32>().map_err(|_| ValidationError::InvalidFormat {
                field: "BISTRO_TABLE_COUNT".to_string(),
                reason: "must be a whole number".to_string(),
            })?;
            config.table_count = validate_table_count(count)?;
        }

        if let Some(dir) = lookup("BISTRO_RECEIPT_DIR") {
            config.receipt_dir = PathBuf::from(dir);
        }

        if let Some(size) = lookup("BISTRO_QR_MODULE_SIZE") {
            if let Ok(size) = size.trim().parse::<u8>() {
                config.qr_module_size = size.clamp(1, 16);
            }
        }

        Ok(config)
    }

    pub fn receipt_dir(&self) -> &Path {
        &self.receipt_dir
    }
}
