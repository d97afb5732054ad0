// ⚙️ Configuration - where the catalog lives and report sizing
//
// Everything has a working default; environment variables override it.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "wearabledevices.json";
pub const DEFAULT_CSV_FILE: &str = "wearabledevices.csv";
pub const DEFAULT_TOP_N: usize = 5;

pub const ENV_DATA_FILE: &str = "WEARABLE_CATALOG_FILE";
pub const ENV_CSV_FILE: &str = "WEARABLE_CATALOG_CSV";
pub const ENV_TOP_N: &str = "WEARABLE_CATALOG_TOP_N";

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// JSON document used by load/save
    pub data_file: PathBuf,

    /// Target of the CSV export
    pub csv_export_file: PathBuf,

    /// Size of the "most expensive" reports
    pub top_n: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            csv_export_file: PathBuf::from(DEFAULT_CSV_FILE),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by the `WEARABLE_CATALOG_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but with an injectable lookup (keeps tests off the
    /// process environment)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CatalogConfig::default();

        if let Some(path) = lookup(ENV_DATA_FILE).filter(|v| !v.trim().is_empty()) {
            config.data_file = PathBuf::from(path);
        }

        if let Some(path) = lookup(ENV_CSV_FILE).filter(|v| !v.trim().is_empty()) {
            config.csv_export_file = PathBuf::from(path);
        }

        if let Some(raw) = lookup(ENV_TOP_N) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.top_n = n,
                _ => tracing::warn!(value = %raw, "ignoring invalid {}", ENV_TOP_N),
            }
        }

        config
    }
}
