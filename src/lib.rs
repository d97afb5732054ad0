// Wearable Device Catalog - Core Library
// Exposes the catalog engine for the menu shell, the browser, and tests

pub mod validation;
pub mod entities;
pub mod error;
pub mod config;
pub mod store;
pub mod catalog;
pub mod shell;

// Re-export commonly used types
pub use entities::{Device, DeviceDetails, DeviceKind, DeviceVariant};
pub use catalog::{
    Catalog,
    NO_DEVICES, NO_SMART_BANDS, NO_SMART_WATCHES,
    NO_SEARCH_MATCHES, NO_WATCH_MATCHES, NO_BAND_MATCHES,
};
pub use config::{CatalogConfig, DEFAULT_TOP_N};
pub use error::CatalogError;
pub use store::{load_devices, save_devices, export_csv, FORMAT_VERSION};
pub use shell::Shell;
