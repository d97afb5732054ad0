// 💾 Persistence Adapter - catalog <-> JSON document on disk
//
// Records are rebuilt through the validating constructors on load, so a
// hand-edited file comes back truncated and defaulted like fresh input.

use crate::entities::{Device, DeviceDetails, DeviceKind};
use crate::error::{CatalogError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bumped only when the document layout changes incompatibly
pub const FORMAT_VERSION: u32 = 1;

// ============================================================================
// ON-DISK SCHEMA
// ============================================================================

/// Top-level document written by `save_devices`
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub device_count: usize,
    pub devices: Vec<DeviceRecord>,
}

/// One device, tagged with its variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DeviceRecord {
    SmartBand {
        #[serde(flatten)]
        base: BaseRecord,
        heart_rate_monitor: bool,
    },
    SmartWatch {
        #[serde(flatten)]
        base: BaseRecord,
        display_type: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub manufacturer_name: String,
    pub model_name: String,
    pub size: String,
    pub material: String,
    #[serde(serialize_with = "serialize_finite_price")]
    pub price: f64,
}

/// serde_json writes NaN and infinities as `null`, which would not load back
fn serialize_finite_price<S>(price: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if !price.is_finite() {
        return Err(serde::ser::Error::custom(format!("non-finite price {}", price)));
    }
    serializer.serialize_f64(*price)
}

impl From<&Device> for DeviceRecord {
    fn from(device: &Device) -> Self {
        let base = BaseRecord {
            id: Some(device.id().to_string()),
            manufacturer_name: device.manufacturer_name().to_string(),
            model_name: device.model_name().to_string(),
            size: device.size().to_string(),
            material: device.material().to_string(),
            price: device.price(),
        };

        match device.kind() {
            DeviceKind::SmartBand { heart_rate_monitor } => DeviceRecord::SmartBand {
                base,
                heart_rate_monitor: *heart_rate_monitor,
            },
            DeviceKind::SmartWatch { display_type } => DeviceRecord::SmartWatch {
                base,
                display_type: display_type.clone(),
            },
        }
    }
}

impl From<DeviceRecord> for Device {
    fn from(record: DeviceRecord) -> Self {
        let (base, kind) = match record {
            DeviceRecord::SmartBand {
                base,
                heart_rate_monitor,
            } => (base, DeviceKind::SmartBand { heart_rate_monitor }),
            DeviceRecord::SmartWatch { base, display_type } => {
                (base, DeviceKind::SmartWatch { display_type })
            }
        };

        Device::new(
            DeviceDetails {
                size: base.size,
                price: base.price,
                manufacturer_name: base.manufacturer_name,
                material: base.material,
                model_name: base.model_name,
                id: base.id,
            },
            kind,
        )
    }
}

// ============================================================================
// LOAD / SAVE
// ============================================================================

/// Write the whole catalog to `path`, replacing any previous content.
///
/// The document goes to a sibling temp file first and is then renamed over
/// `path`, so a failed write leaves the old file in place.
pub fn save_devices(path: &Path, devices: &[Device]) -> Result<()> {
    let document = CatalogDocument {
        format_version: FORMAT_VERSION,
        saved_at: Utc::now(),
        device_count: devices.len(),
        devices: devices.iter().map(DeviceRecord::from).collect(),
    };

    let json =
        serde_json::to_string_pretty(&document).map_err(|source| CatalogError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;

    let tmp_path = temp_path_for(path);
    if let Err(source) = fs::write(&tmp_path, json) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CatalogError::Io {
            path: tmp_path,
            source,
        });
    }

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CatalogError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    tracing::info!(path = %path.display(), count = devices.len(), "saved catalog");
    Ok(())
}

/// Read every device stored at `path`, in stored order
pub fn load_devices(path: &Path) -> Result<Vec<Device>> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document: CatalogDocument =
        serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if document.format_version != FORMAT_VERSION {
        return Err(CatalogError::UnsupportedFormat {
            found: document.format_version,
            expected: FORMAT_VERSION,
        });
    }

    if document.device_count != document.devices.len() {
        tracing::warn!(
            declared = document.device_count,
            actual = document.devices.len(),
            "device_count does not match stored records"
        );
    }

    let devices: Vec<Device> = document.devices.into_iter().map(Device::from).collect();

    tracing::info!(
        path = %path.display(),
        count = devices.len(),
        saved_at = %document.saved_at.to_rfc3339(),
        "loaded catalog"
    );
    Ok(devices)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

// ============================================================================
// CSV EXPORT
// ============================================================================

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Index")]
    index: usize,
    #[serde(rename = "Type")]
    device_type: &'static str,
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Manufacturer")]
    manufacturer: &'a str,
    #[serde(rename = "Model")]
    model: &'a str,
    #[serde(rename = "Size")]
    size: &'a str,
    #[serde(rename = "Material")]
    material: &'a str,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Heart_Rate_Monitor")]
    heart_rate_monitor: Option<bool>,
    #[serde(rename = "Display_Type")]
    display_type: Option<&'a str>,
    #[serde(rename = "Insurance_Premium")]
    insurance_premium: String,
}

/// Spreadsheet-friendly dump of the catalog in current order
pub fn export_csv(path: &Path, devices: &[Device]) -> Result<usize> {
    let csv_err = |source: csv::Error| CatalogError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;

    for (index, device) in devices.iter().enumerate() {
        writer
            .serialize(CsvRow {
                index,
                device_type: device.variant().as_str(),
                id: device.id(),
                manufacturer: device.manufacturer_name(),
                model: device.model_name(),
                size: device.size(),
                material: device.material(),
                price: format!("{:.2}", device.price()),
                heart_rate_monitor: device.heart_rate_monitor(),
                display_type: device.display_type(),
                insurance_premium: format!("{:.2}", device.insurance_premium()),
            })
            .map_err(csv_err)?;
    }

    writer.flush().map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), count = devices.len(), "exported catalog to CSV");
    Ok(devices.len())
}
