// ⌚ Device Entity - one struct, two variants
//
// Shared fields live on `Device`, the variant-specific field lives in
// `DeviceKind`. Construction never fails: invalid input is truncated or
// replaced by a default. Setters never fail either: invalid input is ignored.

use crate::validation::{
    eq_ignore_case, is_above_minimum, is_valid_display_type, is_valid_length,
    is_valid_manufacturer, to_two_decimal_places, truncate, DEFAULT_DISPLAY_TYPE, DEFAULT_ID, DEFAULT_MANUFACTURER,
    MAX_ID_LEN, MAX_MATERIAL_LEN, MAX_MODEL_NAME_LEN, MAX_SIZE_LEN, MIN_PRICE,
};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// VARIANTS
// ============================================================================

/// Which kind of wearable a device is, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceVariant {
    SmartBand,
    SmartWatch,
}

impl DeviceVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceVariant::SmartBand => "SmartBand",
            DeviceVariant::SmartWatch => "SmartWatch",
        }
    }

    /// Yearly insurance cost as a fraction of the price
    pub fn insurance_rate(&self) -> f64 {
        match self {
            DeviceVariant::SmartBand => 0.07,
            DeviceVariant::SmartWatch => 0.06,
        }
    }

    pub fn connectivity(&self) -> &'static str {
        match self {
            DeviceVariant::SmartBand => "Connects to the internet via Companion App",
            DeviceVariant::SmartWatch => "Connects to the internet via bluetooth",
        }
    }
}

impl fmt::Display for DeviceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant payload
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceKind {
    SmartBand { heart_rate_monitor: bool },
    SmartWatch { display_type: String },
}

impl DeviceKind {
    pub fn variant(&self) -> DeviceVariant {
        match self {
            DeviceKind::SmartBand { .. } => DeviceVariant::SmartBand,
            DeviceKind::SmartWatch { .. } => DeviceVariant::SmartWatch,
        }
    }
}

// ============================================================================
// CONSTRUCTOR INPUT
// ============================================================================

/// Raw, unvalidated values for the shared fields
#[derive(Debug, Clone, Default)]
pub struct DeviceDetails {
    pub size: String,
    pub price: f64,
    pub manufacturer_name: String,
    pub material: String,
    pub model_name: String,
    /// `None` means "not supplied" and yields the default id
    pub id: Option<String>,
}

// ============================================================================
// DEVICE ENTITY
// ============================================================================

/// A wearable in the catalog.
///
/// Fields are private so every write goes through the validating setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    size: String,
    price: f64,
    manufacturer_name: String,
    material: String,
    model_name: String,
    id: String,
    kind: DeviceKind,
}

impl Device {
    /// Build a device, substituting defaults for anything invalid
    pub fn new(details: DeviceDetails, kind: DeviceKind) -> Self {
        let price = if is_above_minimum(details.price, MIN_PRICE) {
            details.price
        } else {
            tracing::warn!(price = details.price, "price below minimum, using default");
            MIN_PRICE
        };

        let manufacturer_name = if is_valid_manufacturer(&details.manufacturer_name) {
            details.manufacturer_name
        } else {
            tracing::warn!(
                manufacturer = %details.manufacturer_name,
                "unknown manufacturer, using default"
            );
            DEFAULT_MANUFACTURER.to_string()
        };

        let kind = match kind {
            DeviceKind::SmartWatch { display_type } if !is_valid_display_type(&display_type) => {
                tracing::warn!(display_type = %display_type, "unknown display type, using default");
                DeviceKind::SmartWatch {
                    display_type: DEFAULT_DISPLAY_TYPE.to_string(),
                }
            }
            other => other,
        };

        let id = match details.id {
            Some(id) => truncate(&id, MAX_ID_LEN),
            None => DEFAULT_ID.to_string(),
        };

        Device {
            size: truncate(&details.size, MAX_SIZE_LEN),
            price,
            manufacturer_name,
            material: truncate(&details.material, MAX_MATERIAL_LEN),
            model_name: truncate(&details.model_name, MAX_MODEL_NAME_LEN),
            id,
            kind,
        }
    }

    pub fn smart_band(
        size: &str,
        price: f64,
        manufacturer_name: &str,
        material: &str,
        model_name: &str,
        id: &str,
        heart_rate_monitor: bool,
    ) -> Self {
        Device::new(
            DeviceDetails::from_parts(size, price, manufacturer_name, material, model_name, id),
            DeviceKind::SmartBand { heart_rate_monitor },
        )
    }

    pub fn smart_watch(
        size: &str,
        price: f64,
        manufacturer_name: &str,
        material: &str,
        model_name: &str,
        id: &str,
        display_type: &str,
    ) -> Self {
        Device::new(
            DeviceDetails::from_parts(size, price, manufacturer_name, material, model_name, id),
            DeviceKind::SmartWatch {
                display_type: display_type.to_string(),
            },
        )
    }

    // ========================================================================
    // GETTERS
    // ========================================================================

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn manufacturer_name(&self) -> &str {
        &self.manufacturer_name
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    pub fn variant(&self) -> DeviceVariant {
        self.kind.variant()
    }

    /// `None` for SmartWatches
    pub fn heart_rate_monitor(&self) -> Option<bool> {
        match &self.kind {
            DeviceKind::SmartBand { heart_rate_monitor } => Some(*heart_rate_monitor),
            DeviceKind::SmartWatch { .. } => None,
        }
    }

    /// `None` for SmartBands
    pub fn display_type(&self) -> Option<&str> {
        match &self.kind {
            DeviceKind::SmartWatch { display_type } => Some(display_type),
            DeviceKind::SmartBand { .. } => None,
        }
    }

    /// Case-insensitive id comparison used by every catalog lookup
    pub fn has_id(&self, id: &str) -> bool {
        eq_ignore_case(&self.id, id)
    }

    // ========================================================================
    // SETTERS (reject instead of defaulting)
    // ========================================================================

    pub fn set_size(&mut self, size: &str) {
        if is_valid_length(size, MAX_SIZE_LEN) {
            self.size = size.to_string();
        }
    }

    pub fn set_price(&mut self, price: f64) {
        if is_above_minimum(price, MIN_PRICE) {
            self.price = price;
        }
    }

    pub fn set_manufacturer_name(&mut self, manufacturer_name: &str) {
        if is_valid_manufacturer(manufacturer_name) {
            self.manufacturer_name = manufacturer_name.to_string();
        }
    }

    pub fn set_material(&mut self, material: &str) {
        if is_valid_length(material, MAX_MATERIAL_LEN) {
            self.material = material.to_string();
        }
    }

    pub fn set_model_name(&mut self, model_name: &str) {
        if is_valid_length(model_name, MAX_MODEL_NAME_LEN) {
            self.model_name = model_name.to_string();
        }
    }

    pub fn set_id(&mut self, id: &str) {
        if is_valid_length(id, MAX_ID_LEN) {
            self.id = id.to_string();
        }
    }

    /// No-op on a SmartWatch
    pub fn set_heart_rate_monitor(&mut self, value: bool) {
        if let DeviceKind::SmartBand { heart_rate_monitor } = &mut self.kind {
            *heart_rate_monitor = value;
        }
    }

    /// No-op on a SmartBand or for an unknown display type
    pub fn set_display_type(&mut self, value: &str) {
        if let DeviceKind::SmartWatch { display_type } = &mut self.kind {
            if is_valid_display_type(value) {
                *display_type = value.to_string();
            }
        }
    }

    /// Rewrite every field from `other` through the setters.
    ///
    /// The variant field is only copied when both devices share a variant.
    pub fn apply_update(&mut self, other: &Device) {
        self.set_size(&other.size);
        self.set_price(other.price);
        self.set_manufacturer_name(&other.manufacturer_name);
        self.set_material(&other.material);
        self.set_model_name(&other.model_name);
        self.set_id(&other.id);

        match &other.kind {
            DeviceKind::SmartBand { heart_rate_monitor } => {
                self.set_heart_rate_monitor(*heart_rate_monitor)
            }
            DeviceKind::SmartWatch { display_type } => self.set_display_type(display_type),
        }
    }

    // ========================================================================
    // DERIVED VALUES
    // ========================================================================

    pub fn insurance_premium(&self) -> f64 {
        to_two_decimal_places(self.price * self.variant().insurance_rate())
    }

    pub fn connect_to_internet(&self) -> &'static str {
        self.variant().connectivity()
    }
}

impl DeviceDetails {
    pub fn from_parts(
        size: &str,
        price: f64,
        manufacturer_name: &str,
        material: &str,
        model_name: &str,
        id: &str,
    ) -> Self {
        DeviceDetails {
            size: size.to_string(),
            price,
            manufacturer_name: manufacturer_name.to_string(),
            material: material.to_string(),
            model_name: model_name.to_string(),
            id: Some(id.to_string()),
        }
    }
}

impl fmt::Display for Device {
    /// One-line summary used by every catalog report
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID {}, {} {} {}. Size {}, made of {}. Cost: €{:.2}. ",
            self.id,
            self.manufacturer_name,
            self.model_name,
            self.variant(),
            self.size,
            self.material,
            self.price
        )?;

        match &self.kind {
            DeviceKind::SmartBand { heart_rate_monitor } => {
                if *heart_rate_monitor {
                    f.write_str("Includes Heart Rate Monitor. ")?;
                } else {
                    f.write_str("No Heart Rate Monitor included. ")?;
                }
            }
            DeviceKind::SmartWatch { display_type } => {
                write!(f, "Display type: {}. ", display_type)?;
            }
        }

        write!(
            f,
            "Insurance: €{:.2} per year. {}.",
            self.insurance_premium(),
            self.connect_to_internet()
        )
    }
}
