// 📚 Catalog Engine - ordered, in-memory list of wearables
//
// Index-based operations depend on the current order, which changes on
// sort, top-N and delete. Absence is never an error: lookups return None,
// updates return false and reports return a sentinel message.

use crate::config::DEFAULT_TOP_N;
use crate::entities::{Device, DeviceVariant};
use crate::error::Result;
use crate::store;
use crate::validation::eq_ignore_case;
use std::path::{Path, PathBuf};

// ============================================================================
// SENTINEL MESSAGES
// ============================================================================

pub const NO_DEVICES: &str = "No WearableDevice Devices";
pub const NO_SMART_BANDS: &str = "No Smart Bands";
pub const NO_SMART_WATCHES: &str = "No Smart Watches";
pub const NO_SEARCH_MATCHES: &str = "No WearableDevices match your search";
pub const NO_WATCH_MATCHES: &str = "No SmartWatches match your search";
pub const NO_BAND_MATCHES: &str = "No SmartBands match your search";

// ============================================================================
// CATALOG
// ============================================================================

pub struct Catalog {
    devices: Vec<Device>,
    data_file: PathBuf,
}

impl Catalog {
    /// Empty catalog persisted to `data_file`
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Catalog {
            devices: Vec::new(),
            data_file: data_file.into(),
        }
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// File name of the data file, without directories
    pub fn file_name(&self) -> String {
        self.data_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    // ========================================================================
    // CREATE / DELETE
    // ========================================================================

    /// Append a device. Duplicate ids are not rejected here; callers check
    /// `is_valid_id` first.
    pub fn add(&mut self, device: Device) -> bool {
        tracing::debug!(id = %device.id(), variant = %device.variant(), "adding device");
        self.devices.push(device);
        true
    }

    pub fn delete_by_index(&mut self, index: usize) -> Option<Device> {
        if index < self.devices.len() {
            let removed = self.devices.remove(index);
            tracing::debug!(index, id = %removed.id(), "deleted device by index");
            Some(removed)
        } else {
            None
        }
    }

    pub fn delete_by_id(&mut self, id: &str) -> Option<Device> {
        let position = self.devices.iter().position(|d| d.has_id(id))?;
        tracing::debug!(id, position, "deleted device by id");
        Some(self.devices.remove(position))
    }

    // ========================================================================
    // READ
    // ========================================================================

    pub fn get_by_index(&self, index: usize) -> Option<&Device> {
        self.devices.get(index)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.has_id(id))
    }

    /// True when no device uses `id` (case-insensitive). Doubles as
    /// "id is free" and, negated, "id exists".
    pub fn is_valid_id(&self, id: &str) -> bool {
        !self.devices.iter().any(|d| d.has_id(id))
    }

    // ========================================================================
    // COUNTS
    // ========================================================================

    pub fn count(&self) -> usize {
        self.devices.len()
    }

    pub fn count_by_variant(&self, variant: DeviceVariant) -> usize {
        self.devices.iter().filter(|d| d.variant() == variant).count()
    }

    pub fn count_by_manufacturer(&self, manufacturer_name: &str) -> usize {
        self.devices
            .iter()
            .filter(|d| eq_ignore_case(d.manufacturer_name(), manufacturer_name))
            .count()
    }

    // ========================================================================
    // REPORTS
    // ========================================================================

    pub fn list_all(&self) -> String {
        self.report(|_| true, NO_DEVICES)
    }

    pub fn list_by_variant(&self, variant: DeviceVariant) -> String {
        let empty = match variant {
            DeviceVariant::SmartBand => NO_SMART_BANDS,
            DeviceVariant::SmartWatch => NO_SMART_WATCHES,
        };
        self.report(|d| d.variant() == variant, empty)
    }

    /// Devices priced strictly above `price`
    pub fn list_above_price(&self, price: f64) -> String {
        let empty = format!("No WearableDevice more expensive than: {}", format_price(price));
        self.report(|d| d.price() > price, &empty)
    }

    /// Devices priced strictly below `price`
    pub fn list_below_price(&self, price: f64) -> String {
        let empty = format!("No WearableDevice cheaper than: {}", format_price(price));
        self.report(|d| d.price() < price, &empty)
    }

    /// Lines carry no index prefix, unlike the other reports
    pub fn list_by_manufacturer(&self, manufacturer_name: &str) -> String {
        if self.devices.is_empty() {
            return NO_DEVICES.to_string();
        }

        let listing: String = self
            .devices
            .iter()
            .filter(|d| eq_ignore_case(d.manufacturer_name(), manufacturer_name))
            .map(|d| format!("{}\n", d))
            .collect();

        if listing.is_empty() {
            format!("No WearableDevices made by: {}", manufacturer_name)
        } else {
            listing
        }
    }

    // ========================================================================
    // SEARCH
    // ========================================================================

    pub fn search_by_size(&self, size: &str) -> String {
        let needle = size.to_uppercase();
        self.search(|d| d.size().to_uppercase().contains(&needle), NO_SEARCH_MATCHES)
    }

    pub fn search_by_material(&self, material: &str) -> String {
        let needle = material.to_uppercase();
        self.search(
            |d| d.material().to_uppercase().contains(&needle),
            NO_SEARCH_MATCHES,
        )
    }

    /// SmartWatches whose display type equals `display_type` (ignoring case)
    pub fn search_by_display_type(&self, display_type: &str) -> String {
        self.search(
            |d| {
                d.display_type()
                    .is_some_and(|t| eq_ignore_case(t, display_type))
            },
            NO_WATCH_MATCHES,
        )
    }

    pub fn search_for_heart_monitors(&self) -> String {
        self.search(|d| d.heart_rate_monitor() == Some(true), NO_BAND_MATCHES)
    }

    // ========================================================================
    // SORT / TOP N
    // ========================================================================

    pub fn sort_by_price_ascending(&mut self) {
        self.selection_sort(|candidate, best| candidate < best);
        tracing::debug!(count = self.devices.len(), "sorted by price ascending");
    }

    pub fn sort_by_price_descending(&mut self) {
        self.selection_sort(|candidate, best| candidate > best);
        tracing::debug!(count = self.devices.len(), "sorted by price descending");
    }

    /// The `n` most expensive devices.
    ///
    /// Sorts the whole catalog by descending price first, so stored order
    /// (and every index) changes as a side effect. `None` for an empty
    /// catalog.
    pub fn sort_and_top_n(&mut self, n: usize) -> Option<Vec<&Device>> {
        if self.devices.is_empty() {
            return None;
        }
        self.sort_by_price_descending();
        Some(self.devices.iter().take(n).collect())
    }

    /// Like `sort_and_top_n`, restricted to one variant
    pub fn sort_and_top_n_by_variant(
        &mut self,
        variant: DeviceVariant,
        n: usize,
    ) -> Option<Vec<&Device>> {
        if self.devices.is_empty() {
            return None;
        }
        self.sort_by_price_descending();
        Some(
            self.devices
                .iter()
                .filter(|d| d.variant() == variant)
                .take(n)
                .collect(),
        )
    }

    /// `sort_and_top_n` with the default report size
    pub fn sort_and_top_five(&mut self) -> Option<Vec<&Device>> {
        self.sort_and_top_n(DEFAULT_TOP_N)
    }

    // ========================================================================
    // UPDATE
    // ========================================================================

    /// Rewrite the first device matching `id` and `variant` from
    /// `replacement`, field by field through the device setters.
    ///
    /// An id that exists only as the other variant yields `false`.
    pub fn update_by_id(&mut self, id: &str, variant: DeviceVariant, replacement: &Device) -> bool {
        match self
            .devices
            .iter_mut()
            .find(|d| d.variant() == variant && d.has_id(id))
        {
            Some(device) => {
                device.apply_update(replacement);
                tracing::debug!(id, new_id = %device.id(), %variant, "updated device");
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Replace the catalog with the data file's content. On error the
    /// current devices are kept.
    pub fn load(&mut self) -> Result<()> {
        let devices = store::load_devices(&self.data_file)?;
        self.devices = devices;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        store::save_devices(&self.data_file, &self.devices)
    }

    pub fn export_csv(&self, path: &Path) -> Result<usize> {
        store::export_csv(path, &self.devices)
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    /// Indexed report; distinguishes an empty catalog from an empty result
    fn report<F>(&self, matches: F, no_matches: &str) -> String
    where
        F: Fn(&Device) -> bool,
    {
        if self.devices.is_empty() {
            return NO_DEVICES.to_string();
        }
        self.search(matches, no_matches)
    }

    /// Indexed report without the empty-catalog check
    fn search<F>(&self, matches: F, no_matches: &str) -> String
    where
        F: Fn(&Device) -> bool,
    {
        let listing: String = self
            .devices
            .iter()
            .enumerate()
            .filter(|&(_, d)| matches(d))
            .map(|(i, d)| format!("{}: {}\n", i, d))
            .collect();

        if listing.is_empty() {
            no_matches.to_string()
        } else {
            listing
        }
    }

    /// Selection sort on price. The first candidate that strictly beats the
    /// current best wins, so equal prices keep their relative order only by
    /// accident of the swaps.
    fn selection_sort<F>(&mut self, beats: F)
    where
        F: Fn(f64, f64) -> bool,
    {
        let len = self.devices.len();
        for i in 0..len.saturating_sub(1) {
            let mut best = i;
            for j in (i + 1)..len {
                if beats(self.devices[j].price(), self.devices[best].price()) {
                    best = j;
                }
            }
            self.devices.swap(i, best);
        }
    }
}

/// Whole prices keep a trailing ".0" (50.0, not 50)
fn format_price(price: f64) -> String {
    format!("{:?}", price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn band(id: &str, price: f64, manufacturer: &str, hrm: bool) -> Device {
        Device::smart_band("Medium", price, manufacturer, "Silicone", "Band", id, hrm)
    }

    fn watch(id: &str, price: f64, manufacturer: &str, display: &str) -> Device {
        Device::smart_watch("42mm", price, manufacturer, "Aluminium", "Watch", id, display)
    }

    /// Eight devices in a deliberately unsorted order
    fn populated() -> Catalog {
        let mut catalog = Catalog::new("unused.json");
        catalog.add(band("B1", 45.0, "FitBit", true));
        catalog.add(watch("W1", 399.0, "APPLE", "AMOLED"));
        catalog.add(band("B2", 25.0, "Whoop", false));
        catalog.add(watch("W2", 249.0, "Garmin", "TFT"));
        catalog.add(band("B3", 120.0, "SAMSUNG", true));
        catalog.add(watch("W3", 199.0, "SAMSUNG", "LCD"));
        catalog.add(band("B4", 60.0, "Garmin", false));
        catalog.add(watch("W4", 99.0, "FitBit", "LED"));
        catalog
    }

    fn prices(catalog: &Catalog) -> Vec<f64> {
        catalog.devices().iter().map(|d| d.price()).collect()
    }

    // ------------------------------------------------------------------------
    // CRUD
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_and_count() {
        let mut catalog = Catalog::new("unused.json");
        assert_eq!(catalog.count(), 0);

        assert!(catalog.add(band("B1", 45.0, "FitBit", true)));
        assert!(catalog.add(watch("W1", 399.0, "APPLE", "AMOLED")));

        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.count_by_variant(DeviceVariant::SmartBand), 1);
        assert_eq!(catalog.count_by_variant(DeviceVariant::SmartWatch), 1);
    }

    #[test]
    fn test_add_does_not_reject_duplicate_ids() {
        let mut catalog = Catalog::new("unused.json");
        catalog.add(band("abc", 45.0, "FitBit", true));

        assert!(!catalog.is_valid_id("abc"));
        assert!(!catalog.is_valid_id("ABC"));

        assert!(catalog.add(band("ABC", 50.0, "Whoop", false)));
        assert_eq!(catalog.count(), 2);
    }

    #[test]
    fn test_is_valid_id_flips_after_add() {
        let mut catalog = Catalog::new("unused.json");
        assert!(catalog.is_valid_id("NEW1"));

        catalog.add(band("new1", 45.0, "FitBit", true));
        assert!(!catalog.is_valid_id("NEW1"));
        assert!(catalog.is_valid_id("NEW2"));
    }

    #[test]
    fn test_id_lookups_fold_non_ascii_case() {
        let mut catalog = Catalog::new("unused.json");
        catalog.add(band("émile", 45.0, "FitBit", true));

        assert!(!catalog.is_valid_id("ÉMILE"));
        assert_eq!(catalog.get_by_id("ÉMILE").unwrap().price(), 45.0);
        assert!(catalog.update_by_id(
            "Émile",
            DeviceVariant::SmartBand,
            &band("émile", 55.0, "Whoop", false)
        ));
        assert_eq!(catalog.get_by_id("émile").unwrap().price(), 55.0);
        assert!(catalog.delete_by_id("ÉMILE").is_some());
        assert_eq!(catalog.count(), 0);
    }

    #[test]
    fn test_delete_by_index() {
        let mut catalog = populated();

        let removed = catalog.delete_by_index(1).unwrap();
        assert_eq!(removed.id(), "W1");
        assert_eq!(catalog.count(), 7);
        assert_eq!(catalog.get_by_index(1).unwrap().id(), "B2");

        assert!(catalog.delete_by_index(7).is_none());
        assert!(catalog.delete_by_index(100).is_none());
        assert_eq!(catalog.count(), 7);
    }

    #[test]
    fn test_delete_by_id_removes_first_match() {
        let mut catalog = populated();
        catalog.add(band("b1", 70.0, "Whoop", false));

        let removed = catalog.delete_by_id("B1").unwrap();
        assert_eq!(removed.price(), 45.0);
        assert_eq!(catalog.get_by_id("B1").unwrap().price(), 70.0);

        assert!(catalog.delete_by_id("NOPE").is_none());
    }

    #[test]
    fn test_get_by_index_and_id() {
        let catalog = populated();

        assert_eq!(catalog.get_by_index(0).unwrap().id(), "B1");
        assert!(catalog.get_by_index(8).is_none());
        assert_eq!(catalog.get_by_id("w2").unwrap().manufacturer_name(), "Garmin");
        assert!(catalog.get_by_id("W9").is_none());
    }

    #[test]
    fn test_count_by_manufacturer_ignores_case() {
        let catalog = populated();

        assert_eq!(catalog.count_by_manufacturer("samsung"), 2);
        assert_eq!(catalog.count_by_manufacturer("GARMIN"), 2);
        assert_eq!(catalog.count_by_manufacturer("Nokia"), 0);
    }

    // ------------------------------------------------------------------------
    // REPORTS
    // ------------------------------------------------------------------------

    #[test]
    fn test_empty_catalog_reports_sentinel() {
        let catalog = Catalog::new("unused.json");

        assert_eq!(catalog.list_all(), NO_DEVICES);
        assert_eq!(catalog.list_by_variant(DeviceVariant::SmartBand), NO_DEVICES);
        assert_eq!(catalog.list_by_variant(DeviceVariant::SmartWatch), NO_DEVICES);
        assert_eq!(catalog.list_above_price(10.0), NO_DEVICES);
        assert_eq!(catalog.list_below_price(10.0), NO_DEVICES);
        assert_eq!(catalog.list_by_manufacturer("APPLE"), NO_DEVICES);
    }

    #[test]
    fn test_list_all_format() {
        let mut catalog = Catalog::new("unused.json");
        let first = band("B1", 45.0, "FitBit", true);
        let second = watch("W1", 399.0, "APPLE", "AMOLED");
        catalog.add(first.clone());
        catalog.add(second.clone());

        assert_eq!(catalog.list_all(), format!("0: {}\n1: {}\n", first, second));
    }

    #[test]
    fn test_list_by_variant_keeps_catalog_indices() {
        let catalog = populated();
        let watches = catalog.list_by_variant(DeviceVariant::SmartWatch);

        let indices: Vec<&str> = watches
            .lines()
            .map(|line| line.split(':').next().unwrap())
            .collect();
        assert_eq!(indices, vec!["1", "3", "5", "7"]);
    }

    #[test]
    fn test_list_by_variant_without_matches() {
        let mut catalog = Catalog::new("unused.json");
        catalog.add(band("B1", 45.0, "FitBit", true));
        assert_eq!(catalog.list_by_variant(DeviceVariant::SmartWatch), NO_SMART_WATCHES);

        let mut catalog = Catalog::new("unused.json");
        catalog.add(watch("W1", 45.0, "FitBit", "LCD"));
        assert_eq!(catalog.list_by_variant(DeviceVariant::SmartBand), NO_SMART_BANDS);
    }

    #[test]
    fn test_price_reports_are_strict() {
        let catalog = populated();

        let above = catalog.list_above_price(249.0);
        assert_eq!(above.lines().count(), 1);
        assert!(above.starts_with("1: ID W1"));

        let below = catalog.list_below_price(45.0);
        assert_eq!(below.lines().count(), 1);
        assert!(below.starts_with("2: ID B2"));
    }

    #[test]
    fn test_price_reports_without_matches() {
        let catalog = populated();

        assert_eq!(
            catalog.list_above_price(1000.0),
            "No WearableDevice more expensive than: 1000.0"
        );
        assert_eq!(
            catalog.list_below_price(20.5),
            "No WearableDevice cheaper than: 20.5"
        );
    }

    #[test]
    fn test_list_by_manufacturer_omits_index() {
        let catalog = populated();
        let report = catalog.list_by_manufacturer("samsung");

        let expected = format!(
            "{}\n{}\n",
            catalog.get_by_id("B3").unwrap(),
            catalog.get_by_id("W3").unwrap()
        );
        assert_eq!(report, expected);
        assert_eq!(
            catalog.list_by_manufacturer("Nokia"),
            "No WearableDevices made by: Nokia"
        );
    }

    // ------------------------------------------------------------------------
    // SEARCH
    // ------------------------------------------------------------------------

    #[test]
    fn test_search_by_size_and_material() {
        let catalog = populated();

        assert_eq!(catalog.search_by_size("medium").lines().count(), 4);
        assert_eq!(catalog.search_by_size("42").lines().count(), 4);
        assert_eq!(catalog.search_by_material("ALU").lines().count(), 4);
        assert_eq!(catalog.search_by_material("wood"), NO_SEARCH_MATCHES);
    }

    #[test]
    fn test_search_on_empty_catalog_returns_no_match_sentinel() {
        let catalog = Catalog::new("unused.json");

        assert_eq!(catalog.search_by_size("M"), NO_SEARCH_MATCHES);
        assert_eq!(catalog.search_by_display_type("LCD"), NO_WATCH_MATCHES);
        assert_eq!(catalog.search_for_heart_monitors(), NO_BAND_MATCHES);
    }

    #[test]
    fn test_search_by_display_type_is_exact() {
        let catalog = populated();

        let led = catalog.search_by_display_type("led");
        assert_eq!(led.lines().count(), 1);
        assert!(led.starts_with("7: ID W4"));

        // "LED" must not match "AMOLED"
        assert!(!led.contains("W1"));
    }

    #[test]
    fn test_search_for_heart_monitors() {
        let catalog = populated();
        let report = catalog.search_for_heart_monitors();

        assert_eq!(report.lines().count(), 2);
        assert!(report.contains("0: ID B1"));
        assert!(report.contains("4: ID B3"));
    }

    // ------------------------------------------------------------------------
    // SORT / TOP N
    // ------------------------------------------------------------------------

    #[test]
    fn test_sort_ascending() {
        let mut catalog = populated();
        catalog.sort_by_price_ascending();

        let p = prices(&catalog);
        assert!(p.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(p[0], 25.0);
    }

    #[test]
    fn test_sort_descending() {
        let mut catalog = populated();
        catalog.sort_by_price_descending();

        let p = prices(&catalog);
        assert!(p.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(p[0], 399.0);
    }

    #[test]
    fn test_sort_empty_and_single() {
        let mut catalog = Catalog::new("unused.json");
        catalog.sort_by_price_ascending();
        catalog.sort_by_price_descending();

        catalog.add(band("B1", 45.0, "FitBit", true));
        catalog.sort_by_price_descending();
        assert_eq!(catalog.count(), 1);
    }

    #[test]
    fn test_top_five_of_eight() {
        let mut catalog = populated();

        let top: Vec<Device> = catalog
            .sort_and_top_five()
            .unwrap()
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(top.len(), 5);

        let lowest_returned = top.iter().map(|d| d.price()).fold(f64::MAX, f64::min);
        let excluded: Vec<f64> = catalog
            .devices()
            .iter()
            .filter(|d| !top.contains(d))
            .map(|d| d.price())
            .collect();
        assert_eq!(excluded.len(), 3);
        assert!(excluded.iter().all(|p| *p <= lowest_returned));
    }

    #[test]
    fn test_top_n_reorders_catalog() {
        let mut catalog = populated();
        catalog.sort_and_top_n(2);

        assert_eq!(catalog.get_by_index(0).unwrap().id(), "W1");
        assert!(prices(&catalog).windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_top_n_smaller_catalog_and_empty() {
        let mut catalog = Catalog::new("unused.json");
        assert!(catalog.sort_and_top_n(5).is_none());
        assert!(catalog
            .sort_and_top_n_by_variant(DeviceVariant::SmartBand, 5)
            .is_none());

        catalog.add(band("B1", 45.0, "FitBit", true));
        catalog.add(band("B2", 55.0, "FitBit", true));
        assert_eq!(catalog.sort_and_top_n(5).unwrap().len(), 2);
    }

    #[test]
    fn test_top_n_by_variant() {
        let mut catalog = populated();

        let bands: Vec<String> = catalog
            .sort_and_top_n_by_variant(DeviceVariant::SmartBand, 3)
            .unwrap()
            .iter()
            .map(|d| d.id().to_string())
            .collect();
        assert_eq!(bands, vec!["B3", "B4", "B1"]);

        let watches = catalog
            .sort_and_top_n_by_variant(DeviceVariant::SmartWatch, 5)
            .unwrap();
        assert_eq!(watches.len(), 4);
        assert!(watches.iter().all(|d| d.variant() == DeviceVariant::SmartWatch));
    }

    // ------------------------------------------------------------------------
    // UPDATE
    // ------------------------------------------------------------------------

    #[test]
    fn test_update_by_id_rewrites_all_fields() {
        let mut catalog = populated();
        let replacement = band("B1X", 75.0, "Garmin", false);

        assert!(catalog.update_by_id("b1", DeviceVariant::SmartBand, &replacement));

        let updated = catalog.get_by_index(0).unwrap();
        assert_eq!(updated, &replacement);
        assert!(catalog.is_valid_id("B1"));
        assert!(!catalog.is_valid_id("B1X"));
    }

    #[test]
    fn test_update_by_id_with_wrong_variant_fails() {
        let mut catalog = populated();
        let before: Vec<Device> = catalog.devices().to_vec();
        let replacement = watch("W1X", 75.0, "Garmin", "LED");

        assert!(!catalog.update_by_id("B1", DeviceVariant::SmartWatch, &replacement));
        assert!(!catalog.update_by_id("NOPE", DeviceVariant::SmartBand, &replacement));
        assert_eq!(catalog.devices(), &before[..]);
    }

    #[test]
    fn test_update_by_id_keeps_fields_the_setters_reject() {
        let mut catalog = populated();
        // Invalid manufacturer becomes "unknown", which set_manufacturer_name rejects
        let replacement = watch("W2", 300.0, "Nokia", "LCD");
        assert_eq!(replacement.manufacturer_name(), "unknown");

        assert!(catalog.update_by_id("W2", DeviceVariant::SmartWatch, &replacement));
        let updated = catalog.get_by_id("W2").unwrap();
        assert_eq!(updated.price(), 300.0);
        assert_eq!(updated.display_type(), Some("LCD"));
        assert_eq!(updated.manufacturer_name(), "Garmin");
    }

    // ------------------------------------------------------------------------
    // PERSISTENCE
    // ------------------------------------------------------------------------

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wearabledevices.json");

        let mut original = populated();
        original.data_file = path.clone();
        original.save().unwrap();

        let mut restored = Catalog::new(&path);
        restored.load().unwrap();

        assert_eq!(restored.devices(), original.devices());
        assert_eq!(restored.file_name(), "wearabledevices.json");
    }

    #[test]
    fn test_failed_load_keeps_current_devices() {
        let dir = TempDir::new().unwrap();
        let mut catalog = populated();
        catalog.data_file = dir.path().join("missing.json");

        assert!(catalog.load().is_err());
        assert_eq!(catalog.count(), 8);

        std::fs::write(&catalog.data_file, "not json").unwrap();
        assert!(catalog.load().is_err());
        assert_eq!(catalog.count(), 8);
    }

    #[test]
    fn test_export_csv_counts_rows() {
        let dir = TempDir::new().unwrap();
        let catalog = populated();

        let written = catalog.export_csv(&dir.path().join("out.csv")).unwrap();
        assert_eq!(written, 8);
    }
}
