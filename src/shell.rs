// 🖥️ Interactive Shell - numbered menus over the catalog engine
//
// Generic over the input and output handles so the menus can be driven by
// scripted input in tests. Every catalog interaction goes through the
// public `Catalog` API.

use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::entities::{Device, DeviceVariant};
use crate::validation::{
    eq_ignore_case, format_list, is_valid_display_type, is_valid_manufacturer, DISPLAY_TYPES,
    MANUFACTURER_NAMES,
};
use anyhow::Result;
use std::io::{BufRead, Write};

const MAIN_MENU: &str = "\
   |--------WearableDevice Store--------|
   |  1) WearableDevice CRUD Menu       |
   |  2) Reports MENU                   |
   |------------------------------------|
   |  3) Search WearableDevice Devices  |
   |  4) Sort WearableDevice Devices    |
   |------------------------------------|
   |  5) Save All                       |
   |  6) Load All                       |
   |  7) Export All to CSV              |
   |------------------------------------|
   |  0) Exit                           |
   |------------------------------------|
==>>  ";

const CRUD_MENU: &str = "\
   |-----WearableDevice CRUD Menu-----|
   |  1) ADD a WearableDevice         |
   |  2) LIST all WearableDevice      |
   |  3) UPDATE a WearableDevice      |
   |  4) DELETE a WearableDevice      |
   |----------------------------------|
   |  0) Return to main menu          |
   |----------------------------------|
==>>  ";

const REPORTS_MENU: &str = "\
   |--------------Wearable Device Reports Menu-------------|
   |  1) List all technology                               |
   |  2) List all SmartBands                               |
   |  3) List all SmartWatches                             |
   |  4) List all devices above a price                    |
   |  5) List all devices below a price                    |
   |  6) List the top five most expensive WearableDevices  |
   |  7) List the top five most expensive SmartBands       |
   |  8) List the top five most expensive SmartWatches     |
   |  9) List all devices for a chosen Manufacturer        |
   |-------------------------------------------------------|
   |  0) Return to main menu                               |
   |-------------------------------------------------------|
==>>  ";

const SEARCH_MENU: &str = "\
   |----WearableDevice Search Menu----|
   |  1) Search by size               |
   |  2) Search by material           |
   |  3) Search by screen type        |
   |  4) Search for heart monitors    |
   |----------------------------------|
   |  0) Return to main menu          |
   |----------------------------------|
==>>  ";

const SORT_MENU: &str = "\
   |-----WearableDevice Sort Menu-----|
   |  1) Sort by price ascending      |
   |  2) Sort by price descending     |
   |----------------------------------|
   |  0) Return to main menu          |
   |----------------------------------|
==>>  ";

const VARIANT_MENU: &str = "\
----------------------------
|  1) SmartBand            |
|  2) SmartWatch           |
---------------------------|
|  0) Return to CRUD Menu  |
==>> ";

/// Raised when the input stream runs dry; ends the session quietly
#[derive(Debug, thiserror::Error)]
#[error("end of input")]
struct EndOfInput;

pub struct Shell<R, W> {
    catalog: Catalog,
    config: CatalogConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(catalog: Catalog, config: CatalogConfig, input: R, output: W) -> Self {
        Shell {
            catalog,
            config,
            input,
            output,
        }
    }

    pub fn into_parts(self) -> (Catalog, W) {
        (self.catalog, self.output)
    }

    /// Main loop. Returns on option 0 or when input is exhausted.
    pub fn run(&mut self) -> Result<()> {
        match self.main_loop() {
            Err(err) if err.is::<EndOfInput>() => {
                tracing::debug!("input closed, leaving shell");
                Ok(())
            }
            other => other,
        }
    }

    fn main_loop(&mut self) -> Result<()> {
        loop {
            let option = self.read_int(MAIN_MENU)?;
            match option {
                0 => break,
                1 => self.crud_menu()?,
                2 => self.reports_menu()?,
                3 => self.search_menu()?,
                4 => self.sort_menu()?,
                5 => self.save()?,
                6 => self.load()?,
                7 => self.export_csv()?,
                other => writeln!(self.output, "Invalid option entered: {}", other)?,
            }
            self.read_line("\nPress enter key to continue...")?;
        }
        writeln!(self.output, "Exiting....")?;
        Ok(())
    }

    // ========================================================================
    // MENUS
    // ========================================================================

    fn crud_menu(&mut self) -> Result<()> {
        match self.read_int(CRUD_MENU)? {
            0 => {}
            1 => self.add_device()?,
            2 => writeln!(self.output, "{}", self.catalog.list_all())?,
            3 => self.update_device()?,
            4 => self.delete_device()?,
            other => writeln!(self.output, "Invalid option entered: {}", other)?,
        }
        Ok(())
    }

    fn reports_menu(&mut self) -> Result<()> {
        let top_n = self.config.top_n;
        match self.read_int(REPORTS_MENU)? {
            0 => {}
            1 => writeln!(self.output, "{}", self.catalog.list_all())?,
            2 => writeln!(
                self.output,
                "{}",
                self.catalog.list_by_variant(DeviceVariant::SmartBand)
            )?,
            3 => writeln!(
                self.output,
                "{}",
                self.catalog.list_by_variant(DeviceVariant::SmartWatch)
            )?,
            4 => {
                let price =
                    self.read_double("Enter a price to view WearableDevices above that price: ")?;
                writeln!(self.output, "{}", self.catalog.list_above_price(price))?;
            }
            5 => {
                let price =
                    self.read_double("Enter a price to view WearableDevices below that price: ")?;
                writeln!(self.output, "{}", self.catalog.list_below_price(price))?;
            }
            6 => {
                let lines = render_top(self.catalog.sort_and_top_n(top_n));
                write!(self.output, "{}", lines)?;
            }
            7 => {
                let lines = render_top(
                    self.catalog
                        .sort_and_top_n_by_variant(DeviceVariant::SmartBand, top_n),
                );
                write!(self.output, "{}", lines)?;
            }
            8 => {
                let lines = render_top(
                    self.catalog
                        .sort_and_top_n_by_variant(DeviceVariant::SmartWatch, top_n),
                );
                write!(self.output, "{}", lines)?;
            }
            9 => {
                let name = self.read_valid_manufacturer(
                    "Enter a manufacturer name from the following options to view WearableDevices made by that manufacturer: \n",
                )?;
                writeln!(self.output, "{}", self.catalog.list_by_manufacturer(&name))?;
            }
            other => writeln!(self.output, "Invalid option entered: {}", other)?,
        }
        Ok(())
    }

    fn search_menu(&mut self) -> Result<()> {
        match self.read_int(SEARCH_MENU)? {
            0 => {}
            1 => {
                let size = self.read_line("Please enter a size to search for: ")?;
                writeln!(self.output, "{}", self.catalog.search_by_size(&size))?;
            }
            2 => {
                let material = self.read_line("Please enter a material to search by: ")?;
                writeln!(self.output, "{}", self.catalog.search_by_material(&material))?;
            }
            3 => {
                let display_type =
                    self.read_valid_display_type("Please enter a screen type to search by. Options are: ")?;
                writeln!(
                    self.output,
                    "{}",
                    self.catalog.search_by_display_type(&display_type)
                )?;
            }
            4 => writeln!(self.output, "{}", self.catalog.search_for_heart_monitors())?,
            other => writeln!(self.output, "Invalid option entered: {}", other)?,
        }
        Ok(())
    }

    fn sort_menu(&mut self) -> Result<()> {
        match self.read_int(SORT_MENU)? {
            0 => {}
            1 => {
                self.catalog.sort_by_price_ascending();
                writeln!(self.output, "{}", self.catalog.list_all())?;
            }
            2 => {
                self.catalog.sort_by_price_descending();
                writeln!(self.output, "{}", self.catalog.list_all())?;
            }
            other => writeln!(self.output, "Invalid option entered: {}", other)?,
        }
        Ok(())
    }

    // ========================================================================
    // CRUD ACTIONS
    // ========================================================================

    fn add_device(&mut self) -> Result<()> {
        let variant = match self.read_int(&format!("Add a device:\n{}", VARIANT_MENU))? {
            1 => DeviceVariant::SmartBand,
            2 => DeviceVariant::SmartWatch,
            0 => return Ok(()),
            other => {
                writeln!(self.output, "Invalid option entered: {}", other)?;
                return Ok(());
            }
        };

        let manufacturer =
            self.read_valid_manufacturer("Please enter the manufacturer name from the following options: ")?;
        let model_name = self.read_line("Enter the model name: ")?;
        let price = self.read_double("Enter the price: ")?;
        let size = self.read_line("Enter the size: ")?;
        let material = self.read_line("Enter the material it is made of: ")?;
        let id = self.read_unique_id("Enter the ID: ", None)?;

        let device = match variant {
            DeviceVariant::SmartBand => {
                let monitor =
                    self.read_yes_no("Is this SmartBand also a heart monitor (y/n): ")?;
                Device::smart_band(&size, price, &manufacturer, &material, &model_name, &id, monitor)
            }
            DeviceVariant::SmartWatch => {
                let display_type = self
                    .read_valid_display_type("Please enter a display type from the following options: ")?;
                Device::smart_watch(
                    &size,
                    price,
                    &manufacturer,
                    &material,
                    &model_name,
                    &id,
                    &display_type,
                )
            }
        };

        if self.catalog.add(device) {
            writeln!(self.output, "WearableDevice added successfully")?;
        } else {
            writeln!(self.output, "Error: WearableDevice was not added")?;
        }
        Ok(())
    }

    fn update_device(&mut self) -> Result<()> {
        if self.catalog.count() == 0 {
            writeln!(self.output, "No WearableDevices added yet")?;
            return Ok(());
        }

        let variant = match self.read_int(&format!("Update a device:\n{}", VARIANT_MENU))? {
            1 => DeviceVariant::SmartBand,
            2 => DeviceVariant::SmartWatch,
            0 => return Ok(()),
            other => {
                writeln!(self.output, "Invalid option entered: {}", other)?;
                return Ok(());
            }
        };

        if self.catalog.count_by_variant(variant) == 0 {
            writeln!(self.output, "No {}s added yet", variant)?;
            return Ok(());
        }

        writeln!(self.output, "{}", self.catalog.list_by_variant(variant))?;
        let id = self.read_line(&format!("Enter the id of the {} to update ==> ", variant))?;

        let is_match = self
            .catalog
            .get_by_id(&id)
            .is_some_and(|d| d.variant() == variant);
        if !is_match {
            writeln!(self.output, "That is not a valid {} ID.", variant)?;
            return Ok(());
        }

        let new_id = self.read_unique_id("Enter the new id: ", Some(&id))?;
        let size = self.read_line("Enter the new size: ")?;
        let price = self.read_double("Enter the new price: ")?;
        let manufacturer = self
            .read_valid_manufacturer("Enter the new manufacturer name from the following options: ")?;
        let material = self.read_line("Enter the new material it is made of: ")?;
        let model_name = self.read_line("Enter the new model name: ")?;

        let replacement = match variant {
            DeviceVariant::SmartBand => {
                let monitor =
                    self.read_yes_no("Is this SmartBand also a heart monitor (y/n): ")?;
                Device::smart_band(&size, price, &manufacturer, &material, &model_name, &new_id, monitor)
            }
            DeviceVariant::SmartWatch => {
                let display_type =
                    self.read_valid_display_type("Enter the new display type from the following: ")?;
                Device::smart_watch(
                    &size,
                    price,
                    &manufacturer,
                    &material,
                    &model_name,
                    &new_id,
                    &display_type,
                )
            }
        };

        if self.catalog.update_by_id(&id, variant, &replacement) {
            writeln!(self.output, "WearableDevice updated successfully")?;
        } else {
            writeln!(self.output, "Error: WearableDevice was not updated")?;
        }
        Ok(())
    }

    fn delete_device(&mut self) -> Result<()> {
        writeln!(self.output, "{}", self.catalog.list_all())?;
        if self.catalog.count() == 0 {
            return Ok(());
        }

        let index = self.read_int("Enter the index of the WearableDevice to delete ==> ")?;
        let removed = usize::try_from(index)
            .ok()
            .and_then(|i| self.catalog.delete_by_index(i));

        match removed {
            Some(device) => writeln!(self.output, "Delete Successful! Deleted device: {}", device)?,
            None => writeln!(self.output, "Delete NOT Successful")?,
        }
        Ok(())
    }

    // ========================================================================
    // PERSISTENCE ACTIONS
    // ========================================================================

    fn save(&mut self) -> Result<()> {
        match self.catalog.save() {
            Ok(()) => writeln!(
                self.output,
                "Saved {} devices to {}",
                self.catalog.count(),
                self.catalog.file_name()
            )?,
            Err(err) => {
                tracing::error!(error = %err, "save failed");
                writeln!(self.output, "Error writing to file: {}", err)?;
            }
        }
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        match self.catalog.load() {
            Ok(()) => writeln!(
                self.output,
                "Loaded {} devices from {}",
                self.catalog.count(),
                self.catalog.file_name()
            )?,
            Err(err) => {
                tracing::error!(error = %err, "load failed");
                writeln!(self.output, "Error reading from file: {}", err)?;
            }
        }
        Ok(())
    }

    fn export_csv(&mut self) -> Result<()> {
        let path = self.config.csv_export_file.clone();
        match self.catalog.export_csv(&path) {
            Ok(count) => writeln!(
                self.output,
                "Exported {} devices to {}",
                count,
                path.display()
            )?,
            Err(err) => {
                tracing::error!(error = %err, "CSV export failed");
                writeln!(self.output, "Error writing to file: {}", err)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // INPUT HELPERS
    // ========================================================================

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    fn read_int(&mut self, prompt: &str) -> Result<i64> {
        loop {
            let line = self.read_line(prompt)?;
            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "\tEnter a number please.")?,
            }
        }
    }

    fn read_double(&mut self, prompt: &str) -> Result<f64> {
        loop {
            let line = self.read_line(prompt)?;
            match line.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => return Ok(value),
                _ => writeln!(self.output, "\tEnter a number please.")?,
            }
        }
    }

    /// 'y' or 'Y' is true, anything else false
    fn read_yes_no(&mut self, prompt: &str) -> Result<bool> {
        loop {
            let line = self.read_line(prompt)?;
            if let Some(c) = line.trim().chars().next() {
                return Ok(c.eq_ignore_ascii_case(&'y'));
            }
        }
    }

    fn read_valid_manufacturer(&mut self, prompt: &str) -> Result<String> {
        let options = format_list(&MANUFACTURER_NAMES);
        let mut name = self.read_line(&format!("{}{}: ", prompt, options))?;
        while !is_valid_manufacturer(&name) {
            name = self.read_line(&format!(
                "That was not a valid manufacturer name. Please pick one from the following options: {}: ",
                options
            ))?;
        }
        Ok(name)
    }

    fn read_valid_display_type(&mut self, prompt: &str) -> Result<String> {
        let options = format_list(&DISPLAY_TYPES);
        let mut display_type = self.read_line(&format!("{}{}: ", prompt, options))?;
        while !is_valid_display_type(&display_type) {
            display_type = self.read_line(&format!(
                "That was not a valid display type. Please pick one from the following options: {}: ",
                options
            ))?;
        }
        Ok(display_type)
    }

    /// Re-prompts until the id is unused. `current` is the id being
    /// replaced during an update and is always accepted.
    fn read_unique_id(&mut self, prompt: &str, current: Option<&str>) -> Result<String> {
        let mut id = self.read_line(prompt)?;
        loop {
            let keeps_current = current.is_some_and(|c| eq_ignore_case(c, &id));
            if keeps_current || self.catalog.is_valid_id(&id) {
                return Ok(id);
            }
            id = self.read_line("Error: ID already exists in the system. Please enter a unique ID: ")?;
        }
    }
}

/// One device per line, or the empty-catalog sentinel
fn render_top(top: Option<Vec<&Device>>) -> String {
    match top {
        Some(devices) => devices.iter().map(|d| format!("{}\n", d)).collect(),
        None => format!("{}\n", crate::catalog::NO_DEVICES),
    }
}
