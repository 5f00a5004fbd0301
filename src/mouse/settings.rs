//! Persisted per-device settings.
//!
//! Mice cannot reliably be read back, so every successful apply records the
//! values here and the `settings` command reads them back. One TOML document
//! per device keyed by vendor/product ID. Older per-slot models store
//! `sensitivity1`..`sensitivityN` keys; combined models store a single
//! `sensitivity` array.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use toml::value::{Table, Value};
use tracing::{debug, warn};

use crate::error::{DeskError, Result, ResultExt};

/// Highest per-slot key probed during read-back.
const MAX_SLOTS: u8 = 5;

/// One device's saved settings document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDoc {
    table: Table,
}

impl SettingsDoc {
    /// Sensitivity presets, from the combined `sensitivity` array or the
    /// per-slot `sensitivity1`..`sensitivity5` keys.
    pub fn sensitivity(&self) -> Vec<u16> {
        if let Some(Value::Array(values)) = self.table.get("sensitivity") {
            let presets: Vec<u16> = values
                .iter()
                .filter_map(Value::as_integer)
                .filter_map(|v| u16::try_from(v).ok())
                .collect();
            if !presets.is_empty() {
                return presets;
            }
        }

        let mut presets = Vec::new();
        for slot in 1..=MAX_SLOTS {
            match self.table.get(&format!("sensitivity{slot}")) {
                Some(Value::Integer(v)) => match u16::try_from(*v) {
                    Ok(dpi) => presets.push(dpi),
                    Err(_) => break,
                },
                _ => break,
            }
        }
        presets
    }

    pub fn polling_rate(&self) -> Option<u16> {
        self.table
            .get("polling_rate")
            .and_then(Value::as_integer)
            .and_then(|v| u16::try_from(v).ok())
    }

    pub fn buttons_mapping(&self) -> Option<&str> {
        self.table.get("buttons_mapping").and_then(Value::as_str)
    }

    pub fn set_sensitivity_combined(&mut self, presets: &[u16]) {
        // drop any stale per-slot keys first
        for slot in 1..=MAX_SLOTS {
            self.table.remove(&format!("sensitivity{slot}"));
        }
        let values = presets.iter().map(|&v| Value::Integer(i64::from(v))).collect();
        self.table.insert("sensitivity".to_string(), Value::Array(values));
    }

    pub fn set_sensitivity_slot(&mut self, slot: u8, dpi: u16) {
        self.table.remove("sensitivity");
        self.table
            .insert(format!("sensitivity{slot}"), Value::Integer(i64::from(dpi)));
    }

    pub fn set_polling_rate(&mut self, hz: u16) {
        self.table
            .insert("polling_rate".to_string(), Value::Integer(i64::from(hz)));
    }

    pub fn set_buttons_mapping(&mut self, mapping: &str) {
        self.table
            .insert("buttons_mapping".to_string(), Value::String(mapping.to_string()));
    }

    fn stamp(&mut self) {
        self.table
            .insert("saved_at".to_string(), Value::String(Utc::now().to_rfc3339()));
    }
}

/// Filesystem store of [`SettingsDoc`]s, one file per device.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    /// Store rooted at an explicit directory (tests use a tempdir).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the user's config directory (`.../mousectl/`).
    pub fn default_location() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| DeskError::Other("cannot resolve config directory".to_string()))?;
        Ok(Self::new(base.join("mousectl")))
    }

    pub fn path_for(&self, vendor_id: u16, product_id: u16) -> PathBuf {
        self.dir.join(format!("{vendor_id:04x}_{product_id:04x}.toml"))
    }

    /// Load a device's document. Missing or unreadable files yield an empty
    /// document; the caller sees factory defaults.
    pub fn load(&self, vendor_id: u16, product_id: u16) -> SettingsDoc {
        let path = self.path_for(vendor_id, product_id);
        match fs::read_to_string(&path) {
            Ok(text) => match text.parse::<Table>() {
                Ok(table) => SettingsDoc { table },
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt settings file, ignoring");
                    SettingsDoc::default()
                }
            },
            Err(_) => SettingsDoc::default(),
        }
    }

    /// Write a device's document, stamping `saved_at`.
    pub fn save(&self, vendor_id: u16, product_id: u16, doc: &SettingsDoc) -> Result<()> {
        let mut doc = doc.clone();
        doc.stamp();

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(vendor_id, product_id);
        let text = toml::to_string_pretty(&Value::Table(doc.table))
            .with_context(|| "failed to encode settings")?;
        fs::write(&path, text)?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Drop a device's document (factory reset).
    pub fn clear(&self, vendor_id: u16, product_id: u16) -> Result<()> {
        let path = self.path_for(vendor_id, product_id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_sensitivity_roundtrip() {
        let mut doc = SettingsDoc::default();
        doc.set_sensitivity_combined(&[800, 1600, 3200]);
        assert_eq!(doc.sensitivity(), vec![800, 1600, 3200]);
    }

    #[test]
    fn per_slot_sensitivity_roundtrip() {
        let mut doc = SettingsDoc::default();
        doc.set_sensitivity_slot(1, 400);
        doc.set_sensitivity_slot(2, 800);
        assert_eq!(doc.sensitivity(), vec![400, 800]);
    }

    #[test]
    fn slot_probe_stops_at_first_gap() {
        let mut doc = SettingsDoc::default();
        doc.set_sensitivity_slot(1, 400);
        doc.set_sensitivity_slot(3, 1200);
        assert_eq!(doc.sensitivity(), vec![400]);
    }

    #[test]
    fn combined_write_clears_slot_keys() {
        let mut doc = SettingsDoc::default();
        doc.set_sensitivity_slot(1, 400);
        doc.set_sensitivity_combined(&[800]);
        assert_eq!(doc.sensitivity(), vec![800]);
        assert!(doc.table.get("sensitivity1").is_none());
    }

    #[test]
    fn store_load_missing_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(tmp.path());
        let doc = store.load(0x1038, 0x1824);
        assert!(doc.sensitivity().is_empty());
        assert!(doc.polling_rate().is_none());
        assert!(doc.buttons_mapping().is_none());
    }

    #[test]
    fn store_save_load_clear() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(tmp.path());

        let mut doc = SettingsDoc::default();
        doc.set_polling_rate(500);
        doc.set_buttons_mapping("buttons(button1=LeftShift; layout=qwerty)");
        store.save(0x1038, 0x1824, &doc).unwrap();

        let loaded = store.load(0x1038, 0x1824);
        assert_eq!(loaded.polling_rate(), Some(500));
        assert_eq!(
            loaded.buttons_mapping(),
            Some("buttons(button1=LeftShift; layout=qwerty)")
        );

        store.clear(0x1038, 0x1824).unwrap();
        assert!(store.load(0x1038, 0x1824).polling_rate().is_none());
        // clearing twice is fine
        store.clear(0x1038, 0x1824).unwrap();
    }

    #[test]
    fn corrupt_file_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(tmp.path());
        std::fs::write(store.path_for(1, 2), "not [valid toml").unwrap();
        assert_eq!(store.load(1, 2), SettingsDoc::default());
    }
}
