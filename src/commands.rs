//! Command handlers for `mousectl`.
//!
//! Each handler consumes the acquisition outcome, performs its work through
//! the [`MouseOperations`] seam, and returns a JSON-serializable result with
//! a success flag and an error string (empty on success). Device failures
//! never escape as process errors; they land in the `error` field. The
//! handle is dropped, and with it released, on every path.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{DeskError, Result};
use crate::mouse::profile::{ConnectionType, SensitivitySpec};
use crate::mouse::settings::SettingsStore;
use crate::mouse::{mapping, strip_annotations, MouseOperations};

// === Result objects ===

/// Device identity block of `detect`.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceIdentity {
    pub name: String,
    pub pid: String,
    pub vendor_id: String,
    pub product_id: String,
    pub connection_type: ConnectionType,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self {
            name: String::new(),
            pid: String::new(),
            vendor_id: String::new(),
            product_id: String::new(),
            connection_type: ConnectionType::Unknown,
        }
    }
}

/// Battery block shared by `detect` and `battery`.
#[derive(Debug, Clone, Serialize)]
pub struct BatteryInfo {
    pub supported: bool,
    pub level: u8,
    pub is_charging: bool,
}

impl Default for BatteryInfo {
    fn default() -> Self {
        // Level defaults to full when the device reports nothing.
        Self { supported: false, level: 100, is_charging: false }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SensitivityRange {
    pub min: u16,
    pub max: u16,
}

impl Default for SensitivityRange {
    fn default() -> Self {
        Self { min: 100, max: 18000 }
    }
}

/// Capability block of `detect`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Capabilities {
    pub buttons: Vec<String>,
    pub has_sensitivity: bool,
    pub has_polling_rate: bool,
    pub has_buttons: bool,
    pub sensitivity_range: SensitivityRange,
    pub polling_rates: Vec<u16>,
}

/// Result of `detect`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectResult {
    pub available: bool,
    pub error: String,
    pub needs_udev_install: bool,
    pub device: DeviceIdentity,
    pub battery: BatteryInfo,
    pub capabilities: Capabilities,
}

/// Result of `battery`.
#[derive(Debug, Clone, Serialize)]
pub struct BatteryResult {
    pub supported: bool,
    pub level: u8,
    pub is_charging: bool,
    pub error: String,
}

impl Default for BatteryResult {
    fn default() -> Self {
        Self { supported: false, level: 100, is_charging: false, error: String::new() }
    }
}

/// Result of the mutating commands.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyResult {
    pub success: bool,
    pub error: String,
}

impl ApplyResult {
    fn from_outcome(outcome: Result<()>) -> Self {
        match outcome {
            Ok(()) => Self { success: true, error: String::new() },
            Err(e) => Self { success: false, error: e.to_string() },
        }
    }
}

/// Settings block of `settings`.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentSettings {
    pub sensitivity: Vec<u16>,
    pub polling_rate: u16,
    pub buttons: BTreeMap<String, String>,
}

impl Default for CurrentSettings {
    fn default() -> Self {
        Self { sensitivity: Vec::new(), polling_rate: 1000, buttons: BTreeMap::new() }
    }
}

/// Result of `settings`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsResult {
    pub success: bool,
    pub error: String,
    pub settings: CurrentSettings,
}

// === Input parsing ===

/// Parse a comma-separated DPI list like `800,1600,3200`.
pub fn parse_dpi_list(input: &str) -> Result<Vec<u16>> {
    input
        .split(',')
        .map(|part| part.trim().parse::<u16>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| DeskError::InvalidDpiList { input: input.to_string() })
}

/// Parse the `buttons` argument: a JSON object of button -> action.
pub fn parse_button_arg(input: &str) -> Result<BTreeMap<String, String>> {
    serde_json::from_str(input)
        .map_err(|_| DeskError::InvalidButtonMapping { input: input.to_string() })
}

// === Handlers ===

/// Detect the connected mouse and report identity, battery and capabilities.
pub fn cmd_detect<M: MouseOperations>(acquired: Result<M>) -> DetectResult {
    let mut result = DetectResult::default();

    let mut mouse = match acquired {
        Ok(mouse) => mouse,
        Err(e) => {
            result.needs_udev_install = matches!(e, DeskError::NoMouseFound);
            result.error = e.to_string();
            return result;
        }
    };

    let profile = mouse.profile();
    result.available = true;
    result.device = DeviceIdentity {
        name: strip_annotations(mouse.raw_name()),
        pid: format!("{:04x}_{:04x}", mouse.vendor_id(), mouse.product_id()),
        vendor_id: format!("{:04x}", mouse.vendor_id()),
        product_id: format!("{:04x}", mouse.product_id()),
        connection_type: ConnectionType::classify(mouse.raw_name()),
    };

    // Battery telemetry is best-effort during detection.
    if let Ok(Some(battery)) = mouse.battery() {
        result.battery =
            BatteryInfo { supported: true, level: battery.level, is_charging: battery.is_charging };
    }

    result.capabilities = Capabilities {
        buttons: profile.buttons.iter().map(ToString::to_string).collect(),
        has_sensitivity: profile.has_sensitivity(),
        has_polling_rate: profile.has_polling_rate(),
        has_buttons: profile.has_buttons(),
        sensitivity_range: profile.sensitivity.map_or_else(SensitivityRange::default, |spec| {
            SensitivityRange { min: spec.bounds().min(), max: spec.bounds().max() }
        }),
        polling_rates: profile.polling_rates.to_vec(),
    };

    result
}

/// Report battery status.
pub fn cmd_battery<M: MouseOperations>(acquired: Result<M>) -> BatteryResult {
    let mut result = BatteryResult::default();

    let mut mouse = match acquired {
        Ok(mouse) => mouse,
        Err(e) => {
            result.error = e.to_string();
            return result;
        }
    };

    match mouse.battery() {
        Ok(Some(battery)) => {
            result.supported = true;
            result.level = battery.level;
            result.is_charging = battery.is_charging;
        }
        Ok(None) => {}
        Err(e) => result.error = e.to_string(),
    }

    result
}

/// Apply DPI presets from a comma-separated list.
pub fn cmd_set_sensitivity<M: MouseOperations>(
    acquired: Result<M>,
    store: &SettingsStore,
    presets_arg: &str,
) -> ApplyResult {
    ApplyResult::from_outcome(try_set_sensitivity(acquired, store, presets_arg))
}

fn try_set_sensitivity<M: MouseOperations>(
    acquired: Result<M>,
    store: &SettingsStore,
    presets_arg: &str,
) -> Result<()> {
    let presets = parse_dpi_list(presets_arg)?;
    let mut mouse = acquired?;
    let profile = mouse.profile();
    let (vendor_id, product_id) = (mouse.vendor_id(), mouse.product_id());
    let mut doc = store.load(vendor_id, product_id);

    match profile.sensitivity {
        Some(SensitivitySpec::Combined { .. }) => {
            mouse.set_sensitivity(&presets)?;
            doc.set_sensitivity_combined(&presets);
        }
        Some(SensitivitySpec::PerSlot { slots, .. }) => {
            let mut applied = 0u8;
            for (i, &dpi) in presets.iter().take(usize::from(slots)).enumerate() {
                #[allow(clippy::cast_possible_truncation)] // bounded by slot count
                let slot = i as u8 + 1;
                mouse.set_sensitivity_slot(slot, dpi)?;
                doc.set_sensitivity_slot(slot, dpi);
                applied += 1;
            }
            if applied == 0 {
                return Err(DeskError::Unsupported { operation: "sensitivity adjustment" });
            }
        }
        None => return Err(DeskError::Unsupported { operation: "sensitivity adjustment" }),
    }

    mouse.save()?;
    store.save(vendor_id, product_id, &doc)?;
    debug!(presets = ?presets, "sensitivity applied");
    Ok(())
}

/// Apply a polling rate in Hz.
pub fn cmd_set_polling_rate<M: MouseOperations>(
    acquired: Result<M>,
    store: &SettingsStore,
    hz: u16,
) -> ApplyResult {
    ApplyResult::from_outcome(try_set_polling_rate(acquired, store, hz))
}

fn try_set_polling_rate<M: MouseOperations>(
    acquired: Result<M>,
    store: &SettingsStore,
    hz: u16,
) -> Result<()> {
    let mut mouse = acquired?;
    if !mouse.profile().has_polling_rate() {
        return Err(DeskError::Unsupported { operation: "polling rate adjustment" });
    }
    let (vendor_id, product_id) = (mouse.vendor_id(), mouse.product_id());

    mouse.set_polling_rate(hz)?;
    mouse.save()?;

    let mut doc = store.load(vendor_id, product_id);
    doc.set_polling_rate(hz);
    store.save(vendor_id, product_id, &doc)?;
    debug!(hz, "polling rate applied");
    Ok(())
}

/// Apply button mappings from a JSON object argument.
pub fn cmd_set_buttons<M: MouseOperations>(
    acquired: Result<M>,
    store: &SettingsStore,
    mappings_arg: &str,
) -> ApplyResult {
    ApplyResult::from_outcome(try_set_buttons(acquired, store, mappings_arg))
}

fn try_set_buttons<M: MouseOperations>(
    acquired: Result<M>,
    store: &SettingsStore,
    mappings_arg: &str,
) -> Result<()> {
    let mappings = parse_button_arg(mappings_arg)?;
    let mut mouse = acquired?;

    // Key combinations are rejected before anything touches the device.
    let mapping_str = mapping::serialize_mapping(&mappings)?;

    if !mouse.profile().has_buttons() {
        return Err(DeskError::Unsupported { operation: "button mapping" });
    }
    let (vendor_id, product_id) = (mouse.vendor_id(), mouse.product_id());

    mouse.set_buttons_mapping(&mapping_str)?;
    mouse.save()?;

    let mut doc = store.load(vendor_id, product_id);
    doc.set_buttons_mapping(&mapping_str);
    store.save(vendor_id, product_id, &doc)?;
    debug!(mapping = %mapping_str, "button mapping applied");
    Ok(())
}

/// Restore factory defaults.
pub fn cmd_reset<M: MouseOperations>(acquired: Result<M>, store: &SettingsStore) -> ApplyResult {
    ApplyResult::from_outcome(try_reset(acquired, store))
}

fn try_reset<M: MouseOperations>(acquired: Result<M>, store: &SettingsStore) -> Result<()> {
    let mut mouse = acquired?;
    let (vendor_id, product_id) = (mouse.vendor_id(), mouse.product_id());

    mouse.reset_settings()?;
    mouse.save()?;
    store.clear(vendor_id, product_id)?;
    debug!("factory defaults restored");
    Ok(())
}

/// Read back the last-applied settings.
pub fn cmd_get_settings<M: MouseOperations>(
    acquired: Result<M>,
    store: &SettingsStore,
) -> SettingsResult {
    let mut result = SettingsResult::default();

    let mouse = match acquired {
        Ok(mouse) => mouse,
        Err(e) => {
            result.error = e.to_string();
            return result;
        }
    };

    let doc = store.load(mouse.vendor_id(), mouse.product_id());
    result.settings.sensitivity = doc.sensitivity();
    result.settings.polling_rate = doc.polling_rate().unwrap_or(1000);
    result.settings.buttons = doc.buttons_mapping().map(mapping::parse_mapping).unwrap_or_default();
    result.success = true;

    result
}
