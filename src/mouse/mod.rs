//! Mouse abstraction layer.
//!
//! A trait-based seam over the real HID backend and a recording mock,
//! enabling handler tests without hardware. The handle is owned by the
//! calling handler and released by drop on every path.

pub mod hid;
pub mod mapping;
pub mod mock;
pub mod profile;
pub mod settings;

pub use hid::{open_first_mouse, HidMouse};
pub use profile::{ConnectionType, Profile};

use crate::error::Result;

/// Battery reading from a device that has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryStatus {
    /// Charge level 0-100.
    pub level: u8,
    pub is_charging: bool,
}

/// Core mouse operations.
///
/// Mutating operations change the device's active settings; nothing is
/// committed to onboard memory until [`MouseOperations::save`] runs.
pub trait MouseOperations {
    /// Capability descriptor for this model.
    fn profile(&self) -> &'static Profile;

    /// Product string as reported by the transport, annotations included.
    fn raw_name(&self) -> &str;

    fn vendor_id(&self) -> u16;

    fn product_id(&self) -> u16;

    /// Battery status; `None` when the model has no battery.
    fn battery(&mut self) -> Result<Option<BatteryStatus>>;

    /// Apply a full DPI preset list through the combined setter.
    fn set_sensitivity(&mut self, presets: &[u16]) -> Result<()>;

    /// Apply one DPI value to a single preset slot (1-based).
    fn set_sensitivity_slot(&mut self, slot: u8, dpi: u16) -> Result<()>;

    fn set_polling_rate(&mut self, hz: u16) -> Result<()>;

    /// Apply a serialized button-mapping string (see [`mapping`]).
    fn set_buttons_mapping(&mut self, mapping: &str) -> Result<()>;

    /// Restore factory defaults on the device.
    fn reset_settings(&mut self) -> Result<()>;

    /// Commit the active settings to onboard memory.
    fn save(&mut self) -> Result<()>;
}

// Handlers consume the handle by value so it drops on every path; tests
// hand in `&mut MockMouse` instead and inspect the recorded operations after.
impl<M: MouseOperations + ?Sized> MouseOperations for &mut M {
    fn profile(&self) -> &'static Profile {
        (**self).profile()
    }

    fn raw_name(&self) -> &str {
        (**self).raw_name()
    }

    fn vendor_id(&self) -> u16 {
        (**self).vendor_id()
    }

    fn product_id(&self) -> u16 {
        (**self).product_id()
    }

    fn battery(&mut self) -> Result<Option<BatteryStatus>> {
        (**self).battery()
    }

    fn set_sensitivity(&mut self, presets: &[u16]) -> Result<()> {
        (**self).set_sensitivity(presets)
    }

    fn set_sensitivity_slot(&mut self, slot: u8, dpi: u16) -> Result<()> {
        (**self).set_sensitivity_slot(slot, dpi)
    }

    fn set_polling_rate(&mut self, hz: u16) -> Result<()> {
        (**self).set_polling_rate(hz)
    }

    fn set_buttons_mapping(&mut self, mapping: &str) -> Result<()> {
        (**self).set_buttons_mapping(mapping)
    }

    fn reset_settings(&mut self) -> Result<()> {
        (**self).reset_settings()
    }

    fn save(&mut self) -> Result<()> {
        (**self).save()
    }
}

/// Strip `(...)` and `[...]` annotation spans from a product name.
///
/// `detect` reports "SteelSeries Aerox 3 Wireless" for
/// "SteelSeries Aerox 3 Wireless (2.4 GHz)"; connection-type classification
/// uses the unstripped name.
pub fn strip_annotations(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut depth = 0usize;
    for ch in name.chars() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_annotations_removes_spans() {
        assert_eq!(
            strip_annotations("SteelSeries Aerox 3 Wireless (2.4 GHz)"),
            "SteelSeries Aerox 3 Wireless"
        );
        assert_eq!(strip_annotations("Rival 3 [wired]"), "Rival 3");
        assert_eq!(strip_annotations("Plain Name"), "Plain Name");
    }

    #[test]
    fn strip_annotations_handles_unbalanced_input() {
        assert_eq!(strip_annotations("Name (half open"), "Name");
        assert_eq!(strip_annotations("Name) stray"), "Name stray");
    }
}
